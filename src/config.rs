use crate::error::{config_error, env_error, GridResult};
use crate::utils::time::GridZone;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use url::Url;

/// Optional file overriding the grid layout
pub const GRID_CONFIG_PATH: &str = "config/grid.toml";

/// Shape of the rendered grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    /// First slot of the day (inclusive)
    pub day_start_hour: u32,
    /// Hour the last slot ends at (exclusive)
    pub day_end_hour: u32,
    /// Length of one slot in minutes
    pub slot_minutes: u32,
    /// Number of classroom columns shown on one page
    pub columns_per_page: usize,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            day_start_hour: 7,
            day_end_hour: 18,
            slot_minutes: 30,
            columns_per_page: 10,
        }
    }
}

impl GridLayout {
    /// Reject layouts that cannot produce a grid
    pub fn validate(&self) -> GridResult<()> {
        if self.day_end_hour > 24 {
            return Err(config_error("day_end_hour must be at most 24"));
        }
        if self.day_start_hour >= self.day_end_hour {
            return Err(config_error("day_start_hour must be before day_end_hour"));
        }
        if self.slot_minutes == 0 {
            return Err(config_error("slot_minutes must be positive"));
        }
        if self.columns_per_page == 0 {
            return Err(config_error("columns_per_page must be positive"));
        }
        Ok(())
    }
}

/// Main configuration structure for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint returning the list of classroom identifiers
    pub classrooms_url: Option<String>,
    /// Endpoint returning per-classroom calendar events
    pub calendar_url: Option<String>,
    /// IANA timezone the grid is drawn in, system local time when unset
    pub timezone: Option<String>,
    /// Grid layout
    pub grid: GridLayout,
    /// Seconds between automatic page changes
    pub page_interval_secs: u64,
    /// Seconds between availability polls
    pub refresh_interval_secs: u64,
    /// Timeout for a single endpoint request
    pub http_timeout_secs: u64,
    /// Address the web server binds to
    pub bind_addr: String,
    /// Port the web server listens on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            classrooms_url: None,
            calendar_url: None,
            timezone: None,
            grid: GridLayout::default(),
            page_interval_secs: 30,
            refresh_interval_secs: 300,
            http_timeout_secs: 10,
            bind_addr: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> GridResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        Self::load_with(Path::new(GRID_CONFIG_PATH))
    }

    /// Build the configuration from the process environment and an optional layout file
    pub fn load_with(grid_path: &Path) -> GridResult<Self> {
        let defaults = Config::default();

        // File values form the base, environment wins
        let mut grid = match fs::read_to_string(grid_path) {
            Ok(content) => toml::from_str::<GridLayout>(&content)?,
            Err(_) => GridLayout::default(),
        };
        grid.day_start_hour = env_parse("DAY_START_HOUR", grid.day_start_hour)?;
        grid.day_end_hour = env_parse("DAY_END_HOUR", grid.day_end_hour)?;
        grid.slot_minutes = env_parse("SLOT_MINUTES", grid.slot_minutes)?;
        grid.columns_per_page = env_parse("COLUMNS_PER_PAGE", grid.columns_per_page)?;

        let config = Config {
            classrooms_url: env_url("CLASSROOMS_API_URL")?,
            calendar_url: env_url("CALENDAR_API_URL")?,
            timezone: env_optional("TIMEZONE"),
            grid,
            page_interval_secs: env_parse("PAGE_INTERVAL_SECS", defaults.page_interval_secs)?,
            refresh_interval_secs: env_parse(
                "REFRESH_INTERVAL_SECS",
                defaults.refresh_interval_secs,
            )?,
            http_timeout_secs: env_parse("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            bind_addr: env_optional("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: env_parse("PORT", defaults.port)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check values that cannot be expressed by the field types alone
    pub fn validate(&self) -> GridResult<()> {
        self.grid.validate()?;
        self.zone()?;
        if self.page_interval_secs == 0 {
            return Err(config_error("page_interval_secs must be positive"));
        }
        if self.refresh_interval_secs == 0 {
            return Err(config_error("refresh_interval_secs must be positive"));
        }
        Ok(())
    }

    /// Timezone the grid is evaluated in
    pub fn zone(&self) -> GridResult<GridZone> {
        match self.timezone.as_deref() {
            Some(name) => GridZone::named(name),
            None => Ok(GridZone::Local),
        }
    }
}

/// Read a variable, treating an empty value as unset
fn env_optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Read and parse a variable, falling back to `default` when unset
fn env_parse<T: FromStr>(key: &str, default: T) -> GridResult<T> {
    match env_optional(key) {
        Some(value) => value.parse::<T>().map_err(|_| env_error(key)),
        None => Ok(default),
    }
}

/// Read an endpoint URL; unset is fine, malformed is not
fn env_url(key: &str) -> GridResult<Option<String>> {
    env_optional(key).map(|raw| check_url(key, raw)).transpose()
}

fn check_url(key: &str, raw: String) -> GridResult<String> {
    Url::parse(&raw).map_err(|e| config_error(&format!("{} is not a valid URL: {}", key, e)))?;
    Ok(raw)
}
