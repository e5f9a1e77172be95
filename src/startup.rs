use crate::components::{AvailabilityFeed, ComponentManager, PageRotation};
use crate::config::Config;
use crate::dashboard::DashboardState;
use crate::error::{config_error, other_error, Error};
use crate::shutdown;
use crate::web::{router, AppState};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| other_error(&format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Start the background components and serve the grid until a shutdown signal
pub async fn start_server(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let (addr, columns_per_page) = {
        let config_read = config.read().await;
        let ip: IpAddr = config_read
            .bind_addr
            .parse()
            .map_err(|_| config_error(&format!("Invalid BIND_ADDR: {}", config_read.bind_addr)))?;
        (
            SocketAddr::new(ip, config_read.port),
            config_read.grid.columns_per_page,
        )
    };

    if config.read().await.classrooms_url.is_none() {
        info!("CLASSROOMS_API_URL not set, classroom list will be empty");
    }
    if config.read().await.calendar_url.is_none() {
        info!("CALENDAR_API_URL not set, calendar data will be empty");
    }

    let dashboard = DashboardState::shared(columns_per_page);

    // Initialize component manager
    let mut component_manager = ComponentManager::new(Arc::clone(&config));
    component_manager.register(AvailabilityFeed::new());
    component_manager.register(PageRotation::new());
    let component_manager = Arc::new(component_manager);

    component_manager.init_all(Arc::clone(&dashboard)).await?;

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Spawn signal handler task
    let shutdown_components = Arc::clone(&component_manager);
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_components).await;
    });

    let app = router(AppState {
        config: Arc::clone(&config),
        dashboard,
    });

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(Error::from)?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown_recv.await;
            info!("Received shutdown signal, stopping web server...");
        })
        .await
        .map_err(Error::from)?;

    info!("Web server stopped");
    Ok(())
}
