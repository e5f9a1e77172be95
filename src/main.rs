use classroomview::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting classroomview");

    // Load configuration
    let config = startup::load_config().await?;

    // Serve the grid
    startup::start_server(config).await
}
