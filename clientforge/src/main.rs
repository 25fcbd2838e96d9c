use clientforge::{Result, run};
use clientforge_core::clientforge_log;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    clientforge_log!("", "tracing.log");

    // RUST_LOG=debug for per-file output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting clientforge");
    if let Err(e) = run() {
        error!("Client generation failed: {}", e);
        return Err(e);
    }
    info!("Client generation completed successfully");
    Ok(())
}
