use tracing_subscriber::EnvFilter;
use workroom::{config::Config, App};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // read first so RUST_LOG can come from .env
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("workroom=debug,tower_http=debug")),
        )
        .init();

    App::with_config(config).await?.serve().await
}
