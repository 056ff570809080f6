use storefront::server::{config::Config, startup};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!("Server stopped: {:?}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), storefront::server::error::Error> {
    let db = startup::connect_to_database(&config).await?;
    startup::start_scheduler(&config, db.clone()).await?;
    startup::serve(&config, db).await
}
