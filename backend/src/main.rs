//! Backend entry-point: loads configuration and starts the HTTP server.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use gazetteer::server::{AppConfig, run};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let server = run(config).await?;
    server.await
}
