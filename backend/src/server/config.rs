//! Process configuration loaded from the environment.

use std::net::SocketAddr;

use crate::domain::Error;
use crate::domain::auth::ProcessSecret;

/// Environment variable holding the token signing secret.
pub const SECRET_VAR: &str = "GAZETTEER_PRIVATE_KEY";
/// Environment variable holding the PostgreSQL connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Environment variable overriding the listen address.
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Validated application configuration.
///
/// Loading fails fast: a missing secret or database URL aborts start-up
/// instead of deferring the fault to the first request.
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub secret: ProcessSecret,
}

impl AppConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        let bind_addr = parse_bind_addr(std::env::var(BIND_ADDR_VAR).ok())?;
        let database_url = std::env::var(DATABASE_URL_VAR).map_err(|_| {
            Error::configuration(format!("environment variable {DATABASE_URL_VAR} is not set"))
        })?;
        let secret = ProcessSecret::from_env(SECRET_VAR)?;
        Ok(Self {
            bind_addr,
            database_url,
            secret,
        })
    }
}

fn parse_bind_addr(value: Option<String>) -> Result<SocketAddr, Error> {
    let raw = value.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    raw.parse()
        .map_err(|_| Error::configuration(format!("{BIND_ADDR_VAR} is not a socket address: {raw}")))
}
