//! Server construction: wires adapters to services and starts Actix.

mod config;

pub use config::AppConfig;

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::domain::auth::TokenIssuer;
use crate::domain::{AuthService, CountryService, StateService, UserService};
use crate::inbound::http;
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    DbPool, DieselCountryRepository, DieselStateRepository, DieselUserRepository, PoolConfig,
};

/// Build the HTTP handler state from a database pool and the process
/// secret's token issuer.
pub fn build_http_state(pool: DbPool, issuer: TokenIssuer) -> HttpState {
    let issuer = Arc::new(issuer);
    let country_repository = Arc::new(DieselCountryRepository::new(pool.clone()));
    let state_repository = Arc::new(DieselStateRepository::new(pool.clone()));
    let user_repository = Arc::new(DieselUserRepository::new(pool));

    let country_service = Arc::new(CountryService::new(country_repository));
    let state_service = Arc::new(StateService::new(state_repository));
    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let auth_service = Arc::new(AuthService::new(user_repository, (*issuer).clone()));

    HttpState {
        countries: country_service.clone(),
        countries_command: country_service,
        states: state_service.clone(),
        states_command: state_service,
        users: user_service.clone(),
        registration: user_service,
        login: auth_service,
        token_issuer: issuer,
    }
}

/// Construct the pool, wire the services, and bind the HTTP server.
pub async fn run(config: AppConfig) -> std::io::Result<Server> {
    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(std::io::Error::other)?;
    let issuer = TokenIssuer::new(&config.secret);
    let state = web::Data::new(build_http_state(pool, issuer));

    info!(addr = %config.bind_addr, "starting http server");
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(http::configure)
    })
    .bind(config.bind_addr)?
    .run();
    Ok(server)
}
