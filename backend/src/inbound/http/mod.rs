//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod countries;
pub mod envelope;
pub mod error;
pub mod health;
pub mod login;
pub mod registration;
pub mod state;
pub mod states;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use actix_web::web;

/// Mount every endpoint under the `/api/v1` scope.
///
/// The caller supplies [`state::HttpState`] via `app_data`. Login and
/// registration are the only anonymous endpoints besides the health
/// probe; every resource handler verifies a bearer token itself.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health)
            .service(login::login)
            .service(registration::register)
            .service(users::list_users)
            .service(users::get_user)
            .service(countries::list_countries)
            .service(countries::get_country)
            .service(countries::create_country)
            .service(countries::update_country)
            .service(countries::delete_country)
            .service(states::list_states)
            .service(states::get_state)
            .service(states::create_state)
            .service(states::update_state)
            .service(states::delete_state),
    );
}
