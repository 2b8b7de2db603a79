//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::auth::TokenIssuer;
use crate::domain::ports::{
    CountriesCommand, CountriesQuery, LoginService, RegistrationService, StatesCommand,
    StatesQuery, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub countries: Arc<dyn CountriesQuery>,
    pub countries_command: Arc<dyn CountriesCommand>,
    pub states: Arc<dyn StatesQuery>,
    pub states_command: Arc<dyn StatesCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub token_issuer: Arc<TokenIssuer>,
}
