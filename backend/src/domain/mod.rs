//! Domain layer: transport-agnostic types, use-case services, and ports.

pub mod auth;
mod auth_service;
mod country;
mod country_service;
mod error;
mod outcome;
pub mod ports;
mod reconcile;
mod state_service;
mod user;
mod user_service;

pub use auth_service::AuthService;
pub use country::{Country, CountryRef, GeoValidationError, State, StateDraft, StateRecord};
pub use country_service::CountryService;
pub use error::{Error, ErrorCode, ErrorValidationError};
pub use outcome::Outcome;
pub use reconcile::ReconcilePlan;
pub use state_service::StateService;
pub use user::{
    LoginCredentials, LoginValidationError, NewUser, Registration, User, UserSnapshot,
};
pub use user_service::UserService;
