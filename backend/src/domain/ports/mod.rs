//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod countries_command;
mod countries_query;
mod country_repository;
mod login_service;
mod registration_service;
mod state_repository;
mod states_command;
mod states_query;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use countries_command::MockCountriesCommand;
pub use countries_command::CountriesCommand;
#[cfg(test)]
pub use countries_query::MockCountriesQuery;
pub use countries_query::CountriesQuery;
#[cfg(test)]
pub use country_repository::MockCountryRepository;
pub use country_repository::{CountryPersistenceError, CountryRepository};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{AuthenticatedUser, LoginService};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use state_repository::MockStateRepository;
pub use state_repository::{StatePersistenceError, StateRepository};
#[cfg(test)]
pub use states_command::MockStatesCommand;
pub use states_command::StatesCommand;
#[cfg(test)]
pub use states_query::MockStatesQuery;
pub use states_query::StatesQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
