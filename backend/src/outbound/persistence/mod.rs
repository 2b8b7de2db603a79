//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.

mod diesel_country_repository;
mod diesel_error_mapping;
mod diesel_state_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_country_repository::DieselCountryRepository;
pub use diesel_state_repository::DieselStateRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
