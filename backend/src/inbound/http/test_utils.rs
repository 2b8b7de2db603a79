//! Shared fixtures for HTTP handler tests.

use std::sync::Arc;

use actix_web::http::header;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::User;
use crate::domain::auth::{ProcessSecret, TokenIssuer};
use crate::domain::ports::{
    MockCountriesCommand, MockCountriesQuery, MockLoginService, MockRegistrationService,
    MockStatesCommand, MockStatesQuery, MockUsersQuery,
};
use crate::inbound::http::state::HttpState;

/// Per-test state with unconfigured mocks; tests replace the ports they
/// exercise.
pub fn test_state() -> HttpState {
    HttpState {
        countries: Arc::new(MockCountriesQuery::new()),
        countries_command: Arc::new(MockCountriesCommand::new()),
        states: Arc::new(MockStatesQuery::new()),
        states_command: Arc::new(MockStatesCommand::new()),
        users: Arc::new(MockUsersQuery::new()),
        registration: Arc::new(MockRegistrationService::new()),
        login: Arc::new(MockLoginService::new()),
        token_issuer: Arc::new(TokenIssuer::new(&ProcessSecret::from_value(
            "test signing secret",
        ))),
    }
}

/// A persisted user with fixture credential bytes.
pub fn sample_user() -> User {
    User {
        id: 7,
        uuid: Uuid::new_v4(),
        username: "ada".into(),
        password_hash: vec![1; 64],
        password_salt: vec![2; 64],
        first_name: "Ada".into(),
        middle_name: None,
        last_name: "Lovelace".into(),
        email: "ada@example.net".into(),
        registered_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// An `Authorization` header pair carrying a freshly issued token for
/// [`sample_user`].
pub fn bearer_header(issuer: &TokenIssuer) -> (header::HeaderName, String) {
    let token = issuer
        .issue(&sample_user())
        .into_element()
        .expect("token for fixture user");
    (header::AUTHORIZATION, format!("Bearer {token}"))
}
