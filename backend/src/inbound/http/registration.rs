//! Registration API handler.
//!
//! ```text
//! POST /api/v1/registration
//! ```
//!
//! The plaintext password is hashed by the registration service; the
//! response carries a snapshot of the stored user, never the credentials.

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::{Error, Registration, UserSnapshot};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{EnvelopeBody, unpack};
use crate::inbound::http::state::HttpState;

/// Registration request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
}

impl RegistrationRequest {
    fn try_into_registration(self) -> ApiResult<Registration> {
        let username = self.username.trim().to_owned();
        if username.is_empty() {
            return Err(Error::invalid_request("username must not be empty"));
        }
        if self.password.is_empty() {
            return Err(Error::invalid_request("password must not be empty"));
        }
        if self.email.trim().is_empty() {
            return Err(Error::invalid_request("email must not be empty"));
        }
        Ok(Registration {
            username,
            password: Zeroizing::new(self.password),
            first_name: self.first_name,
            middle_name: self.middle_name,
            last_name: self.last_name,
            email: self.email,
        })
    }
}

/// Register a new user.
#[post("/registration")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegistrationRequest>,
) -> ApiResult<HttpResponse> {
    let registration = payload.into_inner().try_into_registration()?;
    if state
        .registration
        .username_exists(&registration.username)
        .await?
    {
        return Err(Error::conflict(format!(
            "the username {} is already registered",
            registration.username
        )));
    }

    let outcome = state.registration.register(registration).await;
    let body: EnvelopeBody<UserSnapshot> = unpack(
        outcome,
        |user| UserSnapshot::from(&user),
        Error::invalid_request,
    )?;
    Ok(HttpResponse::Created().json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Outcome;
    use crate::domain::ports::MockRegistrationService;
    use crate::inbound::http::test_utils::{sample_user, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn request_body() -> Value {
        json!({
            "username": "ada",
            "password": "s3cret",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.net"
        })
    }

    fn test_app(
        registration: MockRegistrationService,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let mut state = test_state();
        state.registration = Arc::new(registration);
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").service(register))
    }

    #[actix_web::test]
    async fn registration_returns_a_snapshot_envelope() {
        let mut registration = MockRegistrationService::new();
        registration
            .expect_username_exists()
            .return_once(|_| Ok(false));
        registration
            .expect_register()
            .withf(|r| r.username == "ada" && r.password.as_str() == "s3cret")
            .return_once(|_| Outcome::success(sample_user()));

        let app = actix_test::init_service(test_app(registration)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/registration")
            .set_json(request_body())
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["element"]["username"], "ada");
        assert!(body["element"].get("passwordHash").is_none());
    }

    #[actix_web::test]
    async fn duplicate_usernames_are_rejected_with_conflict() {
        let mut registration = MockRegistrationService::new();
        registration
            .expect_username_exists()
            .return_once(|_| Ok(true));

        let app = actix_test::init_service(test_app(registration)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/registration")
            .set_json(request_body())
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn blank_passwords_never_reach_the_service() {
        let app = actix_test::init_service(test_app(MockRegistrationService::new())).await;
        let mut body = request_body();
        body["password"] = json!("");
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/registration")
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
