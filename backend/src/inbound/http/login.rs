//! Login API handler.
//!
//! ```text
//! POST /api/v1/auth/login {"username":"ada","password":"s3cret"}
//! ```
//!
//! A successful login responds with an envelope carrying the user snapshot
//! and a signed bearer token. Unknown users and wrong passwords both map
//! to 401 without distinguishing which check failed.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, LoginCredentials, LoginValidationError, UserSnapshot};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{EnvelopeBody, unpack};
use crate::inbound::http::state::HttpState;

/// Login request body.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login payload: the identity and its access token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTokenDto {
    pub user: UserSnapshot,
    pub token: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => {
            Error::invalid_request("username must not be empty")
        }
        LoginValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
        }
    }
}

/// Authenticate credentials and mint a bearer token.
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_login_validation_error)?;

    let outcome = state.login.authenticate(&credentials).await;
    let body: EnvelopeBody<UserTokenDto> = unpack(
        outcome,
        |authenticated| UserTokenDto {
            user: UserSnapshot::from(&authenticated.user),
            token: authenticated.token,
        },
        Error::unauthorized,
    )?;
    Ok(HttpResponse::Ok().json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Outcome;
    use crate::domain::ports::{AuthenticatedUser, MockLoginService};
    use crate::inbound::http::test_utils::{sample_user, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::Value;
    use std::sync::Arc;

    fn test_app(
        login_service: MockLoginService,
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
        state.login = Arc::new(login_service);
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").service(login))
    }

    #[actix_web::test]
    async fn login_success_carries_the_snapshot_and_token() {
        let mut service = MockLoginService::new();
        service.expect_authenticate().return_once(|_| {
            Outcome::success(AuthenticatedUser {
                user: sample_user(),
                token: "header.claims.signature".into(),
            })
        });

        let app = actix_test::init_service(test_app(service)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(LoginRequest {
                username: "ada".into(),
                password: "s3cret".into(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["element"]["user"]["username"], "ada");
        assert_eq!(body["element"]["token"], "header.claims.signature");
    }

    #[actix_web::test]
    async fn rejected_credentials_map_to_unauthorised() {
        let mut service = MockLoginService::new();
        service
            .expect_authenticate()
            .return_once(|_| Outcome::failure("the provided password is not valid"));

        let app = actix_test::init_service(test_app(service)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(LoginRequest {
                username: "ada".into(),
                password: "wrong".into(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("the provided password is not valid")
        );
    }

    #[actix_web::test]
    async fn blank_usernames_are_rejected_before_the_service_runs() {
        let app = actix_test::init_service(test_app(MockLoginService::new())).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(LoginRequest {
                username: "   ".into(),
                password: "s3cret".into(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
