//! Users API handlers.
//!
//! ```text
//! GET /api/v1/users
//! GET /api/v1/users/{uuid}
//! ```
//!
//! Both endpoints require a bearer token issued by the login endpoint.
//! Responses carry user snapshots, never credential material.

use actix_web::{HttpRequest, get, web};
use uuid::Uuid;

use crate::domain::{Error, UserSnapshot};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_bearer;
use crate::inbound::http::state::HttpState;

/// List registered users.
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    request: HttpRequest,
) -> ApiResult<web::Json<Vec<UserSnapshot>>> {
    require_bearer(&request, &state.token_issuer)?;
    let users = state.users.list_users().await?;
    Ok(web::Json(
        users.iter().map(UserSnapshot::from).collect(),
    ))
}

/// Fetch one user by their external identifier.
#[get("/users/{uuid}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<UserSnapshot>> {
    require_bearer(&request, &state.token_issuer)?;
    let uuid = path.into_inner();
    let user = state
        .users
        .get_user(uuid)
        .await?
        .ok_or_else(|| Error::not_found(format!("no user found with uuid {uuid}")))?;
    Ok(web::Json(UserSnapshot::from(&user)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUsersQuery;
    use crate::inbound::http::test_utils::{bearer_header, sample_user, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::Value;
    use std::sync::Arc;

    fn test_app(
        users: MockUsersQuery,
    ) -> (
        App<
            impl actix_web::dev::ServiceFactory<
                actix_web::dev::ServiceRequest,
                Config = (),
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
                InitError = (),
            >,
        >,
        (actix_web::http::header::HeaderName, String),
    ) {
        let mut state = test_state();
        state.users = Arc::new(users);
        let header = bearer_header(&state.token_issuer);
        let app = App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").service(list_users).service(get_user));
        (app, header)
    }

    #[actix_web::test]
    async fn list_requires_a_bearer_token() {
        let (app, _header) = test_app(MockUsersQuery::new());
        let app = actix_test::init_service(app).await;
        let request = actix_test::TestRequest::get()
            .uri("/api/v1/users")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn list_returns_snapshots_without_credentials() {
        let mut users = MockUsersQuery::new();
        users
            .expect_list_users()
            .return_once(|| Ok(vec![sample_user()]));

        let (app, header) = test_app(users);
        let app = actix_test::init_service(app).await;
        let request = actix_test::TestRequest::get()
            .uri("/api/v1/users")
            .insert_header(header)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = actix_test::read_body(response).await;
        let text = std::str::from_utf8(&body).expect("utf8 body");
        assert!(text.contains("\"username\":\"ada\""));
        assert!(!text.contains("password"));
    }

    #[actix_web::test]
    async fn get_of_unknown_uuid_is_not_found() {
        let mut users = MockUsersQuery::new();
        users.expect_get_user().return_once(|_| Ok(None));

        let (app, header) = test_app(users);
        let app = actix_test::init_service(app).await;
        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{}", Uuid::new_v4()))
            .insert_header(header)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn get_returns_a_camel_case_snapshot() {
        let mut users = MockUsersQuery::new();
        users
            .expect_get_user()
            .return_once(|_| Ok(Some(sample_user())));

        let (app, header) = test_app(users);
        let app = actix_test::init_service(app).await;
        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{}", Uuid::new_v4()))
            .insert_header(header)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("firstName").and_then(Value::as_str),
            Some("Ada")
        );
        assert!(body.get("first_name").is_none());
    }
}
