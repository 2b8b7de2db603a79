//! Liveness probe endpoint.

use actix_web::{HttpResponse, get};
use serde_json::json;

/// Report process liveness. Does not touch the database.
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test as actix_test};
    use serde_json::Value;

    #[actix_web::test]
    async fn health_reports_ok() {
        let app = actix_test::init_service(App::new().service(health)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health").to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["status"], "ok");
    }
}
