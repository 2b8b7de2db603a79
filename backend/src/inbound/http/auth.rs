//! Authentication helpers used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! bearer-token extraction and verification here.

use actix_web::HttpRequest;
use actix_web::http::header;

use crate::domain::auth::TokenIssuer;
use crate::domain::{Error, UserSnapshot};

use super::ApiResult;

/// Extract and verify the bearer token on `request`.
///
/// Returns the authenticated user's snapshot, or an unauthorised error when
/// the header is absent, malformed, or the token fails verification.
pub fn require_bearer(request: &HttpRequest, issuer: &TokenIssuer) -> ApiResult<UserSnapshot> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("authorization header must use the Bearer scheme"))?;
    issuer.verify(token.trim())
}
