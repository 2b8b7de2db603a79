//! States API handlers for the standalone states resource.
//!
//! ```text
//! GET    /api/v1/states
//! GET    /api/v1/states/{uuid}
//! POST   /api/v1/states
//! PUT    /api/v1/states/{uuid}
//! DELETE /api/v1/states/{uuid}
//! ```
//!
//! Every endpoint requires a bearer token. Unlike the nested collection on
//! a country, each state here carries a summary of its owning country, and
//! the submitted payload names the owner by uuid.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, GeoValidationError, StateDraft, StateRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_bearer;
use crate::inbound::http::envelope::{EnvelopeBody, unpack};
use crate::inbound::http::state::HttpState;

/// Owning country summary embedded in a state response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySummaryDto {
    pub uuid: Uuid,
    pub name: String,
}

/// A state as returned by the standalone resource.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRecordDto {
    pub id: i32,
    pub uuid: Uuid,
    pub name: String,
    pub population: i32,
    pub country: CountrySummaryDto,
}

impl From<StateRecord> for StateRecordDto {
    fn from(record: StateRecord) -> Self {
        Self {
            id: record.state().id(),
            uuid: record.state().uuid(),
            name: record.state().name().to_owned(),
            population: record.state().population(),
            country: CountrySummaryDto {
                uuid: record.country().uuid,
                name: record.country().name.clone(),
            },
        }
    }
}

/// Submitted state fields for create and update requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePayload {
    pub name: String,
    pub population: i32,
    pub country_uuid: Uuid,
}

impl StatePayload {
    fn try_into_draft(self) -> ApiResult<StateDraft> {
        StateDraft::new(self.name, self.population, self.country_uuid).map_err(|err| match err {
            GeoValidationError::EmptyName => Error::invalid_request("name must not be empty"),
            GeoValidationError::NegativePopulation => {
                Error::invalid_request("population must not be negative")
            }
        })
    }
}

/// List all states with their owning countries.
#[get("/states")]
pub async fn list_states(
    state: web::Data<HttpState>,
    request: HttpRequest,
) -> ApiResult<web::Json<Vec<StateRecordDto>>> {
    require_bearer(&request, &state.token_issuer)?;
    let records = state.states.list_states().await?;
    Ok(web::Json(
        records.into_iter().map(StateRecordDto::from).collect(),
    ))
}

/// Fetch one state by its external identifier.
#[get("/states/{uuid}")]
pub async fn get_state(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<StateRecordDto>> {
    require_bearer(&request, &state.token_issuer)?;
    let uuid = path.into_inner();
    let record = state
        .states
        .get_state(uuid)
        .await?
        .ok_or_else(|| Error::not_found(format!("no state found with uuid {uuid}")))?;
    Ok(web::Json(StateRecordDto::from(record)))
}

/// Create a state under the country the payload names.
#[post("/states")]
pub async fn create_state(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<StatePayload>,
) -> ApiResult<HttpResponse> {
    require_bearer(&request, &state.token_issuer)?;
    let payload = payload.into_inner();
    if state.states.state_name_exists(&payload.name).await? {
        return Err(Error::conflict(format!(
            "a state named {} already exists",
            payload.name.trim()
        )));
    }

    let draft = payload.try_into_draft()?;
    let outcome = state.states_command.create_state(draft).await;
    let body: EnvelopeBody<StateRecordDto> = unpack(outcome, StateRecordDto::from, Error::not_found)?;
    Ok(HttpResponse::Created().json(body))
}

/// Replace the state identified by the path with the submitted fields.
#[put("/states/{uuid}")]
pub async fn update_state(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
    payload: web::Json<StatePayload>,
) -> ApiResult<HttpResponse> {
    require_bearer(&request, &state.token_issuer)?;
    let uuid = path.into_inner();
    let submitted = payload.into_inner().try_into_draft()?;
    let outcome = state.states_command.update_state(uuid, submitted).await;
    let body: EnvelopeBody<StateRecordDto> = unpack(outcome, StateRecordDto::from, Error::not_found)?;
    Ok(HttpResponse::Ok().json(body))
}

/// Remove a state by its external identifier.
#[delete("/states/{uuid}")]
pub async fn delete_state(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    require_bearer(&request, &state.token_issuer)?;
    let uuid = path.into_inner();
    let outcome = state.states_command.delete_state(uuid).await;
    let body: EnvelopeBody<StateRecordDto> = unpack(outcome, StateRecordDto::from, Error::not_found)?;
    Ok(HttpResponse::Ok().json(body))
}
