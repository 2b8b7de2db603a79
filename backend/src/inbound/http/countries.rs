//! Countries API handlers.
//!
//! ```text
//! GET    /api/v1/countries
//! GET    /api/v1/countries/{uuid}
//! POST   /api/v1/countries
//! PUT    /api/v1/countries/{uuid}
//! DELETE /api/v1/countries/{uuid}
//! ```
//!
//! Every endpoint requires a bearer token. Mutations respond with a
//! result envelope; submitted states with id `0` are inserted, any other
//! id replaces the matching persisted row, and persisted rows missing
//! from the submission are removed.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Country, Error, GeoValidationError, State};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_bearer;
use crate::inbound::http::envelope::{EnvelopeBody, unpack};
use crate::inbound::http::state::HttpState;

/// State entry inside a country payload or response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDto {
    /// `0` marks a state to insert; any other value targets an existing row.
    #[serde(default)]
    pub id: i32,
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub name: String,
    pub population: i32,
}

impl From<&State> for StateDto {
    fn from(state: &State) -> Self {
        Self {
            id: state.id(),
            uuid: state.uuid(),
            name: state.name().to_owned(),
            population: state.population(),
        }
    }
}

/// Country aggregate as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDto {
    pub uuid: Uuid,
    pub name: String,
    pub population: i32,
    pub states: Vec<StateDto>,
}

impl From<Country> for CountryDto {
    fn from(country: Country) -> Self {
        Self {
            uuid: country.uuid(),
            name: country.name().to_owned(),
            population: country.population(),
            states: country.states().iter().map(StateDto::from).collect(),
        }
    }
}

/// Submitted country aggregate for create and update requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryPayload {
    pub name: String,
    pub population: i32,
    #[serde(default)]
    pub states: Vec<StateDto>,
}

impl CountryPayload {
    /// Validate the payload into a domain aggregate carrying `uuid`.
    fn try_into_country(self, uuid: Uuid) -> ApiResult<Country> {
        let mut states = Vec::with_capacity(self.states.len());
        for dto in self.states {
            states.push(
                State::new(dto.id, dto.uuid, dto.name, dto.population)
                    .map_err(map_geo_validation_error)?,
            );
        }
        Country::new(0, uuid, self.name, self.population, states)
            .map_err(map_geo_validation_error)
    }
}

fn map_geo_validation_error(err: GeoValidationError) -> Error {
    match err {
        GeoValidationError::EmptyName => Error::invalid_request("name must not be empty"),
        GeoValidationError::NegativePopulation => {
            Error::invalid_request("population must not be negative")
        }
    }
}

/// List all countries, states omitted.
#[get("/countries")]
pub async fn list_countries(
    state: web::Data<HttpState>,
    request: HttpRequest,
) -> ApiResult<web::Json<Vec<CountryDto>>> {
    require_bearer(&request, &state.token_issuer)?;
    let countries = state.countries.list_countries().await?;
    Ok(web::Json(
        countries.into_iter().map(CountryDto::from).collect(),
    ))
}

/// Fetch one country aggregate with its states.
#[get("/countries/{uuid}")]
pub async fn get_country(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<CountryDto>> {
    require_bearer(&request, &state.token_issuer)?;
    let uuid = path.into_inner();
    let country = state
        .countries
        .get_country(uuid)
        .await?
        .ok_or_else(|| Error::not_found(format!("no country found with uuid {uuid}")))?;
    Ok(web::Json(CountryDto::from(country)))
}

/// Create a country aggregate, inserting every submitted state.
#[post("/countries")]
pub async fn create_country(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<CountryPayload>,
) -> ApiResult<HttpResponse> {
    require_bearer(&request, &state.token_issuer)?;
    let payload = payload.into_inner();
    if state.countries.country_name_exists(&payload.name).await? {
        return Err(Error::conflict(format!(
            "a country named {} already exists",
            payload.name.trim()
        )));
    }

    let draft = payload.try_into_country(Uuid::new_v4())?;
    let outcome = state.countries_command.create_country(draft).await;
    let body: EnvelopeBody<CountryDto> = unpack(outcome, CountryDto::from, Error::not_found)?;
    Ok(HttpResponse::Created().json(body))
}

/// Replace a country aggregate, reconciling its states against the
/// submitted collection.
#[put("/countries/{uuid}")]
pub async fn update_country(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
    payload: web::Json<CountryPayload>,
) -> ApiResult<HttpResponse> {
    require_bearer(&request, &state.token_issuer)?;
    let uuid = path.into_inner();
    let submitted = payload.into_inner().try_into_country(uuid)?;
    let outcome = state.countries_command.update_country(uuid, submitted).await;
    let body: EnvelopeBody<CountryDto> = unpack(outcome, CountryDto::from, Error::not_found)?;
    Ok(HttpResponse::Ok().json(body))
}

/// Remove a country aggregate and all of its states.
#[delete("/countries/{uuid}")]
pub async fn delete_country(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    require_bearer(&request, &state.token_issuer)?;
    let uuid = path.into_inner();
    let outcome = state.countries_command.delete_country(uuid).await;
    let body: EnvelopeBody<CountryDto> = unpack(outcome, CountryDto::from, Error::not_found)?;
    Ok(HttpResponse::Ok().json(body))
}
