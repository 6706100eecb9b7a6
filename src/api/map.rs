//! Map metadata endpoints.
//!
//! Each handler issues exactly one repository call and serializes the
//! result as a JSON array; store errors surface as plain-text 500s.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::db::Database;
use crate::errors::AppError;
use crate::models::{Country, State as StateRecord};
use crate::AppState;

/// GET /api/map/country - List all countries.
pub async fn get_countries(State(state): State<AppState>) -> Result<Json<Vec<Country>>, AppError> {
    let countries = state.repo.get_countries().await?;
    Ok(Json(countries))
}

/// GET /api/map/state - List all states.
pub async fn get_all_states(
    State(state): State<AppState>,
) -> Result<Json<Vec<StateRecord>>, AppError> {
    let states = state.repo.get_states("").await?;
    Ok(Json(states))
}

/// GET /api/map/state/{country} - List states belonging to one country.
///
/// The path segment must be letters only; anything else is a 400.
pub async fn get_states_by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<Vec<StateRecord>>, AppError> {
    if country.is_empty() || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::BadRequest("no country id provided".to_string()));
    }

    let states = state.repo.get_states(&country).await?;
    Ok(Json(states))
}
