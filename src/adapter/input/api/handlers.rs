use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::error;

use super::models::{
    AgeBandResponse, DietaryLookupRequest, ErrorResponse, IndexStatsResponse,
    NutritionLookupRequest, ToolResponse,
};
use crate::domain::{AdvisorError, AgeBand, DietaryQuery, Gender};
use crate::ports::in_ports::{DietaryRequirementsPort, IndexingPort, NutritionLookupPort};

/// Application state shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub nutrition_lookup: Arc<dyn NutritionLookupPort + Send + Sync>,
    pub dietary_requirements: Arc<dyn DietaryRequirementsPort + Send + Sync>,
    pub indexing: Arc<dyn IndexingPort + Send + Sync>,
}

/// Handler for the food nutrition lookup tool
pub async fn nutrition_lookup(
    State(state): State<AppState>,
    Json(request): Json<NutritionLookupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let response = state
        .nutrition_lookup
        .lookup(request.food_query, request.max_results)
        .await?;

    Ok((StatusCode::OK, Json(ToolResponse { response })))
}

/// Handler for the dietary requirements lookup tool
pub async fn dietary_lookup(
    State(state): State<AppState>,
    Json(request): Json<DietaryLookupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let gender = match request.gender.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(Gender::parse(value).ok_or_else(|| {
            AdvisorError::ValidationError(format!(
                "gender must be 'male' or 'female', got '{}'",
                value
            ))
        })?),
    };

    let query = DietaryQuery {
        query: request.query,
        age: request.age,
        gender,
        max_results: request.max_results,
    };
    let response = state.dietary_requirements.lookup(query).await?;

    Ok((StatusCode::OK, Json(ToolResponse { response })))
}

/// Handler for a single food summary
pub async fn get_food(
    State(state): State<AppState>,
    Path(fdc_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state
        .nutrition_lookup
        .food_summary(fdc_id.clone())
        .await?
        .ok_or(AdvisorError::FoodNotFound(fdc_id))?;

    Ok((StatusCode::OK, Json(summary)))
}

/// Handler resolving an age to its reference band
pub async fn get_age_band(Path(age): Path<i64>) -> Result<impl IntoResponse, ApiError> {
    let age_group = AgeBand::for_age(age)?;
    Ok((StatusCode::OK, Json(AgeBandResponse { age, age_group })))
}

/// Handler for index document counts
pub async fn index_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = state.indexing.stats().await?;
    Ok((StatusCode::OK, Json(IndexStatsResponse::from(stats))))
}

/// Error type for API handlers
#[derive(Debug)]
pub struct ApiError(AdvisorError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, error_message) = match self.0 {
            AdvisorError::FoodNotFound(_) => {
                (StatusCode::NOT_FOUND, "FOOD_NOT_FOUND", "Food not found".to_string())
            }

            err @ AdvisorError::OutOfRangeAge(_) => {
                (StatusCode::BAD_REQUEST, "AGE_OUT_OF_RANGE", err.to_string())
            }

            err @ AdvisorError::UnknownAgeGroup(_) => {
                (StatusCode::BAD_REQUEST, "UNKNOWN_AGE_GROUP", err.to_string())
            }

            AdvisorError::InvalidRecord(msg) => (StatusCode::BAD_REQUEST, "INVALID_RECORD", msg),

            AdvisorError::ValidationError(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }

            AdvisorError::DocumentAlreadyExists(_) => (
                StatusCode::CONFLICT,
                "DOCUMENT_EXISTS",
                "Document already indexed".to_string(),
            ),

            err => {
                error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let error_response = ErrorResponse {
            message: error_message,
            code: error_code.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<AdvisorError> for ApiError {
    fn from(err: AdvisorError) -> Self {
        Self(err)
    }
}
