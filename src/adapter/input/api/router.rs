use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    dietary_lookup, get_age_band, get_food, index_stats, nutrition_lookup, AppState,
};

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Agent tools
        .route("/nutrition/lookup", post(nutrition_lookup))
        .route("/dietary/lookup", post(dietary_lookup))
        // Lookups
        .route("/foods/:id", get(get_food))
        .route("/age-bands/:age", get(get_age_band))
        .route("/index/stats", get(index_stats))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
