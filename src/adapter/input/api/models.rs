use serde::{Deserialize, Serialize};

use crate::domain::{AgeBand, IndexStats};

/// Request for the food nutrition lookup tool
#[derive(Debug, Serialize, Deserialize)]
pub struct NutritionLookupRequest {
    /// Food name or description to search for
    pub food_query: String,

    /// Maximum number of results, clamped server-side
    pub max_results: Option<i64>,
}

/// Request for the dietary requirements lookup tool
#[derive(Debug, Serialize, Deserialize)]
pub struct DietaryLookupRequest {
    /// Free-text question, may carry age and gender hints
    pub query: String,

    /// Explicit age, takes precedence over the query text
    pub age: Option<i64>,

    /// Explicit gender ("male" or "female"), takes precedence over the query text
    pub gender: Option<String>,

    /// Maximum number of results, clamped server-side
    pub max_results: Option<i64>,
}

/// Text rendered for the chat agent
#[derive(Debug, Serialize, Deserialize)]
pub struct ToolResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AgeBandResponse {
    pub age: i64,
    pub age_group: AgeBand,
}

/// Document counts per index
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexStatsResponse {
    pub foods: usize,
    pub dietary: usize,
}

impl From<IndexStats> for IndexStatsResponse {
    fn from(stats: IndexStats) -> Self {
        Self {
            foods: stats.foods,
            dietary: stats.dietary,
        }
    }
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub message: String,

    /// Error code
    pub code: String,
}
