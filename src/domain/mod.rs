pub mod age_band;
pub mod document;
pub mod error;
pub mod formatter;
pub mod model;
pub mod nutrients;
pub mod query;

pub use age_band::AgeBand;
pub use document::DocumentBuilder;
pub use error::{AdvisorError, AdvisorResult};
pub use formatter::ResponseFormatter;
pub use model::*;
pub use nutrients::{normalize_nutrients, rank_nutrients, NormalizedNutrients};
