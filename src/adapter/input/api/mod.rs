pub mod handlers;
pub mod models;
pub mod router;

pub use handlers::AppState;
pub use router::create_router;
