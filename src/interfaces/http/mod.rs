//! Remote invocation endpoint for the strategic performance calculator.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ApiResult};
pub use handlers::{AppState, CALCULATE_ROUTE, HEALTH_ROUTE, create_router};
pub use server::PerformanceServer;
