//! Route definitions for usage ingestion.

use axum::routing::any;
use axum::Router;

use crate::handlers::usage;
use crate::state::AppState;

/// Path other instances push their usage reports to.
pub const USAGE_PATH: &str = "/cpu/usage";

/// ```text
/// ANY /cpu/usage                      -> register_cpu_usage
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(USAGE_PATH, any(usage::register_cpu_usage))
}
