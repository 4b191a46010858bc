use std::sync::Arc;

use cpuwatch_core::identity::ProcessIdentity;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the config is behind an `Arc` and the identity is
/// reference-counted internally.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Identity this process reports under (read-only).
    pub identity: ProcessIdentity,
}
