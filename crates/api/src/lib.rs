//! cpuwatch API server library.
//!
//! Exposes config, state, the router and handlers so the binary entrypoint
//! and integration tests build the exact same application.

pub mod config;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
pub mod telemetry;
