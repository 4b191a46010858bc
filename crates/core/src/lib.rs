//! Domain logic shared by the monitor loop and the HTTP ingest endpoint.
//!
//! Everything here is pure apart from the OS random source used to mint
//! the [`ProcessIdentity`](identity::ProcessIdentity).

pub mod env;
pub mod error;
pub mod identity;
pub mod log_context;
pub mod report_fields;
pub mod sample;
pub mod threshold;
