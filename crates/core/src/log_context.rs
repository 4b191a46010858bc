//! Values of the `context` field attached to log events.
//!
//! They let a reader of the log stream tell monitor events apart from
//! ingest and server-lifecycle events.

/// Events emitted by the background monitor loop.
pub const CONTEXT_MONITOR: &str = "monitor usage";

/// Events emitted while handling an inbound report on `/cpu/usage`.
pub const CONTEXT_INGEST: &str = "registering CPU Usage";

/// HTTP listener lifecycle (bind, shutdown).
pub const CONTEXT_HTTP_SERVER: &str = "HTTP Server";

/// Process bootstrap.
pub const CONTEXT_STARTUP: &str = "running server";
