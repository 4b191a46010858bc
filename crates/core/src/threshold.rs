//! CPU usage threshold policy.
//!
//! Shared by the local monitor and the ingest endpoint so a sample is
//! judged the same way no matter which side logs it.

/// Samples strictly above this percentage are a threshold breach.
pub const CPU_USAGE_THRESHOLD: f64 = 70.0;

/// Name logged for samples that carry no identity (the local host).
pub const LOCAL_IDENTITY: &str = "local";

/// Whether `percent` is a threshold breach.
pub fn exceeds_threshold(percent: f64) -> bool {
    percent > CPU_USAGE_THRESHOLD
}

/// Log a sample against the threshold and return whether it was breached.
///
/// A breach produces an extra info event naming the server. The raw value
/// is always logged. Both events carry the caller's `context`.
pub fn evaluate(context: &str, identity: Option<&str>, percent: f64) -> bool {
    evaluate_reported(context, identity, percent, &percent.to_string())
}

/// [`evaluate`] for a value that arrived as text.
///
/// The raw-value event logs `raw` as received (`1e1` stays `1e1`), while
/// the threshold comparison uses the parsed `percent`.
pub fn evaluate_reported(context: &str, identity: Option<&str>, percent: f64, raw: &str) -> bool {
    let server = identity.unwrap_or(LOCAL_IDENTITY);
    let breached = exceeds_threshold(percent);

    if breached {
        tracing::info!(
            context,
            server,
            cpu = percent,
            threshold = CPU_USAGE_THRESHOLD,
            "cpu usage exceeds threshold",
        );
    }
    tracing::info!(context, server, cpu = raw, "cpu usage recorded");

    breached
}
