//! Handler for usage reports pushed by other cpuwatch instances.
//!
//! Ingestion is lenient: the sender always gets `200 OK` with an empty
//! body, whether or not the report could be parsed. Bad reports are only
//! logged.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::Query;
use axum::http::{Method, StatusCode};
use axum::Form;
use cpuwatch_core::log_context::CONTEXT_INGEST;
use cpuwatch_core::report_fields::{PARAM_CPU_USAGE, PARAM_SERVER_ID};
use cpuwatch_core::threshold;

/// Raw `(name, value)` pairs from a query string or url-encoded body.
type FormPairs = Vec<(String, String)>;

/// Fields of a pushed report, merged from the url-encoded body and the
/// query string.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UsageReport {
    /// CPU usage as a decimal string.
    pub cpu: Option<String>,
    pub serverid: Option<String>,
}

impl UsageReport {
    /// Build a report from pairs in precedence order: the first value seen
    /// for a field wins and later repeats are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut report = Self::default();
        for (name, value) in pairs {
            let slot = match name.as_str() {
                PARAM_CPU_USAGE => &mut report.cpu,
                PARAM_SERVER_ID => &mut report.serverid,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        report
    }
}

/// Only these methods carry a report in their body.
fn reads_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// ANY /cpu/usage
///
/// Body values take precedence over query values. A body that is not
/// url-encoded is ignored and the query string alone is used.
pub async fn register_cpu_usage(
    method: Method,
    query: Result<Query<FormPairs>, QueryRejection>,
    body: Result<Form<FormPairs>, FormRejection>,
) -> StatusCode {
    let query_pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            tracing::warn!(
                context = CONTEXT_INGEST,
                error = %rejection,
                "Unable to read usage report query",
            );
            Vec::new()
        }
    };

    // `Form` falls back to the query string on GET/HEAD, which is already covered above.
    let body_pairs = match body {
        _ if !reads_body(&method) => Vec::new(),
        Ok(Form(pairs)) => pairs,
        Err(FormRejection::InvalidFormContentType(_)) => Vec::new(),
        Err(rejection) => {
            tracing::warn!(
                context = CONTEXT_INGEST,
                error = %rejection,
                "Unable to read usage report form",
            );
            Vec::new()
        }
    };

    let report = UsageReport::from_pairs(body_pairs.into_iter().chain(query_pairs));
    record_usage(&report);
    StatusCode::OK
}

/// Apply the threshold policy to a pushed report.
///
/// Returns `None` when `cpu` is missing or not a number, otherwise whether
/// the reported value breached the threshold. The raw-value event logs
/// `cpu` exactly as it was received.
pub fn record_usage(report: &UsageReport) -> Option<bool> {
    let raw = report.cpu.as_deref().unwrap_or_default();

    match raw.parse::<f64>() {
        Ok(percent) => Some(threshold::evaluate_reported(
            CONTEXT_INGEST,
            report.serverid.as_deref(),
            percent,
            raw,
        )),
        Err(e) => {
            tracing::error!(
                context = CONTEXT_INGEST,
                error = %e,
                cpu = raw,
                "unable to parse cpu usage string into float",
            );
            None
        }
    }
}
