//! Outbound usage reports.
//!
//! The report target is a URL template read from `HITURL` on every
//! attempt. Its query-parameter names decide which fields are filled in
//! (see [`cpuwatch_core::report_fields`]). Delivery is best-effort
//! telemetry: one GET per cycle, the response and any transport error
//! are discarded, and nothing is retried.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use cpuwatch_core::env::EnvSource;
use cpuwatch_core::identity::ProcessIdentity;
use cpuwatch_core::log_context::CONTEXT_MONITOR;
use cpuwatch_core::report_fields::{param_role, ParamRole, ReportValues};
use cpuwatch_core::sample::Sample;
use reqwest::Url;

/// Reporting is enabled only when this variable is exactly `"1"`.
pub const ENV_SEND_USAGE: &str = "SENDUSAGE";

/// Report target URL template.
pub const ENV_REPORT_URL: &str = "HITURL";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Unable to parse report URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// What a single [`Reporter::maybe_report`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// `SENDUSAGE` is not `"1"`.
    Disabled,
    /// `HITURL` did not parse; the cycle's report was skipped.
    InvalidTarget,
    /// A request was issued to this URL. Its result is not observed.
    Sent(Url),
}

/// Delivers a rendered report URL.
#[async_trait]
pub trait ReportTransport: Send + Sync {
    async fn send(&self, url: Url);
}

/// GET via `reqwest` with the client's default settings.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportTransport for HttpTransport {
    async fn send(&self, url: Url) {
        // Fire-and-forget: status and errors are intentionally not inspected.
        let _ = self.client.get(url).send().await;
    }
}

/// Render a report URL from `template`.
///
/// Recognized parameters get their value replaced. A recognized name that
/// appears more than once is kept only at its first position. Unknown
/// parameters are kept verbatim and no parameter is ever added.
pub fn render_report_url(template: &str, values: &ReportValues<'_>) -> Result<Url, ReportError> {
    let mut url = Url::parse(template).map_err(|e| ReportError::InvalidUrl {
        url: template.to_string(),
        reason: e.to_string(),
    })?;

    if url.query().is_none() {
        return Ok(url);
    }

    let mut filled = HashSet::new();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter_map(|(name, value)| match param_role(&name) {
            ParamRole::Field(field) => filled
                .insert(field)
                .then(|| (name.into_owned(), values.value_for(field))),
            ParamRole::PassThrough => Some((name.into_owned(), value.into_owned())),
        })
        .collect();

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    Ok(url)
}

/// Pushes samples to the configured collector.
pub struct Reporter {
    env: Arc<dyn EnvSource>,
    identity: ProcessIdentity,
    transport: Arc<dyn ReportTransport>,
}

impl Reporter {
    pub fn new(
        env: Arc<dyn EnvSource>,
        identity: ProcessIdentity,
        transport: Arc<dyn ReportTransport>,
    ) -> Self {
        Self {
            env,
            identity,
            transport,
        }
    }

    pub fn identity(&self) -> &ProcessIdentity {
        &self.identity
    }

    pub fn is_enabled(&self) -> bool {
        self.env.var(ENV_SEND_USAGE).as_deref() == Some("1")
    }

    /// Report `sample` if reporting is enabled.
    ///
    /// The target is re-read from the environment source on every call, so
    /// edits apply from the next cycle. A malformed target is logged and
    /// only this report is skipped.
    pub async fn maybe_report(&self, sample: Sample) -> ReportOutcome {
        if !self.is_enabled() {
            return ReportOutcome::Disabled;
        }

        let template = self.env.var_or(ENV_REPORT_URL, "");
        let values = ReportValues {
            server_id: self.identity.as_str(),
            cpu_percent: sample.percent(),
        };

        let url = match render_report_url(&template, &values) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(context = CONTEXT_MONITOR, error = %e, "Unable to parse url");
                return ReportOutcome::InvalidTarget;
            }
        };

        tracing::debug!(context = CONTEXT_MONITOR, url = %url, "Sending usage report");
        self.transport.send(url.clone()).await;
        ReportOutcome::Sent(url)
    }
}
