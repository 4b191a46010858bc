//! The periodic monitor loop.
//!
//! Each cycle samples CPU usage, logs it against the threshold policy and
//! hands it to the [`Reporter`]. The loop runs until its
//! [`CancellationToken`] fires; cancellation is honoured mid-cycle as well
//! as during the sleep between cycles.
//!
//! Sampling failures are not fatal. A cycle retries the sampler up to
//! `max_sample_attempts` times and is skipped if every attempt fails.

use cpuwatch_core::log_context::CONTEXT_MONITOR;
use cpuwatch_core::sample::Sample;
use cpuwatch_core::threshold;
use tokio_util::sync::CancellationToken;

use crate::config::MonitorConfig;
use crate::reporter::{ReportOutcome, Reporter};
use crate::sampler::CpuSampler;

/// Result of a single monitor cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Completed {
        sample: Sample,
        breached: bool,
        report: ReportOutcome,
    },
    /// Every sampling attempt failed.
    Skipped,
}

pub struct MonitorLoop<S> {
    sampler: S,
    reporter: Reporter,
    config: MonitorConfig,
}

impl<S: CpuSampler> MonitorLoop<S> {
    pub fn new(sampler: S, reporter: Reporter, config: MonitorConfig) -> Self {
        Self {
            sampler,
            reporter,
            config,
        }
    }

    /// Run cycles until `cancel` is triggered.
    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!(
            context = CONTEXT_MONITOR,
            server = %self.reporter.identity(),
            interval_secs = self.config.interval.as_secs(),
            reporting = self.reporter.is_enabled(),
            "Monitor loop started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.run_cycle() => {}
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }

        tracing::info!(context = CONTEXT_MONITOR, "Monitor loop stopping");
    }

    /// Sample, evaluate and report once.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let Some(sample) = self.sample_with_retry().await else {
            return CycleOutcome::Skipped;
        };

        let breached = threshold::evaluate(CONTEXT_MONITOR, None, sample.percent());
        let report = self.reporter.maybe_report(sample).await;

        CycleOutcome::Completed {
            sample,
            breached,
            report,
        }
    }

    async fn sample_with_retry(&mut self) -> Option<Sample> {
        let max_attempts = self.config.max_sample_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.sampler.sample().await {
                Ok(sample) => return Some(sample),
                Err(e) => {
                    tracing::warn!(
                        context = CONTEXT_MONITOR,
                        attempt,
                        max_attempts,
                        error = %e,
                        "CPU sampling failed",
                    );
                }
            }
        }

        tracing::error!(
            context = CONTEXT_MONITOR,
            max_attempts,
            "CPU sampling failed on every attempt, skipping cycle",
        );
        None
    }
}
