//! CPU utilization sampling.
//!
//! [`SystemSampler`] uses `sysinfo` to average global CPU usage over a
//! measurement window: refresh, wait out the window, refresh again. The
//! wait is the measurement itself, so it is an async sleep rather than a
//! blocking one.

use std::time::Duration;

use async_trait::async_trait;
use cpuwatch_core::error::CoreError;
use cpuwatch_core::sample::Sample;
use sysinfo::{CpuRefreshKind, RefreshKind, System};

#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("CPU metrics are not supported on this platform")]
    Unsupported,

    #[error("The OS reported no CPUs")]
    NoCpus,

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// Source of CPU usage samples driven by the monitor loop.
#[async_trait]
pub trait CpuSampler: Send {
    async fn sample(&mut self) -> Result<Sample, SampleError>;
}

/// Samples aggregate CPU usage of the local host.
pub struct SystemSampler {
    system: System,
    window: Duration,
}

impl SystemSampler {
    /// `window` is raised to sysinfo's minimum update interval if shorter.
    pub fn new(window: Duration) -> Self {
        let system = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage()),
        );
        Self {
            system,
            window: window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }
}

#[async_trait]
impl CpuSampler for SystemSampler {
    async fn sample(&mut self) -> Result<Sample, SampleError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(SampleError::Unsupported);
        }

        self.system.refresh_cpu_usage();
        tokio::time::sleep(self.window).await;
        self.system.refresh_cpu_usage();

        if self.system.cpus().is_empty() {
            return Err(SampleError::NoCpus);
        }

        let usage = f64::from(self.system.global_cpu_usage());
        Ok(Sample::from_percent(usage)?)
    }
}
