use std::time::Duration;

use cpuwatch_core::env::{parse_or, EnvSource};
use cpuwatch_core::error::CoreError;

/// Default seconds slept between monitor cycles.
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Window over which a single CPU sample is averaged.
pub const DEFAULT_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Sampling attempts per cycle before the cycle is skipped.
pub const DEFAULT_MAX_SAMPLE_ATTEMPTS: u32 = 3;

/// Monitor loop timing.
///
/// | Env Var                 | Default |
/// |-------------------------|---------|
/// | `MONITOR_INTERVAL_SECS` | `5`     |
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Sleep between the end of one cycle and the start of the next.
    pub interval: Duration,
    /// Measurement window handed to the sampler.
    pub sample_window: Duration,
    pub max_sample_attempts: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            sample_window: DEFAULT_SAMPLE_WINDOW,
            max_sample_attempts: DEFAULT_MAX_SAMPLE_ATTEMPTS,
        }
    }
}

impl MonitorConfig {
    pub fn from_source(env: &dyn EnvSource) -> Result<Self, CoreError> {
        let interval_secs: u64 = parse_or(env, "MONITOR_INTERVAL_SECS", DEFAULT_INTERVAL_SECS)?;

        Ok(Self {
            interval: Duration::from_secs(interval_secs),
            ..Self::default()
        })
    }
}
