//! `cpuwatch-monitor` library crate.
//!
//! The background half of cpuwatch: samples local CPU usage on a fixed
//! cadence, logs it against the threshold policy, and optionally pushes
//! it to a remote collector.

pub mod config;
pub mod monitor;
pub mod reporter;
pub mod sampler;

pub use config::MonitorConfig;
pub use monitor::{CycleOutcome, MonitorLoop};
pub use reporter::{HttpTransport, ReportOutcome, ReportTransport, Reporter};
pub use sampler::{CpuSampler, SampleError, SystemSampler};
