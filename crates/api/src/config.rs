use std::net::{IpAddr, SocketAddr};

use cpuwatch_core::env::{parse_or, EnvSource};
use cpuwatch_core::error::CoreError;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for running a single instance
/// locally. Reporting settings (`SENDUSAGE`, `HITURL`) are deliberately
/// not part of this struct: the reporter re-reads them every cycle.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for the monitor task (default: `5`).
    pub shutdown_timeout_secs: u64,
    /// Emit JSON log lines instead of human-readable text.
    pub json_logs: bool,
}

impl ServerConfig {
    /// Load configuration from an environment source with defaults.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `8080`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`      |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `5`       |
    /// | `LOG_FORMAT`           | `text`    |
    pub fn from_source(env: &dyn EnvSource) -> Result<Self, CoreError> {
        let host = parse_or(env, "HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_or(env, "PORT", 8080)?;
        let request_timeout_secs = parse_or(env, "REQUEST_TIMEOUT_SECS", 30)?;
        let shutdown_timeout_secs = parse_or(env, "SHUTDOWN_TIMEOUT_SECS", 5)?;
        let json_logs = env.var_or("LOG_FORMAT", "text").eq_ignore_ascii_case("json");

        Ok(Self {
            host,
            port,
            request_timeout_secs,
            shutdown_timeout_secs,
            json_logs,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
