//! `cpuwatch-api` -- CPU usage monitor and report collector.
//!
//! Runs two independent roles in one process:
//!
//! - a background monitor that samples local CPU usage every few seconds,
//!   logs it against the 70% threshold and, when `SENDUSAGE=1`, pushes it
//!   to the collector URL template in `HITURL`;
//! - an HTTP server whose `/cpu/usage` endpoint accepts such pushes from
//!   other instances and logs them the same way.
//!
//! # Environment variables
//!
//! | Variable                | Default   | Description                                  |
//! |-------------------------|-----------|----------------------------------------------|
//! | `SENDUSAGE`             | `0`       | `1` enables outbound reports                 |
//! | `HITURL`                | --        | e.g. `http://collector:8080/cpu/usage?serverid=&cpu=` |
//! | `HOST`                  | `0.0.0.0` | Bind address                                 |
//! | `PORT`                  | `8080`    | Bind port                                    |
//! | `MONITOR_INTERVAL_SECS` | `5`       | Seconds slept between samples                |
//! | `LOG_FORMAT`            | `text`    | `json` for JSON log lines                    |

use std::sync::Arc;
use std::time::Duration;

use cpuwatch_core::env::{EnvSource, ProcessEnv};
use cpuwatch_core::identity::ProcessIdentity;
use cpuwatch_core::log_context::{CONTEXT_HTTP_SERVER, CONTEXT_STARTUP};
use cpuwatch_monitor::{HttpTransport, MonitorConfig, MonitorLoop, Reporter, SystemSampler};
use tokio_util::sync::CancellationToken;

use cpuwatch_api::config::ServerConfig;
use cpuwatch_api::router::build_app_router;
use cpuwatch_api::state::AppState;
use cpuwatch_api::telemetry;

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();
    let env: Arc<dyn EnvSource> = Arc::new(ProcessEnv);

    // --- Configuration ---
    let config = ServerConfig::from_source(env.as_ref());

    // --- Tracing ---
    let json_logs = config.as_ref().is_ok_and(|c| c.json_logs);
    telemetry::init_tracing(json_logs);

    if let Err(e) = dotenv {
        tracing::info!(
            context = CONTEXT_STARTUP,
            error = %e,
            "No .env file loaded, using process environment",
        );
    }

    let config = config.unwrap_or_else(|e| {
        tracing::error!(context = CONTEXT_STARTUP, error = %e, "Invalid server configuration");
        std::process::exit(1);
    });
    let monitor_config = MonitorConfig::from_source(env.as_ref()).unwrap_or_else(|e| {
        tracing::error!(context = CONTEXT_STARTUP, error = %e, "Invalid monitor configuration");
        std::process::exit(1);
    });

    // --- Identity ---
    let identity = ProcessIdentity::generate();
    tracing::info!(context = CONTEXT_STARTUP, server = %identity, "Process identity generated");

    // --- Monitor ---
    let reporter = Reporter::new(
        Arc::clone(&env),
        identity.clone(),
        Arc::new(HttpTransport::new()),
    );
    let sampler = SystemSampler::new(monitor_config.sample_window);
    let monitor_cancel = CancellationToken::new();
    let monitor_handle = tokio::spawn(
        MonitorLoop::new(sampler, reporter, monitor_config).run(monitor_cancel.clone()),
    );

    // --- Router ---
    let state = AppState {
        config: Arc::new(config.clone()),
        identity,
    };
    let app = build_app_router(state);

    // --- Start server ---
    let addr = config.addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(context = CONTEXT_HTTP_SERVER, %addr, error = %e, "Unable to start server");
            std::process::exit(1);
        }
    };
    tracing::info!(context = CONTEXT_HTTP_SERVER, %addr, "Running server");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(context = CONTEXT_HTTP_SERVER, error = %e, "Server error");
    }

    // --- Post-shutdown cleanup ---
    tracing::info!(context = CONTEXT_HTTP_SERVER, "Server stopped accepting connections");

    monitor_cancel.cancel();
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(shutdown_timeout, monitor_handle).await.is_err() {
        tracing::warn!(
            context = CONTEXT_STARTUP,
            timeout_secs = config.shutdown_timeout_secs,
            "Monitor did not stop in time",
        );
    }

    tracing::info!(context = CONTEXT_STARTUP, "Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). If a handler cannot
/// be installed the error is logged and that signal is simply never seen.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
