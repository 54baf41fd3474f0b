//! authz plugin server
//!
//! - Loads config from `$AUTHZ_PLUGIN_CONFIG` (built-in defaults otherwise)
//! - Binds the plugin endpoint (unix socket by default)
//! - Serves the built-in policy until SIGINT/SIGTERM
//!
//! Startup failures are logged and exit non-zero; there is no retry.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal::unix::{signal, SignalKind};
use tracing_subscriber::{fmt, EnvFilter};

use authz_core::error::Result;
use authz_server::{app_state::AppState, config, policy::DefaultPolicy, router, transport};

const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind(), "failed to start authz plugin");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg_path = std::env::var(config::CONFIG_ENV).ok();
    let cfg = config::load(cfg_path.as_deref())?;

    let listener = transport::PluginListener::bind(&cfg.plugin).await?;

    let state = AppState::new(cfg, Arc::new(DefaultPolicy::new()));
    let metrics = state.metrics();
    let app = router::build_router(state);

    tracing::info!(endpoint = %listener.describe(), "authz plugin starting");
    transport::serve(listener, app, metrics, shutdown_signal(), DRAIN_TIMEOUT).await?;
    tracing::info!("authz plugin stopped");

    Ok(())
}

async fn shutdown_signal() {
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
