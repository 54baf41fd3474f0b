//! HTTP/1.1 accept loop over the plugin listener.
//!
//! Each connection runs on its own task and is driven by hyper with the axum
//! router as the service. On shutdown the loop stops accepting, asks open
//! connections to finish their current exchange, and waits up to
//! `drain_timeout` for them. Connections still open after that are aborted.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tower::ServiceExt;

use authz_core::error::Result;

use crate::obs::PluginMetrics;
use crate::transport::listener::{Conn, PluginListener};

/// Pause after a failed accept (fd exhaustion and the like) before retrying.
const ACCEPT_BACKOFF: Duration = Duration::from_secs(1);

/// Decrements the active-connection gauge when the connection task ends.
struct ConnGuard(Arc<PluginMetrics>);

impl ConnGuard {
    fn new(metrics: Arc<PluginMetrics>) -> Self {
        metrics.connections_active.inc();
        Self(metrics)
    }
}

impl Drop for ConnGuard {
    fn drop(&mut self) {
        self.0.connections_active.dec();
    }
}

pub async fn serve<F>(
    listener: PluginListener,
    app: Router,
    metrics: Arc<PluginMetrics>,
    shutdown: F,
    drain_timeout: Duration,
) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    let (stop_tx, stop_rx) = watch::channel(false);
    let mut conns = JoinSet::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            Some(_) = conns.join_next(), if !conns.is_empty() => {}
            accepted = listener.accept() => {
                let conn = match accepted {
                    Ok(c) => c,
                    Err(e) => {
                        accept_backoff(&e).await;
                        continue;
                    }
                };
                let guard = ConnGuard::new(Arc::clone(&metrics));
                let app = app.clone();
                let stop_rx = stop_rx.clone();
                match conn {
                    Conn::Unix(s) => conns.spawn(serve_conn(s, app, stop_rx, guard)),
                    Conn::Tcp(s) => conns.spawn(serve_conn(s, app, stop_rx, guard)),
                };
            }
        }
    }

    metrics.set_draining();
    let _ = stop_tx.send(true);
    tracing::info!(endpoint = %listener.describe(), open = conns.len(), "stopped accepting connections");

    let drained = tokio::time::timeout(drain_timeout, async {
        while conns.join_next().await.is_some() {}
    })
    .await;
    if drained.is_err() {
        tracing::warn!(open = conns.len(), "drain timeout, aborting open connections");
        conns.shutdown().await;
    }

    Ok(())
}

async fn accept_backoff(e: &io::Error) {
    tracing::warn!(error = %e, backoff_ms = ACCEPT_BACKOFF.as_millis() as u64, "accept failed");
    tokio::time::sleep(ACCEPT_BACKOFF).await;
}

async fn serve_conn<S>(stream: S, app: Router, mut stop_rx: watch::Receiver<bool>, _guard: ConnGuard)
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let io = TokioIo::new(stream);
    let service = service_fn(move |req: Request<Incoming>| app.clone().oneshot(req));

    let conn = http1::Builder::new().serve_connection(io, service);
    tokio::pin!(conn);

    let res = tokio::select! {
        res = conn.as_mut() => res,
        _ = stop_rx.changed() => {
            conn.as_mut().graceful_shutdown();
            conn.as_mut().await
        }
    };
    if let Err(e) = res {
        tracing::debug!(error = %e, "connection closed with error");
    }
}
