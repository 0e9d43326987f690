//! routeStat demo server.
//!
//! - Loads `routestat.yaml` (or the path given as the first argument)
//! - Builds one interceptor, bound to one UDP StatsD client
//! - Serves a few instrumented routes

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use routestat_core::error::{Result, RouteStatError};
use routestat_middleware::{config, router, Interceptor};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, kind = e.kind(), "routestat-middleware failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "routestat.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .map_err(|e| RouteStatError::InvalidConfig(format!("server.listen must be a valid SocketAddr: {e}")))?;

    let interceptor = Interceptor::new(cfg.statsd)?;
    let app = router::build_router(&interceptor);

    let statsd = interceptor.config();
    tracing::info!(
        %listen,
        collector_host = %statsd.collector_host,
        collector_port = statsd.collector_port,
        "routestat-middleware starting"
    );
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| RouteStatError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| RouteStatError::Internal(format!("server failed: {e}")))
}
