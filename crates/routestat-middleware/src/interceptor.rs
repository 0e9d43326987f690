//! Interceptor factory.
//!
//! An [`Interceptor`] is built once at startup and bound to exactly one
//! metrics client. Cloning it is cheap and shares that client; every request
//! it sees gets its own [`RequestLifecycle`].

use std::sync::Arc;

use axum::Router;

use routestat_core::client::MetricsClient;
use routestat_core::error::Result;
use routestat_core::naming::RouteDescriptor;

use crate::config::InterceptorConfig;
use crate::lifecycle::RequestLifecycle;
use crate::statsd::StatsdClient;

#[derive(Clone)]
pub struct Interceptor {
    inner: Arc<InterceptorInner>,
}

struct InterceptorInner {
    cfg: InterceptorConfig,
    prefix: Arc<str>,
    client: Arc<dyn MetricsClient>,
}

impl Interceptor {
    /// Build a UDP StatsD client for `collector_host:collector_port` and bind
    /// the interceptor to it.
    pub fn new(cfg: InterceptorConfig) -> Result<Self> {
        cfg.validate()?;
        let client = StatsdClient::connect(&cfg.collector_host, cfg.collector_port)?;
        Ok(Self::build(cfg, Arc::new(client)))
    }

    /// Bind to an existing client. Host and port are ignored.
    pub fn with_client(cfg: InterceptorConfig, client: Arc<dyn MetricsClient>) -> Result<Self> {
        cfg.validate_naming()?;
        Ok(Self::build(cfg, client))
    }

    fn build(cfg: InterceptorConfig, client: Arc<dyn MetricsClient>) -> Self {
        let prefix = Arc::from(cfg.prefix.as_str());
        Self {
            inner: Arc::new(InterceptorInner { cfg, prefix, client }),
        }
    }

    /// Arm a lifecycle for one request. Host-independent: callers that have
    /// no continuation to run can drive the returned lifecycle directly.
    #[must_use = "dropping the lifecycle closes the request"]
    pub fn begin(&self, route: Option<RouteDescriptor>) -> RequestLifecycle {
        RequestLifecycle::arm(route, Arc::clone(&self.inner.prefix), Arc::clone(&self.inner.client))
    }

    /// Attach the interceptor to every route of `router`.
    ///
    /// Uses `Router::layer`, so the matched route template is known by the
    /// time the interceptor runs. Requests that match no route carry no
    /// template and emit nothing.
    pub fn instrument<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(axum::middleware::from_fn_with_state(
            self.clone(),
            crate::http::middleware::track_request,
        ))
    }

    pub fn config(&self) -> &InterceptorConfig {
        &self.inner.cfg
    }

    pub fn request_key_field(&self) -> &str {
        &self.inner.cfg.request_key_field
    }
}

impl std::fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interceptor").field("cfg", &self.inner.cfg).finish()
    }
}
