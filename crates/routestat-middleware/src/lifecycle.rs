//! Per-request lifecycle.
//!
//! A request is `armed` from the moment it enters the interceptor until the
//! first terminal signal arrives; after that it is `completed` and every
//! further signal is a no-op. Only `finish` emits. `error` and `close` just
//! disarm, so aborted responses never skew status or latency series.
//!
//! Dropping an armed lifecycle counts as `close`. Hosts map cancellation
//! (client disconnect, dropped future, handler panic) onto that.

use std::sync::Arc;
use std::time::Instant;

use routestat_core::client::{emit_request, MetricsClient};
use routestat_core::naming::{derive_stat_names, RouteDescriptor};

/// The three ways a response can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Finish,
    Error,
    Close,
}

impl Terminal {
    pub fn as_str(self) -> &'static str {
        match self {
            Terminal::Finish => "finish",
            Terminal::Error => "error",
            Terminal::Close => "close",
        }
    }
}

struct Armed {
    started: Instant,
    route: Option<RouteDescriptor>,
    prefix: Arc<str>,
    client: Arc<dyn MetricsClient>,
}

pub struct RequestLifecycle {
    armed: Option<Armed>,
    outcome: Option<Terminal>,
}

impl RequestLifecycle {
    pub(crate) fn arm(
        route: Option<RouteDescriptor>,
        prefix: Arc<str>,
        client: Arc<dyn MetricsClient>,
    ) -> Self {
        Self {
            armed: Some(Armed {
                started: Instant::now(),
                route,
                prefix,
                client,
            }),
            outcome: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Which signal completed this lifecycle, if any has.
    pub fn outcome(&self) -> Option<Terminal> {
        self.outcome
    }

    /// Response fully sent. Emits unless already completed.
    /// Returns `true` if this call performed the transition.
    pub fn finish(&mut self, status: Option<u16>) -> bool {
        let Some(armed) = self.complete(Terminal::Finish) else {
            return false;
        };

        // No matched route: nothing to name, so nothing is emitted.
        let Some(route) = armed.route.as_ref() else {
            return true;
        };

        let elapsed = Instant::now().saturating_duration_since(armed.started);
        let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let names = derive_stat_names(&armed.prefix, route);

        tracing::trace!(route = %route.path, status = ?status, elapsed_ms = millis, "request finished");
        emit_request(armed.client.as_ref(), &names, status, millis);
        true
    }

    /// Response failed mid-flight. Disarms without emitting.
    pub fn error(&mut self) -> bool {
        self.disarm(Terminal::Error)
    }

    /// Response abandoned before completion. Disarms without emitting.
    pub fn close(&mut self) -> bool {
        self.disarm(Terminal::Close)
    }

    fn disarm(&mut self, terminal: Terminal) -> bool {
        match self.complete(terminal) {
            Some(armed) => {
                tracing::trace!(
                    route = ?armed.route.as_ref().map(|r| r.path.as_str()),
                    terminal = terminal.as_str(),
                    "request ended without metrics"
                );
                true
            }
            None => false,
        }
    }

    fn complete(&mut self, terminal: Terminal) -> Option<Armed> {
        let armed = self.armed.take()?;
        self.outcome = Some(terminal);
        Some(armed)
    }
}

impl Drop for RequestLifecycle {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for RequestLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLifecycle")
            .field("armed", &self.is_armed())
            .field("outcome", &self.outcome)
            .finish()
    }
}
