//! Top-level facade crate for routeStat.
//!
//! Re-exports the naming core and the middleware so users can depend on a single crate.

pub mod core {
    pub use routestat_core::*;
}

pub mod middleware {
    pub use routestat_middleware::*;
}

pub use routestat_core::{MetricsClient, RouteDescriptor};
pub use routestat_middleware::{Interceptor, StatsdClient};
