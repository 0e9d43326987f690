//! routeStat middleware library entry.
//!
//! This crate wires the interceptor factory, the per-request lifecycle, the
//! axum host adapter, and the UDP StatsD client into one instrumentation
//! layer. It is consumed by the demo binary (`main.rs`) and by integration
//! tests.

pub mod config;
pub mod http;
pub mod interceptor;
pub mod lifecycle;
pub mod router;
pub mod statsd;

pub use interceptor::Interceptor;
pub use lifecycle::{RequestLifecycle, Terminal};
pub use statsd::StatsdClient;
