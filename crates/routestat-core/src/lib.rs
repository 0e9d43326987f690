//! routeStat core: transport-agnostic metric naming, the metrics client
//! capability, and the shared error type.
//!
//! This crate defines what gets emitted and under which name. It carries no
//! HTTP or runtime dependencies so the naming rules can be reused by any host
//! adapter.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Instrumentation
//! runs on every request, so nothing in this crate may take the process down
//! on odd input.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod client;
pub mod error;
pub mod naming;

pub use client::{emit_request, Emission, MemoryClient, MetricsClient};
pub use error::{Result, RouteStatError};
pub use naming::{derive_stat_names, RouteDescriptor, StatNames, DEFAULT_PREFIX};
