//! Metrics client capability.
//!
//! The interceptor only ever talks to a collector through [`MetricsClient`].
//! Implementations own serialization and delivery; calls are fire-and-forget
//! and must not block or fail the caller.

use std::sync::{Mutex, PoisonError};

use crate::naming::{status_stat, timing_stat, StatNames};

/// Counter/timer sink shared by every request of one interceptor.
pub trait MetricsClient: Send + Sync {
    fn increment(&self, name: &str);
    fn timing(&self, name: &str, millis: u64);
}

/// Emit the per-request observations for both names.
///
/// For each name (base, then detail): one `status_code` counter followed by
/// one `response_time` timer.
pub fn emit_request(client: &dyn MetricsClient, names: &StatNames, status: Option<u16>, millis: u64) {
    for name in names.iter() {
        client.increment(&status_stat(name, status));
        client.timing(&timing_stat(name), millis);
    }
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    Increment(String),
    Timing(String, u64),
}

impl Emission {
    pub fn name(&self) -> &str {
        match self {
            Emission::Increment(n) | Emission::Timing(n, _) => n,
        }
    }
}

/// In-process client that records every call in order.
#[derive(Debug, Default)]
pub struct MemoryClient {
    calls: Mutex<Vec<Emission>>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all calls so far.
    pub fn emissions(&self) -> Vec<Emission> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn increments(&self) -> Vec<String> {
        self.emissions()
            .into_iter()
            .filter_map(|e| match e {
                Emission::Increment(n) => Some(n),
                Emission::Timing(..) => None,
            })
            .collect()
    }

    pub fn timings(&self) -> Vec<(String, u64)> {
        self.emissions()
            .into_iter()
            .filter_map(|e| match e {
                Emission::Timing(n, ms) => Some((n, ms)),
                Emission::Increment(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn push(&self, e: Emission) {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(e);
    }
}

impl MetricsClient for MemoryClient {
    fn increment(&self, name: &str) {
        self.push(Emission::Increment(name.to_string()));
    }

    fn timing(&self, name: &str, millis: u64) {
        self.push(Emission::Timing(name.to_string(), millis));
    }
}
