//! Lightweight global metrics for SatchelDB.
//!
//! Потокобезопасные атомарные счётчики для подсистем:
//! - Dataset store (reload / fallback / persist)
//! - Query pipeline / mutation engine

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Dataset store -----
static SNAPSHOT_RELOADS: AtomicU64 = AtomicU64::new(0);
static FALLBACK_ACTIVATIONS: AtomicU64 = AtomicU64::new(0);
static PERSIST_WRITES: AtomicU64 = AtomicU64::new(0);
static PERSIST_FAILURES: AtomicU64 = AtomicU64::new(0);

// ----- Query pipeline / mutations -----
static QUERIES_SERVED: AtomicU64 = AtomicU64::new(0);
static MUTATIONS_APPLIED: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub snapshot_reloads: u64,
    pub fallback_activations: u64,
    pub persist_writes: u64,
    pub persist_failures: u64,
    pub queries_served: u64,
    pub mutations_applied: u64,
}

pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        snapshot_reloads: SNAPSHOT_RELOADS.load(Ordering::Relaxed),
        fallback_activations: FALLBACK_ACTIVATIONS.load(Ordering::Relaxed),
        persist_writes: PERSIST_WRITES.load(Ordering::Relaxed),
        persist_failures: PERSIST_FAILURES.load(Ordering::Relaxed),
        queries_served: QUERIES_SERVED.load(Ordering::Relaxed),
        mutations_applied: MUTATIONS_APPLIED.load(Ordering::Relaxed),
    }
}

#[inline]
pub fn record_snapshot_reload() {
    SNAPSHOT_RELOADS.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_fallback_activation() {
    FALLBACK_ACTIVATIONS.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_persist_write() {
    PERSIST_WRITES.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_persist_failure() {
    PERSIST_FAILURES.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_query_served() {
    QUERIES_SERVED.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_mutation_applied() {
    MUTATIONS_APPLIED.fetch_add(1, Ordering::Relaxed);
}
