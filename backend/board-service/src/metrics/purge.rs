//! Prometheus metrics for the purge coordinator
//!
//! Tracks purge runs, removed posts/objects, and run durations.

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};
use std::time::Duration;

/// Total number of purge runs (success/error)
static PURGE_RUNS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "purge_runs_total",
        "Total number of purge runs (success/error)",
        &["status"]
    )
    .expect("failed to register purge_runs_total")
});

/// Duration of purge runs
static PURGE_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "purge_duration_seconds",
        "Duration of purge runs",
        vec![0.001, 0.01, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0]
    )
    .expect("failed to register purge_duration_seconds")
});

/// Total posts fully removed by purge runs
static POSTS_PURGED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "purge_posts_purged_total",
        "Total posts fully removed by purge runs"
    )
    .expect("failed to register purge_posts_purged_total")
});

/// Total objects removed from storage by purge runs
static OBJECTS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "purge_objects_deleted_total",
        "Total objects removed from storage by purge runs"
    )
    .expect("failed to register purge_objects_deleted_total")
});

/// Record a purge run completion
pub fn record_purge_run(status: &str) {
    PURGE_RUNS_TOTAL.with_label_values(&[status]).inc();
}

/// Record purge run duration
pub fn record_purge_duration(duration: Duration) {
    PURGE_DURATION_SECONDS.observe(duration.as_secs_f64());
}

/// Record posts removed in a run
pub fn record_posts_purged(count: u64) {
    if count > 0 {
        POSTS_PURGED_TOTAL.inc_by(count);
    }
}

/// Record objects removed in a run
pub fn record_objects_deleted(count: u64) {
    if count > 0 {
        OBJECTS_DELETED_TOTAL.inc_by(count);
    }
}
