//! Resolution metrics.
//!
//! Counts how reads were answered (active locale, fallback, miss) and how
//! holders were mutated. Resolution itself never records; callers at the
//! record boundary pass a `ResolutionMetrics` in.

use crate::resolver::ReadOutcome;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Counters for translation resolution.
#[derive(Debug, Default)]
pub struct ResolutionMetrics {
    /// Reads answered by the active locale's slot
    active_hits: AtomicUsize,

    /// Reads answered by the default locale's slot
    fallback_hits: AtomicUsize,

    /// Reads where neither slot held a value
    misses: AtomicUsize,

    /// Reads short-circuited because no map was set
    unset_reads: AtomicUsize,

    /// Single-slot writes for the active locale
    scoped_writes: AtomicUsize,

    /// Whole-map replacements
    bulk_replacements: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<ResolutionMetrics> = OnceLock::new();

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global resolution metrics instance.
    pub fn global() -> &'static ResolutionMetrics {
        METRICS.get_or_init(ResolutionMetrics::new)
    }

    /// Record the outcome of one read.
    pub fn record_read(&self, outcome: &ReadOutcome<'_>) {
        match outcome {
            ReadOutcome::Unset => self.record_unset_read(),
            ReadOutcome::Active(_) => self.record_active_hit(),
            ReadOutcome::Fallback(_) => self.record_fallback_hit(),
            ReadOutcome::Missing => self.record_miss(),
        }
    }

    pub fn record_active_hit(&self) {
        self.active_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback_hit(&self) {
        self.fallback_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unset_read(&self) {
        self.unset_reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_scoped_write(&self) {
        self.scoped_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bulk_replace(&self) {
        self.bulk_replacements.fetch_add(1, Ordering::Relaxed);
    }

    pub fn active_hits(&self) -> usize {
        self.active_hits.load(Ordering::Relaxed)
    }

    pub fn fallback_hits(&self) -> usize {
        self.fallback_hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn unset_reads(&self) -> usize {
        self.unset_reads.load(Ordering::Relaxed)
    }

    pub fn scoped_writes(&self) -> usize {
        self.scoped_writes.load(Ordering::Relaxed)
    }

    pub fn bulk_replacements(&self) -> usize {
        self.bulk_replacements.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    ///
    /// `fallback_rate` is the share of resolved reads (hits plus misses) that
    /// needed the default locale, as a percentage.
    pub fn report(&self) -> MetricsReport {
        let active_hits = self.active_hits();
        let fallback_hits = self.fallback_hits();
        let misses = self.misses();
        let resolved_reads = active_hits + fallback_hits + misses;
        let fallback_rate = if resolved_reads > 0 {
            (fallback_hits as f64 / resolved_reads as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            active_hits,
            fallback_hits,
            misses,
            unset_reads: self.unset_reads(),
            scoped_writes: self.scoped_writes(),
            bulk_replacements: self.bulk_replacements(),
            fallback_rate,
        }
    }
}

/// Snapshot of resolution statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub active_hits: usize,
    pub fallback_hits: usize,
    pub misses: usize,
    pub unset_reads: usize,
    pub scoped_writes: usize,
    pub bulk_replacements: usize,

    /// Fallback hits as a percentage (0-100) of resolved reads
    pub fallback_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = ResolutionMetrics::new();
        assert_eq!(metrics.active_hits(), 0);
        assert_eq!(metrics.fallback_hits(), 0);
        assert_eq!(metrics.misses(), 0);
        assert_eq!(metrics.unset_reads(), 0);
        assert_eq!(metrics.scoped_writes(), 0);
        assert_eq!(metrics.bulk_replacements(), 0);
    }

    #[test]
    fn test_record_each_counter() {
        let metrics = ResolutionMetrics::new();

        metrics.record_active_hit();
        metrics.record_active_hit();
        metrics.record_fallback_hit();
        metrics.record_miss();
        metrics.record_unset_read();
        metrics.record_scoped_write();
        metrics.record_bulk_replace();

        assert_eq!(metrics.active_hits(), 2);
        assert_eq!(metrics.fallback_hits(), 1);
        assert_eq!(metrics.misses(), 1);
        assert_eq!(metrics.unset_reads(), 1);
        assert_eq!(metrics.scoped_writes(), 1);
        assert_eq!(metrics.bulk_replacements(), 1);
    }

    #[test]
    fn test_record_read_outcomes() {
        let metrics = ResolutionMetrics::new();
        let value = serde_json::json!("hello");

        metrics.record_read(&ReadOutcome::Active(&value));
        metrics.record_read(&ReadOutcome::Fallback(&value));
        metrics.record_read(&ReadOutcome::Missing);
        metrics.record_read(&ReadOutcome::Unset);
        metrics.record_read(&ReadOutcome::Unset);

        assert_eq!(metrics.active_hits(), 1);
        assert_eq!(metrics.fallback_hits(), 1);
        assert_eq!(metrics.misses(), 1);
        assert_eq!(metrics.unset_reads(), 2);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = ResolutionMetrics::new().report();
        assert_eq!(report.active_hits, 0);
        assert_eq!(report.fallback_rate, 0.0);
    }

    #[test]
    fn test_report_fallback_rate() {
        let metrics = ResolutionMetrics::new();

        // 2 active hits, 1 fallback, 1 miss = 25% fallback
        metrics.record_active_hit();
        metrics.record_active_hit();
        metrics.record_fallback_hit();
        metrics.record_miss();
        // Unset reads don't count towards the rate
        metrics.record_unset_read();

        let report = metrics.report();
        assert_eq!(report.fallback_hits, 1);
        assert_eq!(report.unset_reads, 1);
        assert_eq!(report.fallback_rate, 25.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = ResolutionMetrics::new();
        metrics.record_scoped_write();

        let json = serde_json::to_value(metrics.report()).expect("Should serialize");
        assert_eq!(json["scoped_writes"], 1);
        assert_eq!(json["fallback_rate"], 0.0);
    }

    // ==================== Singleton Tests ====================

    #[test]
    fn test_global_returns_same_instance() {
        let metrics1 = ResolutionMetrics::global();
        let metrics2 = ResolutionMetrics::global();
        assert!(std::ptr::eq(metrics1, metrics2));
    }

    #[test]
    fn test_global_counts_persist_across_calls() {
        let metrics1 = ResolutionMetrics::global();
        let initial = metrics1.bulk_replacements();
        metrics1.record_bulk_replace();

        // Other tests may record concurrently, so only a lower bound holds
        assert!(ResolutionMetrics::global().bulk_replacements() >= initial + 1);
    }
}
