//! Search metrics collection for profiling and analysis.
//!
//! Aggregate counters for the stream driver. When the `tracing` feature
//! is enabled, counters are collected while answers are pulled. When
//! disabled, all operations are no-ops with zero overhead.
//!
//! # Usage
//!
//! ```rust,ignore
//! use relog::metrics::SearchMetrics;
//!
//! let metrics = SearchMetrics::new();
//! // ... drive the search ...
//! let report = metrics.report();
//! println!("Forces: {}, Solutions: {}", report.forces, report.solutions);
//! ```

#[cfg(feature = "tracing")]
use std::sync::atomic::{AtomicU64, Ordering};

/// Aggregate metrics collected while driving a search.
///
/// All counters use relaxed ordering for minimal overhead. Values may be
/// slightly stale mid-search in multi-threaded contexts, but the report
/// taken after the driver stops is accurate.
#[cfg(feature = "tracing")]
pub struct SearchMetrics {
    /// Pull requests made by the driver
    pub pulls: AtomicU64,
    /// Delayed stream nodes forced
    pub forces: AtomicU64,
    /// Solution states surfaced
    pub solutions: AtomicU64,
    /// Integrity faults hit
    pub faults: AtomicU64,
}

#[cfg(feature = "tracing")]
impl SearchMetrics {
    /// Create a new metrics collector with all counters at zero.
    pub fn new() -> Self {
        Self {
            pulls: AtomicU64::new(0),
            forces: AtomicU64::new(0),
            solutions: AtomicU64::new(0),
            faults: AtomicU64::new(0),
        }
    }

    /// Record one pull request.
    #[inline]
    pub fn record_pull(&self) {
        self.pulls.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a delayed node being forced.
    #[inline]
    pub fn record_force(&self) {
        self.forces.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a solution state surfacing.
    #[inline]
    pub fn record_solution(&self) {
        self.solutions.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an integrity fault.
    #[inline]
    pub fn record_fault(&self) {
        self.faults.fetch_add(1, Ordering::Relaxed);
    }

    /// Generate a snapshot report of all counters.
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            pulls: self.pulls.load(Ordering::Relaxed),
            forces: self.forces.load(Ordering::Relaxed),
            solutions: self.solutions.load(Ordering::Relaxed),
            faults: self.faults.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.pulls.store(0, Ordering::Relaxed);
        self.forces.store(0, Ordering::Relaxed);
        self.solutions.store(0, Ordering::Relaxed);
        self.faults.store(0, Ordering::Relaxed);
    }
}

#[cfg(feature = "tracing")]
impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of search counters at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsReport {
    pub pulls: u64,
    pub forces: u64,
    pub solutions: u64,
    pub faults: u64,
}

impl MetricsReport {
    /// Average number of forces spent per surfaced solution.
    pub fn forces_per_solution(&self) -> f64 {
        if self.solutions == 0 {
            0.0
        } else {
            self.forces as f64 / self.solutions as f64
        }
    }
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Search Metrics ===")?;
        writeln!(f, "Pulls:      {}", self.pulls)?;
        writeln!(
            f,
            "Forces:     {} ({:.1} per solution)",
            self.forces,
            self.forces_per_solution()
        )?;
        writeln!(f, "Solutions:  {}", self.solutions)?;
        writeln!(f, "Faults:     {}", self.faults)?;
        Ok(())
    }
}

// No-op implementation when tracing is disabled
#[cfg(not(feature = "tracing"))]
pub struct SearchMetrics;

#[cfg(not(feature = "tracing"))]
impl SearchMetrics {
    #[inline]
    pub fn new() -> Self {
        SearchMetrics
    }
    #[inline]
    pub fn record_pull(&self) {}
    #[inline]
    pub fn record_force(&self) {}
    #[inline]
    pub fn record_solution(&self) {}
    #[inline]
    pub fn record_fault(&self) {}
    #[inline]
    pub fn report(&self) -> MetricsReport {
        MetricsReport::default()
    }
    #[inline]
    pub fn reset(&self) {}
}

#[cfg(not(feature = "tracing"))]
impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}
