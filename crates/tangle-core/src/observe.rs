//! Optional metrics instrumentation for exports.
//!
//! When the `observe` feature is enabled, the scanner emits counters and a
//! duration histogram via the [`metrics`] crate. A downstream application must
//! install a metrics recorder to collect the data.
//!
//! When the feature is **not** enabled every function in this module is a
//! zero-cost no-op.

/// Record the outcome of one primary record.
///
/// - `tangle.export.records_total` – counter with `outcome` label
#[inline]
pub fn record_outcome(outcome: &'static str) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("tangle.export.records_total", "outcome" => outcome).increment(1);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = outcome;
    }
}

/// Record a completed scan.
///
/// - `tangle.export.scan_duration_seconds` – histogram
/// - `tangle.export.exported_total` – counter
#[inline]
pub fn record_scan(duration: std::time::Duration, exported: u64) {
    #[cfg(feature = "observe")]
    {
        metrics::histogram!("tangle.export.scan_duration_seconds").record(duration.as_secs_f64());
        metrics::counter!("tangle.export.exported_total").increment(exported);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = (duration, exported);
    }
}
