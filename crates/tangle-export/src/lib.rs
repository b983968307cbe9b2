//! Tangle export: join two buckets of an ordered store into a line file
//!
//! - [`JoinScanner`]: drives the primary bucket, probes the status bucket by
//!   key prefix and classifies each record's outcome
//! - [`LineExporter`]: formats merged records as comma-separated lines
//! - [`ScanStats`]: per-run counters

pub mod error;
pub mod exporter;
pub mod scanner;
pub mod stats;

pub use error::ExportError;
pub use exporter::{format_line, LineExporter, RecordSink};
pub use scanner::{resolve_buckets, scan_store, JoinScanner};
pub use stats::{RecordOutcome, ScanStats};
