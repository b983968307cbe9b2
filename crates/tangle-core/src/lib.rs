//! Tangle Core: traits and types for read-only tangle store exports
//!
//! This crate defines the abstractions the export pipeline is built on:
//! - Ordered store: named buckets, snapshot read transactions, ordered cursors
//! - Prefix lookup: bounded scans over keys sharing a prefix
//! - Record decoder: raw bucket values to typed primary/status records
//! - Export record: the merged view written to the output file

pub mod config;
pub mod error;
pub mod memory;
pub mod observe;
pub mod traits;
pub mod types;

pub use config::ExportConfig;
pub use error::{DecodeError, Result, StoreError};
pub use memory::{MemoryBucket, MemoryStore};
pub use traits::{Entry, OrderedStore, PrefixLookup, ReadTxn, RecordDecoder};
pub use types::{BucketId, ExportRecord, PrimaryRecord, RecordLinks, StatusFlags, StatusRecord};
