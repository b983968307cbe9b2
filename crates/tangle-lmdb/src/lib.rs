//! LMDB-backed ordered store
//!
//! Opens an existing LMDB environment read-only and exposes its named
//! databases as buckets.
//!
//! Key features:
//! - Read-only open: the data file is never written; LMDB still opens (and
//!   creates if missing) the `-lock` file next to it
//! - One read transaction per scan for a consistent snapshot
//! - Ordered cursors and prefix lookups borrowing directly from the map

pub mod store;
#[cfg(any(test, feature = "testutil"))]
pub mod testutil;
pub mod txn;

pub use store::LmdbStore;
pub use txn::{LmdbCursor, LmdbReadTxn};
