//! Store fixtures for tests
//!
//! Writes an LMDB file in the layout [`LmdbStore`](crate::LmdbStore) reads.
//! Only compiled for tests or with the `testutil` feature.

use lmdb::{DatabaseFlags, Environment, EnvironmentFlags, Transaction, WriteFlags};
use std::path::Path;
use tangle_core::{
    error::{Result, StoreError},
    types::BucketId,
};

use crate::store::map_lmdb;

/// Writable LMDB environment used to seed a store file
pub struct StoreFixture {
    env: Environment,
}

impl StoreFixture {
    /// Create (or reopen) a single-file store at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let mut env_builder = Environment::new();
        env_builder.set_max_dbs(8);
        env_builder.set_map_size(64 * 1024 * 1024);
        env_builder.set_flags(EnvironmentFlags::NO_SUB_DIR);
        let env = env_builder
            .open(path)
            .map_err(|e| StoreError::Open(e.to_string()))?;
        Ok(Self { env })
    }

    /// Create `bucket` and write `entries` into it
    pub fn bucket(self, bucket: &BucketId, entries: &[(Vec<u8>, Vec<u8>)]) -> Result<Self> {
        let db = self
            .env
            .create_db(Some(&bucket.name()), DatabaseFlags::empty())
            .map_err(map_lmdb)?;

        let mut txn = self.env.begin_rw_txn().map_err(map_lmdb)?;
        for (key, value) in entries {
            txn.put(db, key, value, WriteFlags::empty())
                .map_err(map_lmdb)?;
        }
        txn.commit().map_err(map_lmdb)?;

        Ok(self)
    }
}
