use lmdb::{Database, Environment, EnvironmentFlags};
use std::path::{Path, PathBuf};
use tangle_core::{
    error::{Result, StoreError},
    traits::OrderedStore,
    types::BucketId,
    ExportConfig,
};

use crate::txn::LmdbReadTxn;

/// Map an LMDB error onto the store error taxonomy
pub(crate) fn map_lmdb(e: lmdb::Error) -> StoreError {
    match e {
        lmdb::Error::BadTxn => StoreError::TransactionClosed,
        e => StoreError::Transaction(e.to_string()),
    }
}

/// Whether `path` exists and is a directory (`dir`) or a regular file
fn is_kind(path: &Path, dir: bool) -> Result<bool> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(if dir { meta.is_dir() } else { meta.is_file() }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StoreError::Io(e)),
    }
}

/// Read-only view of an LMDB environment stored in a single file
pub struct LmdbStore {
    env: Environment,
    path: PathBuf,
}

impl LmdbStore {
    /// Open the store file named by `cfg` read-only
    ///
    /// Fails with `NotFound` when the directory or file is missing, with `Io`
    /// when either cannot be inspected, and with `Open` when LMDB rejects the
    /// file (locked, corrupt, not an LMDB file).
    pub fn open(cfg: &ExportConfig) -> Result<Self> {
        if !is_kind(&cfg.store_dir, true)? {
            return Err(StoreError::NotFound(cfg.store_dir.clone()));
        }
        let path = cfg.store_path();
        if !is_kind(&path, false)? {
            return Err(StoreError::NotFound(path));
        }

        let mut env_builder = Environment::new();
        env_builder.set_max_dbs(cfg.max_buckets);
        env_builder.set_max_readers(cfg.max_readers);
        env_builder.set_flags(EnvironmentFlags::READ_ONLY | EnvironmentFlags::NO_SUB_DIR);

        let env = env_builder
            .open(&path)
            .map_err(|e| StoreError::Open(format!("{}: {}", path.display(), e)))?;

        tracing::debug!("Opened store read-only at {}", path.display());

        Ok(Self { env, path })
    }

    /// Path of the opened store file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OrderedStore for LmdbStore {
    type Bucket = Database;
    type Txn<'s> = LmdbReadTxn<'s>;

    fn bucket(&self, id: &BucketId) -> Result<Database> {
        let name = id.name();
        match self.env.open_db(Some(&name)) {
            Ok(db) => {
                tracing::debug!("Resolved bucket {}", name);
                Ok(db)
            }
            Err(lmdb::Error::NotFound) => Err(StoreError::BucketNotFound(name)),
            Err(e) => Err(map_lmdb(e)),
        }
    }

    fn read_txn(&self) -> Result<LmdbReadTxn<'_>> {
        let txn = self.env.begin_ro_txn().map_err(map_lmdb)?;
        Ok(LmdbReadTxn::new(txn))
    }

    fn close(self) -> Result<()> {
        // The environment is closed when dropped
        tracing::debug!("Closing store at {}", self.path.display());
        drop(self.env);
        Ok(())
    }
}
