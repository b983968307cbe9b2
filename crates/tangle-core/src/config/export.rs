use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, StoreError};
use crate::types::BucketId;

/// Configuration for one export run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory containing the store file
    pub store_dir: PathBuf,

    /// Store file name inside `store_dir`
    /// Default: tangle.db
    #[serde(default = "default_store_file")]
    pub store_file: String,

    /// Output file for exported lines
    /// Default: output.txt
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Append to an existing output file instead of truncating it
    #[serde(default)]
    pub append: bool,

    /// Bucket driving the scan
    #[serde(default = "BucketId::transactions")]
    pub primary_bucket: BucketId,

    /// Bucket probed by prefix for each primary key
    #[serde(default = "BucketId::metadata")]
    pub status_bucket: BucketId,

    /// Maximum number of named buckets the environment may expose
    /// Default: 8
    #[serde(default = "default_max_buckets")]
    pub max_buckets: u32,

    /// Maximum number of readers (LMDB specific)
    /// Default: 126
    #[serde(default = "default_max_readers")]
    pub max_readers: u32,
}

fn default_store_file() -> String {
    "tangle.db".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("output.txt")
}

fn default_max_buckets() -> u32 {
    8
}

fn default_max_readers() -> u32 {
    126
}

impl ExportConfig {
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: store_dir.into(),
            store_file: default_store_file(),
            output: default_output(),
            append: false,
            primary_bucket: BucketId::transactions(),
            status_bucket: BucketId::metadata(),
            max_buckets: default_max_buckets(),
            max_readers: default_max_readers(),
        }
    }

    /// Full path of the store file
    pub fn store_path(&self) -> PathBuf {
        self.store_dir.join(&self.store_file)
    }

    /// Reject bucket settings no scan can run with
    pub fn validate(&self) -> Result<()> {
        if self.primary_bucket.as_bytes().is_empty() || self.status_bucket.as_bytes().is_empty()
        {
            return Err(StoreError::Config("bucket tags must not be empty".to_string()));
        }
        if self.primary_bucket == self.status_bucket {
            return Err(StoreError::Config(format!(
                "primary and status bucket are both {}",
                self.primary_bucket
            )));
        }
        Ok(())
    }

    pub fn with_store_file(mut self, name: impl Into<String>) -> Self {
        self.store_file = name.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    pub fn with_buckets(mut self, primary: BucketId, status: BucketId) -> Self {
        self.primary_bucket = primary;
        self.status_bucket = status;
        self
    }
}
