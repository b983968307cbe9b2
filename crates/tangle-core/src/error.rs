use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Structural and setup failures of the store layer.
///
/// Every variant is fatal to an export run: either the run never starts, or
/// the scan is aborted because the store handle is no longer usable.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Store not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to open store: {0}")]
    Open(String),

    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    #[error("Read transaction is closed")]
    TransactionClosed,

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failure to decode a single record's raw bytes.
///
/// Always recoverable: the scanner logs it and moves on to the next entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("byte {value} at offset {offset} is not a valid trit group")]
    InvalidTrit { offset: usize, value: i8 },

    #[error("padding trits are not zero")]
    NonZeroPadding,

    #[error("malformed record: {0}")]
    Malformed(String),
}
