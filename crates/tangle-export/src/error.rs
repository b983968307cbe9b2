use std::io;
use thiserror::Error;

/// Failure to write one export line
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("err writing to file: {0}")]
    Write(#[from] io::Error),
}
