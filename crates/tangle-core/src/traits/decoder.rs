use crate::error::DecodeError;
use crate::types::{PrimaryRecord, StatusRecord};

/// Record decoder: turn raw bucket values into typed records
///
/// The scanner treats decoding as opaque; any failure is reported as a
/// [`DecodeError`] and the record is skipped.
pub trait RecordDecoder {
    /// Decode a primary-bucket value stored under `key`
    fn decode_primary(&self, key: &[u8], value: &[u8]) -> Result<PrimaryRecord, DecodeError>;

    /// Decode a status-bucket value stored under `key`
    fn decode_status(&self, key: &[u8], value: &[u8]) -> Result<StatusRecord, DecodeError>;

    /// Human-readable form of a raw key, used in log lines
    fn display_key(&self, key: &[u8]) -> String {
        key.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
