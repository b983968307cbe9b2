//! Transaction metadata layout
//!
//! ```text
//! [0]         flags: bit0 solid, bit1 confirmed, bit2 conflicting,
//!             bit3 head, bit4 tail, bit5 value
//! [1..9]      solidification timestamp, u64 little-endian
//! [9..13]     confirmation milestone index, u32 little-endian
//! [13..62]    trunk hash
//! [62..111]   branch hash
//! [111..160]  bundle hash
//! ```
//!
//! Bytes past the bundle hash are ignored.

use tangle_core::{DecodeError, RecordLinks, StatusFlags};

use crate::transaction::{hash_from_trytes, hash_to_trytes, HASH_BYTES};

pub const FLAG_SOLID: u8 = 1 << 0;
pub const FLAG_CONFIRMED: u8 = 1 << 1;
pub const FLAG_CONFLICTING: u8 = 1 << 2;
pub const FLAG_HEAD: u8 = 1 << 3;
pub const FLAG_TAIL: u8 = 1 << 4;
pub const FLAG_VALUE: u8 = 1 << 5;

const TIMESTAMP_OFFSET: usize = 1;
const CONFIRMATION_OFFSET: usize = 9;
const TRUNK_OFFSET: usize = 13;
const BRANCH_OFFSET: usize = TRUNK_OFFSET + HASH_BYTES;
const BUNDLE_OFFSET: usize = BRANCH_OFFSET + HASH_BYTES;

pub const METADATA_BYTES: usize = BUNDLE_OFFSET + HASH_BYTES;

/// Decoded transaction metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionMetadata {
    pub flags: StatusFlags,
    pub solidification_timestamp: u64,
    pub confirmation_index: u32,
    pub links: RecordLinks,
}

impl TransactionMetadata {
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < METADATA_BYTES {
            return Err(DecodeError::InvalidLength {
                expected: METADATA_BYTES,
                actual: bytes.len(),
            });
        }

        let bits = bytes[0];
        let flags = StatusFlags {
            solid: bits & FLAG_SOLID != 0,
            confirmed: bits & FLAG_CONFIRMED != 0,
            conflicting: bits & FLAG_CONFLICTING != 0,
            head: bits & FLAG_HEAD != 0,
            tail: bits & FLAG_TAIL != 0,
            value: bits & FLAG_VALUE != 0,
        };

        let mut timestamp = [0u8; 8];
        timestamp.copy_from_slice(&bytes[TIMESTAMP_OFFSET..CONFIRMATION_OFFSET]);
        let mut confirmation = [0u8; 4];
        confirmation.copy_from_slice(&bytes[CONFIRMATION_OFFSET..TRUNK_OFFSET]);

        let links = RecordLinks {
            trunk: hash_to_trytes(&bytes[TRUNK_OFFSET..BRANCH_OFFSET])?,
            branch: hash_to_trytes(&bytes[BRANCH_OFFSET..BUNDLE_OFFSET])?,
            bundle: hash_to_trytes(&bytes[BUNDLE_OFFSET..METADATA_BYTES])?,
        };

        Ok(Self {
            flags,
            solidification_timestamp: u64::from_le_bytes(timestamp),
            confirmation_index: u32::from_le_bytes(confirmation),
            links,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, DecodeError> {
        let f = &self.flags;
        let mut bits = 0u8;
        for (set, flag) in [
            (f.solid, FLAG_SOLID),
            (f.confirmed, FLAG_CONFIRMED),
            (f.conflicting, FLAG_CONFLICTING),
            (f.head, FLAG_HEAD),
            (f.tail, FLAG_TAIL),
            (f.value, FLAG_VALUE),
        ] {
            if set {
                bits |= flag;
            }
        }

        let mut bytes = Vec::with_capacity(METADATA_BYTES);
        bytes.push(bits);
        bytes.extend_from_slice(&self.solidification_timestamp.to_le_bytes());
        bytes.extend_from_slice(&self.confirmation_index.to_le_bytes());
        for hash in [&self.links.trunk, &self.links.branch, &self.links.bundle] {
            bytes.extend_from_slice(&hash_from_trytes(hash)?);
        }
        Ok(bytes)
    }
}
