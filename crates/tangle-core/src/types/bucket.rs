use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag of the bucket holding raw ledger transactions
pub const TRANSACTION_BUCKET_TAG: u8 = 1;

/// Tag of the bucket holding transaction metadata
pub const METADATA_BUCKET_TAG: u8 = 2;

/// Identifying byte tag of a bucket
///
/// Backends that need a textual name (LMDB named databases) use [`BucketId::name`],
/// the lower-case hex form of the tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketId(Vec<u8>);

impl BucketId {
    pub fn new(tag: impl Into<Vec<u8>>) -> Self {
        Self(tag.into())
    }

    pub fn transactions() -> Self {
        Self(vec![TRANSACTION_BUCKET_TAG])
    }

    pub fn metadata() -> Self {
        Self(vec![METADATA_BUCKET_TAG])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn name(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_name_is_hex_of_tag() {
        assert_eq!(BucketId::transactions().name(), "01");
        assert_eq!(BucketId::metadata().name(), "02");
        assert_eq!(BucketId::new(vec![0xab, 0x00]).name(), "ab00");
    }
}
