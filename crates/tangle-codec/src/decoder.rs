use tangle_core::{DecodeError, PrimaryRecord, RecordDecoder, StatusRecord};

use crate::metadata::TransactionMetadata;
use crate::transaction::{hash_to_trytes, transaction_to_trytes, HASH_BYTES};

/// Decoder for the transaction and metadata buckets of a tangle store
///
/// - transaction bucket: key = packed hash, value = packed transaction trits
/// - metadata bucket: key = packed hash (optionally followed by a
///   discriminator), value = [`TransactionMetadata`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TangleDecoder;

impl TangleDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for TangleDecoder {
    fn decode_primary(&self, key: &[u8], value: &[u8]) -> Result<PrimaryRecord, DecodeError> {
        if key.len() != HASH_BYTES {
            return Err(DecodeError::InvalidLength {
                expected: HASH_BYTES,
                actual: key.len(),
            });
        }
        Ok(PrimaryRecord {
            id: hash_to_trytes(key)?,
            body: transaction_to_trytes(value)?,
        })
    }

    fn decode_status(&self, key: &[u8], value: &[u8]) -> Result<StatusRecord, DecodeError> {
        if key.len() < HASH_BYTES {
            return Err(DecodeError::InvalidLength {
                expected: HASH_BYTES,
                actual: key.len(),
            });
        }
        let metadata = TransactionMetadata::decode(value)?;
        Ok(StatusRecord {
            id: hash_to_trytes(&key[..HASH_BYTES])?,
            flags: metadata.flags,
            solidification_timestamp: metadata.solidification_timestamp,
            confirmation_index: metadata.confirmation_index,
            links: metadata.links,
        })
    }

    fn display_key(&self, key: &[u8]) -> String {
        if key.len() == HASH_BYTES {
            if let Ok(trytes) = hash_to_trytes(key) {
                return trytes;
            }
        }
        key.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{
        hash_from_trytes, transaction_from_trytes, HASH_TRYTES, TRANSACTION_TRYTES,
    };
    use tangle_core::{RecordLinks, StatusFlags};

    fn key(c: char) -> Vec<u8> {
        hash_from_trytes(&c.to_string().repeat(HASH_TRYTES)).unwrap()
    }

    #[test]
    fn test_decode_primary() {
        let body = "9".repeat(TRANSACTION_TRYTES - 3) + "XYZ";
        let value = transaction_from_trytes(&body).unwrap();
        let record = TangleDecoder.decode_primary(&key('A'), &value).unwrap();
        assert_eq!(record.id, "A".repeat(HASH_TRYTES));
        assert_eq!(record.body, body);
    }

    #[test]
    fn test_decode_primary_rejects_bad_key() {
        let value = transaction_from_trytes(&"9".repeat(TRANSACTION_TRYTES)).unwrap();
        assert!(matches!(
            TangleDecoder.decode_primary(b"short", &value),
            Err(DecodeError::InvalidLength { expected: 49, actual: 5 })
        ));
    }

    #[test]
    fn test_decode_status_with_discriminator() {
        let metadata = TransactionMetadata {
            flags: StatusFlags {
                confirmed: true,
                conflicting: true,
                ..Default::default()
            },
            confirmation_index: 7,
            links: RecordLinks {
                trunk: "T".repeat(HASH_TRYTES),
                branch: "B".repeat(HASH_TRYTES),
                bundle: "U".repeat(HASH_TRYTES),
            },
            ..Default::default()
        };
        let mut status_key = key('C');
        status_key.push(0x01);

        let status = TangleDecoder
            .decode_status(&status_key, &metadata.encode().unwrap())
            .unwrap();
        assert_eq!(status.id, "C".repeat(HASH_TRYTES));
        assert_eq!(status.confirmation_index, 7);
        assert!(status.flags.confirmed && status.flags.conflicting);
        assert_eq!(status.links, metadata.links);
    }

    #[test]
    fn test_display_key() {
        assert_eq!(TangleDecoder.display_key(&key('A')), "A".repeat(HASH_TRYTES));
        assert_eq!(TangleDecoder.display_key(&[0xde, 0xad]), "dead");
    }
}
