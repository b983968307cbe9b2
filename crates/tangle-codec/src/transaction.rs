use tangle_core::DecodeError;

use crate::trinary::{decode_t5b1, encode_t5b1, t5b1_len, trits_to_trytes, trytes_to_trits};

pub const HASH_TRITS: usize = 243;
pub const HASH_TRYTES: usize = HASH_TRITS / 3;
/// 49 bytes; the last byte carries two zero padding trits
pub const HASH_BYTES: usize = t5b1_len(HASH_TRITS);

pub const TRANSACTION_TRITS: usize = 8019;
pub const TRANSACTION_TRYTES: usize = TRANSACTION_TRITS / 3;
/// 1604 bytes; the last byte carries one zero padding trit
pub const TRANSACTION_BYTES: usize = t5b1_len(TRANSACTION_TRITS);

/// Decode a packed 243-trit hash into its 81-tryte form
pub fn hash_to_trytes(bytes: &[u8]) -> Result<String, DecodeError> {
    trits_to_trytes(&decode_t5b1(bytes, HASH_TRITS)?)
}

/// Pack an 81-tryte hash into its stored form
pub fn hash_from_trytes(trytes: &str) -> Result<Vec<u8>, DecodeError> {
    if trytes.len() != HASH_TRYTES {
        return Err(DecodeError::InvalidLength {
            expected: HASH_TRYTES,
            actual: trytes.len(),
        });
    }
    Ok(encode_t5b1(&trytes_to_trits(trytes)?))
}

/// Decode a stored transaction into its 2673-tryte canonical form
pub fn transaction_to_trytes(bytes: &[u8]) -> Result<String, DecodeError> {
    trits_to_trytes(&decode_t5b1(bytes, TRANSACTION_TRITS)?)
}

/// Pack a 2673-tryte transaction into its stored form
pub fn transaction_from_trytes(trytes: &str) -> Result<Vec<u8>, DecodeError> {
    if trytes.len() != TRANSACTION_TRYTES {
        return Err(DecodeError::InvalidLength {
            expected: TRANSACTION_TRYTES,
            actual: trytes.len(),
        });
    }
    Ok(encode_t5b1(&trytes_to_trits(trytes)?))
}
