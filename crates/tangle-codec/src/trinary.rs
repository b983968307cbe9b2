//! Balanced-ternary conversions
//!
//! - trit: one of -1, 0, 1
//! - tryte: three trits, written with the alphabet `9A..Z`
//! - `t5b1`: five trits packed little-endian into one signed byte

use tangle_core::DecodeError;

pub type Trit = i8;

pub const TRITS_PER_TRYTE: usize = 3;
pub const TRITS_PER_BYTE: usize = 5;

/// Largest magnitude a `t5b1` byte can hold: (3^5 - 1) / 2
const MAX_T5B1: i32 = 121;

/// `9` is zero, `A..M` are 1..13, `N..Z` are -13..-1
pub const TRYTE_ALPHABET: &[u8; 27] = b"9ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of `t5b1` bytes needed for `num_trits` trits
pub const fn t5b1_len(num_trits: usize) -> usize {
    num_trits.div_ceil(TRITS_PER_BYTE)
}

/// Unpack exactly `num_trits` trits from `t5b1` bytes
///
/// The byte count must match `num_trits` exactly and any padding trits in
/// the last byte must be zero.
pub fn decode_t5b1(bytes: &[u8], num_trits: usize) -> Result<Vec<Trit>, DecodeError> {
    let expected = t5b1_len(num_trits);
    if bytes.len() != expected {
        return Err(DecodeError::InvalidLength {
            expected,
            actual: bytes.len(),
        });
    }

    let mut trits = Vec::with_capacity(expected * TRITS_PER_BYTE);
    for (offset, &byte) in bytes.iter().enumerate() {
        let signed = byte as i8;
        let mut v = i32::from(signed);
        if !(-MAX_T5B1..=MAX_T5B1).contains(&v) {
            return Err(DecodeError::InvalidTrit {
                offset,
                value: signed,
            });
        }
        for _ in 0..TRITS_PER_BYTE {
            let mut rem = v % 3;
            v /= 3;
            if rem == 2 {
                rem = -1;
                v += 1;
            } else if rem == -2 {
                rem = 1;
                v -= 1;
            }
            trits.push(rem as Trit);
        }
    }

    if trits[num_trits..].iter().any(|&t| t != 0) {
        return Err(DecodeError::NonZeroPadding);
    }
    trits.truncate(num_trits);
    Ok(trits)
}

/// Pack trits into `t5b1` bytes, zero-padding the last group
pub fn encode_t5b1(trits: &[Trit]) -> Vec<u8> {
    trits
        .chunks(TRITS_PER_BYTE)
        .map(|group| {
            let v = group
                .iter()
                .rev()
                .fold(0i32, |acc, &t| acc * 3 + i32::from(t));
            v as i8 as u8
        })
        .collect()
}

/// Render trits as trytes; the trit count must be a multiple of three
/// and every value must be -1, 0 or 1
pub fn trits_to_trytes(trits: &[Trit]) -> Result<String, DecodeError> {
    if trits.len() % TRITS_PER_TRYTE != 0 {
        return Err(DecodeError::Malformed(format!(
            "{} trits do not form whole trytes",
            trits.len()
        )));
    }
    if let Some(pos) = trits.iter().position(|t| !(-1..=1).contains(t)) {
        return Err(DecodeError::Malformed(format!(
            "value {} at position {} is not a trit",
            trits[pos], pos
        )));
    }
    let trytes = trits
        .chunks(TRITS_PER_TRYTE)
        .map(|t| {
            let v = i32::from(t[0]) + 3 * i32::from(t[1]) + 9 * i32::from(t[2]);
            let index = if v < 0 { v + 27 } else { v };
            TRYTE_ALPHABET[index as usize] as char
        })
        .collect();
    Ok(trytes)
}

/// Parse a tryte string back into trits
pub fn trytes_to_trits(trytes: &str) -> Result<Vec<Trit>, DecodeError> {
    let mut trits = Vec::with_capacity(trytes.len() * TRITS_PER_TRYTE);
    for c in trytes.bytes() {
        let index = TRYTE_ALPHABET
            .iter()
            .position(|&a| a == c)
            .ok_or_else(|| DecodeError::Malformed(format!("invalid tryte '{}'", c as char)))?;
        let mut v = index as i32;
        if v > 13 {
            v -= 27;
        }
        for _ in 0..TRITS_PER_TRYTE {
            let mut rem = v % 3;
            v /= 3;
            if rem == 2 {
                rem = -1;
                v += 1;
            } else if rem == -2 {
                rem = 1;
                v -= 1;
            }
            trits.push(rem as Trit);
        }
    }
    Ok(trits)
}
