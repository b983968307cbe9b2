//! Tangle codec: decoders for the buckets of a tangle store
//!
//! Transactions and hashes are stored as balanced-ternary trits packed five
//! to a byte; [`TangleDecoder`] turns them back into tryte strings and pairs
//! them with decoded [`TransactionMetadata`].

pub mod decoder;
pub mod metadata;
pub mod transaction;
pub mod trinary;

pub use decoder::TangleDecoder;
pub use metadata::TransactionMetadata;
pub use transaction::{
    hash_from_trytes, hash_to_trytes, transaction_from_trytes, transaction_to_trytes, HASH_BYTES,
    HASH_TRYTES, TRANSACTION_BYTES, TRANSACTION_TRYTES,
};
