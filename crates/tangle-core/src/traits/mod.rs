pub mod decoder;
pub mod store;

pub use decoder::RecordDecoder;
pub use store::{Entry, OrderedStore, PrefixLookup, ReadTxn};
