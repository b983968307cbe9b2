//! In-memory ordered store
//!
//! Holds each bucket in a `BTreeMap`, giving the same byte-ordered iteration
//! as an on-disk store. Used to drive the scanner in tests and fixtures
//! without an LMDB environment.

use crate::error::{Result, StoreError};
use crate::traits::{Entry, OrderedStore, ReadTxn};
use crate::types::BucketId;
use std::collections::btree_map::{self, BTreeMap};
use std::ops::Bound;

#[derive(Debug)]
struct MemoryBucketData {
    id: BucketId,
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
    /// Yield `TransactionClosed` after this many entries from any cursor
    fail_after: Option<usize>,
}

/// Sorted in-memory buckets behind the [`OrderedStore`] traits
#[derive(Debug, Default)]
pub struct MemoryStore {
    buckets: Vec<MemoryBucketData>,
}

/// Index of a bucket inside a [`MemoryStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryBucket(usize);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, creating the bucket if needed
    pub fn insert(
        &mut self,
        bucket: &BucketId,
        key: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
    ) {
        self.bucket_mut(bucket)
            .entries
            .insert(key.into(), value.into());
    }

    /// Create an empty bucket
    pub fn create_bucket(&mut self, bucket: &BucketId) {
        self.bucket_mut(bucket);
    }

    /// Make every cursor over `bucket` fail after `entries` items.
    ///
    /// Simulates the read transaction becoming unusable mid-scan.
    pub fn fail_after(&mut self, bucket: &BucketId, entries: usize) {
        self.bucket_mut(bucket).fail_after = Some(entries);
    }

    pub fn len(&self, bucket: &BucketId) -> usize {
        self.buckets
            .iter()
            .find(|b| &b.id == bucket)
            .map_or(0, |b| b.entries.len())
    }

    pub fn is_empty(&self, bucket: &BucketId) -> bool {
        self.len(bucket) == 0
    }

    fn bucket_mut(&mut self, bucket: &BucketId) -> &mut MemoryBucketData {
        let index = match self.buckets.iter().position(|b| &b.id == bucket) {
            Some(index) => index,
            None => {
                self.buckets.push(MemoryBucketData {
                    id: bucket.clone(),
                    entries: BTreeMap::new(),
                    fail_after: None,
                });
                self.buckets.len() - 1
            }
        };
        &mut self.buckets[index]
    }
}

impl OrderedStore for MemoryStore {
    type Bucket = MemoryBucket;
    type Txn<'s> = MemoryReadTxn<'s>;

    fn bucket(&self, id: &BucketId) -> Result<MemoryBucket> {
        self.buckets
            .iter()
            .position(|b| &b.id == id)
            .map(MemoryBucket)
            .ok_or_else(|| StoreError::BucketNotFound(id.name()))
    }

    fn read_txn(&self) -> Result<MemoryReadTxn<'_>> {
        Ok(MemoryReadTxn { store: self })
    }

    fn close(self) -> Result<()> {
        Ok(())
    }
}

/// Read transaction over a [`MemoryStore`]; a shared borrow is the snapshot
pub struct MemoryReadTxn<'s> {
    store: &'s MemoryStore,
}

impl<'s> ReadTxn for MemoryReadTxn<'s> {
    type Bucket = MemoryBucket;
    type Cursor<'t> = MemoryCursor<'t> where Self: 't;

    fn seek(&self, bucket: MemoryBucket, start: &[u8]) -> Result<MemoryCursor<'_>> {
        let data = self
            .store
            .buckets
            .get(bucket.0)
            .ok_or_else(|| StoreError::BucketNotFound(format!("index {}", bucket.0)))?;
        let range = data
            .entries
            .range::<[u8], _>((Bound::Included(start), Bound::Unbounded));
        Ok(MemoryCursor {
            range,
            remaining: data.fail_after,
        })
    }
}

/// Cursor over one in-memory bucket
pub struct MemoryCursor<'t> {
    range: btree_map::Range<'t, Vec<u8>, Vec<u8>>,
    remaining: Option<usize>,
}

impl<'t> Iterator for MemoryCursor<'t> {
    type Item = Result<Entry<'t>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return Some(Err(StoreError::TransactionClosed));
            }
            *remaining -= 1;
        }
        self.range
            .next()
            .map(|(k, v)| Ok((k.as_slice(), v.as_slice())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (MemoryStore, BucketId) {
        let bucket = BucketId::new(vec![9]);
        let mut store = MemoryStore::new();
        store.insert(&bucket, b"b".to_vec(), b"2".to_vec());
        store.insert(&bucket, b"a".to_vec(), b"1".to_vec());
        store.insert(&bucket, b"c".to_vec(), b"3".to_vec());
        (store, bucket)
    }

    #[test]
    fn test_cursor_is_ordered() {
        let (store, id) = store();
        let bucket = store.bucket(&id).unwrap();
        let txn = store.read_txn().unwrap();
        let keys: Vec<&[u8]> = txn
            .cursor(bucket)
            .unwrap()
            .map(|e| e.unwrap().0)
            .collect();
        assert_eq!(keys, vec![b"a".as_slice(), b"b".as_slice(), b"c".as_slice()]);
    }

    #[test]
    fn test_seek_starts_at_first_key_not_less() {
        let (store, id) = store();
        let bucket = store.bucket(&id).unwrap();
        let txn = store.read_txn().unwrap();
        let (key, _) = txn.seek(bucket, b"bb").unwrap().next().unwrap().unwrap();
        assert_eq!(key, b"c");
    }

    #[test]
    fn test_missing_bucket() {
        let (store, _) = store();
        assert!(matches!(
            store.bucket(&BucketId::new(vec![1])),
            Err(StoreError::BucketNotFound(name)) if name == "01"
        ));
    }

    #[test]
    fn test_fail_after_reports_closed_transaction() {
        let (mut store, id) = store();
        store.fail_after(&id, 1);
        let bucket = store.bucket(&id).unwrap();
        let txn = store.read_txn().unwrap();
        let mut cursor = txn.cursor(bucket).unwrap();
        assert!(cursor.next().unwrap().is_ok());
        assert!(matches!(
            cursor.next(),
            Some(Err(StoreError::TransactionClosed))
        ));
    }
}
