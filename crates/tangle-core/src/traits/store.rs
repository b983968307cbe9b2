use crate::error::Result;
use crate::types::BucketId;

/// A borrowed key/value pair yielded by a cursor
pub type Entry<'t> = (&'t [u8], &'t [u8]);

/// Embedded, ordered, read-only key-value store partitioned into buckets
///
/// Implementations:
/// - `LmdbStore` (tangle-lmdb): reads an LMDB environment directly
/// - [`MemoryStore`](crate::memory::MemoryStore): sorted in-memory buckets
pub trait OrderedStore {
    /// Resolved bucket handle, valid for the lifetime of the store
    type Bucket: Copy;

    type Txn<'s>: ReadTxn<Bucket = Self::Bucket>
    where
        Self: 's;

    /// Resolve a bucket by its tag
    ///
    /// Fails with `BucketNotFound` if the store has no such bucket.
    fn bucket(&self, id: &BucketId) -> Result<Self::Bucket>;

    /// Begin a read transaction
    ///
    /// All cursors and lookups made through it observe one snapshot.
    fn read_txn(&self) -> Result<Self::Txn<'_>>;

    /// Release the store
    ///
    /// Consumes the handle so it cannot be closed twice. Dropping the store
    /// without calling this releases the same resources.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// Read transaction over an [`OrderedStore`]
pub trait ReadTxn {
    type Bucket: Copy;

    /// Forward-only cursor in ascending key order
    ///
    /// Borrowing the transaction ties the cursor to it; once exhausted a new
    /// cursor must be requested.
    type Cursor<'t>: Iterator<Item = Result<Entry<'t>>>
    where
        Self: 't;

    /// Cursor positioned at the first key >= `start`
    fn seek(&self, bucket: Self::Bucket, start: &[u8]) -> Result<Self::Cursor<'_>>;

    /// Cursor over the whole bucket, starting at its first key
    fn cursor(&self, bucket: Self::Bucket) -> Result<Self::Cursor<'_>> {
        self.seek(bucket, &[])
    }

    /// Values of every key starting with `prefix`, in ascending key order
    ///
    /// Seeks to `prefix` and stops at the first key that does not share it,
    /// so only the matching range is visited. No match yields an empty
    /// sequence.
    fn prefix_lookup<'t, 'p>(
        &'t self,
        bucket: Self::Bucket,
        prefix: &'p [u8],
    ) -> Result<PrefixLookup<'p, Self::Cursor<'t>>> {
        Ok(PrefixLookup::new(self.seek(bucket, prefix)?, prefix))
    }
}

/// Values whose key starts with a prefix
///
/// Wraps a cursor already positioned at the prefix. Ends at the first key
/// outside the prefix or on the first error.
pub struct PrefixLookup<'p, C> {
    cursor: C,
    prefix: &'p [u8],
    done: bool,
}

impl<'p, C> PrefixLookup<'p, C> {
    pub fn new(cursor: C, prefix: &'p [u8]) -> Self {
        Self {
            cursor,
            prefix,
            done: false,
        }
    }
}

impl<'t, 'p, C> Iterator for PrefixLookup<'p, C>
where
    C: Iterator<Item = Result<Entry<'t>>>,
{
    type Item = Result<&'t [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.next() {
            Some(Ok((key, value))) if key.starts_with(self.prefix) => Some(Ok(value)),
            Some(Err(e)) => {
                self.done = true;
                Some(Err(e))
            }
            Some(Ok(_)) | None => {
                self.done = true;
                None
            }
        }
    }
}
