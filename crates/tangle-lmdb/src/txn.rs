use lmdb::{Cursor, Database, RoCursor, RoTransaction, Transaction};
use lmdb_sys::{MDB_FIRST, MDB_NEXT, MDB_SET_RANGE};
use std::os::raw::c_uint;
use tangle_core::{
    error::{Result, StoreError},
    traits::{Entry, ReadTxn},
};

use crate::store::map_lmdb;

/// Read-only transaction for an LMDB store
///
/// Every cursor and prefix lookup taken from it sees the same snapshot.
/// The transaction is aborted when dropped.
pub struct LmdbReadTxn<'env> {
    txn: RoTransaction<'env>,
}

impl<'env> LmdbReadTxn<'env> {
    pub fn new(txn: RoTransaction<'env>) -> Self {
        Self { txn }
    }
}

impl<'env> ReadTxn for LmdbReadTxn<'env> {
    type Bucket = Database;
    type Cursor<'t> = LmdbCursor<'t> where Self: 't;

    fn seek(&self, db: Database, start: &[u8]) -> Result<LmdbCursor<'_>> {
        let cursor = self.txn.open_ro_cursor(db).map_err(map_lmdb)?;

        // Position cursor at the first key, or the first key >= start
        if start.is_empty() {
            LmdbCursor::position(cursor, None, MDB_FIRST)
        } else {
            LmdbCursor::position(cursor, Some(start), MDB_SET_RANGE)
        }
    }
}

/// Ordered cursor over one LMDB database
///
/// Keys and values borrow from the memory map for the life of the
/// transaction; nothing is copied. Running off the end of the database
/// ends the sequence, any other cursor failure is yielded once as `Err`.
pub struct LmdbCursor<'txn> {
    cursor: RoCursor<'txn>,
    // Entry found while positioning, returned by the first `next`
    head: Option<Entry<'txn>>,
    exhausted: bool,
}

impl<'txn> LmdbCursor<'txn> {
    fn position(cursor: RoCursor<'txn>, start: Option<&[u8]>, op: c_uint) -> Result<Self> {
        let mut this = Self {
            cursor,
            head: None,
            exhausted: false,
        };
        match this.step(start, op)? {
            Some(entry) => this.head = Some(entry),
            None => this.exhausted = true,
        }
        Ok(this)
    }

    fn step(&self, key: Option<&[u8]>, op: c_uint) -> Result<Option<Entry<'txn>>> {
        match self.cursor.get(key, None, op) {
            Ok((Some(key), value)) => Ok(Some((key, value))),
            Ok((None, _)) => Err(StoreError::Transaction(
                "cursor returned an entry without a key".to_string(),
            )),
            Err(lmdb::Error::NotFound) => Ok(None),
            Err(e) => Err(map_lmdb(e)),
        }
    }
}

impl<'txn> Iterator for LmdbCursor<'txn> {
    type Item = Result<Entry<'txn>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(entry) = self.head.take() {
            return Some(Ok(entry));
        }
        if self.exhausted {
            return None;
        }
        match self.step(None, MDB_NEXT) {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.exhausted = true;
                None
            }
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }
}
