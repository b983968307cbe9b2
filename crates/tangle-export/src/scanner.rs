use std::time::Instant;
use tangle_core::{
    error::Result,
    observe,
    traits::{OrderedStore, ReadTxn, RecordDecoder},
    ExportConfig, ExportRecord,
};

use crate::exporter::RecordSink;
use crate::stats::{RecordOutcome, ScanStats};

/// Join scanner: walks the primary bucket and joins each entry with the
/// first status entry sharing its key prefix
///
/// All lookups go through one read transaction, so the scan sees a single
/// snapshot of the store. Per-record failures are logged and counted; only
/// structural store errors end the scan early.
pub struct JoinScanner<'a, T, D>
where
    T: ReadTxn,
    D: RecordDecoder,
{
    txn: &'a T,
    primary: T::Bucket,
    status: T::Bucket,
    decoder: &'a D,
}

impl<'a, T, D> JoinScanner<'a, T, D>
where
    T: ReadTxn,
    D: RecordDecoder,
{
    pub fn new(txn: &'a T, primary: T::Bucket, status: T::Bucket, decoder: &'a D) -> Self {
        Self {
            txn,
            primary,
            status,
            decoder,
        }
    }

    /// Visit every primary entry in ascending key order, exporting joined records
    pub fn run<S: RecordSink>(&self, sink: &mut S) -> Result<ScanStats> {
        let start = Instant::now();
        let mut stats = ScanStats::default();

        for entry in self.txn.cursor(self.primary)? {
            let (key, value) = entry?;
            let outcome = self.process(key, value, sink)?;
            observe::record_outcome(outcome.as_str());
            stats.record(outcome);
        }

        stats.duration = start.elapsed();
        observe::record_scan(stats.duration, stats.exported);
        Ok(stats)
    }

    /// Decode, join and export a single primary entry
    ///
    /// Returns `Err` only for store failures; everything else is an outcome.
    pub fn process<S: RecordSink>(
        &self,
        key: &[u8],
        value: &[u8],
        sink: &mut S,
    ) -> Result<RecordOutcome> {
        let primary = match self.decoder.decode_primary(key, value) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    key = %self.decoder.display_key(key),
                    error = %e,
                    "error decoding transaction"
                );
                return Ok(RecordOutcome::PrimaryDecodeFailed);
            }
        };

        // Only the first status entry under the prefix is joined; later
        // entries for the same id are not read.
        let status_bytes = match self.txn.prefix_lookup(self.status, key)?.next() {
            Some(bytes) => bytes?,
            None => {
                tracing::info!("status not found for {}", primary.id);
                return Ok(RecordOutcome::StatusNotFound);
            }
        };

        let status = match self.decoder.decode_status(key, status_bytes) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(id = %primary.id, error = %e, "error decoding status");
                return Ok(RecordOutcome::StatusDecodeFailed);
            }
        };

        let record = ExportRecord::merge(primary, status);
        match sink.export(&record) {
            Ok(()) => {
                tracing::info!("{} ...done", record.id);
                Ok(RecordOutcome::Exported)
            }
            Err(e) => {
                tracing::error!(id = %record.id, error = %e, "failed to export record");
                Ok(RecordOutcome::WriteFailed)
            }
        }
    }
}

/// Check the bucket settings and resolve the (primary, status) handles
///
/// Fails on invalid settings or a missing bucket. Callers that create output
/// run this first so a setup failure leaves earlier output untouched.
pub fn resolve_buckets<S: OrderedStore>(
    store: &S,
    cfg: &ExportConfig,
) -> Result<(S::Bucket, S::Bucket)> {
    cfg.validate()?;
    let primary = store.bucket(&cfg.primary_bucket)?;
    let status = store.bucket(&cfg.status_bucket)?;
    Ok((primary, status))
}

/// Resolve the configured buckets, open one read transaction and run a scan
///
/// Missing buckets fail before any record is visited.
pub fn scan_store<S, D, K>(
    store: &S,
    cfg: &ExportConfig,
    decoder: &D,
    sink: &mut K,
) -> Result<ScanStats>
where
    S: OrderedStore,
    D: RecordDecoder,
    K: RecordSink,
{
    let (primary, status) = resolve_buckets(store, cfg)?;
    let txn = store.read_txn()?;

    let scanner = JoinScanner::new(&txn, primary, status, decoder);
    let stats = scanner.run(sink)?;
    Ok(stats)
}
