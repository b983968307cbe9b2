//! Export command implementation

use anyhow::{Context, Result};
use tangle_codec::TangleDecoder;
use tangle_core::{traits::OrderedStore, ExportConfig};
use tangle_export::{resolve_buckets, JoinScanner, LineExporter};
use tangle_lmdb::LmdbStore;

pub fn execute(cfg: ExportConfig) -> Result<()> {
    tracing::info!("Exporting store: {}", cfg.store_path().display());

    let store = LmdbStore::open(&cfg).context("Failed to open store")?;
    let (primary, status) = resolve_buckets(&store, &cfg).context("Failed to resolve buckets")?;
    let txn = store.read_txn().context("Failed to begin read transaction")?;

    // Output is only created once every store-side setup step has succeeded
    let mut exporter =
        LineExporter::create(&cfg.output, cfg.append).context("Failed to open output file")?;

    let decoder = TangleDecoder::new();
    let stats = JoinScanner::new(&txn, primary, status, &decoder)
        .run(&mut exporter)
        .context("Export aborted")?;

    exporter.finish().context("Failed to flush output file")?;
    drop(txn);
    store.close().context("Failed to close store")?;

    tracing::info!("Total txs: {}", stats.total);
    tracing::info!("Success: {}", stats.exported);
    tracing::debug!(
        "Skipped {} (decode: {}, status not found: {}, status decode: {}, write: {}) in {:?}",
        stats.skipped(),
        stats.primary_decode_failed,
        stats.status_not_found,
        stats.status_decode_failed,
        stats.write_failed,
        stats.duration
    );

    Ok(())
}
