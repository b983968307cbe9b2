//! End-to-end export tests over an LMDB store file

use tangle_codec::{
    hash_from_trytes, hash_to_trytes, transaction_from_trytes, TangleDecoder, TransactionMetadata,
    HASH_TRYTES, TRANSACTION_BYTES, TRANSACTION_TRYTES,
};
use tangle_core::{traits::OrderedStore, BucketId, ExportConfig, RecordLinks, StatusFlags};
use tangle_export::{scan_store, LineExporter, ScanStats};
use tangle_lmdb::{testutil::StoreFixture, LmdbStore};
use tempfile::TempDir;

type Entries = Vec<(Vec<u8>, Vec<u8>)>;

/// Packed key for an id made of one repeated tryte
fn hash(c: char) -> Vec<u8> {
    hash_from_trytes(&c.to_string().repeat(HASH_TRYTES)).unwrap()
}

fn id(c: char) -> String {
    c.to_string().repeat(HASH_TRYTES)
}

/// Transaction trytes starting with `prefix`, zero-filled
fn body(prefix: &str) -> String {
    format!("{}{}", prefix, "9".repeat(TRANSACTION_TRYTES - prefix.len()))
}

fn transaction(prefix: &str) -> Vec<u8> {
    transaction_from_trytes(&body(prefix)).unwrap()
}

fn metadata(confirmation_index: u32, conflicting: bool) -> Vec<u8> {
    TransactionMetadata {
        flags: StatusFlags {
            solid: true,
            confirmed: confirmation_index > 0,
            conflicting,
            tail: true,
            ..Default::default()
        },
        solidification_timestamp: 1_600_000_000,
        confirmation_index,
        links: RecordLinks {
            trunk: id('T'),
            branch: id('B'),
            bundle: id('U'),
        },
    }
    .encode()
    .unwrap()
}

fn status_key(c: char, discriminator: u8) -> Vec<u8> {
    let mut key = hash(c);
    key.push(discriminator);
    key
}

struct Fixture {
    _temp: TempDir,
    cfg: ExportConfig,
}

impl Fixture {
    fn new(transactions: Entries, metadata: Entries) -> Self {
        let temp = TempDir::new().unwrap();
        let cfg = ExportConfig::new(temp.path()).with_output(temp.path().join("output.txt"));
        StoreFixture::create(&cfg.store_path())
            .unwrap()
            .bucket(&BucketId::transactions(), &transactions)
            .unwrap()
            .bucket(&BucketId::metadata(), &metadata)
            .unwrap();
        Self { _temp: temp, cfg }
    }

    fn export(&self) -> ScanStats {
        let store = LmdbStore::open(&self.cfg).unwrap();
        let mut exporter = LineExporter::create(&self.cfg.output, self.cfg.append).unwrap();
        let stats = scan_store(&store, &self.cfg, &TangleDecoder, &mut exporter).unwrap();
        exporter.finish().unwrap();
        store.close().unwrap();
        stats
    }

    fn output(&self) -> String {
        std::fs::read_to_string(&self.cfg.output).unwrap()
    }
}

#[test]
fn test_confirmed_record_is_exported() {
    let fixture = Fixture::new(
        vec![(hash('A'), transaction("HELLO"))],
        vec![(status_key('A', 0), metadata(42, false))],
    );
    let stats = fixture.export();

    assert_eq!(stats.total, 1);
    assert_eq!(stats.exported, 1);
    assert_eq!(
        fixture.output(),
        format!("{},{},0,42\n", id('A'), body("HELLO"))
    );
}

#[test]
fn test_conflicting_record_sets_flag() {
    let fixture = Fixture::new(
        vec![(hash('C'), transaction("X"))],
        vec![(hash('C'), metadata(7, true))],
    );
    fixture.export();
    assert_eq!(fixture.output(), format!("{},{},1,7\n", id('C'), body("X")));
}

#[test]
fn test_record_without_status_is_skipped() {
    let fixture = Fixture::new(
        vec![(hash('A'), transaction("A"))],
        vec![(status_key('B', 0), metadata(1, false))],
    );
    let stats = fixture.export();

    assert_eq!(stats.total, 1);
    assert_eq!(stats.exported, 0);
    assert_eq!(stats.status_not_found, 1);
    assert_eq!(fixture.output(), "");
}

#[test]
fn test_unprocessed_record_after_last_status_key() {
    let fixture = Fixture::new(
        vec![(hash('A'), transaction("A")), (hash('Z'), transaction("Z"))],
        vec![(status_key('A', 0), metadata(4, false))],
    );
    let stats = fixture.export();

    assert_eq!(stats.total, 2);
    assert_eq!(stats.exported, 1);
    assert_eq!(stats.status_not_found, 1);
    assert_eq!(fixture.output(), format!("{},{},0,4\n", id('A'), body("A")));
}

#[test]
fn test_empty_primary_bucket() {
    let fixture = Fixture::new(vec![], vec![(hash('A'), metadata(1, false))]);
    let stats = fixture.export();

    assert_eq!(stats.total, 0);
    assert_eq!(stats.exported, 0);
    assert_eq!(fixture.output(), "");
}

#[test]
fn test_empty_status_bucket() {
    let fixture = Fixture::new(vec![(hash('A'), transaction("A"))], vec![]);
    let stats = fixture.export();

    assert_eq!(stats.total, 1);
    assert_eq!(stats.status_not_found, 1);
    assert_eq!(fixture.output(), "");
}

#[test]
fn test_malformed_transaction_is_skipped() {
    let fixture = Fixture::new(
        vec![
            (hash('A'), vec![0x7f; TRANSACTION_BYTES]),
            (hash('B'), transaction("OK")),
        ],
        vec![
            (status_key('A', 0), metadata(1, false)),
            (status_key('B', 0), metadata(2, false)),
        ],
    );
    let stats = fixture.export();

    assert_eq!(stats.total, 2);
    assert_eq!(stats.exported, 1);
    assert_eq!(stats.primary_decode_failed, 1);
    assert_eq!(fixture.output(), format!("{},{},0,2\n", id('B'), body("OK")));
}

#[test]
fn test_first_status_entry_wins() {
    let fixture = Fixture::new(
        vec![(hash('B'), transaction("B"))],
        vec![
            (status_key('B', 1), metadata(20, true)),
            (status_key('B', 0), metadata(10, false)),
        ],
    );
    let stats = fixture.export();

    assert_eq!(stats.exported, 1);
    assert_eq!(fixture.output(), format!("{},{},0,10\n", id('B'), body("B")));
}

#[test]
fn test_lines_follow_key_byte_order() {
    let ids = ['M', 'A', 'Z', 'N', '9', 'Q'];
    let transactions: Entries = ids.iter().map(|&c| (hash(c), transaction("T"))).collect();
    let statuses: Entries = ids.iter().map(|&c| (hash(c), metadata(3, false))).collect();
    let fixture = Fixture::new(transactions, statuses);
    let stats = fixture.export();

    let mut keys: Vec<Vec<u8>> = ids.iter().map(|&c| hash(c)).collect();
    keys.sort();
    let expected: Vec<String> = keys.iter().map(|k| hash_to_trytes(k).unwrap()).collect();

    let visited: Vec<String> = fixture
        .output()
        .lines()
        .map(|line| line.split(',').next().unwrap().to_string())
        .collect();
    assert_eq!(visited, expected);
    assert_eq!(stats.exported, ids.len() as u64);
}

#[test]
fn test_repeated_runs_are_identical() {
    let fixture = Fixture::new(
        vec![
            (hash('A'), transaction("ONE")),
            (hash('B'), transaction("TWO")),
            (hash('C'), transaction("THREE")),
        ],
        vec![
            (hash('A'), metadata(1, false)),
            (hash('C'), metadata(3, true)),
        ],
    );
    let first_stats = fixture.export();
    let first = std::fs::read(&fixture.cfg.output).unwrap();
    let second_stats = fixture.export();
    let second = std::fs::read(&fixture.cfg.output).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_stats.exported, 2);
    assert_eq!(first_stats.total, second_stats.total);
}

#[test]
fn test_append_mode_keeps_previous_output() {
    let mut fixture = Fixture::new(
        vec![(hash('A'), transaction("A"))],
        vec![(hash('A'), metadata(1, false))],
    );
    fixture.export();
    fixture.cfg = fixture.cfg.clone().with_append(true);
    fixture.export();

    let line = format!("{},{},0,1\n", id('A'), body("A"));
    assert_eq!(fixture.output(), format!("{}{}", line, line));
}

#[test]
fn test_missing_status_bucket_is_fatal() {
    let temp = TempDir::new().unwrap();
    let cfg = ExportConfig::new(temp.path()).with_output(temp.path().join("output.txt"));
    StoreFixture::create(&cfg.store_path())
        .unwrap()
        .bucket(&BucketId::transactions(), &[(hash('A'), transaction("A"))])
        .unwrap();

    let store = LmdbStore::open(&cfg).unwrap();
    let mut exporter = LineExporter::new(Vec::new());
    let err = scan_store(&store, &cfg, &TangleDecoder, &mut exporter).unwrap_err();
    assert!(matches!(err, tangle_core::StoreError::BucketNotFound(_)));
    assert_eq!(exporter.lines_written(), 0);
}
