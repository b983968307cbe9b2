pub mod bucket;
pub mod record;

pub use bucket::{BucketId, METADATA_BUCKET_TAG, TRANSACTION_BUCKET_TAG};
pub use record::{ExportRecord, PrimaryRecord, RecordLinks, StatusFlags, StatusRecord};
