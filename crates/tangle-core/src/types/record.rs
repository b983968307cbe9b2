/// A decoded primary record: one ledger transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryRecord {
    /// Textual identifier (transaction hash)
    pub id: String,
    /// Canonical re-encoded textual form of the whole record
    pub body: String,
}

/// Identifiers of the records a transaction references
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordLinks {
    pub trunk: String,
    pub branch: String,
    pub bundle: String,
}

/// Classification flags carried by a status record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFlags {
    pub solid: bool,
    pub confirmed: bool,
    pub conflicting: bool,
    pub head: bool,
    pub tail: bool,
    pub value: bool,
}

/// A decoded status record: confirmation and structural metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRecord {
    /// Textual identifier of the transaction this status belongs to
    pub id: String,
    pub flags: StatusFlags,
    pub solidification_timestamp: u64,
    /// Milestone index that confirmed the transaction (0 if unconfirmed)
    pub confirmation_index: u32,
    pub links: RecordLinks,
}

/// Merged, flattened view of a primary record and its status.
///
/// Built once per primary entry during a scan and dropped after it has been
/// handed to the exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    pub id: String,
    pub links: RecordLinks,
    pub solid: bool,
    pub confirmed: bool,
    pub confirmation_index: u32,
    pub conflicting: bool,
    pub head: bool,
    pub tail: bool,
    pub value: bool,
    pub body: String,
}

impl ExportRecord {
    /// Join a primary record with its status.
    ///
    /// The identifier always comes from the primary record.
    pub fn merge(primary: PrimaryRecord, status: StatusRecord) -> Self {
        let flags = status.flags;
        Self {
            id: primary.id,
            links: status.links,
            solid: flags.solid,
            confirmed: flags.confirmed,
            confirmation_index: status.confirmation_index,
            conflicting: flags.conflicting,
            head: flags.head,
            tail: flags.tail,
            value: flags.value,
            body: primary.body,
        }
    }

    /// Conflict flag as the 0/1 byte written to the export line
    pub fn conflict_bit(&self) -> u8 {
        u8::from(self.conflicting)
    }
}
