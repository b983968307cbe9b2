use std::time::Duration;

/// Classified result of processing one primary-bucket entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Exported,
    PrimaryDecodeFailed,
    StatusNotFound,
    StatusDecodeFailed,
    WriteFailed,
}

impl RecordOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordOutcome::Exported => "exported",
            RecordOutcome::PrimaryDecodeFailed => "primary_decode_failed",
            RecordOutcome::StatusNotFound => "status_not_found",
            RecordOutcome::StatusDecodeFailed => "status_decode_failed",
            RecordOutcome::WriteFailed => "write_failed",
        }
    }
}

/// Counters for one export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Every primary entry visited
    pub total: u64,
    /// Entries written to the sink
    pub exported: u64,
    pub primary_decode_failed: u64,
    pub status_not_found: u64,
    pub status_decode_failed: u64,
    pub write_failed: u64,
    pub duration: Duration,
}

impl ScanStats {
    pub fn record(&mut self, outcome: RecordOutcome) {
        self.total += 1;
        match outcome {
            RecordOutcome::Exported => self.exported += 1,
            RecordOutcome::PrimaryDecodeFailed => self.primary_decode_failed += 1,
            RecordOutcome::StatusNotFound => self.status_not_found += 1,
            RecordOutcome::StatusDecodeFailed => self.status_decode_failed += 1,
            RecordOutcome::WriteFailed => self.write_failed += 1,
        }
    }

    /// Entries visited but not exported
    pub fn skipped(&self) -> u64 {
        self.primary_decode_failed
            + self.status_not_found
            + self.status_decode_failed
            + self.write_failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_add_up() {
        let mut stats = ScanStats::default();
        for outcome in [
            RecordOutcome::Exported,
            RecordOutcome::StatusNotFound,
            RecordOutcome::Exported,
            RecordOutcome::WriteFailed,
            RecordOutcome::PrimaryDecodeFailed,
        ] {
            stats.record(outcome);
        }
        assert_eq!(stats.total, 5);
        assert_eq!(stats.exported, 2);
        assert_eq!(stats.skipped(), 3);
        assert_eq!(stats.exported + stats.skipped(), stats.total);
    }
}
