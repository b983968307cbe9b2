use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::Path;
use tangle_core::ExportRecord;

use crate::error::ExportError;

/// Destination for merged export records
pub trait RecordSink {
    /// Write one record; a failure affects only this record
    fn export(&mut self, record: &ExportRecord) -> Result<(), ExportError>;
}

/// Format a record as one output line
///
/// Fields, comma separated: id, body, conflict flag (binary `0`/`1`),
/// confirmation index (decimal). No escaping is applied; ids and bodies are
/// tryte strings and never contain a comma.
pub fn format_line(record: &ExportRecord) -> String {
    format!(
        "{},{},{:b},{}\n",
        record.id,
        record.body,
        record.conflict_bit(),
        record.confirmation_index
    )
}

/// Writes one line per record to any [`Write`] sink
pub struct LineExporter<W: Write> {
    writer: W,
    lines_written: u64,
}

impl LineExporter<LineWriter<File>> {
    /// Create the output file, truncating it unless `append` is set
    ///
    /// The file is line-buffered so a failed write is reported for the
    /// record that caused it.
    pub fn create(path: &Path, append: bool) -> io::Result<Self> {
        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        let file = options.open(path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("cannot open file {}: {}", path.display(), e),
            )
        })?;
        Ok(Self::new(LineWriter::new(file)))
    }
}

impl<W: Write> LineExporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines_written: 0,
        }
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Flush buffered output and return the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> RecordSink for LineExporter<W> {
    fn export(&mut self, record: &ExportRecord) -> Result<(), ExportError> {
        self.writer.write_all(format_line(record).as_bytes())?;
        self.lines_written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangle_core::RecordLinks;
    use tempfile::TempDir;

    fn record(id: &str, conflicting: bool, index: u32) -> ExportRecord {
        ExportRecord {
            id: id.to_string(),
            links: RecordLinks::default(),
            solid: true,
            confirmed: index > 0,
            confirmation_index: index,
            conflicting,
            head: false,
            tail: true,
            value: false,
            body: "BODY".to_string(),
        }
    }

    /// Writer that fails on every write
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_format_line() {
        assert_eq!(format_line(&record("AAA", false, 42)), "AAA,BODY,0,42\n");
        assert_eq!(format_line(&record("BBB", true, 0)), "BBB,BODY,1,0\n");
    }

    #[test]
    fn test_export_to_buffer() {
        let mut exporter = LineExporter::new(Vec::new());
        exporter.export(&record("A", false, 1)).unwrap();
        exporter.export(&record("B", true, 2)).unwrap();
        assert_eq!(exporter.lines_written(), 2);
        let out = exporter.finish().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "A,BODY,0,1\nB,BODY,1,2\n");
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut exporter = LineExporter::new(FullDisk);
        let err = exporter.export(&record("A", false, 1)).unwrap_err();
        assert!(err.to_string().contains("no space left"));
        assert_eq!(exporter.lines_written(), 0);
    }

    #[test]
    fn test_create_truncates_or_appends() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("output.txt");
        std::fs::write(&path, "stale line that is long\n").unwrap();

        let mut exporter = LineExporter::create(&path, false).unwrap();
        exporter.export(&record("A", false, 1)).unwrap();
        exporter.finish().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "A,BODY,0,1\n");

        let mut exporter = LineExporter::create(&path, true).unwrap();
        exporter.export(&record("B", false, 2)).unwrap();
        exporter.finish().unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "A,BODY,0,1\nB,BODY,0,2\n"
        );
    }

    #[test]
    fn test_create_in_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("output.txt");
        let err = LineExporter::create(&path, false).err().unwrap();
        assert!(err.to_string().contains("cannot open file"));
    }
}
