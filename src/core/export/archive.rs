//! Zip serialization of resolved documents
//!
//! The writer assembles the container in memory, in the order given, and then
//! copies it into the sink. The zip writer never touches a failing sink, so a
//! rejected write surfaces as an error and never as a half-finalized container.
//! It neither closes nor removes the sink; that belongs to [`super::sink`].

use crate::domain::{ArchiveEntry, Result};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Permissions recorded for every entry; configuration files often carry keys
const ENTRY_PERMISSIONS: u32 = 0o600;

/// Writes archive entries into a single zip container
#[derive(Debug, Clone, Copy)]
pub struct ArchiveWriter {
    compression: CompressionMethod,
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveWriter {
    /// Create a writer that deflates entry content
    pub fn new() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }

    /// Create a writer that stores entry content uncompressed
    pub fn stored() -> Self {
        Self {
            compression: CompressionMethod::Stored,
        }
    }

    /// Write one entry per element of `entries`, in order
    ///
    /// Returns the number of content bytes written. Entry names must be
    /// unique: the container rejects a second entry with the same name.
    ///
    /// # Errors
    ///
    /// Returns an error for a duplicate entry name, or as soon as the sink
    /// rejects a write. Nothing is retried.
    pub fn write<W>(&self, entries: &[ArchiveEntry], sink: &mut W) -> Result<u64>
    where
        W: Write + ?Sized,
    {
        let (archive, written) = self.assemble(entries)?;
        sink.write_all(&archive)?;

        tracing::debug!(
            entries = entries.len(),
            content_bytes = written,
            archive_bytes = archive.len(),
            "Archive written"
        );

        Ok(written)
    }

    fn assemble(&self, entries: &[ArchiveEntry]) -> Result<(Vec<u8>, u64)> {
        let options = SimpleFileOptions::default()
            .compression_method(self.compression)
            .unix_permissions(ENTRY_PERMISSIONS);

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let mut written = 0u64;

        for entry in entries {
            zip.start_file(entry.entry_name.as_str(), options)?;
            zip.write_all(&entry.content)?;
            written += entry.content.len() as u64;

            tracing::trace!(
                entry = %entry.entry_name,
                bytes = entry.content.len(),
                "Wrote archive entry"
            );
        }

        let archive = zip.finish()?.into_inner();
        Ok((archive, written))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};
    use zip::ZipArchive;

    /// Sink that accepts `budget` bytes and then fails every write
    pub(crate) struct FailAfter {
        inner: Cursor<Vec<u8>>,
        budget: usize,
    }

    impl FailAfter {
        pub(crate) fn new(budget: usize) -> Self {
            Self {
                inner: Cursor::new(Vec::new()),
                budget,
            }
        }
    }

    impl Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "simulated disk full"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            self.inner.write(&buf[..n])
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn read_back(bytes: Vec<u8>) -> Vec<(String, String)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut content = String::new();
                file.read_to_string(&mut content).unwrap();
                (file.name().to_string(), content)
            })
            .collect()
    }

    #[test]
    fn test_writes_entries_in_input_order() {
        let entries = vec![
            ArchiveEntry::new("office.conf", "B"),
            ArchiveEntry::new("home.conf", "A"),
            ArchiveEntry::new("zeta.conf", "[Interface]\nPrivateKey = ü"),
        ];
        let mut sink = Cursor::new(Vec::new());

        let written = ArchiveWriter::new().write(&entries, &mut sink).unwrap();
        assert_eq!(written, 1 + 1 + "[Interface]\nPrivateKey = ü".len() as u64);

        let contents = read_back(sink.into_inner());
        assert_eq!(
            contents,
            vec![
                ("office.conf".to_string(), "B".to_string()),
                ("home.conf".to_string(), "A".to_string()),
                ("zeta.conf".to_string(), "[Interface]\nPrivateKey = ü".to_string()),
            ]
        );
    }

    #[test]
    fn test_stored_writer_round_trips_content() {
        let entries = vec![ArchiveEntry::new("a.conf", "plain")];
        let mut sink = Cursor::new(Vec::new());

        ArchiveWriter::stored().write(&entries, &mut sink).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(sink.into_inner())).unwrap();
        let file = archive.by_index(0).unwrap();
        assert_eq!(file.compression(), CompressionMethod::Stored);
    }

    #[test]
    fn test_empty_content_entry() {
        let entries = vec![ArchiveEntry::new("empty.conf", "")];
        let mut sink = Cursor::new(Vec::new());

        ArchiveWriter::new().write(&entries, &mut sink).unwrap();
        assert_eq!(
            read_back(sink.into_inner()),
            vec![("empty.conf".to_string(), String::new())]
        );
    }

    #[test]
    fn test_sink_fault_is_reported() {
        let entries = vec![
            ArchiveEntry::new("home.conf", "A".repeat(4096)),
            ArchiveEntry::new("office.conf", "B".repeat(4096)),
        ];
        let mut sink = FailAfter::new(64);

        let err = ArchiveWriter::new().write(&entries, &mut sink).unwrap_err();
        assert!(err.to_string().contains("simulated disk full"));
    }

    #[test]
    fn test_stored_sink_fault_on_first_write_is_reported() {
        let entries = vec![ArchiveEntry::new("home.conf", "[Interface]\n")];
        let mut sink = FailAfter::new(0);

        let err = ArchiveWriter::stored().write(&entries, &mut sink).unwrap_err();
        assert!(err.to_string().contains("simulated disk full"));
        assert!(sink.inner.get_ref().is_empty());
    }

    #[test]
    fn test_duplicate_entry_names_are_rejected_by_the_container() {
        let entries = vec![
            ArchiveEntry::new("home.conf", "A"),
            ArchiveEntry::new("home.conf", "B"),
        ];
        let mut sink = Cursor::new(Vec::new());

        assert!(ArchiveWriter::new().write(&entries, &mut sink).is_err());
    }
}
