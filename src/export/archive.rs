use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};
use crate::utils::{PlaceholderError, PlaceholderResult};

/// In-memory ZIP builder with last-write-wins entry names.
///
/// Adding an entry under a name that is already present replaces the earlier
/// content but keeps its position in the archive.
#[derive(Debug, Default)]
pub struct ArchiveBuilder<'a> {
    entries: Vec<(String, &'a [u8])>,
}

impl<'a> ArchiveBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: String, bytes: &'a [u8]) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = bytes,
            None => self.entries.push((name, bytes)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deflates every entry into a single archive.
    pub fn finish(self) -> PlaceholderResult<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, bytes) in &self.entries {
            writer.start_file(name.as_str(), options)?;
            writer
                .write_all(bytes)
                .map_err(|e| PlaceholderError::export(format!("Failed to write {}: {}", name, e)))?;
        }

        Ok(writer.finish()?.into_inner())
    }
}
