//! In-memory ZIP assembly with deflate-compressed entries.

use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::result::ZipError;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Writes deflate-compressed entries into an in-memory ZIP buffer.
///
/// Entries are accepted from one logical writer at a time; the pipeline
/// buffers completed payloads and writes them serially in attempted
/// order.
pub struct ArchiveWriter {
    inner: ZipWriter<Cursor<Vec<u8>>>,
}

impl ArchiveWriter {
    /// Creates an empty archive buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds one entry under `name` with the given payload.
    ///
    /// # Errors
    ///
    /// Returns a [`ZipError`] if the entry header or payload cannot be
    /// written.
    pub fn add_entry(&mut self, name: &str, payload: &[u8]) -> Result<(), ZipError> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.inner.start_file(name, options)?;
        self.inner.write_all(payload).map_err(ZipError::from)?;
        Ok(())
    }

    /// Finalizes the central directory and returns the archive bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`ZipError`] if the central directory cannot be written.
    pub fn finish(self) -> Result<Vec<u8>, ZipError> {
        Ok(self.inner.finish()?.into_inner())
    }
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}
