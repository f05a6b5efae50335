use std::io::{Cursor, Write};

use bytes::Bytes;
use zip::write::FileOptions;
use zip::ZipWriter;

use super::ArchiveBuilder;
use crate::config::Compression;
use crate::errors::BlobError;

/// The `ZipArchiveBuilder` encodes registrations into an in-memory zip file.
pub struct ZipArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: FileOptions,
}

impl Default for ZipArchiveBuilder {
    fn default() -> Self {
        Self::new(Compression::Deflated)
    }
}

impl ZipArchiveBuilder {
    pub fn new(compression: Compression) -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: FileOptions::default().compression_method(compression.as_method()),
        }
    }
}

impl ArchiveBuilder for ZipArchiveBuilder {
    fn register(
        &mut self,
        path: &str,
        content: Option<Bytes>,
        is_dir: bool,
    ) -> Result<(), BlobError> {
        if is_dir {
            self.writer.add_directory(path, self.options)?;
            return Ok(());
        }

        let content = content.unwrap_or_default();
        let options = self
            .options
            .large_file(content.len() as u64 >= u32::MAX as u64);
        self.writer.start_file(path, options)?;
        self.writer.write_all(&content)?;
        Ok(())
    }

    fn finalize(mut self) -> Result<Bytes, BlobError> {
        let cursor = self.writer.finish()?;
        Ok(Bytes::from(cursor.into_inner()))
    }
}
