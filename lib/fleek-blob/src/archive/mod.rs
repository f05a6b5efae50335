//! Assemble a flat directory listing into a single archive.
mod zip_writer;

use bytes::Bytes;
use futures::{stream, StreamExt, TryStreamExt};
use tracing::debug;

pub use self::zip_writer::ZipArchiveBuilder;
use crate::collector::{ChunkCollector, ProgressSink};
use crate::config::Config;
use crate::entry::{Entry, EntryKind, RootLabel};
use crate::errors::BlobError;

/// The `ArchiveBuilder` trait is the seam to the archive encoder.
///
/// Registrations can arrive in any order. A directory registration carries no content and must
/// show up in the finalized archive even when no file lives under it.
pub trait ArchiveBuilder {
    fn register(
        &mut self,
        path: &str,
        content: Option<Bytes>,
        is_dir: bool,
    ) -> Result<(), BlobError>;

    /// Encode everything registered so far. Must be called after the last registration.
    fn finalize(self) -> Result<Bytes, BlobError>;
}

/// An entry whose content has been fully collected, ready to be registered.
struct Loaded {
    path: String,
    content: Option<Bytes>,
    is_dir: bool,
}

/// Collects every entry of a listing with bounded concurrency and registers it under a root
/// label.
#[derive(Clone, Copy, Debug)]
pub struct ArchiveAssembler {
    collector: ChunkCollector,
    concurrency: usize,
}

impl Default for ArchiveAssembler {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl ArchiveAssembler {
    pub fn new(config: &Config) -> Self {
        Self {
            collector: ChunkCollector::new(config.progress_chunk_size),
            concurrency: config.concurrency(),
        }
    }

    /// Rewrite every entry under `root`, collect the files and finalize `builder`.
    ///
    /// Entries are registered in the order their content finishes downloading, not in listing
    /// order. The first failure stops the assembly and is returned unchanged.
    pub async fn assemble<B: ArchiveBuilder>(
        &self,
        root: &RootLabel,
        entries: Vec<Entry>,
        mut builder: B,
        progress: &dyn ProgressSink,
    ) -> Result<Bytes, BlobError> {
        debug!(
            "Assembling {} entries under '{root}' with concurrency {}",
            entries.len(),
            self.concurrency
        );

        let mut pending = stream::iter(
            entries
                .into_iter()
                .map(|entry| self.load(root, entry, progress)),
        )
        .buffer_unordered(self.concurrency);

        let mut registered = 0;
        while let Some(loaded) = pending.try_next().await? {
            builder.register(&loaded.path, loaded.content, loaded.is_dir)?;
            registered += 1;
        }

        let data = builder.finalize()?;
        debug!("Finalized '{root}': {registered} entries, {} bytes", data.len());
        Ok(data)
    }

    async fn load(
        &self,
        root: &RootLabel,
        entry: Entry,
        progress: &dyn ProgressSink,
    ) -> Result<Loaded, BlobError> {
        let path = root.rewrite(&entry.path);
        match entry.kind {
            EntryKind::Dir => Ok(Loaded {
                path,
                content: None,
                is_dir: true,
            }),
            EntryKind::File => {
                let content = match entry.content {
                    Some(chunks) => {
                        self.collector
                            .collect(&path, chunks, entry.size, progress)
                            .await?
                    },
                    None => Bytes::new(),
                };
                Ok(Loaded {
                    path,
                    content: Some(content),
                    is_dir: false,
                })
            },
        }
    }
}
