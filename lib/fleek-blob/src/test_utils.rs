use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use cid::Cid;
use futures::stream;

use crate::archive::ArchiveBuilder;
use crate::collector::{Progress, ProgressSink};
use crate::entry::{ChunkStream, Entry, EntryKind};
use crate::errors::BlobError;
use crate::resolver::{ContentStore, Listing};

#[allow(unused)]
pub fn try_init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt().with_test_writer().try_init()
}

pub fn chunk_stream(parts: &[&'static [u8]]) -> ChunkStream {
    let parts = parts
        .iter()
        .map(|part| Ok::<_, BlobError>(Bytes::from_static(*part)))
        .collect::<Vec<_>>();
    Box::pin(stream::iter(parts))
}

pub fn failing_stream(first: &'static [u8], reason: &str) -> ChunkStream {
    let parts = vec![
        Ok(Bytes::from_static(first)),
        Err(BlobError::Retrieval(reason.to_string())),
    ];
    Box::pin(stream::iter(parts))
}

/// Records every progress signal it receives.
#[derive(Default)]
pub struct RecordingSink(Mutex<Vec<(String, u64, u64)>>);

impl RecordingSink {
    pub fn calls(&self) -> Vec<(String, u64, u64)> {
        self.0.lock().unwrap().clone()
    }

    pub fn calls_for(&self, entry: &str) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter(|(path, ..)| path == entry)
            .map(|(_, index, _)| index)
            .collect()
    }
}

impl ProgressSink for RecordingSink {
    fn on_progress(&self, progress: Progress<'_>) {
        self.0.lock().unwrap().push((
            progress.entry.to_string(),
            progress.index,
            progress.estimated_total,
        ));
    }
}

/// One registration seen by a [`MemoryArchive`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registered {
    pub path: String,
    pub content: Option<Bytes>,
    pub is_dir: bool,
}

/// In-memory archive that keeps its registrations visible through a shared handle.
#[derive(Clone, Default)]
pub struct MemoryArchive {
    entries: Arc<Mutex<Vec<Registered>>>,
    fail_finalize: bool,
}

impl MemoryArchive {
    pub fn failing() -> Self {
        Self {
            fail_finalize: true,
            ..Default::default()
        }
    }

    pub fn entries(&self) -> Vec<Registered> {
        self.entries.lock().unwrap().clone()
    }

    pub fn get(&self, path: &str) -> Option<Registered> {
        self.entries().into_iter().find(|entry| entry.path == path)
    }
}

impl ArchiveBuilder for MemoryArchive {
    fn register(
        &mut self,
        path: &str,
        content: Option<Bytes>,
        is_dir: bool,
    ) -> Result<(), BlobError> {
        self.entries.lock().unwrap().push(Registered {
            path: path.to_string(),
            content,
            is_dir,
        });
        Ok(())
    }

    fn finalize(self) -> Result<Bytes, BlobError> {
        if self.fail_finalize {
            return Err(BlobError::Io(io::Error::new(
                io::ErrorKind::OutOfMemory,
                "archive too large",
            )));
        }
        let paths = self
            .entries()
            .into_iter()
            .map(|entry| entry.path)
            .collect::<Vec<_>>()
            .join("\n");
        Ok(Bytes::from(paths))
    }
}

/// Description of one listed entry, turned into a fresh [`Entry`] on every `get`.
#[derive(Clone)]
pub struct EntrySpec {
    pub path: String,
    pub kind: EntryKind,
    pub chunks: Vec<&'static [u8]>,
    pub size: Option<u64>,
    pub fail_with: Option<String>,
}

impl EntrySpec {
    pub fn dir(path: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: EntryKind::Dir,
            chunks: Vec::new(),
            size: None,
            fail_with: None,
        }
    }

    pub fn file(path: &str, chunks: &[&'static [u8]]) -> Self {
        let size = chunks.iter().map(|chunk| chunk.len() as u64).sum();
        Self {
            path: path.to_string(),
            kind: EntryKind::File,
            chunks: chunks.to_vec(),
            size: Some(size),
            fail_with: None,
        }
    }

    pub fn failing(mut self, reason: &str) -> Self {
        self.fail_with = Some(reason.to_string());
        self
    }

    fn to_entry(&self) -> Entry {
        match self.kind {
            EntryKind::Dir => Entry::dir(self.path.clone()),
            EntryKind::File => {
                let content = match &self.fail_with {
                    Some(reason) => {
                        let first = self.chunks.first().copied().unwrap_or_default();
                        failing_stream(first, reason)
                    },
                    None => chunk_stream(&self.chunks),
                };
                Entry::file(self.path.clone(), content, self.size)
            },
        }
    }
}

/// Content store backed by a map of listings.
#[derive(Clone, Default)]
pub struct MemoryStore {
    listings: HashMap<Cid, Vec<EntrySpec>>,
}

impl MemoryStore {
    pub fn with(mut self, cid: Cid, entries: Vec<EntrySpec>) -> Self {
        self.listings.insert(cid, entries);
        self
    }
}

impl ContentStore for MemoryStore {
    async fn get(&self, cid: &Cid) -> Result<Listing, BlobError> {
        let specs = self
            .listings
            .get(cid)
            .ok_or_else(|| BlobError::Retrieval(format!("unknown cid {cid}")))?;
        let entries = specs
            .iter()
            .map(|spec| Ok::<_, BlobError>(spec.to_entry()))
            .collect::<Vec<_>>();
        Ok(Box::pin(stream::iter(entries)))
    }
}
