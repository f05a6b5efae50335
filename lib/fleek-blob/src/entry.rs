//! Descriptors of the entries in a flat subtree listing.
use std::pin::Pin;

use bytes::Bytes;
use futures::Stream;
use typed_builder::TypedBuilder;

use crate::errors::BlobError;

/// Lazy, single pass sequence of content chunks for one file.
///
/// A failed retrieval is yielded as an `Err` item and ends the sequence.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Bytes, BlobError>> + Send + 'static>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// One file or directory of a subtree, as yielded by a [`crate::resolver::ContentStore`].
///
/// The path is slash delimited and its first segment names the subtree root.
#[derive(TypedBuilder)]
pub struct Entry {
    #[builder(setter(into))]
    pub path: String,
    pub kind: EntryKind,
    #[builder(default, setter(strip_option))]
    pub content: Option<ChunkStream>,
    #[builder(default, setter(strip_option))]
    pub size: Option<u64>,
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("size", &self.size)
            .field("has-content", &self.content.is_some())
            .finish()
    }
}

impl Entry {
    pub fn dir(path: impl Into<String>) -> Self {
        Entry::builder().path(path).kind(EntryKind::Dir).build()
    }

    pub fn file(path: impl Into<String>, content: ChunkStream, size: Option<u64>) -> Self {
        Entry {
            path: path.into(),
            kind: EntryKind::File,
            content: Some(content),
            size,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// The last segment of the path.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }
}

/// The top level name of an assembled archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootLabel(String);

impl RootLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Take the last segment of a caller supplied path, ignoring trailing slashes.
    pub fn from_path(path: &str) -> Self {
        let label = path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        Self(label.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Replace the first segment of `path` with this label.
    pub fn rewrite(&self, path: &str) -> String {
        match path.split_once('/') {
            Some((_, rest)) => format!("{}/{}", self.0, rest),
            None => self.0.clone(),
        }
    }
}

impl std::fmt::Display for RootLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
