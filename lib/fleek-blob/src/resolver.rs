//! Resolve a content identifier, or a path bound to one, into a downloadable blob.
use std::collections::HashMap;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use cid::Cid;
use futures::{Stream, TryStreamExt};
use tracing::debug;

use crate::archive::{ArchiveAssembler, ZipArchiveBuilder};
use crate::collector::{ChunkCollector, NoopProgress, ProgressSink};
use crate::config::Config;
use crate::entry::{Entry, RootLabel};
use crate::errors::BlobError;

/// Flat listing of a subtree, the subtree root comes first.
pub type Listing = Pin<Box<dyn Stream<Item = Result<Entry, BlobError>> + Send + 'static>>;

/// The `ContentStore` trait defines the interface of the content-addressed storage client.
///
/// **Note**: `async_trait` is not used here because the macro is not able to generate the
/// correct code with the boxed stream return type.
pub trait ContentStore {
    fn get(
        &self,
        cid: &Cid,
    ) -> impl std::future::Future<Output = Result<Listing, BlobError>> + Send;
}

/// The `PathMap` trait resolves a path of the shared file system into the identifier of its
/// content.
#[async_trait]
pub trait PathMap: Send + Sync {
    async fn read(&self, path: &str) -> Result<Cid, BlobError>;
}

#[async_trait]
impl PathMap for HashMap<String, Cid> {
    async fn read(&self, path: &str) -> Result<Cid, BlobError> {
        self.get(path)
            .copied()
            .ok_or_else(|| BlobError::Lookup(path.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlobKind {
    /// The raw bytes of a single file.
    File,
    /// A zip archive of a directory subtree.
    Archive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    pub kind: BlobKind,
    pub data: Bytes,
}

impl Blob {
    pub fn is_archive(&self) -> bool {
        self.kind == BlobKind::Archive
    }

    /// Name to save the blob under, archives get a `.zip` suffix.
    pub fn file_name(&self, path: &str) -> String {
        let label = RootLabel::from_path(path);
        match self.kind {
            BlobKind::File => label.to_string(),
            BlobKind::Archive => format!("{label}.zip"),
        }
    }
}

pub struct Resolver<S> {
    store: S,
    config: Config,
    assembler: ArchiveAssembler,
    collector: ChunkCollector,
}

impl<S> Resolver<S>
where
    S: ContentStore + Send + Sync,
{
    pub fn new(store: S, config: Config) -> Self {
        Self {
            assembler: ArchiveAssembler::new(&config),
            collector: ChunkCollector::new(config.progress_chunk_size),
            store,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Look up the identifier bound to `path` and turn its content into a blob.
    pub async fn blob_from_path<M>(&self, map: &M, path: &str) -> Result<Blob, BlobError>
    where
        M: PathMap + ?Sized,
    {
        let cid = map.read(path).await?;
        debug!("Resolved {path} to {cid}");
        let entries = self.listing(&cid).await?;
        self.dispatch(&cid, path, entries, &NoopProgress).await
    }

    /// Turn the content behind `cid` into a blob, `display_path` names the archive root.
    pub async fn blob_from_cid(
        &self,
        cid: &Cid,
        display_path: &str,
        progress: &dyn ProgressSink,
    ) -> Result<Blob, BlobError> {
        let entries = self.listing(cid).await?;
        self.dispatch(cid, display_path, entries, progress).await
    }

    /// Fetch only the descriptor of the subtree root.
    pub async fn entry_info(&self, cid: &Cid) -> Result<Option<Entry>, BlobError> {
        let mut listing = self.store.get(cid).await?;
        listing.try_next().await
    }

    async fn listing(&self, cid: &Cid) -> Result<Vec<Entry>, BlobError> {
        let entries: Vec<Entry> = self.store.get(cid).await?.try_collect().await?;
        debug!("Listed {} entries for {cid}", entries.len());
        Ok(entries)
    }

    async fn dispatch(
        &self,
        cid: &Cid,
        path: &str,
        mut entries: Vec<Entry>,
        progress: &dyn ProgressSink,
    ) -> Result<Blob, BlobError> {
        match entries.first().map(Entry::is_dir) {
            None => Err(BlobError::EmptyListing(*cid)),
            Some(true) => {
                let label = RootLabel::from_path(path);
                let builder = ZipArchiveBuilder::new(self.config.compression);
                let data = self
                    .assembler
                    .assemble(&label, entries, builder, progress)
                    .await?;
                Ok(Blob {
                    kind: BlobKind::Archive,
                    data,
                })
            },
            Some(false) => {
                let root = entries.swap_remove(0);
                let data = match root.content {
                    Some(chunks) => {
                        self.collector
                            .collect(&root.path, chunks, root.size, progress)
                            .await?
                    },
                    None => Bytes::new(),
                };
                Ok(Blob {
                    kind: BlobKind::File,
                    data,
                })
            },
        }
    }
}
