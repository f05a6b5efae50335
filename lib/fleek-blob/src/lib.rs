//! Helpers for the file browser to download content-addressed files and directories.
//!
//! A directory is downloaded by fetching its flat listing from a [`resolver::ContentStore`],
//! collecting every file with bounded concurrency and packing the result into a zip archive. A
//! single file is simply collected into one buffer.
//!
//! ```no_run
//! let resolver = Resolver::new(store, Config::default());
//! let blob = resolver.blob_from_cid(&cid, "/photos/summer", &NoopProgress).await?;
//! std::fs::write(blob.file_name("/photos/summer"), &blob.data)?;
//! ```
pub mod archive;
pub mod collector;
pub mod config;
pub mod entry;
pub mod errors;
pub mod format;
pub mod resolver;

#[cfg(test)]
mod test_utils;

pub use archive::{ArchiveAssembler, ArchiveBuilder, ZipArchiveBuilder};
pub use collector::{ChunkCollector, NoopProgress, Progress, ProgressSink};
pub use config::Config;
pub use entry::{ChunkStream, Entry, EntryKind, RootLabel};
pub use errors::BlobError;
pub use resolver::{Blob, BlobKind, ContentStore, Listing, PathMap, Resolver};
