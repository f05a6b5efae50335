//! Drains the chunk stream of a single file into one contiguous buffer.
use bytes::{Bytes, BytesMut};
use futures::{Stream, TryStreamExt};
use tracing::trace;

use crate::config::DEFAULT_PROGRESS_CHUNK_SIZE;
use crate::errors::BlobError;

/// One progress signal, emitted right before a chunk is appended.
///
/// `estimated_total` is only an estimate derived from the declared file size, `index` may go past
/// it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress<'a> {
    /// Path of the file the chunk belongs to.
    pub entry: &'a str,
    pub index: u64,
    pub estimated_total: u64,
}

/// The `ProgressSink` trait receives the progress of every file being collected.
///
/// Sinks are shared by all the files of a directory that are collected concurrently, so calls for
/// different entries interleave. Use [`Progress::entry`] to tell them apart.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, progress: Progress<'_>);
}

impl<F> ProgressSink for F
where
    F: Fn(Progress<'_>) + Send + Sync,
{
    fn on_progress(&self, progress: Progress<'_>) {
        self(progress)
    }
}

/// A sink that ignores every signal.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn on_progress(&self, _progress: Progress<'_>) {}
}

/// Estimate the number of chunks of a file: `round(size / chunk_size)`, halves rounded up.
pub fn estimate_total_chunks(size: Option<u64>, chunk_size: u64) -> u64 {
    match size {
        Some(size) if chunk_size > 0 => {
            let size = size as u128;
            let chunk_size = chunk_size as u128;
            ((2 * size + chunk_size) / (2 * chunk_size)) as u64
        },
        _ => 0,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ChunkCollector {
    chunk_size: u64,
}

impl Default for ChunkCollector {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_CHUNK_SIZE)
    }
}

impl ChunkCollector {
    pub fn new(chunk_size: u64) -> Self {
        Self { chunk_size }
    }

    /// Consume `chunks` to the end and return their concatenation in order.
    ///
    /// The first failed chunk aborts the collection and its error is returned as is.
    pub async fn collect<S>(
        &self,
        entry: &str,
        mut chunks: S,
        size: Option<u64>,
        progress: &dyn ProgressSink,
    ) -> Result<Bytes, BlobError>
    where
        S: Stream<Item = Result<Bytes, BlobError>> + Unpin,
    {
        let estimated_total = estimate_total_chunks(size, self.chunk_size);
        let mut buffer = BytesMut::new();
        let mut index = 0;

        while let Some(chunk) = chunks.try_next().await? {
            progress.on_progress(Progress {
                entry,
                index,
                estimated_total,
            });
            buffer.extend_from_slice(&chunk);
            index += 1;
        }

        trace!("Collected {entry}: {index} chunks, {} bytes", buffer.len());
        Ok(buffer.freeze())
    }
}
