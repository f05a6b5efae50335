use cid::Cid;
use thiserror::Error;

/// Error type for blob operations.
///
/// Nothing in this crate recovers from or translates these errors, they are handed back to the
/// caller exactly as the failing collaborator produced them.
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("Blob error: Error retrieving content - {0}")]
    Retrieval(String),

    #[error("Blob error: Listing is empty - Cid {0}")]
    EmptyListing(Cid),

    #[error("Blob error: No content identifier bound to path {0}")]
    Lookup(String),

    #[error("Blob error: Error encoding archive {0}")]
    Encoding(#[from] zip::result::ZipError),

    #[error("Blob error: IO error {0}")]
    Io(#[from] std::io::Error),
}
