use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

/// Number of bytes assumed per chunk when estimating how many chunks a file will yield.
pub const DEFAULT_PROGRESS_CHUNK_SIZE: u64 = 250_000;

/// Default number of directory entries collected at the same time.
pub const DEFAULT_CONCURRENCY: usize = 10;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Maximum number of directory entries whose content is being collected at once.
    pub concurrency: usize,
    pub progress_chunk_size: u64,
    pub compression: Compression,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    Stored,
    Deflated,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            progress_chunk_size: DEFAULT_PROGRESS_CHUNK_SIZE,
            compression: Compression::Deflated,
        }
    }
}

impl Compression {
    pub fn as_method(&self) -> zip::CompressionMethod {
        match self {
            Compression::Stored => zip::CompressionMethod::Stored,
            Compression::Deflated => zip::CompressionMethod::Deflated,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Could not parse the blob configuration as toml.")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow!(
                "The configuration file '{}' does not exist.",
                path.to_string_lossy()
            ));
        }

        let content = fs::read_to_string(path).with_context(|| {
            format!(
                "IO: Could not load the configuration file '{}'.",
                path.to_string_lossy()
            )
        })?;

        Self::from_toml_str(&content)
    }

    /// Serialize the configuration, used to write out a default file.
    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        toml::to_string(self).context("Could not serialize the blob configuration.")
    }

    /// The effective fan-out limit, a zero in the file is treated as one.
    pub fn concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}
