//! Chunking configuration

use serde::{Deserialize, Serialize};

/// Chunking configuration
///
/// Sizes are expressed in tokens and converted to characters at
/// [`CHARS_PER_TOKEN`](crate::chunking::CHARS_PER_TOKEN).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Target chunk size in tokens
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in tokens
    pub overlap: usize,
    /// Sections shorter than this many characters are never split
    pub min_split_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 512,
            overlap: 50,
            min_split_chars: 100,
        }
    }
}
