//! Section chunking
//!
//! Features:
//! - Sentence-aligned splitting under a character budget
//! - Overlap carried from the tail of each closed chunk
//! - Token sizes converted with a fixed characters-per-token ratio

mod sentences;
mod splitter;
mod tokenizer;

pub use sentences::{overlap_fragment, split_oversized, split_sentences};
pub use splitter::*;
pub use tokenizer::*;
