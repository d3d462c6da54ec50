//! Section splitting into overlapping chunks

use super::sentences::{overlap_fragment, split_oversized, split_sentences};
use super::tokenizer::SimpleTokenizer;
use crate::config::ChunkingConfig;
use crate::types::{Chunk, ChunkMetadata, Section};
use crate::util::char_len;
use tracing::trace;

/// Splits section content into sentence-aligned, overlapping chunks
#[derive(Debug, Clone, Default)]
pub struct SectionChunker {
    config: ChunkingConfig,
}

impl SectionChunker {
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    /// Chunker with explicit sizes in tokens.
    ///
    /// `overlap` must be smaller than `chunk_size`, the same rule
    /// `Config::validate` enforces for configured chunkers.
    pub fn with_sizes(chunk_size: usize, overlap: usize) -> Self {
        debug_assert!(
            overlap < chunk_size,
            "overlap ({}) must be smaller than chunk_size ({})",
            overlap,
            chunk_size
        );
        Self::new(ChunkingConfig {
            chunk_size,
            overlap,
            ..ChunkingConfig::default()
        })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Character budget of one chunk
    pub fn chunk_chars(&self) -> usize {
        SimpleTokenizer::estimate_chars(self.config.chunk_size)
    }

    /// Target length of the overlap carried between chunks
    pub fn overlap_chars(&self) -> usize {
        SimpleTokenizer::estimate_chars(self.config.overlap)
    }

    /// Split a section into chunks.
    ///
    /// Empty sections produce no chunks. Sections shorter than the minimum
    /// split size produce exactly one chunk with the whole content.
    pub fn chunk_section(&self, section: &Section) -> Vec<Chunk> {
        let content = section.content.trim();
        if content.is_empty() {
            return Vec::new();
        }

        if char_len(content) < self.config.min_split_chars {
            return vec![self.make_chunk(section, 0, content)];
        }

        let budget = self.chunk_chars();
        let overlap = self.overlap_chars();

        let units = split_sentences(content)
            .into_iter()
            .flat_map(|sentence| split_oversized(sentence, budget));

        let mut chunks = Vec::new();
        let mut buffer = String::new();
        let mut buffer_len = 0;

        for unit in units {
            let unit_len = char_len(unit);

            if !buffer.is_empty() && buffer_len + 1 + unit_len > budget {
                chunks.push(self.make_chunk(section, chunks.len(), buffer.trim()));

                buffer = overlap_fragment(&buffer, overlap).trim().to_string();
                buffer_len = char_len(&buffer);
            }

            if !buffer.is_empty() {
                buffer.push(' ');
                buffer_len += 1;
            }
            buffer.push_str(unit);
            buffer_len += unit_len;
        }

        if !buffer.trim().is_empty() {
            chunks.push(self.make_chunk(section, chunks.len(), buffer.trim()));
        }

        trace!(
            "{}: split {} chars into {} chunk(s)",
            section.section_id,
            char_len(content),
            chunks.len()
        );

        chunks
    }

    /// Split every section, keeping document order
    pub fn chunk_sections(&self, sections: &[Section]) -> Vec<Chunk> {
        sections
            .iter()
            .flat_map(|section| self.chunk_section(section))
            .collect()
    }

    fn make_chunk(&self, section: &Section, chunk_index: usize, content: &str) -> Chunk {
        Chunk {
            chunk_id: Chunk::make_id(&section.section_id, chunk_index),
            document_id: section.document_id.clone(),
            section_id: section.section_id.clone(),
            chunk_index,
            content: content.to_string(),
            page_number: section.page_number,
            metadata: ChunkMetadata {
                section_number: section.section_number.clone(),
                section_type: section.section_type,
            },
        }
    }
}
