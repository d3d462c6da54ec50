//! Per-document processing: TOC detection, segmentation, hierarchy, chunking

use crate::chunking::{SectionChunker, SimpleTokenizer};
use crate::config::Config;
use crate::segmentation::{build_hierarchy, SectionSegmenter};
use crate::toc::TocDetector;
use crate::types::{Chunk, Document, DocumentId, Section, TableOfContents};
use crate::util::char_len;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Counters describing one processed document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStats {
    pub sections_count: usize,
    pub chunks_count: usize,
    pub toc_extracted: bool,
    /// Pages spanned by the TOC, 0 without one
    pub toc_pages: usize,
    /// Sections dropped as TOC entries
    pub sections_filtered: usize,
    /// Lines before the first heading that belong to no section
    pub front_matter_lines: usize,
    /// Approximate token count over all chunks
    pub estimated_tokens: usize,
    pub processing_time_secs: f64,
}

/// Everything produced for one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub document_id: DocumentId,
    pub toc: Option<TableOfContents>,
    /// Sections in document order with parent links
    pub sections: Vec<Section>,
    /// Chunks grouped by section, in section order
    pub chunks: Vec<Chunk>,
    pub stats: ProcessingStats,
}

impl ProcessedDocument {
    /// Chunks belonging to one section
    pub fn chunks_for<'a>(&'a self, section_id: &'a str) -> impl Iterator<Item = &'a Chunk> + 'a {
        self.chunks.iter().filter(move |c| c.section_id == section_id)
    }

    /// Direct children of a section
    pub fn children_of<'a>(&'a self, section_id: &'a str) -> impl Iterator<Item = &'a Section> + 'a {
        self.sections
            .iter()
            .filter(move |s| s.parent_section_id.as_deref() == Some(section_id))
    }
}

/// Runs the segmentation steps for one document at a time.
///
/// Holds only configuration, so one processor can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct DocumentProcessor {
    toc_detector: TocDetector,
    segmenter: SectionSegmenter,
    chunker: SectionChunker,
}

impl DocumentProcessor {
    pub fn new(config: &Config) -> Self {
        Self {
            toc_detector: TocDetector::new(),
            segmenter: SectionSegmenter::new(config.segmentation.clone()),
            chunker: SectionChunker::new(config.chunking.clone()),
        }
    }

    /// Process a document end to end
    pub fn process(&self, document: &Document) -> ProcessedDocument {
        let start = Instant::now();
        let document_id = &document.document_id;

        debug!("{}: detecting table of contents", document_id);
        let toc = self.toc_detector.detect_document(document);

        debug!("{}: extracting sections", document_id);
        let segmentation = self
            .segmenter
            .segment_detailed(document_id, &document.full_text, toc.as_ref());
        let mut sections = segmentation.sections;
        build_hierarchy(&mut sections);

        debug!("{}: creating chunks", document_id);
        let chunks = self.chunker.chunk_sections(&sections);

        let estimated_tokens: usize = chunks
            .iter()
            .map(|c| SimpleTokenizer::estimate_tokens(char_len(&c.content)))
            .sum();

        let stats = ProcessingStats {
            sections_count: sections.len(),
            chunks_count: chunks.len(),
            toc_extracted: toc.is_some(),
            toc_pages: toc.as_ref().map_or(0, TableOfContents::page_span),
            sections_filtered: segmentation.toc_entries_filtered,
            front_matter_lines: segmentation.front_matter_lines,
            estimated_tokens,
            processing_time_secs: start.elapsed().as_secs_f64(),
        };

        let toc_info = if stats.toc_extracted {
            format!(", TOC: {} pages", stats.toc_pages)
        } else {
            String::new()
        };
        info!(
            "{}: completed in {:.3}s ({} sections, {} chunks{})",
            document_id,
            stats.processing_time_secs,
            stats.sections_count,
            stats.chunks_count,
            toc_info
        );

        ProcessedDocument {
            document_id: document_id.clone(),
            toc,
            sections,
            chunks,
            stats,
        }
    }
}
