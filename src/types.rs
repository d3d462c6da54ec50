//! Core types for the segmentation pipeline

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a document
pub type DocumentId = String;

/// Unique identifier for a section
pub type SectionId = String;

/// Unique identifier for a chunk
pub type ChunkId = String;

// ============================================================================
// Documents
// ============================================================================

/// Error returned when a document-type tag is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown document type: '{0}'")]
pub struct ParseDocumentTypeError(pub String);

/// Classification of a tax document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    Circolare,
    Risoluzione,
    Risposta,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Circolare => "Circolare",
            Self::Risoluzione => "Risoluzione",
            Self::Risposta => "Risposta",
        }
    }

    /// Whether documents of this type open with a table of contents
    pub fn has_table_of_contents(&self) -> bool {
        matches!(self, Self::Circolare)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = ParseDocumentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "circolare" => Ok(Self::Circolare),
            "risoluzione" => Ok(Self::Risoluzione),
            "risposta" => Ok(Self::Risposta),
            _ => Err(ParseDocumentTypeError(s.to_string())),
        }
    }
}

/// A document ready for segmentation
///
/// Page texts are the per-page output of an upstream extractor. The full
/// text is what the segmenter scans; by default it is the pages
/// concatenated, each terminated by a newline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub document_id: DocumentId,
    pub doc_type: DocumentType,
    pub page_texts: Vec<String>,
    pub full_text: String,
}

impl Document {
    /// Build a document from its pages
    pub fn from_pages<S: Into<String>>(
        document_id: impl Into<String>,
        doc_type: DocumentType,
        pages: impl IntoIterator<Item = S>,
    ) -> Self {
        let page_texts: Vec<String> = pages.into_iter().map(Into::into).collect();
        let mut full_text = String::with_capacity(page_texts.iter().map(|p| p.len() + 1).sum());
        for page in &page_texts {
            full_text.push_str(page);
            if !page.ends_with('\n') {
                full_text.push('\n');
            }
        }

        Self {
            document_id: document_id.into(),
            doc_type,
            page_texts,
            full_text,
        }
    }

    /// Replace the full text (e.g. when the extractor produced a cleaner version)
    pub fn with_full_text(mut self, full_text: impl Into<String>) -> Self {
        self.full_text = full_text.into();
        self
    }

    pub fn page_count(&self) -> usize {
        self.page_texts.len()
    }
}

// ============================================================================
// Table of contents
// ============================================================================

/// Strategy that located the end of a table of contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TocDetectionMethod {
    /// Page reference next to the PREMESSA entry
    AnchorMarker,
    /// Page reference next to the first "1.1" entry
    FirstSubsection,
}

impl TocDetectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnchorMarker => "anchor-marker",
            Self::FirstSubsection => "first-subsection",
        }
    }
}

impl fmt::Display for TocDetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page range occupied by a table of contents (1-indexed, inclusive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOfContents {
    pub toc_id: String,
    pub document_id: DocumentId,
    /// Text of the TOC pages as extracted
    pub raw_text: String,
    pub start_page: usize,
    pub end_page: usize,
    /// Whether an INDICE/SOMMARIO header was found
    pub has_header: bool,
    pub header_text: Option<String>,
    /// Rough count of "N." entry lines
    pub entry_count: usize,
    pub detection_method: TocDetectionMethod,
}

impl TableOfContents {
    /// Check whether a page lies within the TOC range
    pub fn contains_page(&self, page: usize) -> bool {
        self.start_page <= page && page <= self.end_page
    }

    /// Number of pages spanned by the TOC
    pub fn page_span(&self) -> usize {
        self.end_page + 1 - self.start_page
    }
}

/// Check whether a page lies within an optional TOC
pub fn is_toc_page(page: usize, toc: Option<&TableOfContents>) -> bool {
    toc.is_some_and(|t| t.contains_page(page))
}

// ============================================================================
// Sections
// ============================================================================

/// Which rule family recognized a section heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    /// Canonical section name such as PREMESSA or OGGETTO
    Named,
    /// Dotted numbering such as "2.1"
    Numbered,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Named => "named",
            Self::Numbered => "numbered",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A section of a document after filtering, ordering and hierarchy assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub section_id: SectionId,
    pub document_id: DocumentId,
    /// Leading numeral ("2.1") or canonical name ("PREMESSA")
    pub section_number: String,
    pub title: String,
    pub content: String,
    pub section_type: SectionType,
    /// Nesting depth, 1 for top-level sections
    pub level: usize,
    /// Estimated page on which the section ends
    pub page_number: usize,
    /// Position in the document, dense from 0
    pub order: usize,
    pub parent_section_id: Option<SectionId>,
}

impl Section {
    pub fn make_id(document_id: &str, order: usize) -> SectionId {
        format!("{}_SEC_{}", document_id, order)
    }
}

// ============================================================================
// Chunks
// ============================================================================

/// Section details carried on each chunk for display and enrichment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub section_number: String,
    pub section_type: SectionType,
}

/// A bounded piece of section text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: ChunkId,
    pub document_id: DocumentId,
    pub section_id: SectionId,
    /// Position within the owning section, from 0
    pub chunk_index: usize,
    pub content: String,
    /// Inherited from the owning section
    pub page_number: usize,
    pub metadata: ChunkMetadata,
}

impl Chunk {
    pub fn make_id(section_id: &str, chunk_index: usize) -> ChunkId {
        format!("{}_CHK_{}", section_id, chunk_index)
    }
}
