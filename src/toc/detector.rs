//! Table-of-contents boundary detection
//!
//! A Circolare opens with its table of contents on page 2. The TOC ends on
//! the page before the body starts; the body start is read from a page
//! reference inside the TOC itself and then confirmed on the referenced page.

use crate::types::{Document, DocumentType, TableOfContents, TocDetectionMethod};
use crate::util::truncate_chars;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Page (1-indexed) on which a table of contents always starts
pub const TOC_START_PAGE: usize = 2;

/// Recurring structural term that opens the document body
pub const ANCHOR_MARKER: &str = "PREMESSA";

/// Numbering of the first second-level heading
pub const FIRST_SUBSECTION: &str = "1.1";

/// How far into the candidate page the anchor marker must appear
const ANCHOR_WINDOW_CHARS: usize = 500;

/// How far into the candidate page the first subsection must appear
const SUBSECTION_WINDOW_CHARS: usize = 200;

/// Strategies in priority order; the first validated candidate wins
const STRATEGIES: [TocDetectionMethod; 2] = [
    TocDetectionMethod::AnchorMarker,
    TocDetectionMethod::FirstSubsection,
];

static RE_ANCHOR: OnceLock<Regex> = OnceLock::new();
static RE_FIRST_SUBSECTION: OnceLock<Regex> = OnceLock::new();
static RE_HEADER: OnceLock<Regex> = OnceLock::new();
static RE_ENTRY: OnceLock<Regex> = OnceLock::new();

fn anchor_re() -> &'static Regex {
    RE_ANCHOR.get_or_init(|| Regex::new(r"(?i)PREMESSA[\s.]+(\d+)").expect("valid anchor regex"))
}

fn first_subsection_re() -> &'static Regex {
    // "1.1" must not be the tail of "11.1" nor the head of "1.10"
    RE_FIRST_SUBSECTION.get_or_init(|| {
        Regex::new(r"(?m)(?:^|[^\d.])1\.1[^\d]+(\d+)").expect("valid subsection regex")
    })
}

fn header_re() -> &'static Regex {
    RE_HEADER.get_or_init(|| {
        Regex::new(r"(?im)^[ \t]*(INDICE|SOMMARIO)[ \t]*$").expect("valid header regex")
    })
}

fn entry_re() -> &'static Regex {
    RE_ENTRY.get_or_init(|| Regex::new(r"(?m)^[ \t]*\d+\.").expect("valid entry regex"))
}

/// Detects the page range occupied by a table of contents
#[derive(Debug, Clone, Copy, Default)]
pub struct TocDetector;

impl TocDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect the TOC of a document
    pub fn detect_document(&self, document: &Document) -> Option<TableOfContents> {
        self.detect(&document.document_id, &document.page_texts, document.doc_type)
    }

    /// Detect the TOC from per-page text.
    ///
    /// Returns `None` for document types without a TOC, for documents shorter
    /// than two pages, and when no strategy produces a validated boundary.
    pub fn detect<S: AsRef<str>>(
        &self,
        document_id: &str,
        pages: &[S],
        doc_type: DocumentType,
    ) -> Option<TableOfContents> {
        if !doc_type.has_table_of_contents() {
            debug!("{}: {} has no table of contents, skipping", document_id, doc_type);
            return None;
        }

        if pages.len() < TOC_START_PAGE {
            warn!(
                "{}: document has {} page(s), cannot extract table of contents",
                document_id,
                pages.len()
            );
            return None;
        }

        let toc_page = pages[TOC_START_PAGE - 1].as_ref();

        let header_text = header_re()
            .captures(toc_page)
            .map(|caps| caps[1].to_uppercase());

        let Some((method, body_page)) = STRATEGIES.iter().find_map(|&method| {
            let candidate = candidate_page(method, toc_page)?;
            if validate_candidate(method, pages, candidate) {
                debug!(
                    "{}: TOC boundary detected via {} on page {}",
                    document_id, method, candidate
                );
                Some((method, candidate))
            } else {
                debug!(
                    "{}: {} candidate page {} failed validation",
                    document_id, method, candidate
                );
                None
            }
        }) else {
            warn!(
                "{}: could not detect table of contents boundary, skipping",
                document_id
            );
            return None;
        };

        let end_page = body_page - 1;
        let raw_text = pages[TOC_START_PAGE - 1..end_page]
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();
        let entry_count = entry_re().find_iter(&raw_text).count();

        info!(
            "{}: TOC extracted (pages {}-{}, {} entries, method: {})",
            document_id, TOC_START_PAGE, end_page, entry_count, method
        );

        Some(TableOfContents {
            toc_id: format!("{}_TOC", document_id),
            document_id: document_id.to_string(),
            raw_text,
            start_page: TOC_START_PAGE,
            end_page,
            has_header: header_text.is_some(),
            header_text,
            entry_count,
            detection_method: method,
        })
    }
}

/// Page number a strategy reads off the TOC page, if its landmark is present
fn candidate_page(method: TocDetectionMethod, toc_page: &str) -> Option<usize> {
    let re = match method {
        TocDetectionMethod::AnchorMarker => anchor_re(),
        TocDetectionMethod::FirstSubsection => first_subsection_re(),
    };
    re.captures(toc_page)?.get(1)?.as_str().parse().ok()
}

/// Confirm the landmark really opens the candidate page.
///
/// The candidate must come after the TOC start page so the resulting range
/// is never empty.
fn validate_candidate<S: AsRef<str>>(
    method: TocDetectionMethod,
    pages: &[S],
    candidate: usize,
) -> bool {
    if candidate <= TOC_START_PAGE || candidate > pages.len() {
        return false;
    }
    let text = pages[candidate - 1].as_ref();

    match method {
        TocDetectionMethod::AnchorMarker => truncate_chars(text, ANCHOR_WINDOW_CHARS)
            .to_uppercase()
            .contains(ANCHOR_MARKER),
        TocDetectionMethod::FirstSubsection => {
            truncate_chars(text, SUBSECTION_WINDOW_CHARS).contains(FIRST_SUBSECTION)
        }
    }
}
