//! Line-oriented section segmentation

use super::heading::{classify, Heading};
use crate::config::SegmentationConfig;
use crate::types::{Section, TableOfContents};
use crate::util::{char_len, truncate_chars};
use tracing::debug;

/// A section as cut from the text, before TOC filtering and numbering
#[derive(Debug, Clone)]
struct RawSection<'a> {
    heading: Heading,
    header: &'a str,
    /// Page of the heading until the section is closed
    page_number: usize,
    content_lines: Vec<&'a str>,
}

impl RawSection<'_> {
    fn content(&self) -> String {
        self.content_lines.join("\n").trim().to_string()
    }
}

/// Scanner state
enum State<'a> {
    /// No heading seen yet; content lines here are front matter
    Outside,
    /// Buffering body lines for an open section
    Inside(RawSection<'a>),
}

/// Result of segmenting one document
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    /// Ordered sections with dense `order` and ids, no parent links yet
    pub sections: Vec<Section>,
    /// Sections dropped as table-of-contents entries
    pub toc_entries_filtered: usize,
    /// Non-blank lines before the first heading, which belong to no section
    pub front_matter_lines: usize,
}

/// Splits document text into sections using heading heuristics
#[derive(Debug, Clone, Default)]
pub struct SectionSegmenter {
    config: SegmentationConfig,
}

impl SectionSegmenter {
    pub fn new(config: SegmentationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Segment text into ordered sections, discarding TOC entries
    pub fn segment(
        &self,
        document_id: &str,
        text: &str,
        toc: Option<&TableOfContents>,
    ) -> Vec<Section> {
        self.segment_detailed(document_id, text, toc).sections
    }

    /// Segment text and report what was dropped along the way
    pub fn segment_detailed(
        &self,
        document_id: &str,
        text: &str,
        toc: Option<&TableOfContents>,
    ) -> Segmentation {
        let (raw_sections, front_matter_lines) = self.scan(text);
        if front_matter_lines > 0 {
            debug!(
                "{}: {} line(s) before the first heading not assigned to any section",
                document_id, front_matter_lines
            );
        }

        let total = raw_sections.len();
        let kept: Vec<(RawSection<'_>, String)> = raw_sections
            .into_iter()
            .map(|raw| {
                let content = raw.content();
                (raw, content)
            })
            .filter(|(raw, content)| match toc {
                Some(toc) if self.is_toc_entry(toc, raw.page_number, content) => {
                    debug!(
                        "{}: filtered TOC section {} '{}' (page {}, {} chars)",
                        document_id,
                        raw.heading.section_number,
                        truncate_chars(raw.header, 50),
                        raw.page_number,
                        char_len(content)
                    );
                    false
                }
                _ => true,
            })
            .collect();

        let toc_entries_filtered = total - kept.len();
        if toc_entries_filtered > 0 {
            debug!(
                "{}: filtered out {} TOC section(s)",
                document_id, toc_entries_filtered
            );
        }

        let sections = kept
            .into_iter()
            .enumerate()
            .map(|(order, (raw, content))| Section {
                section_id: Section::make_id(document_id, order),
                document_id: document_id.to_string(),
                section_number: raw.heading.section_number,
                title: truncate_chars(raw.header, self.config.max_title_chars).to_string(),
                content,
                section_type: raw.heading.section_type,
                level: raw.heading.level,
                page_number: raw.page_number,
                order,
                parent_section_id: None,
            })
            .collect();

        Segmentation {
            sections,
            toc_entries_filtered,
            front_matter_lines,
        }
    }

    /// Walk the lines once, cutting a section at every heading.
    ///
    /// Returns the raw sections and the number of front-matter lines dropped.
    fn scan<'a>(&self, text: &'a str) -> (Vec<RawSection<'a>>, usize) {
        let mut sections = Vec::new();
        let mut front_matter_lines = 0;
        let mut state = State::Outside;
        let mut last_line = 0;

        for (line_idx, line) in text.lines().enumerate() {
            last_line = line_idx;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match classify(trimmed) {
                Some(heading) => {
                    let opened = RawSection {
                        heading,
                        header: trimmed,
                        page_number: self.estimate_page(line_idx),
                        content_lines: Vec::new(),
                    };
                    if let State::Inside(closed) = std::mem::replace(&mut state, State::Inside(opened)) {
                        sections.push(self.close(closed, line_idx));
                    }
                }
                None => match &mut state {
                    State::Inside(open) => open.content_lines.push(line),
                    State::Outside => front_matter_lines += 1,
                },
            }
        }

        if let State::Inside(open) = state {
            sections.push(self.close(open, last_line));
        }

        (sections, front_matter_lines)
    }

    /// Pin a section to the page of the line that ends it: the next heading,
    /// or the last line of the text. A heading with no body stays on its own
    /// page.
    fn close<'a>(&self, mut section: RawSection<'a>, closing_line: usize) -> RawSection<'a> {
        if !section.content_lines.is_empty() {
            section.page_number = self.estimate_page(closing_line);
        }
        section
    }

    /// Approximate page of a line, assuming a fixed number of lines per page
    fn estimate_page(&self, line_idx: usize) -> usize {
        line_idx / self.config.lines_per_page.max(1) + 1
    }

    /// A short section on a TOC page is a TOC entry, not a real section
    fn is_toc_entry(&self, toc: &TableOfContents, page_number: usize, content: &str) -> bool {
        toc.contains_page(page_number) && char_len(content) < self.config.toc_min_content_chars
    }
}
