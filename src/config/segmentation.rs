//! Section segmentation configuration

use serde::{Deserialize, Serialize};

/// Section segmentation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Assumed page density used to estimate a section's page.
    /// Dense tabular pages make this estimate drift.
    pub lines_per_page: usize,
    /// Sections on TOC pages with less content than this are TOC entries
    pub toc_min_content_chars: usize,
    /// Maximum characters kept from a heading line as the section title
    pub max_title_chars: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            lines_per_page: 50,
            toc_min_content_chars: 100,
            max_title_chars: 200,
        }
    }
}
