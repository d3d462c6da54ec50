//! Document segmentation
//!
//! Features:
//! - Ordered heading rules (canonical names, dotted numbering)
//! - Two-state line scanner with table-of-contents filtering
//! - Section hierarchy from heading levels

mod heading;
mod hierarchy;
mod segmenter;

pub use heading::{classify, Heading};
pub use hierarchy::build_hierarchy;
pub use segmenter::{SectionSegmenter, Segmentation};
