//! Table-of-contents detection
//!
//! Locates the page range of a table of contents so that the segmenter can
//! discard TOC entries that look like section headings.

mod detector;

pub use detector::*;
