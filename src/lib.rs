//! circolari: structure extraction for Italian tax-authority documents
//!
//! Turns the extracted text of a circolare, risoluzione or risposta into
//! retrieval-ready pieces:
//! - Table-of-contents page range detection for circolari
//! - Heading-driven section segmentation with TOC entry filtering
//! - Parent/child hierarchy from section levels
//! - Sentence-aware chunking with overlap

pub mod chunking;
pub mod config;
pub mod pipeline;
pub mod segmentation;
pub mod toc;
pub mod types;
pub mod util;

pub use config::Config;
pub use pipeline::{DocumentProcessor, ProcessedDocument, ProcessingStats};
pub use types::*;
