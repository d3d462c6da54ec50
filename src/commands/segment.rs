use anyhow::{Context, Result};
use circolari::{
    config::Config,
    pipeline::{DocumentProcessor, ProcessedDocument},
    types::{Document, DocumentType},
    util::truncate_chars,
};
use clap::ValueEnum;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

/// Page separator emitted by pdftotext
const FORM_FEED: char = '\u{0C}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub struct SegmentArgs {
    pub path: PathBuf,
    pub doc_type: DocumentType,
    pub id: Option<String>,
    pub format: OutputFormat,
    pub chunk_size: Option<usize>,
    pub overlap: Option<usize>,
}

pub fn segment_file(mut config: Config, args: SegmentArgs) -> Result<()> {
    if let Some(chunk_size) = args.chunk_size {
        config.chunking.chunk_size = chunk_size;
    }
    if let Some(overlap) = args.overlap {
        config.chunking.overlap = overlap;
    }
    config.validate()?;

    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read file as text: {}", args.path.display()))?;

    let document_id = args.id.unwrap_or_else(|| {
        args.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    });

    let pages = split_pages(&text);
    info!("Segmenting {} ({} pages)", document_id, pages.len());

    let document = Document::from_pages(document_id, args.doc_type, pages);
    let processed = DocumentProcessor::new(&config).process(&document);

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&processed)?);
        }
        OutputFormat::Text => print_summary(&processed),
    }

    Ok(())
}

/// Split extracted text into pages, ignoring the separator after the last page
fn split_pages(text: &str) -> Vec<&str> {
    let mut pages: Vec<&str> = text.split(FORM_FEED).collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    pages
}

/// Number of chunks per section id, counted in one pass
fn chunk_counts(processed: &ProcessedDocument) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for chunk in &processed.chunks {
        *counts.entry(chunk.section_id.as_str()).or_insert(0) += 1;
    }
    counts
}

fn print_summary(processed: &ProcessedDocument) {
    println!("\nDocument: {}", processed.document_id);
    println!("==========={}", "=".repeat(processed.document_id.len()));

    match &processed.toc {
        Some(toc) => println!(
            "TOC: pages {}-{} ({} entries, method: {}{})",
            toc.start_page,
            toc.end_page,
            toc.entry_count,
            toc.detection_method,
            toc.header_text
                .as_deref()
                .map(|h| format!(", header: {}", h))
                .unwrap_or_default()
        ),
        None => println!("TOC: none"),
    }

    let counts = chunk_counts(processed);
    println!("\nSections:");
    for section in &processed.sections {
        let chunk_count = counts
            .get(section.section_id.as_str())
            .copied()
            .unwrap_or(0);
        println!(
            "  {}{} [p.{}, {} chars, {} chunk(s)]",
            "  ".repeat(section.level.saturating_sub(1)),
            truncate_chars(&section.title, 70),
            section.page_number,
            section.content.chars().count(),
            chunk_count
        );
    }

    let stats = &processed.stats;
    println!("\nTotal sections:      {}", stats.sections_count);
    println!("Total chunks:        {}", stats.chunks_count);
    println!("Filtered TOC entries: {}", stats.sections_filtered);
    println!("Front-matter lines:  {}", stats.front_matter_lines);
    println!("Estimated tokens:    {}", stats.estimated_tokens);
    println!("Time:                {:.3}s", stats.processing_time_secs);
}
