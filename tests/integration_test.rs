//! Integration tests for circolari
//!
//! These tests run whole documents through the processing pipeline.

use circolari::{
    chunking::SectionChunker,
    config::{ChunkingConfig, Config},
    segmentation::{build_hierarchy, SectionSegmenter},
    toc::TocDetector,
    types::{Document, DocumentType, Section, SectionType, TocDetectionMethod},
    DocumentProcessor, ProcessedDocument,
};
use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const LINES_PER_PAGE: usize = 50;

/// Render one page padded to a fixed number of lines, so estimated pages
/// line up with real ones
fn page(lines: &[&str]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    for _ in lines.len()..LINES_PER_PAGE {
        text.push('\n');
    }
    text
}

/// A twenty-page circolare whose TOC on page 2 points PREMESSA at page 12
fn circolare(document_id: &str) -> Document {
    let pages: Vec<String> = (1..=20)
        .map(|n| match n {
            1 => page(&["Agenzia delle Entrate", "Direzione Centrale Normativa"]),
            2 => page(&[
                "INDICE",
                "PREMESSA ..... 12",
                "1. AMBITO DI APPLICAZIONE ..... 13",
                "1.1 Soggetti interessati ..... 13",
                "1.2 Esclusioni ..... 13",
                "2. REQUISITI ..... 14",
            ]),
            12 => page(&[
                "PREMESSA",
                "Con la presente circolare si forniscono chiarimenti in merito alle novità \
                 introdotte dalla legge di bilancio in materia di detrazioni per i familiari a carico.",
            ]),
            13 => page(&[
                "1. AMBITO DI APPLICAZIONE",
                "La disciplina si applica ai periodi d'imposta in corso al primo gennaio.",
                "1.1 Soggetti interessati",
                "Sono interessati i contribuenti residenti e i non residenti con redditi prodotti in Italia.",
                "1.2 Esclusioni",
                "Restano esclusi i soggetti in regime forfetario.",
            ]),
            14 => page(&[
                "2. REQUISITI",
                "Il beneficio spetta a condizione che il familiare conviva con il contribuente. \
                 Il reddito complessivo del familiare non deve superare la soglia prevista. \
                 La detrazione è ripartita tra i genitori in misura pari al cinquanta per cento. \
                 In caso di affidamento esclusivo spetta al genitore affidatario.",
            ]),
            _ => page(&[]),
        })
        .collect();

    Document::from_pages(document_id, DocumentType::Circolare, pages)
}

fn small_chunks_config() -> Config {
    Config {
        chunking: ChunkingConfig {
            chunk_size: 20,
            overlap: 5,
            ..ChunkingConfig::default()
        },
        ..Config::default()
    }
}

fn section_numbers(sections: &[Section]) -> Vec<&str> {
    sections.iter().map(|s| s.section_number.as_str()).collect()
}

/// Test TOC detection, filtering, hierarchy and chunking together
#[test]
fn test_circolare_end_to_end() {
    let processed = DocumentProcessor::new(&small_chunks_config()).process(&circolare("CIR_9_2024"));

    // TOC occupies pages 2-11
    let toc = processed.toc.as_ref().expect("circolare should have a TOC");
    assert_eq!(toc.toc_id, "CIR_9_2024_TOC");
    assert_eq!(toc.start_page, 2);
    assert_eq!(toc.end_page, 11);
    assert_eq!(toc.detection_method, TocDetectionMethod::AnchorMarker);
    assert!(toc.has_header);
    assert_eq!(toc.header_text.as_deref(), Some("INDICE"));
    assert_eq!(toc.entry_count, 4);
    assert!(toc.raw_text.starts_with("INDICE"));

    // TOC entries are gone; only body sections remain
    assert_eq!(
        section_numbers(&processed.sections),
        vec!["PREMESSA", "1", "1.1", "1.2", "2"]
    );
    assert_eq!(processed.stats.sections_filtered, 6);
    assert_eq!(processed.stats.front_matter_lines, 2);
    assert!(processed.stats.toc_extracted);
    assert_eq!(processed.stats.toc_pages, 10);

    // Each section is placed on the page where it ends
    let pages: Vec<usize> = processed.sections.iter().map(|s| s.page_number).collect();
    assert_eq!(pages, vec![13, 13, 13, 14, 20]);

    // Hierarchy
    let s = &processed.sections;
    assert_eq!(s[0].parent_section_id, None);
    assert_eq!(s[1].parent_section_id, None);
    assert_eq!(s[2].parent_section_id.as_deref(), Some(s[1].section_id.as_str()));
    assert_eq!(s[3].parent_section_id.as_deref(), Some(s[1].section_id.as_str()));
    assert_eq!(s[4].parent_section_id, None);
    assert_eq!(processed.children_of(&s[1].section_id).count(), 2);

    // The long section is split, the short ones are not
    assert!(processed.chunks_for(&s[4].section_id).count() > 1);
    assert_eq!(processed.chunks_for(&s[3].section_id).count(), 1);
    assert_eq!(processed.stats.chunks_count, processed.chunks.len());
}

/// Test the structural guarantees every processed document must satisfy
#[test]
fn test_processed_document_invariants() {
    let processed = DocumentProcessor::new(&small_chunks_config()).process(&circolare("CIR_9_2024"));
    let budget = 20 * 4;
    let overlap = 5 * 4;

    let ids: HashSet<&str> = processed
        .sections
        .iter()
        .map(|s| s.section_id.as_str())
        .collect();
    assert_eq!(ids.len(), processed.sections.len());

    for (i, section) in processed.sections.iter().enumerate() {
        assert_eq!(section.order, i);
        assert_eq!(section.section_id, format!("CIR_9_2024_SEC_{}", i));
        assert!(section.level >= 1);
        if let Some(parent_id) = &section.parent_section_id {
            let parent = processed
                .sections
                .iter()
                .find(|p| &p.section_id == parent_id)
                .expect("parent must exist");
            assert!(parent.order < section.order);
            assert_eq!(parent.level + 1, section.level);
        }
    }

    for section in &processed.sections {
        let chunks: Vec<_> = processed.chunks_for(&section.section_id).collect();
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i);
            assert_eq!(chunk.chunk_id, format!("{}_CHK_{}", section.section_id, i));
            assert_eq!(chunk.document_id, "CIR_9_2024");
            assert_eq!(chunk.page_number, section.page_number);
            assert_eq!(chunk.metadata.section_number, section.section_number);
            assert!(!chunk.content.is_empty());
            assert!(chunk.content.chars().count() <= budget + overlap + 1);
        }
    }

    for chunk in &processed.chunks {
        assert!(ids.contains(chunk.section_id.as_str()));
    }
}

/// Test that a risoluzione is never searched for a TOC
#[test]
fn test_risoluzione_has_no_toc() {
    let document = Document::from_pages(
        "RIS_4_2024",
        DocumentType::Risoluzione,
        [
            page(&["OGGETTO: Trattamento IVA delle prestazioni sanitarie"]),
            page(&["PREMESSA ..... 3", "QUESITO", "La società chiede se le prestazioni siano esenti."]),
            page(&["PREMESSA", "Testo della premessa."]),
        ],
    );
    let processed = DocumentProcessor::default().process(&document);

    assert!(processed.toc.is_none());
    assert_eq!(processed.stats.sections_filtered, 0);
    assert_eq!(
        section_numbers(&processed.sections),
        vec!["OGGETTO", "PREMESSA", "QUESITO", "PREMESSA"]
    );
    assert!(processed
        .sections
        .iter()
        .all(|s| s.section_type == SectionType::Named && s.parent_section_id.is_none()));
}

/// Test that a circolare without a validated boundary keeps every section
#[test]
fn test_unvalidated_toc_filters_nothing() {
    let document = Document::from_pages(
        "CIR_1_2023",
        DocumentType::Circolare,
        [
            page(&["Agenzia delle Entrate"]),
            page(&["INDICE", "PREMESSA ..... 3"]),
            page(&["Il testo inizia senza intestazione."]),
        ],
    );
    let processed = DocumentProcessor::default().process(&document);

    assert!(processed.toc.is_none());
    assert_eq!(section_numbers(&processed.sections), vec!["INDICE", "PREMESSA"]);
}

/// Test that short section content becomes exactly one chunk
#[test]
fn test_short_section_single_chunk() {
    let content = "Il contributo erogato dalla regione è esente da imposta sul reddito delle persone fisiche.";
    assert_eq!(content.chars().count(), 90);

    let text = format!("1. DISCIPLINA\n{}\n", content);
    let mut sections = SectionSegmenter::default().segment("D", &text, None);
    build_hierarchy(&mut sections);

    let chunks = SectionChunker::default().chunk_sections(&sections);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, content);
    assert_eq!(chunks[0].chunk_id, "D_SEC_0_CHK_0");
}

/// Test that each step can be driven on its own
#[test]
fn test_steps_compose_like_the_processor() {
    let document = circolare("CIR_9_2024");
    let config = Config::default();

    let toc = TocDetector::new().detect_document(&document);
    let mut sections = SectionSegmenter::new(config.segmentation.clone()).segment(
        &document.document_id,
        &document.full_text,
        toc.as_ref(),
    );
    build_hierarchy(&mut sections);
    let chunks = SectionChunker::new(config.chunking.clone()).chunk_sections(&sections);

    let processed = DocumentProcessor::new(&config).process(&document);
    assert_eq!(processed.toc, toc);
    assert_eq!(processed.sections, sections);
    assert_eq!(processed.chunks, chunks);
}

/// Test JSON output shape and round trip
#[test]
fn test_processed_document_json() {
    let processed = DocumentProcessor::default().process(&circolare("CIR_9_2024"));

    let value = serde_json::to_value(&processed).unwrap();
    assert_eq!(value["document_id"], "CIR_9_2024");
    assert_eq!(value["toc"]["detection_method"], "anchor-marker");
    assert_eq!(value["sections"][0]["section_type"], "named");
    assert_eq!(value["sections"][1]["section_type"], "numbered");
    assert_eq!(value["chunks"][0]["metadata"]["section_number"], "PREMESSA");

    let json = serde_json::to_string(&processed).unwrap();
    let restored: ProcessedDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.sections, processed.sections);
    assert_eq!(restored.chunks, processed.chunks);
    assert_eq!(restored.toc, processed.toc);
}

/// Test that configuration loaded from TOML drives the processor
#[test]
fn test_config_file_drives_processor() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[chunking]\nchunk_size = 20\noverlap = 5\n").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.chunking.chunk_size, 20);
    assert_eq!(config.segmentation.lines_per_page, 50);

    let from_file = DocumentProcessor::new(&config).process(&circolare("CIR_9_2024"));
    let defaults = DocumentProcessor::default().process(&circolare("CIR_9_2024"));
    assert!(from_file.chunks.len() > defaults.chunks.len());
}

/// Test that one processor can serve documents from several threads
#[test]
fn test_concurrent_processing() {
    let processor = Arc::new(DocumentProcessor::new(&small_chunks_config()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let processor = Arc::clone(&processor);
            std::thread::spawn(move || processor.process(&circolare(&format!("CIR_{}_2024", i))))
        })
        .collect();

    let results: Vec<ProcessedDocument> = handles
        .into_iter()
        .map(|h| h.join().expect("worker panicked"))
        .collect();

    for (i, processed) in results.iter().enumerate() {
        assert_eq!(processed.document_id, format!("CIR_{}_2024", i));
        assert_eq!(processed.sections.len(), 5);
        assert!(processed
            .chunks
            .iter()
            .all(|c| c.chunk_id.starts_with(&format!("CIR_{}_2024_SEC_", i))));
    }
}
