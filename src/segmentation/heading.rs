//! Heading recognition
//!
//! Two ordered rule families are tried on every trimmed line, first match
//! wins: canonical section names used by tax rulings and circulars, then
//! dotted numbering shapes.

use crate::types::SectionType;
use regex::Regex;
use std::sync::OnceLock;

/// Canonical section names with the pattern that recognizes each, in priority order.
///
/// Patterns are anchored at the start of the line and matched case-insensitively.
const NAMED_SECTIONS: [(&str, &str); 11] = [
    ("OGGETTO", r"^OGGETTO\b"),
    ("QUESITO", r"^QUESITO\b"),
    ("SOLUZIONE INTERPRETATIVA", r"^SOLUZIONE\s+INTERPRETATIVA\b"),
    ("PARERE", r"^PARERE\s+DELL"),
    ("MOTIVAZIONE", r"^MOTIVAZIONE\b"),
    ("CONCLUSIONE", r"^CONCLUSIONE\b"),
    ("INDICE", r"^INDICE\b"),
    ("PREMESSA", r"^PREMESSA\b"),
    ("RISPOSTA", r"^RISPOSTA\b"),
    ("ISTANZA", r"^ISTANZA\b"),
    ("SOMMARIO", r"^SOMMARIO\b"),
];

/// Numbering shapes in priority order. The last one covers headings that
/// drop the dot but are set entirely in capitals.
const NUMBERED_SHAPES: [&str; 4] = [
    r"^\d+\.\s+\p{Lu}",
    r"^\d+\.\d+\.?\s+\p{Lu}",
    r"^\d+\.\d+\.\d+\.?\s+\p{Lu}",
    r"^\d+\s+\p{Lu}[\p{Lu}\s]{10,}",
];

struct NamedRule {
    name: &'static str,
    re: Regex,
}

static NAMED_RULES: OnceLock<Vec<NamedRule>> = OnceLock::new();
static NUMBERED_RULES: OnceLock<Vec<Regex>> = OnceLock::new();
static RE_NUMBERING: OnceLock<Regex> = OnceLock::new();

fn named_rules() -> &'static [NamedRule] {
    NAMED_RULES.get_or_init(|| {
        NAMED_SECTIONS
            .iter()
            .map(|&(name, pattern)| NamedRule {
                name,
                re: Regex::new(&format!("(?i){}", pattern)).expect("valid named heading regex"),
            })
            .collect()
    })
}

fn numbered_rules() -> &'static [Regex] {
    NUMBERED_RULES.get_or_init(|| {
        NUMBERED_SHAPES
            .iter()
            .map(|pattern| Regex::new(pattern).expect("valid numbered heading regex"))
            .collect()
    })
}

fn numbering_re() -> &'static Regex {
    RE_NUMBERING.get_or_init(|| Regex::new(r"^\d+(?:\.\d+)*").expect("valid numbering regex"))
}

/// A recognized heading line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub section_type: SectionType,
    /// Nesting depth: 1 for named headings, numbering depth otherwise
    pub level: usize,
    /// Leading dotted numeral, or the canonical name for named headings
    pub section_number: String,
}

/// Classify a line as a heading, if any rule matches.
///
/// The line is trimmed before matching.
pub fn classify(line: &str) -> Option<Heading> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(rule) = named_rules().iter().find(|rule| rule.re.is_match(line)) {
        return Some(Heading {
            section_type: SectionType::Named,
            level: 1,
            section_number: rule.name.to_string(),
        });
    }

    if numbered_rules().iter().any(|re| re.is_match(line)) {
        let numbering = numbering_re().find(line)?.as_str();
        return Some(Heading {
            section_type: SectionType::Numbered,
            level: numbering.split('.').count(),
            section_number: numbering.to_string(),
        });
    }

    None
}
