//! Parent assignment over an ordered, flat list of sections

use crate::types::Section;
use std::collections::BTreeMap;

/// Assign `parent_section_id` to every section in a single pass.
///
/// Sections must be in document order. A section at level `L` becomes the
/// child of the most recent section at level `L - 1`; a heading at level `L`
/// closes every open branch deeper than `L`. Sections with no open parent
/// level are roots.
pub fn build_hierarchy(sections: &mut [Section]) {
    debug_assert!(sections.windows(2).all(|w| w[0].order < w[1].order));

    // level -> index of the most recent section at that level
    let mut last_seen: BTreeMap<usize, usize> = BTreeMap::new();

    for idx in 0..sections.len() {
        let level = sections[idx].level;

        let parent = level
            .checked_sub(1)
            .and_then(|parent_level| last_seen.get(&parent_level))
            .map(|&parent_idx| sections[parent_idx].section_id.clone());
        sections[idx].parent_section_id = parent;

        last_seen.insert(level, idx);
        last_seen.retain(|&seen_level, _| seen_level <= level);
    }
}
