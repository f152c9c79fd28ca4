//! Skill phrase consolidation
//!
//! Merges surviving phrases into a final per-person skill set: substring
//! subsumption within one phrase list, plain value-based union across the
//! three source shapes.

use std::collections::HashSet;

use crate::records::{Interest, ParagraphMatch, Publication};

/// Collapse phrases that are substrings of other phrases.
///
/// "deep learning" and "deep learning methods" reduce to the longer, more
/// specific form. Exact duplicates are removed first; remaining phrases are
/// stably sorted by descending length, so ties keep first-seen order and the
/// result is deterministic.
pub fn remove_substring_phrases<I>(phrases: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = phrases
        .into_iter()
        .filter(|p| seen.insert(p.clone()))
        .collect();
    unique.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut kept: Vec<String> = Vec::new();
    for phrase in unique {
        if !kept.iter().any(|longer| longer.contains(&phrase)) {
            kept.push(phrase);
        }
    }
    kept
}

/// Union the skill lists of all accepted items into one deduplicated list.
///
/// Dedup here is value-based only; substring subsumption already ran per
/// phrase list before this point. Insertion order is preserved, so output is
/// deterministic for fixed inputs. A person is judged AI-relevant overall
/// iff the returned list is non-empty.
pub fn combine_all_ai_skills(
    interests: &[Interest],
    publications: &[Publication],
    paragraphs: &[ParagraphMatch],
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut combined = Vec::new();

    let all = interests
        .iter()
        .flat_map(|i| i.skills.iter())
        .chain(publications.iter().flat_map(|p| p.skills.iter()))
        .chain(paragraphs.iter().flat_map(|p| p.skills.iter()));

    for skill in all {
        if seen.insert(skill.clone()) {
            combined.push(skill.clone());
        }
    }

    combined
}
