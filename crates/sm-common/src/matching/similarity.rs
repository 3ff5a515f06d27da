//! Approximate skill-name matching.
//!
//! Two names are "similar" when one normalized name contains the other. The
//! similarity of a similar pair is a coarse bag-of-characters overlap: the
//! number of distinct characters both names share, divided by the length of
//! the longer name. It is not an edit distance.

use std::collections::HashSet;

/// Lowercase and drop every whitespace character.
pub fn normalize_skill_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// True when one normalized name is a substring of the other.
pub fn is_similar(left: &str, right: &str) -> bool {
    let left = normalize_skill_name(left);
    let right = normalize_skill_name(right);
    contains_either(&left, &right)
}

/// Overlap ratio of two raw names, or `None` when they are not similar.
pub fn skill_similarity(left: &str, right: &str) -> Option<f64> {
    let left = normalize_skill_name(left);
    let right = normalize_skill_name(right);
    normalized_similarity(&left, &right)
}

/// Same as [`skill_similarity`] for names that are already normalized.
pub(crate) fn normalized_similarity(left: &str, right: &str) -> Option<f64> {
    contains_either(left, right).then(|| overlap_ratio(left, right))
}

fn contains_either(left: &str, right: &str) -> bool {
    left.contains(right) || right.contains(left)
}

fn overlap_ratio(left: &str, right: &str) -> f64 {
    let max_len = left.chars().count().max(right.chars().count());
    if max_len == 0 {
        return 0.0;
    }

    let left_chars: HashSet<char> = left.chars().collect();
    let right_chars: HashSet<char> = right.chars().collect();
    let common = left_chars.intersection(&right_chars).count();

    common as f64 / max_len as f64
}
