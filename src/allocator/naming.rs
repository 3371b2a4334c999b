//! Pure naming rules: canonical names, number extraction and sub-part suffixes.

use crate::config::SUFFIX_ALPHABET;
use crate::model::{Part, PartType};

/// Canonical top-level name, e.g. `U23`. No zero padding.
pub fn format_name(part_type: PartType, number: u64) -> String {
    format!("{}{}", part_type.prefix(), number)
}

/// Number of a name shaped exactly `<prefix><digits>`, otherwise `None`.
pub fn parse_prefixed_number(prefix: char, name: &str) -> Option<u64> {
    let digits = name.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Number of a canonical name for `part_type`.
pub fn parse_name_number(part_type: PartType, name: &str) -> Option<u64> {
    parse_prefixed_number(part_type.prefix(), name)
}

/// `max + 1` over every canonical name for `part_type`, or 1 when there are none.
///
/// Names that do not match the canonical pattern are ignored.
pub fn next_number_from<'a, I>(part_type: PartType, names: I) -> u64
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .filter_map(|name| parse_name_number(part_type, name))
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

/// Letter suffix for the sub-part at `index` (0-based).
///
/// Runs a..z, then aa..az, ba..zz, aaa.. (bijective base 26).
pub fn sub_part_suffix(index: usize) -> String {
    let base = SUFFIX_ALPHABET.len();
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(SUFFIX_ALPHABET[n % base]);
        n /= base;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Name of a new sub-part of `parent`, given how many sub-parts it already has.
pub fn allocate_sub_part_name(parent: &Part, existing_sub_parts: usize) -> String {
    format!("{}{}", parent.name, sub_part_suffix(existing_sub_parts))
}
