//! Percentage similarity between two dimension sets.

use super::numeric::{parse_as_zero, percent_difference};
use crate::model::Dimensions;

/// Similarity in `[0, 100]` between two dimension sets.
///
/// Only keys holding a non-empty value on both sides are compared. Keys
/// where both sides read as zero are skipped entirely, so a comparison with
/// nothing left to count scores 0 rather than 100. The score is
/// `100 - mean(percent difference)`, floored at 0.
pub fn similarity(a: &Dimensions, b: &Dimensions) -> f64 {
    let mut total = 0.0;
    let mut counted = 0usize;

    for (key, raw_a) in a.iter() {
        if raw_a.is_empty() {
            continue;
        }
        let raw_b = match b.get(key) {
            Some(v) if !v.is_empty() => v,
            _ => continue,
        };

        if let Some(diff) = percent_difference(parse_as_zero(raw_a), parse_as_zero(raw_b)) {
            total += diff;
            counted += 1;
        }
    }

    if counted == 0 {
        return 0.0;
    }
    (100.0 - total / counted as f64).max(0.0)
}
