//! Numeric primitives for dimension comparison.

/// Read a dimension value as a number, treating anything unparseable as zero.
///
/// Non-finite results (`inf`, `NaN`) are also zero. This permissive reading
/// decides which parts count as near-duplicates, so it must not be tightened.
pub fn parse_as_zero(value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Percentage difference `|a - b| / max(|a|, |b|) * 100`.
///
/// Returns `None` when both values are zero, which carries no information.
pub fn percent_difference(a: f64, b: f64) -> Option<f64> {
    if a == 0.0 && b == 0.0 {
        return None;
    }
    let scale = a.abs().max(b.abs());
    if scale == 0.0 {
        return None;
    }
    Some((a - b).abs() * 100.0 / scale)
}
