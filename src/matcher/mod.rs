//! Near-duplicate detection for parts being created.
//!
//! Everything here is pure and synchronous: callers pass an in-memory
//! catalog snapshot and re-run the match on every dimension edit.

mod numeric;
mod similarity;

pub use numeric::{parse_as_zero, percent_difference};
pub use similarity::similarity;

use serde::Serialize;

use crate::config::MATCH_THRESHOLD;
use crate::model::{Dimensions, Part, PartDraft, PartType};

/// A catalog part paired with its similarity to the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityMatch<'a> {
    pub part: &'a Part,
    pub score: f64,
}

/// Similarity matcher with a configurable threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matcher {
    threshold: f64,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            threshold: MATCH_THRESHOLD,
        }
    }
}

impl Matcher {
    /// Create a matcher suggesting parts scoring strictly above `threshold`.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Highest-scoring part of the same type, if it beats the threshold.
    ///
    /// Ties keep the part that appears first in `catalog`.
    pub fn best_match<'a>(
        &self,
        part_type: PartType,
        dimensions: &Dimensions,
        catalog: &'a [Part],
    ) -> Option<SimilarityMatch<'a>> {
        let mut best: Option<SimilarityMatch<'a>> = None;

        for part in catalog.iter().filter(|p| p.part_type == part_type) {
            let score = similarity(dimensions, &part.dimensions);
            if best.map_or(true, |b| score > b.score) {
                best = Some(SimilarityMatch { part, score });
            }
        }

        best.filter(|b| b.score > self.threshold)
    }

    /// Best match for a draft in progress.
    pub fn best_for_draft<'a>(
        &self,
        draft: &PartDraft,
        catalog: &'a [Part],
    ) -> Option<SimilarityMatch<'a>> {
        self.best_match(draft.part_type, &draft.dimensions, catalog)
    }

    /// All same-type parts above the threshold, best first; equal scores keep catalog order.
    pub fn rank<'a>(
        &self,
        part_type: PartType,
        dimensions: &Dimensions,
        catalog: &'a [Part],
    ) -> Vec<SimilarityMatch<'a>> {
        let mut ranked: Vec<SimilarityMatch<'a>> = catalog
            .iter()
            .filter(|p| p.part_type == part_type)
            .map(|part| SimilarityMatch {
                part,
                score: similarity(dimensions, &part.dimensions),
            })
            .filter(|m| m.score > self.threshold)
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}

/// Best match using the default 95% threshold.
pub fn find_best_match<'a>(
    part_type: PartType,
    dimensions: &Dimensions,
    catalog: &'a [Part],
) -> Option<SimilarityMatch<'a>> {
    Matcher::default().best_match(part_type, dimensions, catalog)
}

/// Ranked matches using the default 95% threshold.
pub fn rank_matches<'a>(
    part_type: PartType,
    dimensions: &Dimensions,
    catalog: &'a [Part],
) -> Vec<SimilarityMatch<'a>> {
    Matcher::default().rank(part_type, dimensions, catalog)
}
