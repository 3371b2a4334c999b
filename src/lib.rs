//! part-registry - Identity and near-duplicate detection for fabricated parts.
//!
//! Parts are named from one global sequence per part type (`U1`, `U2`, `K104`)
//! and sub-parts inherit their parent's name plus a letter (`U8a`). While a
//! part is being entered, its dimensions are compared against the catalog so
//! an existing equivalent part can be reused instead.
//!
//! # Example
//!
//! ```no_run
//! use part_registry::{find_best_match, Allocator, InMemoryStore, PartDraft, PartStore, PartType};
//!
//! let store = InMemoryStore::new();
//! let allocator = Allocator::new(&store);
//!
//! let draft = PartDraft::new(PartType::Gadget);
//! let catalog = store.query_all_parts().unwrap();
//! if find_best_match(draft.part_type, &draft.dimensions, &catalog).is_none() {
//!     let part = allocator.create_part(draft).unwrap();
//!     println!("created {}", part.name);
//! }
//! ```

pub mod allocator;
pub mod catalog;
pub mod config;
pub mod error;
pub mod matcher;
pub mod model;
pub mod store;
pub mod validation;

// Re-exports for convenience
pub use allocator::{
    allocate_sub_part_name, format_name, sub_part_suffix, Allocator, NameOrigin, NameProposal,
};
pub use catalog::load_catalog;
pub use config::{NumberingMode, RegistryConfig, MATCH_THRESHOLD};
pub use error::{RegistryError, Result, StoreError};
pub use matcher::{find_best_match, rank_matches, similarity, Matcher, SimilarityMatch};
pub use model::{Dimensions, NewPart, Part, PartDraft, PartId, PartStatus, PartType};
pub use store::{InMemoryStore, PartStore};
pub use validation::{require_complete, validate_dimensions, ValidationResult};

/// Best existing match for a draft against a store's current catalog.
///
/// Returns an owned copy of the matched part so the snapshot can be dropped.
pub fn suggest_existing<S: PartStore + ?Sized>(
    store: &S,
    draft: &PartDraft,
    config: &RegistryConfig,
) -> Result<Option<(Part, f64)>> {
    let catalog = store
        .query_parts_by_type(draft.part_type)
        .map_err(RegistryError::catalog)?;
    let found = Matcher::new(config.match_threshold)
        .best_for_draft(draft, &catalog)
        .map(|m| (m.part.clone(), m.score));
    if let Some((part, score)) = &found {
        tracing::debug!("Suggesting {} ({:.1}% similar)", part.name, score);
    }
    Ok(found)
}
