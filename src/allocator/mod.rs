//! Part name allocation.
//!
//! Top-level parts are named `<prefix><n>` from one sequence per type that is
//! shared by every project. Sub-parts are named after their parent plus a
//! letter suffix. Proposing a name never writes anything; only
//! [`Allocator::commit`] persists, so an abandoned proposal can simply be
//! dropped.

mod naming;

pub use naming::{
    allocate_sub_part_name, format_name, next_number_from, parse_name_number,
    parse_prefixed_number, sub_part_suffix,
};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{NumberingMode, RegistryConfig};
use crate::error::{RegistryError, Result, StoreError};
use crate::model::{NewPart, Part, PartDraft, PartId, PartType};
use crate::store::PartStore;
use crate::validation::require_complete;

/// Where a proposed name came from, and therefore how to re-derive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NameOrigin {
    Generated { part_type: PartType, number: u64 },
    SubPart { parent_id: PartId, index: usize },
    /// Supplied by the caller; never renamed.
    Explicit,
}

/// A name computed for a part that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameProposal {
    pub name: String,
    pub origin: NameOrigin,
}

impl NameProposal {
    /// Wrap a caller-chosen name.
    pub fn explicit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: NameOrigin::Explicit,
        }
    }
}

/// Allocates names against a shared [`PartStore`].
pub struct Allocator<'a, S: PartStore + ?Sized> {
    store: &'a S,
    config: RegistryConfig,
}

impl<'a, S: PartStore + ?Sized> Allocator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self::with_config(store, RegistryConfig::default())
    }

    pub fn with_config(store: &'a S, config: RegistryConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Next sequence number for `part_type`.
    ///
    /// A store failure is reported as [`RegistryError::AllocationFailed`];
    /// this never falls back to 1.
    pub fn next_number(&self, part_type: PartType) -> Result<u64> {
        if self.config.numbering == NumberingMode::AtomicSequence {
            match self.store.atomic_next_sequence(part_type.prefix()) {
                Ok(n) => {
                    debug!("Sequence {} -> {}", part_type.prefix(), n);
                    return Ok(n);
                }
                Err(StoreError::Unsupported { .. }) => {
                    debug!("Store has no atomic sequence, scanning names instead");
                }
                Err(e) => return Err(RegistryError::allocation(part_type.label(), e)),
            }
        }

        let parts = self
            .store
            .query_all_parts()
            .map_err(|e| RegistryError::allocation(part_type.label(), e))?;
        let next = next_number_from(part_type, parts.iter().map(|p| p.name.as_str()));
        debug!(
            "Scanned {} part(s), next {} number is {}",
            parts.len(),
            part_type,
            next
        );
        Ok(next)
    }

    /// Whether any part, in any project, already uses `name`.
    pub fn name_exists(&self, name: &str) -> Result<bool> {
        let parts = self.store.query_all_parts().map_err(RegistryError::catalog)?;
        Ok(parts.iter().any(|p| p.name == name))
    }

    /// Propose the next top-level name for `part_type`.
    pub fn propose_name(&self, part_type: PartType) -> Result<NameProposal> {
        let number = self.next_number(part_type)?;
        Ok(NameProposal {
            name: format_name(part_type, number),
            origin: NameOrigin::Generated { part_type, number },
        })
    }

    /// Propose the name of a new sub-part of `parent_id`.
    pub fn propose_sub_part_name(&self, parent_id: PartId) -> Result<NameProposal> {
        let target = format!("sub-part of {}", parent_id);
        let parent = self
            .store
            .get_part(parent_id)
            .map_err(|e| RegistryError::allocation(&target, e))?
            .ok_or_else(|| RegistryError::PartNotFound {
                id: parent_id.to_string(),
            })?;
        let index = self
            .store
            .query_sub_parts(parent_id)
            .map_err(|e| RegistryError::allocation(&target, e))?
            .len();

        Ok(NameProposal {
            name: allocate_sub_part_name(&parent, index),
            origin: NameOrigin::SubPart { parent_id, index },
        })
    }

    fn rederive(&self, proposal: &NameProposal) -> Result<NameProposal> {
        match proposal.origin {
            NameOrigin::Generated { part_type, .. } => self.propose_name(part_type),
            NameOrigin::SubPart { parent_id, .. } => self.propose_sub_part_name(parent_id),
            NameOrigin::Explicit => Err(RegistryError::AllocationConflict {
                name: proposal.name.clone(),
            }),
        }
    }

    /// Persist `draft` under `proposal`.
    ///
    /// A generated or sub-part name that loses a race is re-derived from a
    /// fresh read and retried up to `conflict_retries` times before giving up
    /// with [`RegistryError::AllocationFailed`]. An explicit name that is
    /// already taken fails with [`RegistryError::AllocationConflict`].
    ///
    /// Only a sub-part proposal may carry a parent; a draft with a parent
    /// under any other proposal is rejected with [`RegistryError::InvalidParent`].
    pub fn commit(&self, mut draft: PartDraft, proposal: NameProposal) -> Result<Part> {
        match (proposal.origin, draft.parent_part_id) {
            (NameOrigin::SubPart { parent_id, .. }, _) => draft.parent_part_id = Some(parent_id),
            (_, Some(parent_id)) => {
                return Err(RegistryError::InvalidParent {
                    name: proposal.name,
                    parent_id,
                })
            }
            (_, None) => {}
        }

        if proposal.origin == NameOrigin::Explicit {
            return self.commit_explicit(draft, proposal.name);
        }

        let max_attempts = self.config.max_attempts();
        let mut proposal = proposal;
        let mut attempt = 1;
        loop {
            match self
                .store
                .insert_part(NewPart::new(proposal.name.clone(), draft.clone()))
            {
                Ok(part) => {
                    info!("Created part {} (id {})", part.name, part.id);
                    return Ok(part);
                }
                Err(StoreError::UniqueViolation { name }) => {
                    warn!(
                        "Name {} was taken concurrently (attempt {}/{})",
                        name, attempt, max_attempts
                    );
                    if attempt >= max_attempts {
                        return Err(RegistryError::AllocationFailed {
                            target: name,
                            reason: format!("name still taken after {} attempt(s)", attempt),
                        });
                    }
                    proposal = self.rederive(&proposal)?;
                    attempt += 1;
                }
                Err(StoreError::NotFound { id }) => {
                    return Err(RegistryError::PartNotFound { id: id.to_string() })
                }
                Err(e) => return Err(RegistryError::allocation(proposal.name, e)),
            }
        }
    }

    fn commit_explicit(&self, draft: PartDraft, name: String) -> Result<Part> {
        if self.name_exists(&name)? {
            return Err(RegistryError::AllocationConflict { name });
        }
        match self.store.insert_part(NewPart::new(name.clone(), draft)) {
            Ok(part) => {
                info!("Created part {} (id {}) with explicit name", part.name, part.id);
                Ok(part)
            }
            Err(StoreError::UniqueViolation { name }) => {
                Err(RegistryError::AllocationConflict { name })
            }
            Err(e) => Err(RegistryError::allocation(name, e)),
        }
    }

    /// Validate, name and persist a new part.
    ///
    /// Drafts with a parent become sub-parts of it; all others get the next
    /// number for their type.
    pub fn create_part(&self, draft: PartDraft) -> Result<Part> {
        require_complete(draft.part_type, &draft.dimensions)?;
        let proposal = match draft.parent_part_id {
            Some(parent_id) => self.propose_sub_part_name(parent_id)?,
            None => self.propose_name(draft.part_type)?,
        };
        self.commit(draft, proposal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dimensions;
    use crate::store::InMemoryStore;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn gadget() -> PartDraft {
        PartDraft::new(PartType::Gadget)
    }

    fn seeded(names: &[(&str, PartType)]) -> InMemoryStore {
        InMemoryStore::from_parts(
            names
                .iter()
                .enumerate()
                .map(|(i, (name, t))| NewPart::new(*name, PartDraft::new(*t)).into_part(i as u64 + 1))
                .collect(),
        )
    }

    /// Store where another client wins the first `races` inserts with the same name.
    struct RacingStore {
        inner: InMemoryStore,
        races: AtomicUsize,
    }

    impl RacingStore {
        fn new(races: usize) -> Self {
            Self {
                inner: InMemoryStore::new(),
                races: AtomicUsize::new(races),
            }
        }
    }

    impl PartStore for RacingStore {
        fn query_all_parts(&self) -> std::result::Result<Vec<Part>, StoreError> {
            self.inner.query_all_parts()
        }

        fn get_part(&self, id: PartId) -> std::result::Result<Option<Part>, StoreError> {
            self.inner.get_part(id)
        }

        fn insert_part(&self, part: NewPart) -> std::result::Result<Part, StoreError> {
            if self.races.load(Ordering::SeqCst) > 0 {
                self.races.fetch_sub(1, Ordering::SeqCst);
                self.inner
                    .insert_part(NewPart::new(part.name.clone(), part.draft.clone()))?;
            }
            self.inner.insert_part(part)
        }

        fn delete_part(&self, id: PartId) -> std::result::Result<Vec<PartId>, StoreError> {
            self.inner.delete_part(id)
        }
    }

    // ==================== next_number tests ====================

    #[test]
    fn test_next_number_scans_globally() {
        let store = seeded(&[
            ("U1", PartType::UShape),
            ("U3", PartType::UShape),
            ("U7", PartType::UShape),
            ("K5", PartType::Knob),
        ]);
        let allocator = Allocator::new(&store);
        assert_eq!(allocator.next_number(PartType::UShape).unwrap(), 8);
        assert_eq!(allocator.next_number(PartType::Knob).unwrap(), 6);
        assert_eq!(allocator.next_number(PartType::Cover).unwrap(), 1);
    }

    #[test]
    fn test_next_number_fails_instead_of_returning_one() {
        let store = InMemoryStore::new();
        store.set_offline(true);
        let err = Allocator::new(&store)
            .next_number(PartType::UShape)
            .unwrap_err();
        assert!(matches!(err, RegistryError::AllocationFailed { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_atomic_sequence_mode() {
        let store = seeded(&[("U4", PartType::UShape)]).with_sequences();
        let allocator =
            Allocator::with_config(&store, RegistryConfig::new(NumberingMode::AtomicSequence));
        assert_eq!(allocator.next_number(PartType::UShape).unwrap(), 5);
        // The sequence advances even though nothing was persisted.
        assert_eq!(allocator.next_number(PartType::UShape).unwrap(), 6);
    }

    #[test]
    fn test_atomic_sequence_falls_back_to_scan() {
        let store = seeded(&[("U4", PartType::UShape)]);
        let allocator =
            Allocator::with_config(&store, RegistryConfig::new(NumberingMode::AtomicSequence));
        assert_eq!(allocator.next_number(PartType::UShape).unwrap(), 5);
        assert_eq!(allocator.next_number(PartType::UShape).unwrap(), 5);
    }

    // ==================== proposal tests ====================

    #[test]
    fn test_propose_name_does_not_persist() {
        let store = InMemoryStore::new();
        let allocator = Allocator::new(&store);
        let proposal = allocator.propose_name(PartType::UShape).unwrap();
        assert_eq!(proposal.name, "U1");
        assert_eq!(
            proposal.origin,
            NameOrigin::Generated {
                part_type: PartType::UShape,
                number: 1
            }
        );
        drop(proposal);
        assert!(store.query_all_parts().unwrap().is_empty());
    }

    #[test]
    fn test_propose_sub_part_name_counts_existing() {
        let store = InMemoryStore::new();
        let allocator = Allocator::new(&store);
        let parent = allocator
            .commit(gadget(), NameProposal::explicit("U8"))
            .unwrap();

        assert_eq!(
            allocator.propose_sub_part_name(parent.id).unwrap().name,
            "U8a"
        );
        for _ in 0..2 {
            allocator
                .create_part(gadget().with_parent(parent.id))
                .unwrap();
        }
        let proposal = allocator.propose_sub_part_name(parent.id).unwrap();
        assert_eq!(proposal.name, "U8c");
        assert_eq!(
            proposal.origin,
            NameOrigin::SubPart {
                parent_id: parent.id,
                index: 2
            }
        );
    }

    #[test]
    fn test_propose_sub_part_unknown_parent() {
        let store = InMemoryStore::new();
        let err = Allocator::new(&store).propose_sub_part_name(99).unwrap_err();
        assert!(matches!(err, RegistryError::PartNotFound { .. }));
    }

    #[test]
    fn test_name_exists() {
        let store = seeded(&[("K2", PartType::Knob)]);
        let allocator = Allocator::new(&store);
        assert!(allocator.name_exists("K2").unwrap());
        assert!(!allocator.name_exists("K3").unwrap());

        store.set_offline(true);
        assert!(matches!(
            allocator.name_exists("K2"),
            Err(RegistryError::CatalogUnavailable { .. })
        ));
    }

    // ==================== commit tests ====================

    #[test]
    fn test_commit_retries_once_after_conflict() {
        let store = RacingStore::new(1);
        let allocator = Allocator::new(&store);
        let proposal = allocator.propose_name(PartType::Gadget).unwrap();
        assert_eq!(proposal.name, "G1");

        let part = allocator.commit(gadget(), proposal).unwrap();
        assert_eq!(part.name, "G2");
        assert_eq!(store.query_all_parts().unwrap().len(), 2);
    }

    #[test]
    fn test_commit_fails_loudly_after_second_conflict() {
        let store = RacingStore::new(2);
        let allocator = Allocator::new(&store);
        let proposal = allocator.propose_name(PartType::Gadget).unwrap();

        let err = allocator.commit(gadget(), proposal).unwrap_err();
        match err {
            RegistryError::AllocationFailed { target, .. } => assert_eq!(target, "G2"),
            other => panic!("Expected AllocationFailed, got {other:?}"),
        }
        let names: Vec<String> = store
            .query_all_parts()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["G1", "G2"]);
    }

    #[test]
    fn test_commit_explicit_name_collision() {
        let store = seeded(&[("U5", PartType::UShape)]);
        let allocator = Allocator::new(&store);
        let err = allocator
            .commit(gadget(), NameProposal::explicit("U5"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::AllocationConflict { name } if name == "U5"));
        assert_eq!(store.query_all_parts().unwrap().len(), 1);
    }

    #[test]
    fn test_commit_explicit_name_is_never_renamed() {
        let store = RacingStore::new(1);
        let err = Allocator::new(&store)
            .commit(gadget(), NameProposal::explicit("X-custom"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::AllocationConflict { .. }));
    }

    #[test]
    fn test_commit_sets_parent_for_sub_part() {
        let store = seeded(&[("K1", PartType::Knob)]);
        let allocator = Allocator::new(&store);
        let proposal = allocator.propose_sub_part_name(1).unwrap();
        let part = allocator.commit(PartDraft::new(PartType::Knob), proposal).unwrap();
        assert_eq!(part.name, "K1a");
        assert_eq!(part.parent_part_id, Some(1));
    }

    #[test]
    fn test_commit_rejects_parent_on_generated_name() {
        let store = InMemoryStore::new();
        let allocator = Allocator::new(&store);
        let g1 = allocator.create_part(gadget()).unwrap();

        let proposal = allocator.propose_name(PartType::Gadget).unwrap();
        let err = allocator
            .commit(gadget().with_parent(g1.id), proposal)
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidParent { ref name, parent_id } if name == "G2" && parent_id == g1.id
        ));
        assert_eq!(store.query_all_parts().unwrap().len(), 1);
    }

    #[test]
    fn test_commit_rejects_parent_on_explicit_name() {
        let store = InMemoryStore::new();
        let err = Allocator::new(&store)
            .commit(gadget().with_parent(999), NameProposal::explicit("X1"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidParent { parent_id: 999, .. }));
        assert!(store.query_all_parts().unwrap().is_empty());
    }

    #[test]
    fn test_commit_sub_part_of_deleted_parent() {
        let store = InMemoryStore::new();
        let allocator = Allocator::new(&store);
        let parent = allocator.create_part(gadget()).unwrap();
        let proposal = allocator.propose_sub_part_name(parent.id).unwrap();
        store.delete_part(parent.id).unwrap();

        let err = allocator.commit(gadget(), proposal).unwrap_err();
        assert!(matches!(err, RegistryError::PartNotFound { .. }));
        assert!(store.query_all_parts().unwrap().is_empty());
    }

    #[test]
    fn test_sub_part_proposals_racing_for_same_letter() {
        let store = InMemoryStore::new();
        let allocator = Allocator::new(&store);
        let parent = allocator
            .commit(gadget(), NameProposal::explicit("U8"))
            .unwrap();

        let first = allocator.propose_sub_part_name(parent.id).unwrap();
        let second = allocator.propose_sub_part_name(parent.id).unwrap();
        assert_eq!(first.name, "U8a");
        assert_eq!(second.name, "U8a");

        let a = allocator.commit(gadget(), first).unwrap();
        let b = allocator.commit(gadget(), second).unwrap();
        assert_eq!(a.name, "U8a");
        assert_eq!(b.name, "U8b");
        assert_eq!(b.parent_part_id, Some(parent.id));
    }

    // ==================== create_part tests ====================

    #[test]
    fn test_create_part_validates_first() {
        let store = InMemoryStore::new();
        let draft = PartDraft::new(PartType::Knob).with_dimensions(Dimensions::new());
        let err = Allocator::new(&store).create_part(draft).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidDimensions { .. }));
        assert!(store.query_all_parts().unwrap().is_empty());
    }

    #[test]
    fn test_create_part_offline_store() {
        let store = InMemoryStore::new();
        store.set_offline(true);
        let err = Allocator::new(&store).create_part(gadget()).unwrap_err();
        assert!(matches!(err, RegistryError::AllocationFailed { .. }));
    }

    #[test]
    fn test_create_part_sequence() {
        let store = InMemoryStore::new();
        let allocator = Allocator::new(&store);
        let names: Vec<String> = (0..3)
            .map(|_| allocator.create_part(gadget()).unwrap().name)
            .collect();
        assert_eq!(names, vec!["G1", "G2", "G3"]);
    }
}
