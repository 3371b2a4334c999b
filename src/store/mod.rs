//! Boundary to the relational backend holding the shared part catalog.

mod memory;

pub use memory::InMemoryStore;

use crate::error::StoreError;
use crate::model::{NewPart, Part, PartId, PartType};

/// Table-style access to the part catalog.
///
/// Calls may block on a network round-trip. Implementations report a
/// name collision on insert as [`StoreError::UniqueViolation`].
pub trait PartStore: Send + Sync {
    /// Every part in the system, across all projects.
    fn query_all_parts(&self) -> Result<Vec<Part>, StoreError>;

    fn get_part(&self, id: PartId) -> Result<Option<Part>, StoreError>;

    /// Persist a new part and return the stored row.
    fn insert_part(&self, part: NewPart) -> Result<Part, StoreError>;

    /// Delete a part and, transitively, all of its sub-parts. Returns every removed id.
    fn delete_part(&self, id: PartId) -> Result<Vec<PartId>, StoreError>;

    fn query_parts_by_type(&self, part_type: PartType) -> Result<Vec<Part>, StoreError> {
        Ok(self
            .query_all_parts()?
            .into_iter()
            .filter(|p| p.part_type == part_type)
            .collect())
    }

    fn query_sub_parts(&self, parent: PartId) -> Result<Vec<Part>, StoreError> {
        Ok(self
            .query_all_parts()?
            .into_iter()
            .filter(|p| p.parent_part_id == Some(parent))
            .collect())
    }

    /// Atomically increment and return the counter for `prefix`.
    fn atomic_next_sequence(&self, prefix: char) -> Result<u64, StoreError> {
        Err(StoreError::Unsupported {
            operation: format!("atomic_next_sequence({})", prefix),
        })
    }
}
