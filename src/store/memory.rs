//! In-process implementation of [`PartStore`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::PartStore;
use crate::allocator::parse_prefixed_number;
use crate::error::StoreError;
use crate::model::{NewPart, Part, PartId};

#[derive(Debug, Default)]
struct Inner {
    parts: Vec<Part>,
    next_id: PartId,
    sequences: HashMap<char, u64>,
}

/// Mutex-guarded catalog with the same uniqueness guarantee as the backend.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
    sequences_enabled: bool,
    offline: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing rows. Ids continue after the highest seeded id.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        let next_id = parts.iter().map(|p| p.id).max().unwrap_or(0);
        Self {
            inner: Mutex::new(Inner {
                parts,
                next_id,
                sequences: HashMap::new(),
            }),
            ..Default::default()
        }
    }

    /// Enable per-prefix atomic sequences.
    ///
    /// A sequence starts from the highest live number for its prefix the first
    /// time it is used, then only ever moves forward.
    pub fn with_sequences(mut self) -> Self {
        self.sequences_enabled = true;
        self
    }

    /// Make every subsequent call fail as if the backend were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("backend is offline"));
        }
        self.inner
            .lock()
            .map_err(|_| StoreError::unavailable("catalog lock poisoned"))
    }
}

impl PartStore for InMemoryStore {
    fn query_all_parts(&self) -> Result<Vec<Part>, StoreError> {
        Ok(self.lock()?.parts.clone())
    }

    fn get_part(&self, id: PartId) -> Result<Option<Part>, StoreError> {
        Ok(self.lock()?.parts.iter().find(|p| p.id == id).cloned())
    }

    fn insert_part(&self, part: NewPart) -> Result<Part, StoreError> {
        let mut inner = self.lock()?;
        if inner.parts.iter().any(|p| p.name == part.name) {
            return Err(StoreError::UniqueViolation { name: part.name });
        }
        if let Some(parent) = part.draft.parent_part_id {
            if !inner.parts.iter().any(|p| p.id == parent) {
                return Err(StoreError::NotFound { id: parent });
            }
        }
        inner.next_id += 1;
        let row = part.into_part(inner.next_id);
        inner.parts.push(row.clone());
        Ok(row)
    }

    fn delete_part(&self, id: PartId) -> Result<Vec<PartId>, StoreError> {
        let mut inner = self.lock()?;
        if !inner.parts.iter().any(|p| p.id == id) {
            return Err(StoreError::NotFound { id });
        }

        let mut removed = vec![id];
        let mut frontier = vec![id];
        while let Some(parent) = frontier.pop() {
            for child in inner
                .parts
                .iter()
                .filter(|p| p.parent_part_id == Some(parent))
            {
                if !removed.contains(&child.id) {
                    removed.push(child.id);
                    frontier.push(child.id);
                }
            }
        }

        inner.parts.retain(|p| !removed.contains(&p.id));
        Ok(removed)
    }

    fn atomic_next_sequence(&self, prefix: char) -> Result<u64, StoreError> {
        if !self.sequences_enabled {
            return Err(StoreError::Unsupported {
                operation: format!("atomic_next_sequence({})", prefix),
            });
        }
        let mut inner = self.lock()?;
        let live_max = inner
            .parts
            .iter()
            .filter_map(|p| parse_prefixed_number(prefix, &p.name))
            .max()
            .unwrap_or(0);
        let counter = inner.sequences.entry(prefix).or_insert(live_max);
        *counter += 1;
        Ok(*counter)
    }
}
