//! Catalog snapshots: loading from disk and in-memory query helpers.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{RegistryError, Result};
use crate::model::{Part, PartId, PartType};

/// Load a catalog snapshot from a JSON array of parts.
pub fn load_catalog(path: &Path) -> Result<Vec<Part>> {
    if !path.exists() {
        return Err(RegistryError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(RegistryError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let parts: Vec<Part> = serde_json::from_str(&content)?;
    tracing::debug!("Loaded {} part(s) from {}", parts.len(), path.display());
    Ok(parts)
}

/// Parts of one type, in catalog order.
pub fn parts_of_type(catalog: &[Part], part_type: PartType) -> impl Iterator<Item = &Part> {
    catalog.iter().filter(move |p| p.part_type == part_type)
}

/// Direct sub-parts of `parent`, in catalog order.
pub fn sub_parts_of(catalog: &[Part], parent: PartId) -> impl Iterator<Item = &Part> {
    catalog
        .iter()
        .filter(move |p| p.parent_part_id == Some(parent))
}

pub fn find_by_name<'a>(catalog: &'a [Part], name: &str) -> Option<&'a Part> {
    catalog.iter().find(|p| p.name == name)
}

/// Names held by more than one part, sorted. Empty for a healthy catalog.
pub fn duplicate_names(catalog: &[Part]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for part in catalog {
        *counts.entry(part.name.as_str()).or_default() += 1;
    }
    let mut duplicates: Vec<String> = counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(name, _)| name.to_string())
        .collect();
    duplicates.sort();
    duplicates
}
