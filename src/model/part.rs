//! Part records as stored in the catalog, plus creation payloads.

use serde::{Deserialize, Serialize};

use super::{Dimensions, PartStatus, PartType};

/// Store-assigned row identifier.
pub type PartId = u64;

/// A fabricated part. `name` is assigned once at creation and is unique
/// across every project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    /// Canonical name: `<prefix><n>` or `<parent name><letters>` for sub-parts.
    pub name: String,
    #[serde(rename = "type")]
    pub part_type: PartType,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub status: PartStatus,
    /// Owning project. Informational only; names are not scoped by project.
    #[serde(default)]
    pub project_id: Option<u64>,
    /// Set for sub-parts.
    #[serde(default)]
    pub parent_part_id: Option<PartId>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub designer: Option<String>,
    #[serde(default)]
    pub cad_drawing: Option<String>,
    /// Picture URIs in blob storage.
    #[serde(default)]
    pub pictures: Vec<String>,
}

impl Part {
    pub fn is_sub_part(&self) -> bool {
        self.parent_part_id.is_some()
    }

    /// Sequence number of a canonical top-level name (`U23` -> 23).
    pub fn number(&self) -> Option<u64> {
        crate::allocator::parse_name_number(self.part_type, &self.name)
    }
}

/// Everything a caller supplies to create a part, minus its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDraft {
    #[serde(rename = "type")]
    pub part_type: PartType,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub status: PartStatus,
    #[serde(default)]
    pub project_id: Option<u64>,
    #[serde(default)]
    pub parent_part_id: Option<PartId>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub designer: Option<String>,
    #[serde(default)]
    pub cad_drawing: Option<String>,
    #[serde(default)]
    pub pictures: Vec<String>,
}

impl PartDraft {
    /// Create an empty draft of the given type.
    pub fn new(part_type: PartType) -> Self {
        Self {
            part_type,
            dimensions: Dimensions::new(),
            status: PartStatus::default(),
            project_id: None,
            parent_part_id: None,
            description: String::new(),
            designer: None,
            cad_drawing: None,
            pictures: Vec::new(),
        }
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_project(mut self, project_id: u64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_parent(mut self, parent_id: PartId) -> Self {
        self.parent_part_id = Some(parent_id);
        self
    }

    /// Copy the non-identity fields of a suggested match into this draft.
    ///
    /// Type, project and parent stay as the user chose them.
    pub fn adopt_from(&mut self, matched: &Part) {
        self.description = matched.description.clone();
        self.designer = matched.designer.clone();
        self.cad_drawing = matched.cad_drawing.clone();
        self.pictures = matched.pictures.clone();
        self.dimensions = matched.dimensions.clone();
    }
}

/// Insert payload handed to the store: a draft with its allocated name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPart {
    pub name: String,
    #[serde(flatten)]
    pub draft: PartDraft,
}

impl NewPart {
    pub fn new(name: impl Into<String>, draft: PartDraft) -> Self {
        Self {
            name: name.into(),
            draft,
        }
    }

    /// Materialize the stored row once the store has picked an id.
    pub fn into_part(self, id: PartId) -> Part {
        let d = self.draft;
        Part {
            id,
            name: self.name,
            part_type: d.part_type,
            dimensions: d.dimensions,
            status: d.status,
            project_id: d.project_id,
            parent_part_id: d.parent_part_id,
            description: d.description,
            designer: d.designer,
            cad_drawing: d.cad_drawing,
            pictures: d.pictures,
        }
    }
}
