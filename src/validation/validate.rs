//! Required-field checks for dimension sets.

use crate::error::{RegistryError, Result};
use crate::model::{Dimensions, PartType};

/// Categorical field selecting a button's outline.
pub const SHAPE_FIELD: &str = "shape";

/// Accepted values of the button `shape` field.
pub const BUTTON_SHAPES: [&str; 3] = ["Circle", "Rectangular", "Slot"];

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
    /// Required fields that were absent or empty.
    pub missing: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    fn add_missing(&mut self, field: &str) {
        self.add_error(format!("Missing required field '{}'", field));
        self.missing.push(field.to_string());
    }
}

/// Fields every part of `part_type` must carry, independent of other values.
pub fn base_fields(part_type: PartType) -> &'static [&'static str] {
    match part_type {
        PartType::UShape => &["length", "radius", "depth", "oFillet", "iFillet"],
        PartType::Straight => &["length", "width", "depth"],
        PartType::Knob => &["diameter", "height"],
        PartType::Button => &["thickness", SHAPE_FIELD],
        PartType::PushPad => &["length", "width", "thickness"],
        PartType::Cover => &["length", "width", "thickness"],
        PartType::SpecialDesign | PartType::Gadget => &[],
    }
}

/// Extra button fields selected by its `shape` value.
fn shape_fields(shape: &str) -> Option<&'static [&'static str]> {
    match shape.to_ascii_lowercase().as_str() {
        "circle" => Some(&["diameter"]),
        "rectangular" | "slot" => Some(&["length", "width"]),
        _ => None,
    }
}

/// Full list of required fields given the values entered so far.
pub fn required_fields(part_type: PartType, dimensions: &Dimensions) -> Vec<&'static str> {
    let mut fields = base_fields(part_type).to_vec();
    if part_type == PartType::Button {
        if let Some(extra) = dimensions.get(SHAPE_FIELD).and_then(shape_fields) {
            fields.extend_from_slice(extra);
        }
    }
    fields
}

/// Check a dimension set against the required-field table for its type.
pub fn validate_dimensions(part_type: PartType, dimensions: &Dimensions) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for field in required_fields(part_type, dimensions) {
        if !dimensions.has_value(field) {
            result.add_missing(field);
            continue;
        }
        if field == SHAPE_FIELD {
            continue;
        }
        let value = dimensions.get(field).unwrap_or_default();
        let numeric = value.trim().parse::<f64>().is_ok_and(f64::is_finite);
        if !numeric {
            result.add_warning(format!(
                "Field '{}' is not a number ('{}'); it will be compared as 0",
                field, value
            ));
        }
    }

    if part_type == PartType::Button {
        if let Some(shape) = dimensions.get(SHAPE_FIELD).filter(|s| !s.is_empty()) {
            if shape_fields(shape).is_none() {
                result.add_error(format!(
                    "Unknown button shape '{}' (expected one of {})",
                    shape,
                    BUTTON_SHAPES.join(", ")
                ));
            }
        }
    }

    result
}

/// Fail with [`RegistryError::InvalidDimensions`] when required fields are missing.
pub fn require_complete(part_type: PartType, dimensions: &Dimensions) -> Result<()> {
    let result = validate_dimensions(part_type, dimensions);
    if result.missing.is_empty() {
        return Ok(());
    }
    Err(RegistryError::InvalidDimensions {
        part_type: part_type.to_string(),
        missing: result.missing,
    })
}
