//! Part types and their identifier prefixes.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RegistryError;

/// Kind of fabricated part. Each type owns one single-letter name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartType {
    #[serde(rename = "U shape", alias = "U-Shape")]
    UShape,
    #[serde(rename = "Straight")]
    Straight,
    #[serde(rename = "Knob")]
    Knob,
    #[serde(rename = "Button")]
    Button,
    #[serde(rename = "Push pad", alias = "Push-Pad")]
    PushPad,
    #[serde(rename = "Cover")]
    Cover,
    #[serde(rename = "Special design", alias = "Special-Design")]
    SpecialDesign,
    #[serde(rename = "Gadget")]
    Gadget,
}

impl PartType {
    /// Every part type, in catalog display order.
    pub const ALL: [PartType; 8] = [
        PartType::UShape,
        PartType::Straight,
        PartType::Knob,
        PartType::Button,
        PartType::PushPad,
        PartType::Cover,
        PartType::SpecialDesign,
        PartType::Gadget,
    ];

    /// Name prefix for this type.
    pub fn prefix(&self) -> char {
        match self {
            PartType::UShape => 'U',
            PartType::Straight => 'S',
            PartType::Knob => 'K',
            PartType::Button => 'B',
            PartType::PushPad => 'P',
            PartType::Cover => 'C',
            PartType::SpecialDesign => 'D',
            PartType::Gadget => 'G',
        }
    }

    /// Look up the type owning a prefix.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.prefix() == prefix)
    }

    /// Human-readable label, as stored in the catalog.
    pub fn label(&self) -> &'static str {
        match self {
            PartType::UShape => "U shape",
            PartType::Straight => "Straight",
            PartType::Knob => "Knob",
            PartType::Button => "Button",
            PartType::PushPad => "Push pad",
            PartType::Cover => "Cover",
            PartType::SpecialDesign => "Special design",
            PartType::Gadget => "Gadget",
        }
    }
}

impl std::fmt::Display for PartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PartType {
    type Err = RegistryError;

    /// Accepts labels in any case with `-`, `_` or spaces as separators, or a bare prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(t) = PartType::from_prefix(c.to_ascii_uppercase()) {
                return Ok(t);
            }
        }

        let normalized = trimmed
            .to_lowercase()
            .replace(['-', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        PartType::ALL
            .into_iter()
            .find(|t| t.label().to_lowercase() == normalized)
            .ok_or_else(|| RegistryError::UnknownPartType {
                value: s.to_string(),
            })
    }
}
