//! Production lifecycle of a part.

use serde::{Deserialize, Serialize};

/// Five-stage production status, ordered from first to last.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PartStatus {
    #[default]
    Measured,
    Designed,
    Tested,
    Printed,
    Installed,
}

impl PartStatus {
    /// All stages in lifecycle order.
    pub const ALL: [PartStatus; 5] = [
        PartStatus::Measured,
        PartStatus::Designed,
        PartStatus::Tested,
        PartStatus::Printed,
        PartStatus::Installed,
    ];

    /// The following stage, or `None` once installed.
    pub fn next(&self) -> Option<Self> {
        match self {
            PartStatus::Measured => Some(PartStatus::Designed),
            PartStatus::Designed => Some(PartStatus::Tested),
            PartStatus::Tested => Some(PartStatus::Printed),
            PartStatus::Printed => Some(PartStatus::Installed),
            PartStatus::Installed => None,
        }
    }

    /// 1-based stage number.
    pub fn stage(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn is_complete(&self) -> bool {
        *self == PartStatus::Installed
    }
}

impl std::fmt::Display for PartStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PartStatus::Measured => "measured",
            PartStatus::Designed => "designed",
            PartStatus::Tested => "tested",
            PartStatus::Printed => "printed",
            PartStatus::Installed => "installed",
        };
        write!(f, "{}", s)
    }
}
