//! Data model types for parts.

mod dimensions;
mod part;
mod part_type;
mod status;

pub use dimensions::Dimensions;
pub use part::{NewPart, Part, PartDraft, PartId};
pub use part_type::PartType;
pub use status::PartStatus;
