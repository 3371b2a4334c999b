//! Schema-on-read validation of part dimensions.

mod validate;

pub use validate::*;
