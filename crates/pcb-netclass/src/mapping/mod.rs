//! Matching primitives shared by the validator and classifier

pub mod impedance;
mod matcher;

pub use impedance::{is_valid_impedance, NOT_APPLICABLE};
pub use matcher::{Keyword, Matcher, Pattern};
