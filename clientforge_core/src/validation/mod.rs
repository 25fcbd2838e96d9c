//! Checks run on the DMMF document before anything is generated.

mod datamodel;
mod denylist;

pub use datamodel::validate_mappings;
pub use denylist::{RESERVED_FIELD_NAMES, RESERVED_MODEL_NAMES, denylist_violations, validate_denylists};
