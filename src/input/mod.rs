//! Field input collaborators and their validation rules

mod field_input;
mod rules;

pub use field_input::{FieldInput, FieldKind, FieldSpec};
pub use rules::{validate, ValidationRule};
