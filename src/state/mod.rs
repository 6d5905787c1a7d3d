//! Form state engine module

mod field;
mod form_state;

pub use field::{FieldId, FieldUpdate, FieldValue};
pub use form_state::FormState;
