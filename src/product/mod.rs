//! Product domain: the record type and the create/edit form sessions

mod form;
mod model;

pub use form::{
    ProductForm, SubmitError, SubmitOutcome, FIELD_DESCRIPTION, FIELD_IMAGE_URL, FIELD_PRICE,
    FIELD_TITLE,
};
pub use model::Product;
