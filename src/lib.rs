//! Form state engine and validation for Storefront product editing
//!
//! The crate is organized around one pure state transition: field inputs report
//! `(id, value, is_valid)` updates into a [`FormState`], which tracks every
//! field's latest value and validity and derives overall form validity.
//! [`ProductForm`] wires the product create and edit flows on top of it and
//! submits through the [`ProductStore`] seam.

pub mod config;
pub mod input;
pub mod product;
pub mod state;
pub mod store;

pub use config::{FormsConfig, DEFAULT_MIN_DESCRIPTION_LENGTH, DEFAULT_MIN_PRICE};
pub use input::{validate, FieldInput, FieldKind, FieldSpec, ValidationRule};
pub use product::{
    Product, ProductForm, SubmitError, SubmitOutcome, FIELD_DESCRIPTION, FIELD_IMAGE_URL,
    FIELD_PRICE, FIELD_TITLE,
};
pub use state::{FieldId, FieldUpdate, FieldValue, FormState};
pub use store::{ProductCatalog, ProductStore};
