//! Field input collaborators
//!
//! One `FieldInput` per form field. It owns the field's raw as-entered text
//! and its validation rules; every edit revalidates and returns the
//! `FieldUpdate` message to feed the form engine.

use super::rules::{validate, ValidationRule};
use crate::state::{FieldId, FieldUpdate, FieldValue};

/// Kind of value a field produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, reported as `FieldValue::Text`
    Text,
    /// Decimal number, reported as `FieldValue::Number` once it parses
    Decimal,
}

/// Static description of one form field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    id: FieldId,
    label: String,
    error_text: String,
    kind: FieldKind,
    multiline: bool,
    rules: Vec<ValidationRule>,
}

impl FieldSpec {
    /// Describe a required text field
    pub fn text(id: &str, label: &str, multiline: bool) -> Self {
        Self {
            id: FieldId::from(id),
            label: label.to_string(),
            error_text: default_error_text(label),
            kind: FieldKind::Text,
            multiline,
            rules: vec![ValidationRule::Required],
        }
    }

    /// Describe a required decimal field
    pub fn decimal(id: &str, label: &str) -> Self {
        Self {
            id: FieldId::from(id),
            label: label.to_string(),
            error_text: default_error_text(label),
            kind: FieldKind::Decimal,
            multiline: false,
            rules: vec![ValidationRule::Required],
        }
    }

    /// Add a validation rule
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn id(&self) -> &FieldId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// User-facing text shown when the field is invalid
    pub fn error_text(&self) -> &str {
        &self.error_text
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }
}

fn default_error_text(label: &str) -> String {
    format!("Please enter a valid {}!", label.to_lowercase())
}

/// Live state of one form field: the raw value, its validity under the
/// field's own rules, and whether the user has visited the field yet
#[derive(Debug, Clone)]
pub struct FieldInput {
    spec: FieldSpec,
    value: String,
    is_valid: bool,
    touched: bool,
}

impl FieldInput {
    /// New empty input (create flow); validity comes from the rules
    pub fn new(spec: FieldSpec) -> Self {
        let is_valid = validate("", spec.rules());
        Self {
            spec,
            value: String::new(),
            is_valid,
            touched: false,
        }
    }

    /// Input seeded from an existing record (edit flow); the caller states
    /// the initial validity instead of re-running the rules
    pub fn with_initial(spec: FieldSpec, value: impl Into<String>, initially_valid: bool) -> Self {
        Self {
            spec,
            value: value.into(),
            is_valid: initially_valid,
            touched: false,
        }
    }

    /// Replace the raw value, revalidate, and report to the engine
    pub fn set_value(&mut self, raw: impl Into<String>) -> FieldUpdate {
        self.value = raw.into();
        self.revalidate()
    }

    /// Append one character; decimal fields only accept digits, '.' and '-'
    pub fn push_char(&mut self, c: char) -> FieldUpdate {
        match self.spec.kind() {
            FieldKind::Text => self.value.push(c),
            FieldKind::Decimal => {
                if c.is_ascii_digit() || c == '.' || c == '-' {
                    self.value.push(c);
                }
            }
        }
        self.revalidate()
    }

    /// Remove the last character
    pub fn pop_char(&mut self) -> FieldUpdate {
        self.value.pop();
        self.revalidate()
    }

    /// Clear the raw value
    pub fn clear(&mut self) -> FieldUpdate {
        self.value.clear();
        self.revalidate()
    }

    /// Mark the field as visited; errors only show for touched fields
    pub fn blur(&mut self) {
        self.touched = true;
    }

    /// The raw value as entered
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn id(&self) -> &FieldId {
        self.spec.id()
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// Error text to surface, once the field was touched and is invalid
    pub fn visible_error(&self) -> Option<&str> {
        (!self.is_valid && self.touched).then_some(self.spec.error_text())
    }

    /// Build the update message for the current value
    pub fn to_update(&self) -> FieldUpdate {
        FieldUpdate {
            id: self.spec.id().clone(),
            value: self.field_value(),
            is_valid: self.is_valid,
        }
    }

    fn revalidate(&mut self) -> FieldUpdate {
        self.is_valid = validate(&self.value, self.spec.rules());
        self.to_update()
    }

    fn field_value(&self) -> FieldValue {
        match self.spec.kind() {
            FieldKind::Text => FieldValue::Text(self.value.clone()),
            // Unparseable decimals stay raw text; the rules already flagged
            // them invalid
            FieldKind::Decimal => match self.value.trim().parse::<f64>() {
                Ok(number) => FieldValue::Number(number),
                Err(_) => FieldValue::Text(self.value.clone()),
            },
        }
    }
}
