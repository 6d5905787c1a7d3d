//! Per-field validation rules
//!
//! Rules run on the raw as-entered text of one field. The form engine never
//! sees them: a field input evaluates its own rules and reports only the
//! resulting boolean.

/// A validation rule for one field's raw text
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationRule {
    /// Trimmed text must be non-empty
    Required,
    /// Text must parse as a number no smaller than the bound
    MinValue(f64),
    /// Text must be at least this many characters long
    MinLength(usize),
}

impl ValidationRule {
    /// Check this rule against raw text
    pub fn check(&self, raw: &str) -> bool {
        match self {
            ValidationRule::Required => !raw.trim().is_empty(),
            ValidationRule::MinValue(min) => raw
                .trim()
                .parse::<f64>()
                .map(|number| number >= *min)
                .unwrap_or(false),
            ValidationRule::MinLength(len) => raw.chars().count() >= *len,
        }
    }
}

/// True iff every rule passes for the raw text
pub fn validate(raw: &str, rules: &[ValidationRule]) -> bool {
    rules.iter().all(|rule| rule.check(raw))
}
