//! Symptom value object.

use std::fmt;

use crate::domain::foundation::ValidationError;

/// A canonicalized medical term extracted from a caller's utterance.
///
/// Keeps the display casing the classifier returned alongside a lowercase
/// key for advisory lookup. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symptom {
    display_name: String,
    key: String,
}

impl Symptom {
    /// Creates a symptom from a display name.
    ///
    /// Surrounding whitespace is trimmed; blank names are rejected.
    pub fn new(display_name: impl Into<String>) -> Result<Self, ValidationError> {
        let display_name = display_name.into().trim().to_string();
        if display_name.is_empty() {
            return Err(ValidationError::empty_field("symptom"));
        }
        let key = display_name.to_lowercase();
        Ok(Self { display_name, key })
    }

    /// The name as spoken back to the caller.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Lowercase lookup key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}
