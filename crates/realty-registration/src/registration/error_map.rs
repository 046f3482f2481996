use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::domain::FormField;

/// Category of a field failure, stable across message wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Required,
    TooShort,
    TooLong,
    InvalidFormat,
    InvalidChecksum,
    Mismatch,
    TermsNotAccepted,
    /// Failure reported by the account service rather than local validation.
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub code: ErrorCode,
    pub message: String,
}

impl FieldError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Field key to one human-readable message. A later write for the same key
/// replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: BTreeMap<FormField, FieldError>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, code: ErrorCode, message: impl Into<String>) {
        self.entries.insert(field, FieldError::new(code, message));
    }

    pub fn remove(&mut self, field: FormField) -> Option<FieldError> {
        self.entries.remove(&field)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, field: FormField) -> Option<&FieldError> {
        self.entries.get(&field)
    }

    pub fn message(&self, field: FormField) -> Option<&str> {
        self.get(field).map(|error| error.message.as_str())
    }

    pub fn code(&self, field: FormField) -> Option<ErrorCode> {
        self.get(field).map(|error| error.code)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &FieldError)> {
        self.entries.iter().map(|(field, error)| (*field, error))
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in &self.entries {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field.key(), error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, error) in &self.entries {
            map.serialize_entry(field.key(), &error.message)?;
        }
        map.end()
    }
}
