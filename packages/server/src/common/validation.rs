//! Request-shape validation.
//!
//! Every request body implements [`Validate`]. Problems are collected per
//! field so a caller sees all of them at once, and they are reported before
//! the store is touched.

use serde::Serialize;
use std::collections::BTreeMap;

/// Field name -> list of problems with that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single problem on a single field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Shape validation for request bodies.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Strings that must contain at least one character (titles, labels, port types).
pub fn non_empty(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.is_empty() {
        errors.add(field, "String must contain at least 1 character(s)");
    }
}

/// Port channel numbers start at 1.
pub fn positive(errors: &mut FieldErrors, field: &str, value: i32) {
    if value < 1 {
        errors.add(field, "Number must be greater than or equal to 1");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_are_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_errors_accumulate_per_field() {
        let mut errors = FieldErrors::new();
        non_empty(&mut errors, "title", "");
        positive(&mut errors, "channel", 0);
        positive(&mut errors, "channel", -3);

        assert_eq!(errors.get("title").map(<[String]>::len), Some(1));
        assert_eq!(errors.get("channel").map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_serializes_as_field_map() {
        let errors = FieldErrors::single("label", "Required");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "label": ["Required"] }));
    }

    #[test]
    fn test_positive_accepts_one() {
        let mut errors = FieldErrors::new();
        positive(&mut errors, "channel", 1);
        assert!(errors.is_empty());
    }
}
