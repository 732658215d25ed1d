//! Field-level primitives shared by every form: raw input values, the
//! field -> message error map, and the trait form value types implement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata of a file chosen in a file picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub size: u64,
    pub content_type: Option<String>,
}

/// A raw value coming from an input widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
    File(Option<FileRef>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Checked(checked) => Some(*checked),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Checked(value)
    }
}

/// A struct of form inputs addressable by field name.
pub trait FormValues: Clone + PartialEq + 'static {
    /// Every field of the form, in display order.
    fn field_names(&self) -> Vec<&'static str>;

    /// Current value of a field, `None` for unknown names.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Assign a field. Returns `false` when the name is unknown or the value
    /// kind does not fit the field.
    fn set_field(&mut self, name: &str, value: FieldValue) -> bool;
}

/// Field -> message map. Empty messages are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the message for `field`.
    pub fn set(&mut self, field: impl Into<String>, message: Option<String>) {
        let field = field.into();
        match message {
            Some(message) if !message.trim().is_empty() => {
                self.0.insert(field, message);
            }
            _ => {
                self.0.remove(&field);
            }
        }
    }

    /// Record `message` for `field` only if the field has no error yet, so the
    /// first failing rule wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        if !self.0.contains_key(field) {
            self.set(field, Some(message.into()));
        }
    }

    pub fn with(mut self, field: &str, message: impl Into<String>) -> Self {
        self.set(field, Some(message.into()));
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<(String, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut errors = FieldErrors::new();
        for (field, message) in iter {
            errors.set(field, Some(message));
        }
        errors
    }
}

/// Field -> touched flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Touched(BTreeMap<String, bool>);

impl Touched {
    pub fn set(&mut self, field: impl Into<String>, touched: bool) {
        self.0.insert(field.into(), touched);
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.0.get(field).copied().unwrap_or(false)
    }

    pub fn touch_all<'a>(&mut self, fields: impl IntoIterator<Item = &'a str>) {
        for field in fields {
            self.0.insert(field.to_string(), true);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_messages_are_not_stored() {
        let mut errors = FieldErrors::new();
        errors.set("email", Some("   ".to_string()));
        assert!(errors.is_empty());

        errors.set("email", Some("Email is required".to_string()));
        assert_eq!(errors.get("email"), Some("Email is required"));

        errors.set("email", None);
        assert!(!errors.contains("email"));
    }

    #[test]
    fn add_keeps_first_message() {
        let mut errors = FieldErrors::new();
        errors.add("title", "Title is required");
        errors.add("title", "Title must be at least 5 characters");
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn touch_all_marks_every_field() {
        let mut touched = Touched::default();
        touched.touch_all(["name", "email"]);
        assert!(touched.is_touched("name"));
        assert!(touched.is_touched("email"));
        assert!(!touched.is_touched("phone"));
    }
}
