use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

/// A scalar value as stored in a document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
  Text(String),
  Number(i64),
}

impl FieldValue {
  pub fn as_str(&self) -> Option<&str> {
    match self {
      FieldValue::Text(value) => Some(value),
      FieldValue::Number(_) => None,
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

impl From<i64> for FieldValue {
  fn from(value: i64) -> Self {
    FieldValue::Number(value)
  }
}

/// Field name to scalar value map of a single record.
///
/// No field is required to exist; absent fields read as empty through
/// [Fields::str_value].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fields(HashMap<String, FieldValue>);

impl Fields {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn into_inner(self) -> HashMap<String, FieldValue> {
    self.0
  }

  /// String content of a field; empty if the field is absent or numeric.
  pub fn str_value(&self, name: &str) -> &str {
    self.0.get(name).and_then(FieldValue::as_str).unwrap_or("")
  }

  pub fn with_value(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
    self.0.insert(name.to_string(), value.into());
    self
  }
}

impl Deref for Fields {
  type Target = HashMap<String, FieldValue>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for Fields {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl FromIterator<(String, FieldValue)> for Fields {
  fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
    Self(iter.into_iter().collect())
  }
}
