use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::fields::Fields;

/// Store-assigned document identifier. Immutable once assigned.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl Display for RecordId {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl Deref for RecordId {
  type Target = String;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl From<String> for RecordId {
  fn from(data: String) -> Self {
    Self(data)
  }
}

impl From<&str> for RecordId {
  fn from(data: &str) -> Self {
    Self(data.to_string())
  }
}

impl From<RecordId> for String {
  fn from(data: RecordId) -> Self {
    data.0
  }
}

impl AsRef<str> for RecordId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

/// One persisted item within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
  pub id: RecordId,
  pub fields: Fields,
}

impl Record {
  pub fn new(id: RecordId, fields: Fields) -> Self {
    Self { id, fields }
  }
}
