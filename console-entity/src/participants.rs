use serde::{Deserialize, Serialize};

/// The singleton document holding every approved participant id.
///
/// One shared document backs the whole `event_participants` category, unlike
/// the other categories where each record is its own document. Ids are unique
/// within the set; insertion order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApprovedIdSet {
  pub ids: Vec<i64>,
}

impl ApprovedIdSet {
  pub fn new(ids: Vec<i64>) -> Self {
    let mut set = Self::default();
    set.append(&ids);
    set
  }

  pub fn contains(&self, id: i64) -> bool {
    self.ids.contains(&id)
  }

  /// Submitted ids not yet in the set, in submission order.
  pub fn missing_from(&self, submitted: &[i64]) -> Vec<i64> {
    submitted
      .iter()
      .copied()
      .filter(|id| !self.contains(*id))
      .collect()
  }

  /// Append ids, keeping existing entries unique.
  pub fn append(&mut self, ids: &[i64]) {
    for id in ids {
      if !self.contains(*id) {
        self.ids.push(*id);
      }
    }
  }

  pub fn len(&self) -> usize {
    self.ids.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ids.is_empty()
  }
}
