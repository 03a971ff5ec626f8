use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// The closed set of content categories managed by the console.
///
/// Every category except [Category::EventParticipants] is backed by its own
/// store collection with one document per record. The participant list is a
/// single shared document, see `ApprovedIdSet`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  Events,
  Clubs,
  FineArts,
  Athletics,
  Tutor,
  EventParticipants,
}

impl Category {
  /// Name of the store collection backing this category.
  pub fn collection_name(&self) -> &'static str {
    match self {
      Category::Events => "events",
      Category::Clubs => "clubs",
      Category::FineArts => "fine_arts",
      Category::Athletics => "athletics",
      Category::Tutor => "tutor",
      Category::EventParticipants => "event_participants",
    }
  }
}

impl Display for Category {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.collection_name())
  }
}
