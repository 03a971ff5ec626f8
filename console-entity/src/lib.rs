pub mod category;
pub mod fields;
pub mod participants;
pub mod record;

pub use category::Category;
pub use fields::{FieldValue, Fields};
pub use participants::ApprovedIdSet;
pub use record::{Record, RecordId};
