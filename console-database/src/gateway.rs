use async_trait::async_trait;
use console_entity::{ApprovedIdSet, Category, Fields, Record, RecordId};
use dashmap::DashMap;
use nanoid::nanoid;

use crate::error::StoreError;

/// Typed access to the remote document store: one collection per category,
/// plus one singleton document for the approved participant ids.
///
/// Implementations perform no retries; every failure propagates to the
/// caller as a [StoreError].
#[async_trait]
pub trait DocumentStoreService: Send + Sync + 'static {
  /// All records of a category, in collection order. An empty collection is
  /// not an error.
  async fn fetch_all(&self, category: Category) -> Result<Vec<Record>, StoreError>;

  async fn fetch_one(&self, category: Category, id: &RecordId) -> Result<Record, StoreError>;

  /// The store assigns and returns the identifier.
  async fn create(&self, category: Category, fields: Fields) -> Result<RecordId, StoreError>;

  /// Partial-field update: fields absent from `fields` keep their stored
  /// value.
  async fn update(
    &self,
    category: Category,
    id: &RecordId,
    fields: Fields,
  ) -> Result<(), StoreError>;

  async fn delete(&self, category: Category, id: &RecordId) -> Result<(), StoreError>;

  async fn get_approved_ids(&self, key: &str) -> Result<Option<ApprovedIdSet>, StoreError>;

  async fn set_approved_ids(&self, key: &str, set: &ApprovedIdSet) -> Result<(), StoreError>;

  /// Merge-append: ids already present in the stored set are kept once.
  async fn append_approved_ids(&self, key: &str, ids: &[i64]) -> Result<(), StoreError>;
}

/// In-process store used by tests and local tooling. Collections preserve
/// insertion order; identifiers are nanoids like the hosted store's.
#[derive(Default)]
pub struct InMemoryDocumentStore {
  collections: DashMap<&'static str, Vec<Record>>,
  singletons: DashMap<String, ApprovedIdSet>,
}

impl InMemoryDocumentStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert a record directly, bypassing the service contract. Returns the
  /// assigned identifier.
  pub fn seed(&self, category: Category, fields: Fields) -> RecordId {
    let id = RecordId::from(nanoid!());
    self
      .collections
      .entry(category.collection_name())
      .or_default()
      .push(Record::new(id.clone(), fields));
    id
  }

  pub fn record_count(&self, category: Category) -> usize {
    self
      .collections
      .get(category.collection_name())
      .map(|records| records.len())
      .unwrap_or(0)
  }
}

#[async_trait]
impl DocumentStoreService for InMemoryDocumentStore {
  async fn fetch_all(&self, category: Category) -> Result<Vec<Record>, StoreError> {
    Ok(
      self
        .collections
        .get(category.collection_name())
        .map(|records| records.clone())
        .unwrap_or_default(),
    )
  }

  async fn fetch_one(&self, category: Category, id: &RecordId) -> Result<Record, StoreError> {
    self
      .collections
      .get(category.collection_name())
      .and_then(|records| records.iter().find(|record| &record.id == id).cloned())
      .ok_or(StoreError::NotFound)
  }

  async fn create(&self, category: Category, fields: Fields) -> Result<RecordId, StoreError> {
    Ok(self.seed(category, fields))
  }

  async fn update(
    &self,
    category: Category,
    id: &RecordId,
    fields: Fields,
  ) -> Result<(), StoreError> {
    let mut records = self
      .collections
      .get_mut(category.collection_name())
      .ok_or(StoreError::NotFound)?;
    let record = records
      .iter_mut()
      .find(|record| &record.id == id)
      .ok_or(StoreError::NotFound)?;
    for (name, value) in fields.into_inner() {
      record.fields.insert(name, value);
    }
    Ok(())
  }

  async fn delete(&self, category: Category, id: &RecordId) -> Result<(), StoreError> {
    let mut records = self
      .collections
      .get_mut(category.collection_name())
      .ok_or(StoreError::NotFound)?;
    let before = records.len();
    records.retain(|record| &record.id != id);
    if records.len() == before {
      return Err(StoreError::NotFound);
    }
    Ok(())
  }

  async fn get_approved_ids(&self, key: &str) -> Result<Option<ApprovedIdSet>, StoreError> {
    Ok(self.singletons.get(key).map(|set| set.clone()))
  }

  async fn set_approved_ids(&self, key: &str, set: &ApprovedIdSet) -> Result<(), StoreError> {
    self.singletons.insert(key.to_string(), set.clone());
    Ok(())
  }

  async fn append_approved_ids(&self, key: &str, ids: &[i64]) -> Result<(), StoreError> {
    self
      .singletons
      .entry(key.to_string())
      .or_default()
      .append(ids);
    Ok(())
  }
}
