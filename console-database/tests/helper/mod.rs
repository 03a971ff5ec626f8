#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use async_trait::async_trait;
use console_database::config::DEFAULT_IMAGE_URL_TTL;
use console_database::error::StoreError;
use console_database::gateway::{DocumentStoreService, InMemoryDocumentStore};
use console_database::images::{AssetService, ImageResolver};
use console_database::sync::RecordSynchronizer;
use console_entity::{ApprovedIdSet, Category, Fields, Record, RecordId};
use dashmap::DashMap;
use tracing_subscriber::fmt::Subscriber;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub fn setup_log() {
  static START: Once = Once::new();
  START.call_once(|| {
    let subscriber = Subscriber::builder()
      .with_env_filter(EnvFilter::from_default_env())
      .with_ansi(true)
      .finish();
    subscriber.try_init().unwrap();
  });
}

/// Store wrapper that counts service calls, can be switched into a failing
/// mode and can delay fetches per category to force request interleavings.
pub struct TestStore {
  inner: InMemoryDocumentStore,
  unavailable: AtomicBool,
  calls: AtomicUsize,
  fetch_delays: DashMap<&'static str, Duration>,
}

impl TestStore {
  pub fn new() -> Arc<Self> {
    Arc::new(Self {
      inner: InMemoryDocumentStore::new(),
      unavailable: AtomicBool::new(false),
      calls: AtomicUsize::new(0),
      fetch_delays: DashMap::new(),
    })
  }

  /// Insert a record directly, without counting a service call.
  pub fn seed(&self, category: Category, fields: Fields) -> RecordId {
    self.inner.seed(category, fields)
  }

  pub fn record_count(&self, category: Category) -> usize {
    self.inner.record_count(category)
  }

  pub fn set_unavailable(&self, unavailable: bool) {
    self.unavailable.store(unavailable, Ordering::SeqCst);
  }

  pub fn delay_fetch(&self, category: Category, delay: Duration) {
    self.fetch_delays.insert(category.collection_name(), delay);
  }

  pub fn service_calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  fn guard(&self) -> Result<(), StoreError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if self.unavailable.load(Ordering::SeqCst) {
      return Err(StoreError::Unavailable(anyhow::anyhow!("store offline")));
    }
    Ok(())
  }
}

#[async_trait]
impl DocumentStoreService for TestStore {
  async fn fetch_all(&self, category: Category) -> Result<Vec<Record>, StoreError> {
    self.guard()?;
    let delay = self
      .fetch_delays
      .get(category.collection_name())
      .map(|delay| *delay);
    if let Some(delay) = delay {
      tokio::time::sleep(delay).await;
    }
    self.inner.fetch_all(category).await
  }

  async fn fetch_one(&self, category: Category, id: &RecordId) -> Result<Record, StoreError> {
    self.guard()?;
    self.inner.fetch_one(category, id).await
  }

  async fn create(&self, category: Category, fields: Fields) -> Result<RecordId, StoreError> {
    self.guard()?;
    self.inner.create(category, fields).await
  }

  async fn update(
    &self,
    category: Category,
    id: &RecordId,
    fields: Fields,
  ) -> Result<(), StoreError> {
    self.guard()?;
    self.inner.update(category, id, fields).await
  }

  async fn delete(&self, category: Category, id: &RecordId) -> Result<(), StoreError> {
    self.guard()?;
    self.inner.delete(category, id).await
  }

  async fn get_approved_ids(&self, key: &str) -> Result<Option<ApprovedIdSet>, StoreError> {
    self.guard()?;
    self.inner.get_approved_ids(key).await
  }

  async fn set_approved_ids(&self, key: &str, set: &ApprovedIdSet) -> Result<(), StoreError> {
    self.guard()?;
    self.inner.set_approved_ids(key, set).await
  }

  async fn append_approved_ids(&self, key: &str, ids: &[i64]) -> Result<(), StoreError> {
    self.guard()?;
    self.inner.append_approved_ids(key, ids).await
  }
}

/// Asset service that counts resolutions per path and embeds the call number
/// in the returned url, so a duplicated resolution shows up as a different
/// url on the second caller.
pub struct CountingAssets {
  delay: Duration,
  fail: AtomicBool,
  calls: DashMap<String, usize>,
}

impl CountingAssets {
  pub fn new(delay: Duration) -> Arc<Self> {
    Arc::new(Self {
      delay,
      fail: AtomicBool::new(false),
      calls: DashMap::new(),
    })
  }

  pub fn set_failing(&self, failing: bool) {
    self.fail.store(failing, Ordering::SeqCst);
  }

  pub fn calls_for(&self, path: &str) -> usize {
    self.calls.get(path).map(|count| *count).unwrap_or(0)
  }
}

#[async_trait]
impl AssetService for CountingAssets {
  async fn signed_url(&self, path: &str) -> Result<String, StoreError> {
    let call = {
      let mut entry = self.calls.entry(path.to_string()).or_insert(0);
      *entry += 1;
      *entry
    };
    if !self.delay.is_zero() {
      tokio::time::sleep(self.delay).await;
    }
    if self.fail.load(Ordering::SeqCst) {
      return Err(StoreError::Unavailable(anyhow::anyhow!(
        "asset store offline"
      )));
    }
    Ok(format!("https://assets.invalid/{path}?token={call}"))
  }
}

pub fn make_synchronizer(
  store: Arc<TestStore>,
  assets: Arc<CountingAssets>,
) -> RecordSynchronizer {
  let images = Arc::new(ImageResolver::new(assets, DEFAULT_IMAGE_URL_TTL));
  RecordSynchronizer::new(store, images)
}

pub fn event_fields(name: &str) -> Fields {
  Fields::new()
    .with_value("name", name)
    .with_value("description", "a school event")
    .with_value("day", "12")
    .with_value("month", "March")
    .with_value("year", "2026")
}

pub fn tutor_fields(name: &str, mail: &str, subject: &str) -> Fields {
  Fields::new()
    .with_value("name", name)
    .with_value("mail", mail)
    .with_value("subject", subject)
    .with_value("description", "peer tutoring")
}
