use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use console_entity::{Category, Fields, Record, RecordId};
use tokio::sync::RwLock;
use tracing::{error, trace};

use crate::error::StoreError;
use crate::gateway::DocumentStoreService;
use crate::images::ImageResolver;
use crate::schema;

/// Lifecycle of the active category session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
  Idle,
  Loading,
  Ready,
  Mutating,
  /// A gateway call failed; the mirror holds its last-known-good records and
  /// the caller may retry the triggering action.
  Error,
}

/// Result of a [RecordSynchronizer::load] call.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
  /// The mirror now holds these normalized records.
  Loaded(Vec<Record>),
  /// Another category was selected while the fetch was in flight; the late
  /// response was discarded.
  Superseded,
}

struct SessionState {
  category: Option<Category>,
  mirror: Vec<Record>,
  phase: SyncPhase,
}

/// Keeps an in-memory mirror of the active category's records consistent
/// with the store across loads and mutations.
///
/// The mirror belongs to exactly one category at a time; a load for a new
/// category replaces it wholesale. A request epoch, bumped on every load,
/// guards against a stale fetch overwriting a newer category selection.
pub struct RecordSynchronizer {
  store: Arc<dyn DocumentStoreService>,
  images: Arc<ImageResolver>,
  state: RwLock<SessionState>,
  epoch: AtomicU64,
}

impl RecordSynchronizer {
  pub fn new(store: Arc<dyn DocumentStoreService>, images: Arc<ImageResolver>) -> Self {
    Self {
      store,
      images,
      state: RwLock::new(SessionState {
        category: None,
        mirror: Vec::new(),
        phase: SyncPhase::Idle,
      }),
      epoch: AtomicU64::new(0),
    }
  }

  pub async fn records(&self) -> Vec<Record> {
    self.state.read().await.mirror.clone()
  }

  pub async fn phase(&self) -> SyncPhase {
    self.state.read().await.phase
  }

  pub async fn active_category(&self) -> Option<Category> {
    self.state.read().await.category
  }

  /// Fetch all records of `category`, normalize them through the schema
  /// registry and replace the mirror. Image resolution for records with a
  /// non-empty `image` field is kicked off in the background; the list is
  /// usable before any url resolves.
  pub async fn load(&self, category: Category) -> Result<LoadOutcome, StoreError> {
    let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
    {
      let mut state = self.state.write().await;
      state.category = Some(category);
      state.phase = SyncPhase::Loading;
    }
    trace!("loading {} records", category);

    let raw = match self.store.fetch_all(category).await {
      Ok(raw) => raw,
      Err(err) => {
        if self.epoch.load(Ordering::SeqCst) != epoch {
          trace!("discarding stale {} load failure", category);
          return Ok(LoadOutcome::Superseded);
        }
        error!("failed to load {}: {}", category, err);
        self.state.write().await.phase = SyncPhase::Error;
        return Err(err);
      },
    };

    let records: Vec<Record> = raw
      .into_iter()
      .map(|record| Record::new(record.id, schema::resolve(category, record.fields)))
      .collect();

    {
      let mut state = self.state.write().await;
      if self.epoch.load(Ordering::SeqCst) != epoch {
        trace!("discarding stale {} load", category);
        return Ok(LoadOutcome::Superseded);
      }
      state.mirror = records.clone();
      state.phase = SyncPhase::Ready;
    }

    for record in &records {
      let path = record.fields.str_value("image");
      if !path.is_empty() {
        let images = self.images.clone();
        let path = path.to_string();
        tokio::spawn(async move {
          images.resolve(&path).await;
        });
      }
    }

    Ok(LoadOutcome::Loaded(records))
  }

  /// Persist a form submission. With `editing` set this is a partial update
  /// of the existing record, otherwise a create with the category's default
  /// `type` filled in. For tutors, a record matching on case-insensitive
  /// (name, mail, subject) rejects the submission before any store call.
  pub async fn submit(
    &self,
    category: Category,
    fields: Fields,
    editing: Option<RecordId>,
  ) -> Result<Record, StoreError> {
    let mut fields = schema::resolve(category, fields);

    if category == Category::Tutor {
      let state = self.state.read().await;
      if state.category == Some(category)
        && is_tutor_duplicate(&state.mirror, &fields, editing.as_ref())
      {
        return Err(StoreError::DuplicateDetected);
      }
    }

    self.enter_mutation(category).await;
    match editing {
      Some(id) => match self.store.update(category, &id, fields.clone()).await {
        Ok(()) => {
          let mut state = self.state.write().await;
          if state.category == Some(category) {
            if let Some(entry) = state.mirror.iter_mut().find(|record| record.id == id) {
              for (name, value) in fields.iter() {
                entry.fields.insert(name.clone(), value.clone());
              }
            }
            state.phase = SyncPhase::Ready;
          }
          Ok(Record::new(id, fields))
        },
        Err(err) => {
          self.mark_error(category, &err).await;
          Err(err)
        },
      },
      None => {
        if schema::schema_for(category).canonical.contains(&"type") {
          let record_type = schema::compute_type(category, fields.str_value("type"));
          fields.insert("type".to_string(), record_type.into());
        }
        match self.store.create(category, fields.clone()).await {
          Ok(id) => {
            let record = Record::new(id, fields);
            let mut state = self.state.write().await;
            if state.category == Some(category) {
              state.mirror.push(record.clone());
              state.phase = SyncPhase::Ready;
            }
            Ok(record)
          },
          Err(err) => {
            self.mark_error(category, &err).await;
            Err(err)
          },
        }
      },
    }
  }

  /// Delete a record. A record already absent from the store counts as
  /// success; the mirror entry is dropped either way.
  pub async fn remove(&self, category: Category, id: &RecordId) -> Result<(), StoreError> {
    self.enter_mutation(category).await;
    match self.store.delete(category, id).await {
      Ok(()) => {},
      Err(StoreError::NotFound) => {
        trace!("{} record {} already deleted", category, id);
      },
      Err(err) => {
        self.mark_error(category, &err).await;
        return Err(err);
      },
    }
    let mut state = self.state.write().await;
    if state.category == Some(category) {
      state.mirror.retain(|record| &record.id != id);
      state.phase = SyncPhase::Ready;
    }
    Ok(())
  }

  async fn enter_mutation(&self, category: Category) {
    let mut state = self.state.write().await;
    if state.category == Some(category) {
      state.phase = SyncPhase::Mutating;
    }
  }

  async fn mark_error(&self, category: Category, err: &StoreError) {
    error!("{} mutation failed: {}", category, err);
    let mut state = self.state.write().await;
    if state.category == Some(category) {
      state.phase = SyncPhase::Error;
    }
  }
}

/// The only duplicate-prevention rule in the system: tutors may not repeat a
/// case-insensitive (name, mail, subject) triple. The record being edited is
/// exempt from the comparison.
fn is_tutor_duplicate(mirror: &[Record], fields: &Fields, editing: Option<&RecordId>) -> bool {
  let triple = |fields: &Fields| {
    (
      fields.str_value("name").to_lowercase(),
      fields.str_value("mail").to_lowercase(),
      fields.str_value("subject").to_lowercase(),
    )
  };
  let candidate = triple(fields);
  mirror
    .iter()
    .filter(|record| Some(&record.id) != editing)
    .any(|record| triple(&record.fields) == candidate)
}
