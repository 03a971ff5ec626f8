use std::sync::Arc;

use console_entity::ApprovedIdSet;
use tracing::trace;

use crate::error::StoreError;
use crate::gateway::DocumentStoreService;

/// Outcome of one bulk submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
  /// The singleton document did not exist; it now holds this many ids.
  Created { count: usize },
  /// This many new ids were appended to the existing set.
  Added { count: usize },
  /// Every submitted id was already present. Not an error.
  AlreadyPresent,
}

/// Parse a raw bulk submission: split on newlines and commas, trim, drop
/// empty tokens, parse numeric ids and dedupe keeping the first occurrence.
pub fn parse_bulk_ids(input: &str) -> Result<Vec<i64>, StoreError> {
  let mut ids = Vec::new();
  for token in input.split(|c: char| c == '\n' || c == '\r' || c == ',') {
    let token = token.trim();
    if token.is_empty() {
      continue;
    }
    let id: i64 = token
      .parse()
      .map_err(|_| StoreError::InvalidInput(format!("not a numeric id: {token:?}")))?;
    if !ids.contains(&id) {
      ids.push(id);
    }
  }
  if ids.is_empty() {
    return Err(StoreError::InvalidInput(
      "submission contains no ids".to_string(),
    ));
  }
  Ok(ids)
}

/// Merges bulk id submissions into the approved-ids singleton document,
/// writing back only ids not already present.
///
/// The read-then-write is atomic with respect to a single invocation;
/// concurrent invocations race last-writer-wins on top of the store's
/// merge-append primitive.
pub struct BulkIdReconciler {
  store: Arc<dyn DocumentStoreService>,
  singleton_key: String,
}

impl BulkIdReconciler {
  pub fn new(store: Arc<dyn DocumentStoreService>, singleton_key: impl Into<String>) -> Self {
    Self {
      store,
      singleton_key: singleton_key.into(),
    }
  }

  pub async fn reconcile(&self, input: &str) -> Result<ReconcileOutcome, StoreError> {
    let submitted = parse_bulk_ids(input)?;
    match self.store.get_approved_ids(&self.singleton_key).await? {
      None => {
        let set = ApprovedIdSet::new(submitted);
        self.store.set_approved_ids(&self.singleton_key, &set).await?;
        trace!("created approved id set with {} ids", set.len());
        Ok(ReconcileOutcome::Created { count: set.len() })
      },
      Some(existing) => {
        let new_ids = existing.missing_from(&submitted);
        if new_ids.is_empty() {
          trace!("all {} submitted ids already approved", submitted.len());
          return Ok(ReconcileOutcome::AlreadyPresent);
        }
        self
          .store
          .append_approved_ids(&self.singleton_key, &new_ids)
          .await?;
        trace!("approved {} new ids", new_ids.len());
        Ok(ReconcileOutcome::Added {
          count: new_ids.len(),
        })
      },
    }
  }
}
