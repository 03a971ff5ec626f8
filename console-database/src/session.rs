use std::sync::Arc;

use crate::config::SyncConfig;
use crate::gateway::DocumentStoreService;
use crate::images::{AssetService, ImageResolver};
use crate::reconcile::BulkIdReconciler;
use crate::sync::RecordSynchronizer;

/// Everything the console surface needs for one admin session, wired from a
/// single [SyncConfig]: the synchronizer with its image resolver, and the
/// bulk-id reconciler bound to the configured singleton key.
pub struct ConsoleSession {
  synchronizer: RecordSynchronizer,
  reconciler: BulkIdReconciler,
  images: Arc<ImageResolver>,
}

impl ConsoleSession {
  pub fn new(
    store: Arc<dyn DocumentStoreService>,
    assets: Arc<dyn AssetService>,
    config: SyncConfig,
  ) -> Self {
    let images = Arc::new(ImageResolver::new(assets, config.image_url_ttl));
    Self {
      synchronizer: RecordSynchronizer::new(store.clone(), images.clone()),
      reconciler: BulkIdReconciler::new(store, config.approved_ids_key),
      images,
    }
  }

  pub fn synchronizer(&self) -> &RecordSynchronizer {
    &self.synchronizer
  }

  pub fn reconciler(&self) -> &BulkIdReconciler {
    &self.reconciler
  }

  /// The resolver shared with the synchronizer, for display-time lookups.
  pub fn images(&self) -> &Arc<ImageResolver> {
    &self.images
  }
}
