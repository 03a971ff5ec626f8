use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{trace, warn};

use crate::error::StoreError;

/// Resolves a stored image path to a time-limited display url.
#[async_trait]
pub trait AssetService: Send + Sync + 'static {
  async fn signed_url(&self, path: &str) -> Result<String, StoreError>;
}

#[derive(Default)]
struct Slot {
  url: Option<String>,
  resolved_at: Option<Instant>,
}

impl Slot {
  fn fresh_url(&self, ttl: Duration) -> Option<String> {
    match (&self.url, self.resolved_at) {
      (Some(url), Some(at)) if at.elapsed() < ttl => Some(url.clone()),
      _ => None,
    }
  }
}

/// Session cache of resolved image urls.
///
/// Concurrent callers for one path serialize on the path's slot, so the
/// asset store sees a single request per path until the url expires.
/// Resolution failures yield `None` for the current call and are not cached;
/// a later call may retry.
pub struct ImageResolver {
  assets: Arc<dyn AssetService>,
  slots: DashMap<String, Arc<Mutex<Slot>>>,
  ttl: Duration,
}

impl ImageResolver {
  pub fn new(assets: Arc<dyn AssetService>, ttl: Duration) -> Self {
    Self {
      assets,
      slots: DashMap::new(),
      ttl,
    }
  }

  pub async fn resolve(&self, path: &str) -> Option<String> {
    let slot = self
      .slots
      .entry(path.to_string())
      .or_insert_with(|| Arc::new(Mutex::new(Slot::default())))
      .clone();
    let mut slot = slot.lock().await;
    if let Some(url) = slot.fresh_url(self.ttl) {
      return Some(url);
    }
    match self.assets.signed_url(path).await {
      Ok(url) => {
        trace!("resolved image {} -> {}", path, url);
        slot.url = Some(url.clone());
        slot.resolved_at = Some(Instant::now());
        Some(url)
      },
      Err(err) => {
        warn!("failed to resolve image {}: {}", path, err);
        None
      },
    }
  }
}
