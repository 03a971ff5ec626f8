use std::time::Duration;

/// Key of the singleton document holding the approved participant ids.
/// The store must only ever be addressed through this constant, never with
/// ad-hoc literals.
pub const APPROVED_IDS_KEY: &str = "approved_ids";

/// Signed asset urls are issued for an hour; refresh slightly earlier.
pub const DEFAULT_IMAGE_URL_TTL: Duration = Duration::from_secs(55 * 60);

/// Tunables for the synchronizer and its collaborators.
#[derive(Debug, Clone)]
pub struct SyncConfig {
  pub approved_ids_key: String,
  pub image_url_ttl: Duration,
}

impl Default for SyncConfig {
  fn default() -> Self {
    Self {
      approved_ids_key: APPROVED_IDS_KEY.to_string(),
      image_url_ttl: DEFAULT_IMAGE_URL_TTL,
    }
  }
}
