#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  /// Transport or auth failure talking to the remote store. The caller's
  /// mirror is left unchanged.
  #[error("The remote store is unavailable: {0}")]
  Unavailable(#[from] anyhow::Error),

  /// The target record or document does not exist. Treated as success for
  /// delete, as failure for update.
  #[error("The target record does not exist")]
  NotFound,

  #[error("Invalid input: {0}")]
  InvalidInput(String),

  /// A tutor record with the same name, mail and subject already exists.
  #[error("A matching tutor record already exists")]
  DuplicateDetected,
}
