#[derive(Debug, thiserror::Error)]
pub enum StorageError {
  #[error("storage is unavailable: {0}")]
  Unavailable(String),

  #[error("quota exceeded writing {key}: {needed} bytes needed, quota is {quota}")]
  QuotaExceeded {
    key: String,
    needed: usize,
    quota: usize,
  },

  #[error("storage io: {0}")]
  Io(#[from] std::io::Error),

  #[error("storage encoding: {0}")]
  Json(#[from] serde_json::Error),
}
