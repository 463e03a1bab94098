//! Error types for `hearth-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("day out of range (expected 0..=6): {0}")]
  InvalidDay(u8),

  #[error("unexpected snapshot shape: {0}")]
  Shape(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
