//! Failures inside a suggestion request. Never surfaced to callers of
//! [`hearth_core::suggestion::MealSuggester`]; they are logged and mapped to
//! "unavailable".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("unexpected status: {0}")]
  Status(reqwest::StatusCode),

  #[error("response carried no candidate text")]
  EmptyResponse,

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
