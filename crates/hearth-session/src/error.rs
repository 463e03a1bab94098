//! Error type for `hearth-session`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The scheduler worker panicked or was cancelled before it could flush.
  #[error("sync worker failed: {0}")]
  Worker(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
