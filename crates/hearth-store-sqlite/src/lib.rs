//! SQLite backend for the Hearth snapshot slot.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{SNAPSHOT_KEY, SqliteStore};

#[cfg(test)]
mod tests;
