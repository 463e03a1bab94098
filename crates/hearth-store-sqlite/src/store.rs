//! [`SqliteStore`] — the SQLite implementation of [`SnapshotStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use hearth_core::{Snapshot, store::SnapshotStore};

use crate::{Result, schema::SCHEMA};

/// Key the current snapshot shape is stored under.
///
/// Bump the suffix whenever [`Snapshot`] changes incompatibly; values under
/// older keys are left in place and never read.
pub const SNAPSHOT_KEY: &str = "HEARTH_DATA_V2";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A snapshot slot backed by a single SQLite file.
///
/// Clones share one connection.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open a private in-memory database.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Raw stored text under `key`, without any decoding.
  pub(crate) async fn get_raw(&self, key: &'static str) -> Result<Option<String>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM kv WHERE key = ?1",
              rusqlite::params![key],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw)
  }

  /// Insert or overwrite the text under `key`.
  pub(crate) async fn put_raw(&self, key: &'static str, value: String) -> Result<()> {
    let at_str = Utc::now().to_rfc3339();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
           ON CONFLICT(key) DO UPDATE SET
             value      = excluded.value,
             updated_at = excluded.updated_at",
          rusqlite::params![key, value, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── SnapshotStore impl ──────────────────────────────────────────────────────

impl SnapshotStore for SqliteStore {
  type Error = crate::Error;

  async fn save(&self, snapshot: &Snapshot) -> Result<()> {
    let json = snapshot.to_json()?;
    let bytes = json.len();
    self.put_raw(SNAPSHOT_KEY, json).await?;
    tracing::debug!(key = SNAPSHOT_KEY, bytes, "snapshot saved");
    Ok(())
  }

  async fn load(&self) -> Result<Option<Snapshot>> {
    let Some(raw) = self.get_raw(SNAPSHOT_KEY).await? else {
      return Ok(None);
    };
    Ok(Some(Snapshot::from_json(&raw)?))
  }
}
