//! The `SnapshotStore` trait: the durable slot a household is saved to.
//!
//! Implemented by storage backends (e.g. `hearth-store-sqlite`). The session
//! layer depends on this trait, not on any concrete backend.

use std::future::Future;

use crate::Snapshot;

/// A durable slot holding at most one [`Snapshot`].
///
/// Implementations own the key/version namespace: a snapshot written under
/// one shape version must never be read back as another. Concurrent writers
/// are not reconciled; the last write wins.
pub trait SnapshotStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Replace the stored snapshot.
  ///
  /// Fails when the backend rejects the write or the snapshot cannot be
  /// serialised.
  fn save<'a>(
    &'a self,
    snapshot: &'a Snapshot,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Read the stored snapshot. `Ok(None)` means nothing has been saved yet.
  ///
  /// Fails when stored content exists but does not have the snapshot shape.
  fn load(&self) -> impl Future<Output = Result<Option<Snapshot>, Self::Error>> + Send + '_;
}
