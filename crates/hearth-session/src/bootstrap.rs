//! Startup: load the stored snapshot, or fall back to seed data.

use hearth_core::{Snapshot, store::SnapshotStore};

/// `Uninitialized → Loading → {Loaded | Seeded}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootState {
  Uninitialized,
  Loading,
  /// A stored snapshot replaced the empty defaults.
  Loaded,
  /// Nothing usable was stored; seed data was installed.
  Seeded,
}

/// Outcome of [`Bootstrapper::run`]. `state` is always terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boot {
  pub state:    BootState,
  pub snapshot: Snapshot,
}

pub struct Bootstrapper<'s, S> {
  store: &'s S,
  state: BootState,
}

impl<'s, S: SnapshotStore> Bootstrapper<'s, S> {
  pub fn new(store: &'s S) -> Self { Self { store, state: BootState::Uninitialized } }

  pub fn state(&self) -> BootState { self.state }

  /// Load once. Storage errors are logged and answered with seed data;
  /// nothing escapes this call.
  pub async fn run(mut self) -> Boot {
    self.state = BootState::Loading;

    let (state, snapshot) = match self.store.load().await {
      Ok(Some(snapshot)) => (BootState::Loaded, snapshot),
      Ok(None) => {
        tracing::info!("no stored household found; seeding sample data");
        (BootState::Seeded, Snapshot::seed())
      }
      Err(e) => {
        tracing::warn!(error = %e, "stored household unreadable; seeding sample data");
        (BootState::Seeded, Snapshot::seed())
      }
    };

    self.state = state;
    tracing::info!(
      ?state,
      meals = snapshot.meals.len(),
      shopping_items = snapshot.shopping_items.len(),
      appointments = snapshot.appointments.len(),
      recipes = snapshot.recipes.len(),
      agreements = snapshot.agreements.len(),
      "household ready"
    );
    Boot { state, snapshot }
  }
}
