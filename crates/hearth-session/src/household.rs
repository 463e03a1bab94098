//! [`Household`] — the single owner of live state.
//!
//! Every mutation applies one of the pure functions from
//! [`hearth_core::collections`], swaps the result in, and hands a copy of
//! the full snapshot to the [`SyncScheduler`]. Reads see the change
//! immediately; storage catches up within one debounce window.

use hearth_core::{
  Snapshot,
  collections,
  model::{Appointment, Category, Day, EntityId, Meal, MealDraft, Recipe},
  store::SnapshotStore,
};
use tokio::sync::watch;

use crate::{Boot, BootState, Bootstrapper, Result, SyncConfig, SyncScheduler};

pub struct Household {
  snapshot: Snapshot,
  sync:     SyncScheduler,
}

impl Household {
  pub fn new(snapshot: Snapshot, sync: SyncScheduler) -> Self { Self { snapshot, sync } }

  /// Bootstrap from `store`, then hand the store to a new scheduler.
  ///
  /// Seed data counts as a change and is written after the first debounce
  /// window, so the next start loads it instead of seeding again.
  pub async fn start<S>(store: S, config: SyncConfig) -> (Self, BootState)
  where
    S: SnapshotStore + 'static,
  {
    let Boot { state, snapshot } = Bootstrapper::new(&store).run().await;

    let stored = match state {
      BootState::Loaded => snapshot.clone(),
      _ => Snapshot::default(),
    };
    let sync = SyncScheduler::spawn(store, stored, config);
    if state == BootState::Seeded {
      sync.notify(snapshot.clone());
    }
    (Self::new(snapshot, sync), state)
  }

  pub fn snapshot(&self) -> &Snapshot { &self.snapshot }

  pub fn syncing(&self) -> watch::Receiver<bool> { self.sync.syncing() }

  pub fn is_syncing(&self) -> bool { self.sync.is_syncing() }

  // ── Meals ─────────────────────────────────────────────────────────────────

  pub fn upsert_meal(&mut self, meal: Meal) -> bool {
    self.apply(|s| &mut s.meals, |m| collections::upsert_meal(m, meal))
  }

  pub fn plan_meal(&mut self, day: Day, draft: MealDraft) -> bool {
    self.apply(|s| &mut s.meals, |m| collections::plan_meal(m, day, draft))
  }

  // ── Shopping ──────────────────────────────────────────────────────────────

  /// Returns `false` when the name was blank and nothing changed.
  pub fn add_shopping_item(&mut self, name: &str, category: Category) -> bool {
    self.apply(
      |s| &mut s.shopping_items,
      |items| collections::add_shopping_item(items, name, category),
    )
  }

  pub fn toggle_shopping_item(&mut self, id: &EntityId) -> bool {
    self.apply(
      |s| &mut s.shopping_items,
      |items| collections::toggle_shopping_item(items, id),
    )
  }

  pub fn clear_shopping_items(&mut self) -> bool {
    self.apply(|s| &mut s.shopping_items, collections::clear_shopping_items)
  }

  /// Put a saved recipe's ingredients on the list. An unknown recipe id is
  /// a no-op.
  pub fn add_recipe_ingredients(&mut self, recipe_id: &EntityId, category: Category) -> bool {
    let Some(recipe) = self
      .snapshot
      .recipes
      .iter()
      .find(|r| &r.id == recipe_id)
      .cloned()
    else {
      return false;
    };
    self.apply(
      |s| &mut s.shopping_items,
      |items| collections::add_recipe_ingredients(items, &recipe, category),
    )
  }

  // ── Calendar & recipes ────────────────────────────────────────────────────

  pub fn add_appointment(&mut self, appt: Appointment) -> bool {
    self.apply(|s| &mut s.appointments, |a| collections::add_appointment(a, appt))
  }

  pub fn add_recipe(&mut self, recipe: Recipe) -> bool {
    self.apply(|s| &mut s.recipes, |r| collections::add_recipe(r, recipe))
  }

  // ── Agreements ────────────────────────────────────────────────────────────

  pub fn add_agreement(&mut self, text: &str) -> bool {
    self.apply(|s| &mut s.agreements, |a| collections::add_agreement(a, text))
  }

  pub fn toggle_agreement(&mut self, id: &EntityId) -> bool {
    self.apply(|s| &mut s.agreements, |a| collections::toggle_agreement(a, id))
  }

  // ── Lifecycle ─────────────────────────────────────────────────────────────

  /// Flush anything still waiting to be written and stop the scheduler.
  pub async fn shutdown(self) -> Result<()> { self.sync.shutdown().await }

  /// Replace one collection with `f(current)`. Publishes only when the
  /// collection actually changed; rejected input leaves storage alone.
  fn apply<T, F>(&mut self, select: fn(&mut Snapshot) -> &mut Vec<T>, f: F) -> bool
  where
    T: PartialEq,
    F: FnOnce(&[T]) -> Vec<T>,
  {
    let slot = select(&mut self.snapshot);
    let next = f(slot);
    if next == *slot {
      return false;
    }
    *slot = next;
    self.sync.notify(self.snapshot.clone());
    true
  }
}
