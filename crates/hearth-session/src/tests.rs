//! Tests for the scheduler, bootstrapper, and household container.
//!
//! Timing tests run on a paused tokio clock, so every sleep is exact.

use std::{
  sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
  },
  time::Duration,
};

use hearth_core::{
  Snapshot,
  model::{Agreement, AgreementStatus, Category, Day, MealDraft},
  store::SnapshotStore,
  suggestion::{MealSuggester, MealSuggestion},
};
use hearth_store_sqlite::SqliteStore;
use tokio::time::{Instant, sleep};

use crate::{
  BootState, Bootstrapper, Household, StaleGuard, SyncConfig, SyncScheduler,
  suggest::spawn_suggestions,
};

// ─── Test store ──────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
enum TestError {
  #[error("disk full")]
  DiskFull,
  #[error(transparent)]
  Core(#[from] hearth_core::Error),
}

/// In-memory slot that records every successful write and when it landed.
#[derive(Clone, Default)]
struct RecordingStore {
  inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
  stored:        Mutex<Option<String>>,
  writes:        Mutex<Vec<(Instant, Snapshot)>>,
  fail_saves:    AtomicUsize,
  save_delay:    Duration,
  in_flight:     AtomicUsize,
  max_in_flight: AtomicUsize,
}

impl RecordingStore {
  fn with_raw(raw: &str) -> Self {
    let store = Self::default();
    *store.inner.stored.lock().unwrap() = Some(raw.to_owned());
    store
  }

  fn slow(delay: Duration) -> Self {
    Self { inner: Arc::new(Inner { save_delay: delay, ..Inner::default() }) }
  }

  fn failing(times: usize) -> Self {
    let store = Self::default();
    store.inner.fail_saves.store(times, Ordering::SeqCst);
    store
  }

  fn writes(&self) -> Vec<(Instant, Snapshot)> { self.inner.writes.lock().unwrap().clone() }

  fn max_in_flight(&self) -> usize { self.inner.max_in_flight.load(Ordering::SeqCst) }
}

impl SnapshotStore for RecordingStore {
  type Error = TestError;

  async fn save(&self, snapshot: &Snapshot) -> Result<(), TestError> {
    let now = self.inner.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    self.inner.max_in_flight.fetch_max(now, Ordering::SeqCst);
    if !self.inner.save_delay.is_zero() {
      sleep(self.inner.save_delay).await;
    }
    self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);

    let fail = self
      .inner
      .fail_saves
      .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
      .is_ok();
    if fail {
      return Err(TestError::DiskFull);
    }

    let raw = snapshot.to_json()?;
    *self.inner.stored.lock().unwrap() = Some(raw);
    self
      .inner
      .writes
      .lock()
      .unwrap()
      .push((Instant::now(), snapshot.clone()));
    Ok(())
  }

  async fn load(&self) -> Result<Option<Snapshot>, TestError> {
    let raw = self.inner.stored.lock().unwrap().clone();
    Ok(raw.map(|r| Snapshot::from_json(&r)).transpose()?)
  }
}

/// Distinct per `n`, identical across calls with the same `n`.
fn snap(n: usize) -> Snapshot {
  Snapshot {
    agreements: vec![Agreement {
      id:     format!("ag{n}").into(),
      text:   format!("combinado #{n}"),
      status: AgreementStatus::Pending,
    }],
    ..Snapshot::default()
  }
}

fn no_floor(debounce_ms: u64) -> SyncConfig {
  SyncConfig {
    debounce:    Duration::from_millis(debounce_ms),
    min_visible: Duration::ZERO,
  }
}

fn ms(n: u64) -> Duration { Duration::from_millis(n) }

// ─── Scheduler ───────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn burst_coalesces_into_one_write() {
  let store = RecordingStore::default();
  let sched = SyncScheduler::spawn(store.clone(), Snapshot::default(), no_floor(500));
  let start = Instant::now();

  sched.notify(snap(1));
  sleep(ms(100)).await;
  sched.notify(snap(2));
  sleep(ms(100)).await;
  sched.notify(snap(3));
  sleep(ms(2_000)).await;

  let writes = store.writes();
  assert_eq!(writes.len(), 1);
  assert_eq!(writes[0].1, snap(3));
  let at = writes[0].0 - start;
  assert!(at >= ms(700) && at < ms(710), "written at {at:?}");
}

#[tokio::test(start_paused = true)]
async fn separate_quiet_periods_write_separately() {
  let store = RecordingStore::default();
  let sched = SyncScheduler::spawn(store.clone(), Snapshot::default(), no_floor(500));

  sched.notify(snap(1));
  sleep(ms(1_000)).await;
  sched.notify(snap(2));
  sleep(ms(1_000)).await;

  let snaps: Vec<_> = store.writes().into_iter().map(|(_, s)| s).collect();
  assert_eq!(snaps, vec![snap(1), snap(2)]);
}

#[tokio::test(start_paused = true)]
async fn nothing_is_written_without_a_change() {
  let store = RecordingStore::default();
  let _sched = SyncScheduler::spawn(store.clone(), snap(1), no_floor(500));
  sleep(ms(5_000)).await;
  assert!(store.writes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn syncing_signal_stays_up_for_the_floor() {
  let store = RecordingStore::default();
  let config = SyncConfig { debounce: ms(500), min_visible: ms(600) };
  let sched = SyncScheduler::spawn(store.clone(), Snapshot::default(), config);
  let syncing = sched.syncing();

  assert!(!*syncing.borrow());
  sched.notify(snap(1));
  sleep(ms(550)).await;
  assert!(*syncing.borrow(), "raised once the save starts");
  assert_eq!(store.writes().len(), 1);
  sleep(ms(500)).await;
  assert!(sched.is_syncing(), "held until the floor elapses");
  sleep(ms(100)).await;
  assert!(!sched.is_syncing());
}

#[tokio::test(start_paused = true)]
async fn change_during_the_floor_is_not_delayed_by_it() {
  let store = RecordingStore::default();
  let sched = SyncScheduler::spawn(store.clone(), Snapshot::default(), SyncConfig::default());
  let start = Instant::now();

  sched.notify(snap(1));
  sleep(ms(600)).await;
  assert!(sched.is_syncing(), "first save still showing");
  sched.notify(snap(2));
  sleep(ms(550)).await;

  let writes = store.writes();
  assert_eq!(writes.len(), 2);
  assert_eq!(writes[1].1, snap(2));
  let at = writes[1].0 - start;
  assert!(at >= ms(1_100) && at < ms(1_110), "written at {at:?}");
  assert!(sched.is_syncing(), "raised again for the second save");

  sleep(ms(600)).await;
  assert!(!sched.is_syncing());
}

#[tokio::test(start_paused = true)]
async fn failed_save_is_retried_on_next_change() {
  let store = RecordingStore::failing(1);
  let sched = SyncScheduler::spawn(store.clone(), Snapshot::default(), no_floor(500));

  sched.notify(snap(1));
  sleep(ms(1_000)).await;
  assert!(store.writes().is_empty());
  assert!(!sched.is_syncing());

  sched.notify(snap(2));
  sleep(ms(1_000)).await;
  let writes = store.writes();
  assert_eq!(writes.len(), 1);
  assert_eq!(writes[0].1, snap(2));
}

#[tokio::test(start_paused = true)]
async fn saves_never_overlap() {
  let store = RecordingStore::slow(ms(300));
  let sched = SyncScheduler::spawn(store.clone(), Snapshot::default(), no_floor(500));

  sched.notify(snap(1));
  sleep(ms(600)).await; // first save in flight until t=800
  sched.notify(snap(2));
  sleep(ms(100)).await;
  sched.notify(snap(3));
  sleep(ms(3_000)).await;

  assert_eq!(store.max_in_flight(), 1);
  let snaps: Vec<_> = store.writes().into_iter().map(|(_, s)| s).collect();
  assert_eq!(snaps, vec![snap(1), snap(3)]);
}

#[tokio::test(start_paused = true)]
async fn shutdown_flushes_the_pending_snapshot() {
  let store = RecordingStore::default();
  let sched = SyncScheduler::spawn(store.clone(), Snapshot::default(), no_floor(500));
  let start = Instant::now();

  sched.notify(snap(7));
  sched.shutdown().await.unwrap();

  let writes = store.writes();
  assert_eq!(writes.len(), 1);
  assert_eq!(writes[0].1, snap(7));
  assert!(writes[0].0 - start < ms(500));
}

// ─── Bootstrapper ────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_storage_seeds_defaults() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let boot = Bootstrapper::new(&store);
  assert_eq!(boot.state(), BootState::Uninitialized);

  let boot = boot.run().await;
  assert_eq!(boot.state, BootState::Seeded);
  assert_eq!(boot.snapshot, Snapshot::seed());
  assert_eq!(boot.snapshot.recipes.len(), 1);
  assert_eq!(boot.snapshot.agreements[0].status, AgreementStatus::Pending);
  assert!(boot.snapshot.meals.is_empty());
}

#[tokio::test]
async fn stored_snapshot_is_loaded() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  store.save(&snap(4)).await.unwrap();

  let boot = Bootstrapper::new(&store).run().await;
  assert_eq!(boot.state, BootState::Loaded);
  assert_eq!(boot.snapshot, snap(4));
}

#[tokio::test]
async fn corrupt_storage_falls_back_to_seed() {
  for raw in ["{definitely not json", "[]", r#"{"meals":[{"day":12}]}"#] {
    let store = RecordingStore::with_raw(raw);
    let boot = Bootstrapper::new(&store).run().await;
    assert_eq!(boot.state, BootState::Seeded, "{raw}");
    assert_eq!(boot.snapshot, Snapshot::seed());
  }
}

#[tokio::test]
async fn partial_snapshot_fills_missing_collections() {
  let store = RecordingStore::with_raw(
    r#"{"meals":[{"id":"1","day":1,"title":"Espaguete Carbonara","type":"homemade",
       "cook":"João","recipeId":"r1","ingredientsReady":true}]}"#,
  );
  let boot = Bootstrapper::new(&store).run().await;
  assert_eq!(boot.state, BootState::Loaded);
  assert_eq!(boot.snapshot.meals.len(), 1);
  assert!(boot.snapshot.shopping_items.is_empty());
  assert!(boot.snapshot.appointments.is_empty());
  assert!(boot.snapshot.recipes.is_empty());
  assert!(boot.snapshot.agreements.is_empty());
}

// ─── Household ───────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn first_start_persists_the_seed() {
  let store = RecordingStore::default();
  let (_household, state) = Household::start(store.clone(), no_floor(500)).await;
  assert_eq!(state, BootState::Seeded);

  sleep(ms(1_000)).await;
  let writes = store.writes();
  assert_eq!(writes.len(), 1);
  assert_eq!(writes[0].1, Snapshot::seed());
}

#[tokio::test(start_paused = true)]
async fn loaded_start_writes_nothing_until_a_change() {
  let store = RecordingStore::with_raw(&snap(2).to_json().unwrap());
  let (mut household, state) = Household::start(store.clone(), no_floor(500)).await;
  assert_eq!(state, BootState::Loaded);

  sleep(ms(1_000)).await;
  assert!(store.writes().is_empty());

  assert!(household.add_shopping_item("Leite", Category::Mercado));
  sleep(ms(1_000)).await;
  assert_eq!(store.writes().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn mutations_are_visible_at_once_and_persisted_together() {
  let store = RecordingStore::with_raw("{}");
  let (mut household, _) = Household::start(store.clone(), no_floor(500)).await;

  household.add_shopping_item("Arroz", Category::Mercado);
  household.add_agreement("Levar o lixo");
  let draft = MealDraft { title: "Pizza".into(), ..MealDraft::default() };
  household.plan_meal(Day::new(5).unwrap(), draft);
  let item = household.snapshot().shopping_items[0].id.clone();
  household.toggle_shopping_item(&item);

  assert!(household.snapshot().shopping_items[0].checked);
  assert_eq!(household.snapshot().meals.len(), 1);
  assert!(store.writes().is_empty());

  sleep(ms(1_000)).await;
  let writes = store.writes();
  assert_eq!(writes.len(), 1);
  assert_eq!(&writes[0].1, household.snapshot());
}

#[tokio::test(start_paused = true)]
async fn rejected_input_schedules_nothing() {
  let store = RecordingStore::with_raw("{}");
  let (mut household, _) = Household::start(store.clone(), no_floor(500)).await;

  assert!(!household.add_shopping_item("   ", Category::Outros));
  assert!(!household.add_agreement(""));
  assert!(!household.toggle_agreement(&"missing".into()));
  assert!(!household.clear_shopping_items());
  assert!(!household.add_recipe_ingredients(&"missing".into(), Category::Mercado));

  sleep(ms(1_000)).await;
  assert!(store.writes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn recipe_ingredients_land_on_the_list() {
  let store = RecordingStore::default();
  let (mut household, _) = Household::start(store, no_floor(500)).await;

  assert!(household.add_recipe_ingredients(&"r1".into(), Category::Mercado));
  let items = &household.snapshot().shopping_items;
  assert_eq!(items.len(), 3);
  assert!(items.iter().all(|i| i.recipe_id.as_ref().map(|r| r.as_str()) == Some("r1")));
  household.shutdown().await.unwrap();
}

// ─── Suggestions ─────────────────────────────────────────────────────────────

#[test]
fn stale_tickets_are_rejected() {
  let mut guard = StaleGuard::default();
  let first = guard.issue();
  assert!(guard.is_current(first));

  let second = guard.issue();
  assert!(!guard.is_current(first));
  assert!(guard.is_current(second));

  guard.invalidate();
  assert!(!guard.is_current(second));
}

struct Unavailable;

impl MealSuggester for Unavailable {
  async fn suggest(&self, _ingredients: &[String], _count: usize) -> Option<Vec<MealSuggestion>> {
    None
  }
}

#[tokio::test]
async fn unavailable_suggestions_arrive_as_empty() {
  let mut guard = StaleGuard::default();
  let ticket = guard.issue();
  let rx = spawn_suggestions(Arc::new(Unavailable), vec!["ovo".into()], ticket);
  let (back, suggestions) = rx.await.unwrap();
  assert_eq!(back, ticket);
  assert!(suggestions.is_empty());
}
