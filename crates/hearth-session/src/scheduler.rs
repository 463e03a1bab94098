//! [`SyncScheduler`] — coalesces bursts of changes into single writes.
//!
//! One worker task owns the store. Changes arrive through a single-slot
//! `watch` channel, so only the latest snapshot is ever kept. The worker
//! restarts its debounce timer on every change and saves when the timer
//! elapses undisturbed. Saves run inside the worker, so at most one is in
//! flight at any time.

use std::time::Duration;

use hearth_core::{Snapshot, store::SnapshotStore};
use tokio::{
  sync::watch,
  task::JoinHandle,
  time::{Instant, sleep_until},
};

use crate::Result;

// ─── Configuration ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
  /// Quiet period after the last change before a write is attempted.
  pub debounce:    Duration,
  /// Minimum time the syncing signal stays raised once a save starts.
  /// `Duration::ZERO` disables the floor.
  pub min_visible: Duration,
}

impl Default for SyncConfig {
  fn default() -> Self {
    Self {
      debounce:    Duration::from_millis(500),
      min_visible: Duration::from_millis(600),
    }
  }
}

// ─── Scheduler ───────────────────────────────────────────────────────────────

pub struct SyncScheduler {
  latest:  watch::Sender<Snapshot>,
  syncing: watch::Receiver<bool>,
  worker:  JoinHandle<()>,
}

impl SyncScheduler {
  /// Spawn the worker on the current tokio runtime.
  ///
  /// `initial` is the state the store already reflects; it is not written
  /// until something calls [`notify`](Self::notify).
  pub fn spawn<S>(store: S, initial: Snapshot, config: SyncConfig) -> Self
  where
    S: SnapshotStore + 'static,
  {
    let (latest, changes) = watch::channel(initial);
    let (syncing_tx, syncing) = watch::channel(false);
    let worker = tokio::spawn(run(store, changes, syncing_tx, config));
    Self { latest, syncing, worker }
  }

  /// Record a new state and (re)start the debounce timer. Never waits.
  pub fn notify(&self, snapshot: Snapshot) { self.latest.send_replace(snapshot); }

  /// `true` while a save is in flight (plus the visibility floor).
  pub fn syncing(&self) -> watch::Receiver<bool> { self.syncing.clone() }

  pub fn is_syncing(&self) -> bool { *self.syncing.borrow() }

  /// Stop accepting changes, write any snapshot still waiting out its
  /// debounce window, and wait for the worker to finish.
  pub async fn shutdown(self) -> Result<()> {
    let Self { latest, worker, .. } = self;
    drop(latest);
    worker.await?;
    Ok(())
  }
}

// ─── Worker ──────────────────────────────────────────────────────────────────

async fn run<S: SnapshotStore>(
  store: S,
  mut changes: watch::Receiver<Snapshot>,
  syncing: watch::Sender<bool>,
  config: SyncConfig,
) {
  let mut indicator = Indicator { tx: syncing, lower_at: None, min_visible: config.min_visible };

  // Each iteration handles one burst: wait for its first change, let it
  // settle, then write the last value. The indicator floor runs alongside
  // and never delays the next burst.
  loop {
    if next_change(&mut changes, &mut indicator).await {
      break;
    }
    let closed = settle(&mut changes, config.debounce, &mut indicator).await;
    let snapshot = changes.borrow_and_update().clone();
    save(&store, &snapshot, &mut indicator).await;
    if closed {
      break;
    }
  }
  indicator.lower();
  tracing::debug!("sync worker stopped");
}

/// Wait for a change. Returns `true` once the sending side is gone and
/// nothing is left unseen.
async fn next_change(changes: &mut watch::Receiver<Snapshot>, indicator: &mut Indicator) -> bool {
  loop {
    tokio::select! {
      changed = changes.changed() => return changed.is_err(),
      () = floor_elapsed(indicator.lower_at) => indicator.lower(),
    }
  }
}

/// Wait until `window` passes with no new change. Returns `true` if the
/// sending side closed while waiting; the pending value must then be
/// flushed right away.
async fn settle(
  changes: &mut watch::Receiver<Snapshot>,
  window: Duration,
  indicator: &mut Indicator,
) -> bool {
  let mut deadline = Instant::now() + window;
  loop {
    tokio::select! {
      changed = changes.changed() => {
        if changed.is_err() {
          return true;
        }
        deadline = Instant::now() + window;
      }
      () = sleep_until(deadline) => return false,
      () = floor_elapsed(indicator.lower_at) => indicator.lower(),
    }
  }
}

async fn save<S: SnapshotStore>(store: &S, snapshot: &Snapshot, indicator: &mut Indicator) {
  indicator.raise();
  let started = Instant::now();

  match store.save(snapshot).await {
    Ok(()) => tracing::debug!("household snapshot persisted"),
    // In-memory state stays authoritative; the next change retries.
    Err(e) => tracing::warn!(error = %e, "failed to persist household snapshot"),
  }

  indicator.finished(started);
}

// ─── Syncing indicator ───────────────────────────────────────────────────────

/// The syncing flag plus the instant it may be lowered.
struct Indicator {
  tx:          watch::Sender<bool>,
  lower_at:    Option<Instant>,
  min_visible: Duration,
}

impl Indicator {
  fn raise(&mut self) {
    self.lower_at = None;
    self.tx.send_replace(true);
  }

  fn finished(&mut self, started: Instant) {
    let at = started + self.min_visible;
    if Instant::now() >= at {
      self.lower();
    } else {
      self.lower_at = Some(at);
    }
  }

  fn lower(&mut self) {
    self.lower_at = None;
    self.tx.send_replace(false);
  }
}

/// Resolves at `at`, or never when there is nothing to lower.
async fn floor_elapsed(at: Option<Instant>) {
  match at {
    Some(at) => sleep_until(at).await,
    None => std::future::pending().await,
  }
}
