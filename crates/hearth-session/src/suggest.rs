//! Fire-and-forget meal suggestion requests.
//!
//! A request runs on its own task and never blocks mutations. Its result
//! carries the [`Ticket`] it was issued with; once the user has moved on,
//! the ticket is stale and the result is dropped unapplied.

use std::sync::Arc;

use hearth_core::suggestion::{MAX_SUGGESTIONS, MealSuggester, MealSuggestion};
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Tracks which outstanding request, if any, may still be applied.
#[derive(Debug, Default)]
pub struct StaleGuard {
  generation: u64,
}

impl StaleGuard {
  /// Start a new request. Any earlier ticket becomes stale.
  pub fn issue(&mut self) -> Ticket {
    self.generation += 1;
    Ticket(self.generation)
  }

  /// Abandon every outstanding request, e.g. on navigation.
  pub fn invalidate(&mut self) { self.generation += 1; }

  pub fn is_current(&self, ticket: Ticket) -> bool { ticket.0 == self.generation }
}

/// Spawn a suggestion request. "Unavailable" arrives as an empty list.
pub fn spawn_suggestions<M>(
  suggester: Arc<M>,
  ingredients: Vec<String>,
  ticket: Ticket,
) -> oneshot::Receiver<(Ticket, Vec<MealSuggestion>)>
where
  M: MealSuggester + 'static,
{
  let (tx, rx) = oneshot::channel();
  tokio::spawn(async move {
    let suggestions = suggester
      .suggest(&ingredients, MAX_SUGGESTIONS)
      .await
      .unwrap_or_default();
    // The receiver is gone if the UI already dropped the request.
    let _ = tx.send((ticket, suggestions));
  });
  rx
}
