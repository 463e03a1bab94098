//! Meal suggestions from an external generator.
//!
//! The generator is optional. Callers treat "unavailable" (`None`) exactly
//! like an empty list, and nothing in the core waits on it.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// Upper bound on suggestions requested per call.
pub const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSuggestion {
  pub name:               String,
  pub description:        String,
  #[serde(default)]
  pub ingredients_needed: Vec<String>,
}

pub trait MealSuggester: Send + Sync {
  /// Ask for up to `count` dinner ideas using `ingredients`.
  ///
  /// Returns `None` when the generator is not configured or the call failed.
  /// Implementations never return an error.
  fn suggest<'a>(
    &'a self,
    ingredients: &'a [String],
    count: usize,
  ) -> impl Future<Output = Option<Vec<MealSuggestion>>> + Send + 'a;
}
