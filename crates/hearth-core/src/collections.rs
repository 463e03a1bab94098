//! Pure mutations over the five collections.
//!
//! Each function borrows the current collection and returns a new one. None
//! of them touch shared state; the caller publishes the result and schedules
//! persistence. Blank text input is rejected by returning the input
//! unchanged rather than an error.

use crate::model::{
  Agreement, AgreementStatus, Appointment, Category, Day, EntityId, Meal, MealDraft,
  Recipe, ShoppingItem,
};

// ─── Meals ───────────────────────────────────────────────────────────────────

/// Put `meal` on its day, replacing whatever was planned there.
///
/// The result holds exactly one meal for `meal.day` and is sorted by day.
pub fn upsert_meal(current: &[Meal], meal: Meal) -> Vec<Meal> {
  let mut next: Vec<Meal> = current
    .iter()
    .filter(|m| m.day != meal.day)
    .cloned()
    .collect();
  next.push(meal);
  next.sort_by_key(|m| m.day);
  next
}

/// Build a meal from planner input and upsert it.
///
/// Replanning a day keeps the id of the meal already on it.
pub fn plan_meal(current: &[Meal], day: Day, draft: MealDraft) -> Vec<Meal> {
  let id = current
    .iter()
    .find(|m| m.day == day)
    .map(|m| m.id.clone())
    .unwrap_or_else(EntityId::generate);

  let meal = Meal {
    id,
    day,
    title: draft.title.trim().to_owned(),
    kind: draft.kind,
    cook: draft.cook.trim().to_owned(),
    recipe_id: draft.recipe_id,
    ingredients_ready: draft.ingredients_ready,
  };
  upsert_meal(current, meal)
}

// ─── Shopping ────────────────────────────────────────────────────────────────

pub fn add_shopping_item(
  current: &[ShoppingItem],
  name: &str,
  category: Category,
) -> Vec<ShoppingItem> {
  let name = name.trim();
  if name.is_empty() {
    return current.to_vec();
  }
  prepend(current, new_item(name, category, None))
}

pub fn toggle_shopping_item(current: &[ShoppingItem], id: &EntityId) -> Vec<ShoppingItem> {
  current
    .iter()
    .map(|item| {
      if &item.id == id {
        ShoppingItem { checked: !item.checked, ..item.clone() }
      } else {
        item.clone()
      }
    })
    .collect()
}

pub fn clear_shopping_items(_current: &[ShoppingItem]) -> Vec<ShoppingItem> { Vec::new() }

/// Add every non-blank ingredient of `recipe` to the list, linked back to
/// the recipe. Ingredients end up newest-first like any other addition, so
/// the recipe's first ingredient is the last one prepended.
pub fn add_recipe_ingredients(
  current: &[ShoppingItem],
  recipe: &Recipe,
  category: Category,
) -> Vec<ShoppingItem> {
  let mut added: Vec<ShoppingItem> = recipe
    .ingredients
    .iter()
    .map(|i| i.trim())
    .filter(|i| !i.is_empty())
    .map(|i| new_item(i, category, Some(recipe.id.clone())))
    .collect();
  added.reverse();
  added.extend(current.iter().cloned());
  added
}

fn new_item(name: &str, category: Category, recipe_id: Option<EntityId>) -> ShoppingItem {
  ShoppingItem {
    id: EntityId::generate(),
    name: name.to_owned(),
    category,
    checked: false,
    recipe_id,
  }
}

// ─── Calendar & recipes ──────────────────────────────────────────────────────

/// Append; any number of appointments may share a date.
pub fn add_appointment(current: &[Appointment], appt: Appointment) -> Vec<Appointment> {
  append(current, appt)
}

pub fn add_recipe(current: &[Recipe], recipe: Recipe) -> Vec<Recipe> { append(current, recipe) }

/// Split comma-separated form input into trimmed, non-empty ingredients.
pub fn parse_ingredients(text: &str) -> Vec<String> {
  text
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_owned)
    .collect()
}

// ─── Agreements ──────────────────────────────────────────────────────────────

pub fn add_agreement(current: &[Agreement], text: &str) -> Vec<Agreement> {
  let text = text.trim();
  if text.is_empty() {
    return current.to_vec();
  }
  let agreement = Agreement {
    id:     EntityId::generate(),
    text:   text.to_owned(),
    status: AgreementStatus::Pending,
  };
  prepend(current, agreement)
}

pub fn toggle_agreement(current: &[Agreement], id: &EntityId) -> Vec<Agreement> {
  current
    .iter()
    .map(|a| {
      if &a.id == id {
        Agreement { status: a.status.flipped(), ..a.clone() }
      } else {
        a.clone()
      }
    })
    .collect()
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn prepend<T: Clone>(current: &[T], item: T) -> Vec<T> {
  let mut next = Vec::with_capacity(current.len() + 1);
  next.push(item);
  next.extend_from_slice(current);
  next
}

fn append<T: Clone>(current: &[T], item: T) -> Vec<T> {
  let mut next = current.to_vec();
  next.push(item);
  next
}
