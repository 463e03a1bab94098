//! Read models derived from a [`Snapshot`]. Computed on demand, never stored.

use strum::IntoEnumIterator;

use crate::{
  model::{
    Agreement, AgreementStatus, Appointment, Category, Day, EntityId, Meal, Recipe,
    ShoppingItem,
  },
  Snapshot,
};

/// Shown in place of a recipe title when a weak link no longer resolves.
pub const MISSING_RECIPE_LABEL: &str = "Receita removida";

// ─── Meals & recipes ─────────────────────────────────────────────────────────

pub fn meal_for_day(meals: &[Meal], day: Day) -> Option<&Meal> {
  meals.iter().find(|m| m.day == day)
}

/// The meal planned for `today`, usually [`Day::today`].
pub fn todays_meal(meals: &[Meal], today: Day) -> Option<&Meal> { meal_for_day(meals, today) }

/// Resolve a weak recipe reference. A dangling id yields `None`.
pub fn recipe_for<'a>(recipes: &'a [Recipe], id: Option<&EntityId>) -> Option<&'a Recipe> {
  let id = id?;
  recipes.iter().find(|r| &r.id == id)
}

/// Title of the linked recipe, if the meal links one.
///
/// Returns `None` when the meal has no link, and [`MISSING_RECIPE_LABEL`]
/// when it links a recipe that no longer exists.
pub fn recipe_label<'a>(recipes: &'a [Recipe], meal: &Meal) -> Option<&'a str> {
  meal.recipe_id.as_ref()?;
  Some(
    recipe_for(recipes, meal.recipe_id.as_ref())
      .map(|r| r.title.as_str())
      .unwrap_or(MISSING_RECIPE_LABEL),
  )
}

// ─── Shopping ────────────────────────────────────────────────────────────────

pub fn pending_items(items: &[ShoppingItem]) -> Vec<&ShoppingItem> {
  items.iter().filter(|i| !i.checked).collect()
}

pub fn completed_items(items: &[ShoppingItem]) -> Vec<&ShoppingItem> {
  items.iter().filter(|i| i.checked).collect()
}

/// Unchecked items grouped by category, in category declaration order.
/// Categories with no pending item are left out. Within a group the list
/// order (newest first) is kept.
pub fn group_by_category(items: &[ShoppingItem]) -> Vec<(Category, Vec<&ShoppingItem>)> {
  Category::iter()
    .map(|cat| {
      let group: Vec<_> = items
        .iter()
        .filter(|i| !i.checked && i.category == cat)
        .collect();
      (cat, group)
    })
    .filter(|(_, group)| !group.is_empty())
    .collect()
}

// ─── Calendar ────────────────────────────────────────────────────────────────

/// Appointments by date, then time. Both are zero-padded strings, so
/// lexicographic order is chronological order.
pub fn sorted_appointments(appts: &[Appointment]) -> Vec<&Appointment> {
  let mut sorted: Vec<_> = appts.iter().collect();
  sorted.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
  sorted
}

pub fn next_appointment(appts: &[Appointment]) -> Option<&Appointment> {
  sorted_appointments(appts).into_iter().next()
}

// ─── Agreements ──────────────────────────────────────────────────────────────

pub fn pending_agreements(agreements: &[Agreement]) -> Vec<&Agreement> {
  agreements
    .iter()
    .filter(|a| a.status == AgreementStatus::Pending)
    .collect()
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// Everything the home screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard<'a> {
  pub today:              Day,
  pub todays_meal:        Option<&'a Meal>,
  /// Title of the recipe linked from today's meal, or the fallback label.
  pub todays_recipe:      Option<&'a str>,
  pub next_appointment:   Option<&'a Appointment>,
  pub pending_agreements: usize,
  pub pending_items:      usize,
}

impl<'a> Dashboard<'a> {
  pub fn build(snapshot: &'a Snapshot, today: Day) -> Self {
    let meal = todays_meal(&snapshot.meals, today);
    Self {
      today,
      todays_meal: meal,
      todays_recipe: meal.and_then(|m| recipe_label(&snapshot.recipes, m)),
      next_appointment: next_appointment(&snapshot.appointments),
      pending_agreements: pending_agreements(&snapshot.agreements).len(),
      pending_items: pending_items(&snapshot.shopping_items).len(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    collections::{add_shopping_item, toggle_shopping_item, upsert_meal},
    model::{AppointmentType, MealType},
  };

  fn appt(id: &str, date: &str, time: &str) -> Appointment {
    Appointment {
      id:       id.into(),
      date:     date.into(),
      time:     time.into(),
      title:    id.into(),
      kind:     AppointmentType::Casa,
      location: None,
    }
  }

  fn meal_on(day: u8, recipe: Option<&str>) -> Meal {
    Meal {
      id:                "m".into(),
      day:               Day::new(day).unwrap(),
      title:             "Carbonara".into(),
      kind:              MealType::Homemade,
      cook:              "João".into(),
      recipe_id:         recipe.map(EntityId::from),
      ingredients_ready: true,
    }
  }

  #[test]
  fn appointments_sort_by_date_then_time() {
    let list = vec![
      appt("c", "2025-06-01", "09:00"),
      appt("b", "2025-05-20", "18:30"),
      appt("a", "2025-05-20", "08:00"),
    ];
    let ids: Vec<_> = sorted_appointments(&list).iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert_eq!(next_appointment(&list).unwrap().id.as_str(), "a");
    assert!(next_appointment(&[]).is_none());
  }

  #[test]
  fn grouping_follows_category_order_and_skips_checked() {
    let items = add_shopping_item(&[], "Remédio", Category::Farmacia);
    let items = add_shopping_item(&items, "Alface", Category::Feira);
    let items = add_shopping_item(&items, "Arroz", Category::Mercado);
    let items = add_shopping_item(&items, "Picanha", Category::Acougue);
    let bought = items[0].id.clone();
    let items = toggle_shopping_item(&items, &bought);

    let groups = group_by_category(&items);
    let cats: Vec<_> = groups.iter().map(|(c, _)| *c).collect();
    assert_eq!(cats, [Category::Mercado, Category::Feira, Category::Farmacia]);
    assert_eq!(completed_items(&items).len(), 1);
    assert_eq!(pending_items(&items).len(), 3);
  }

  #[test]
  fn dangling_recipe_link_falls_back_to_label() {
    let recipes = Snapshot::seed().recipes;
    assert_eq!(recipe_label(&recipes, &meal_on(1, Some("r1"))), Some("Carbonara do Insta"));
    assert_eq!(
      recipe_label(&recipes, &meal_on(1, Some("gone"))),
      Some(MISSING_RECIPE_LABEL)
    );
    assert_eq!(recipe_label(&recipes, &meal_on(1, None)), None);
  }

  #[test]
  fn dashboard_summarises_today() {
    let mut snap = Snapshot::seed();
    snap.meals = upsert_meal(&snap.meals, meal_on(3, Some("r1")));
    snap.appointments = vec![appt("x", "2025-05-20", "14:00")];

    let wed = Dashboard::build(&snap, Day::new(3).unwrap());
    assert_eq!(wed.todays_meal.map(|m| m.title.as_str()), Some("Carbonara"));
    assert_eq!(wed.todays_recipe, Some("Carbonara do Insta"));
    assert_eq!(wed.pending_agreements, 1);
    assert_eq!(wed.pending_items, 0);
    assert_eq!(wed.next_appointment.map(|a| a.id.as_str()), Some("x"));

    let thu = Dashboard::build(&snap, Day::new(4).unwrap());
    assert!(thu.todays_meal.is_none());
    assert!(thu.todays_recipe.is_none());
  }
}
