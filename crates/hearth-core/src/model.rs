//! Entity types: the five record shapes held by a household.
//!
//! Records are plain data. Invariants that span a whole collection (one meal
//! per day, newest-first shopping order) are enforced by
//! [`crate::collections`], not here.

use std::fmt;

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::Error;

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque record identifier.
///
/// Freshly generated ids are hyphenated UUID v4 strings. Ids read back from
/// storage are kept verbatim; older snapshots used short ids such as `"r1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
  pub fn generate() -> Self { Self(Uuid::new_v4().hyphenated().to_string()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl From<&str> for EntityId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for EntityId {
  fn from(s: String) -> Self { Self(s) }
}

impl fmt::Display for EntityId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

// ─── Day ─────────────────────────────────────────────────────────────────────

/// Day of the week, `0` = Sunday through `6` = Saturday.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(u8);

impl Day {
  pub const SUNDAY: Day = Day(0);
  pub const SATURDAY: Day = Day(6);

  /// Portuguese day names, indexed by [`Day::index`].
  pub const NAMES: [&'static str; 7] =
    ["Domingo", "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado"];

  /// Returns `None` for anything outside `0..=6`.
  pub fn new(n: u8) -> Option<Self> { (n <= 6).then_some(Self(n)) }

  pub fn index(self) -> u8 { self.0 }

  pub fn name(self) -> &'static str { Self::NAMES[self.0 as usize] }

  /// All seven days, Sunday first.
  pub fn all() -> impl Iterator<Item = Day> { (0..=6).map(Day) }

  pub fn from_weekday(w: Weekday) -> Self { Self(w.num_days_from_sunday() as u8) }

  /// The current local weekday.
  pub fn today() -> Self { Self::from_weekday(chrono::Local::now().weekday()) }
}

impl TryFrom<u8> for Day {
  type Error = Error;

  fn try_from(n: u8) -> Result<Self, Self::Error> {
    Day::new(n).ok_or(Error::InvalidDay(n))
  }
}

impl From<Day> for u8 {
  fn from(d: Day) -> u8 { d.0 }
}

// ─── Enumerations ────────────────────────────────────────────────────────────

/// How dinner gets to the table.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display,
  EnumIter, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MealType {
  #[default]
  Homemade,
  Delivery,
  Out,
}

impl MealType {
  /// Label shown in the planner.
  pub fn label(self) -> &'static str {
    match self {
      Self::Homemade => "Caseiro",
      Self::Delivery => "Delivery",
      Self::Out => "Comer fora",
    }
  }
}

/// Shopping aisle. Declaration order is the display order of the grouped
/// shopping list.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display,
  EnumIter, EnumString, AsRefStr,
)]
pub enum Category {
  #[default]
  Mercado,
  #[serde(rename = "Açougue")]
  #[strum(serialize = "Açougue")]
  Acougue,
  Feira,
  #[serde(rename = "Farmácia")]
  #[strum(serialize = "Farmácia")]
  Farmacia,
  Outros,
}

/// Calendar bucket for an appointment.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display,
  EnumIter, EnumString, AsRefStr,
)]
pub enum AppointmentType {
  Trabalho,
  Casa,
  #[serde(rename = "Crianças")]
  #[strum(serialize = "Crianças")]
  Criancas,
  #[default]
  Casal,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display,
  EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AgreementStatus {
  #[default]
  Pending,
  Resolved,
}

impl AgreementStatus {
  pub fn flipped(self) -> Self {
    match self {
      Self::Pending => Self::Resolved,
      Self::Resolved => Self::Pending,
    }
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A saved recipe, typically a link to a post plus its ingredient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
  pub id:            EntityId,
  pub title:         String,
  /// May be empty.
  #[serde(default)]
  pub ingredients:   Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub instagram_url: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes:         Option<String>,
}

/// The dinner planned for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
  pub id:                EntityId,
  pub day:               Day,
  pub title:             String,
  #[serde(rename = "type")]
  pub kind:              MealType,
  pub cook:              String,
  /// Weak reference; the recipe may have been removed since.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub recipe_id:         Option<EntityId>,
  #[serde(default)]
  pub ingredients_ready: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
  pub id:        EntityId,
  pub name:      String,
  pub category:  Category,
  #[serde(default)]
  pub checked:   bool,
  /// Weak reference to the recipe this item was added from.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub recipe_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
  pub id:       EntityId,
  /// `YYYY-MM-DD`; lexicographic order is chronological order.
  pub date:     String,
  /// `HH:MM`.
  pub time:     String,
  pub title:    String,
  #[serde(rename = "type")]
  pub kind:     AppointmentType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
}

/// A shared commitment between the two partners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agreement {
  pub id:     EntityId,
  pub text:   String,
  pub status: AgreementStatus,
}

// ─── Drafts ──────────────────────────────────────────────────────────────────

/// Meal-planner form input; the id is resolved by
/// [`crate::collections::plan_meal`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealDraft {
  pub title:             String,
  pub kind:              MealType,
  pub cook:              String,
  pub recipe_id:         Option<EntityId>,
  pub ingredients_ready: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn day_rejects_out_of_range() {
    assert!(Day::new(6).is_some());
    assert!(Day::new(7).is_none());
    assert!(serde_json::from_str::<Day>("9").is_err());
  }

  #[test]
  fn enums_use_wire_spellings() {
    assert_eq!(serde_json::to_string(&Category::Acougue).unwrap(), "\"Açougue\"");
    assert_eq!(
      serde_json::to_string(&AppointmentType::Criancas).unwrap(),
      "\"Crianças\""
    );
    assert_eq!(serde_json::to_string(&MealType::Out).unwrap(), "\"out\"");
    assert_eq!(Category::Farmacia.to_string(), "Farmácia");
    assert_eq!("delivery".parse::<MealType>().unwrap(), MealType::Delivery);
  }

  #[test]
  fn meal_uses_camel_case_and_omits_absent_recipe() {
    let meal = Meal {
      id:                "m1".into(),
      day:               Day::SUNDAY,
      title:             "Sopa".into(),
      kind:              MealType::Homemade,
      cook:              "Ana".into(),
      recipe_id:         None,
      ingredients_ready: true,
    };
    let json = serde_json::to_value(&meal).unwrap();
    assert_eq!(json["ingredientsReady"], true);
    assert_eq!(json["type"], "homemade");
    assert!(json.get("recipeId").is_none());
  }

  #[test]
  fn status_flips_both_ways() {
    assert_eq!(AgreementStatus::Pending.flipped(), AgreementStatus::Resolved);
    assert_eq!(AgreementStatus::Resolved.flipped(), AgreementStatus::Pending);
  }
}
