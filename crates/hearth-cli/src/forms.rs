//! Single-line form input → domain records.
//!
//! Every prompt takes `;`-separated fields. Trailing optional fields may be
//! left out.

use anyhow::{Context, Result, anyhow, bail};
use chrono::{NaiveDate, NaiveTime};
use hearth_core::{
  collections::parse_ingredients,
  model::{Appointment, AppointmentType, EntityId, Meal, MealDraft, MealType, Recipe},
};
use strum::IntoEnumIterator;

fn fields(line: &str) -> Vec<&str> { line.split(';').map(str::trim).collect() }

fn optional(fields: &[&str], i: usize) -> Option<String> {
  fields
    .get(i)
    .filter(|s| !s.is_empty())
    .map(|s| (*s).to_owned())
}

/// `título; cozinheiro; tipo; receita`
///
/// `tipo` is `homemade`, `delivery` or `out` (default `homemade`).
/// `receita` is a 1-based index into `recipes` or a recipe title.
pub fn meal_draft(line: &str, recipes: &[Recipe], existing: Option<&Meal>) -> Result<MealDraft> {
  let f = fields(line);
  let title = f[0];
  if title.is_empty() {
    bail!("informe o nome do prato");
  }

  let kind = match optional(&f, 2) {
    Some(t) => t
      .to_lowercase()
      .parse::<MealType>()
      .map_err(|_| anyhow!("tipo inválido: {t} (homemade, delivery, out)"))?,
    None => MealType::default(),
  };

  let recipe_id = optional(&f, 3)
    .map(|r| find_recipe(recipes, &r))
    .transpose()?;

  Ok(MealDraft {
    title: title.to_owned(),
    kind,
    cook: optional(&f, 1).unwrap_or_default(),
    recipe_id,
    ingredients_ready: existing.is_some_and(|m| m.ingredients_ready),
  })
}

fn find_recipe(recipes: &[Recipe], needle: &str) -> Result<EntityId> {
  let by_index = needle
    .parse::<usize>()
    .ok()
    .and_then(|n| n.checked_sub(1))
    .and_then(|i| recipes.get(i));
  by_index
    .or_else(|| recipes.iter().find(|r| r.title.eq_ignore_ascii_case(needle)))
    .map(|r| r.id.clone())
    .ok_or_else(|| anyhow!("receita não encontrada: {needle}"))
}

/// Prefill for re-planning an existing meal.
pub fn meal_line(meal: &Meal, recipes: &[Recipe]) -> String {
  let recipe = meal
    .recipe_id
    .as_ref()
    .and_then(|id| recipes.iter().position(|r| &r.id == id))
    .map(|i| (i + 1).to_string())
    .unwrap_or_default();
  format!("{}; {}; {}; {}", meal.title, meal.cook, meal.kind, recipe)
    .trim_end_matches([' ', ';'])
    .to_owned()
}

/// `AAAA-MM-DD; HH:MM; título; tipo; local`
///
/// `tipo` is one of Trabalho, Casa, Crianças, Casal (default Casal).
pub fn appointment(line: &str) -> Result<Appointment> {
  let f = fields(line);
  if f.len() < 3 {
    bail!("formato: AAAA-MM-DD; HH:MM; título; tipo; local");
  }

  let date = NaiveDate::parse_from_str(f[0], "%Y-%m-%d")
    .with_context(|| format!("data inválida: {}", f[0]))?;
  let time = NaiveTime::parse_from_str(f[1], "%H:%M")
    .with_context(|| format!("hora inválida: {}", f[1]))?;
  if f[2].is_empty() {
    bail!("informe o título do compromisso");
  }

  let kind = match optional(&f, 3) {
    Some(t) => AppointmentType::iter()
      .find(|k| k.as_ref().eq_ignore_ascii_case(&t))
      .ok_or_else(|| anyhow!("tipo inválido: {t}"))?,
    None => AppointmentType::default(),
  };

  Ok(Appointment {
    id: EntityId::generate(),
    date: date.format("%Y-%m-%d").to_string(),
    time: time.format("%H:%M").to_string(),
    title: f[2].to_owned(),
    kind,
    location: optional(&f, 4),
  })
}

/// `título; ingrediente, ingrediente; link; notas`
pub fn recipe(line: &str) -> Result<Recipe> {
  let f = fields(line);
  if f[0].is_empty() {
    bail!("informe o título da receita");
  }
  Ok(Recipe {
    id:            EntityId::generate(),
    title:         f[0].to_owned(),
    ingredients:   f.get(1).map(|s| parse_ingredients(s)).unwrap_or_default(),
    instagram_url: optional(&f, 2),
    notes:         optional(&f, 3),
  })
}
