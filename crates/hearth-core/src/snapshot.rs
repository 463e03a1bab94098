//! The persisted unit: all five collections at one point in time.

use serde::{Deserialize, Serialize};

use crate::{
  model::{Agreement, AgreementStatus, Appointment, Meal, Recipe, ShoppingItem},
  Error, Result,
};

/// Complete household state.
///
/// Every collection defaults to empty when its key is missing from a stored
/// payload, so snapshots written before a collection existed still load.
/// A key that is present but holds the wrong shape is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
  #[serde(default)]
  pub meals:          Vec<Meal>,
  #[serde(default)]
  pub shopping_items: Vec<ShoppingItem>,
  #[serde(default)]
  pub appointments:   Vec<Appointment>,
  #[serde(default)]
  pub recipes:        Vec<Recipe>,
  #[serde(default)]
  pub agreements:     Vec<Agreement>,
}

impl Snapshot {
  /// First-run content: one sample recipe and one pending agreement.
  pub fn seed() -> Self {
    Self {
      recipes: vec![Recipe {
        id:            "r1".into(),
        title:         "Carbonara do Insta".into(),
        ingredients:   vec!["Massa".into(), "Gema".into(), "Pancetta".into()],
        instagram_url: Some("https://instagram.com".into()),
        notes:         None,
      }],
      agreements: vec![Agreement {
        id:     "ag1".into(),
        text:   "Não esquecer de pagar o IPTU até dia 15".into(),
        status: AgreementStatus::Pending,
      }],
      ..Self::default()
    }
  }

  pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string(self)?) }

  /// Decode a stored payload, checking each collection's shape.
  ///
  /// The payload must be a JSON object; serde would otherwise also accept a
  /// positional array for a struct.
  pub fn from_json(raw: &str) -> Result<Self> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if !value.is_object() {
      return Err(Error::Shape(format!(
        "expected a JSON object, found {}",
        kind_of(&value)
      )));
    }
    Ok(serde_json::from_value(value)?)
  }
}

fn kind_of(value: &serde_json::Value) -> &'static str {
  match value {
    serde_json::Value::Null => "null",
    serde_json::Value::Bool(_) => "a boolean",
    serde_json::Value::Number(_) => "a number",
    serde_json::Value::String(_) => "a string",
    serde_json::Value::Array(_) => "an array",
    serde_json::Value::Object(_) => "an object",
  }
}
