//! Integration tests for `SqliteStore` against in-memory and on-disk
//! databases.

use hearth_core::{
  Snapshot,
  collections::{add_agreement, add_appointment, add_recipe, add_shopping_item, upsert_meal},
  model::{Appointment, AppointmentType, Category, Day, Meal, MealType, Recipe},
  store::SnapshotStore,
};

use crate::{Error, SNAPSHOT_KEY, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn sample() -> Snapshot {
  let mut snap = Snapshot::seed();
  snap.meals = upsert_meal(
    &snap.meals,
    Meal {
      id:                "m1".into(),
      day:               Day::new(1).unwrap(),
      title:             "Espaguete Carbonara".into(),
      kind:              MealType::Homemade,
      cook:              "João".into(),
      recipe_id:         Some("r1".into()),
      ingredients_ready: true,
    },
  );
  snap.shopping_items = add_shopping_item(&snap.shopping_items, "Picanha", Category::Acougue);
  snap.agreements = add_agreement(&snap.agreements, "Buscar as crianças às 17h");
  snap.appointments = add_appointment(
    &snap.appointments,
    Appointment {
      id:       "a1".into(),
      date:     "2025-05-20".into(),
      time:     "14:00".into(),
      title:    "Pediatra Lucas".into(),
      kind:     AppointmentType::Criancas,
      location: Some("Clínica Sorriso".into()),
    },
  );
  snap.appointments = add_appointment(
    &snap.appointments,
    Appointment {
      id:       "a2".into(),
      date:     "2025-05-22".into(),
      time:     "20:00".into(),
      title:    "Jantar fora".into(),
      kind:     AppointmentType::Casal,
      location: None,
    },
  );
  snap.recipes = add_recipe(
    &snap.recipes,
    Recipe {
      id:            "r2".into(),
      title:         "Bolo de fubá".into(),
      ingredients:   vec!["Fubá".into(), "Ovo".into()],
      instagram_url: None,
      notes:         Some("Forno 180°, 40 min".into()),
    },
  );
  snap
}

// ─── Round trip ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_loads_nothing() {
  let s = store().await;
  assert!(s.load().await.unwrap().is_none());
}

#[tokio::test]
async fn save_then_load_round_trips() {
  let s = store().await;
  let snap = sample();
  s.save(&snap).await.unwrap();
  assert_eq!(s.load().await.unwrap(), Some(snap));
}

#[tokio::test]
async fn later_save_overwrites_earlier() {
  let s = store().await;
  s.save(&sample()).await.unwrap();
  s.save(&Snapshot::default()).await.unwrap();
  assert_eq!(s.load().await.unwrap(), Some(Snapshot::default()));
}

#[tokio::test]
async fn snapshot_survives_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("hearth.db");
  let snap = sample();

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.save(&snap).await.unwrap();
  }

  let reopened = SqliteStore::open(&path).await.unwrap();
  assert_eq!(reopened.load().await.unwrap(), Some(snap));
}

// ─── Shape checks ────────────────────────────────────────────────────────────

#[tokio::test]
async fn partial_payload_defaults_missing_collections() {
  let s = store().await;
  let raw = serde_json::json!({
    "meals": [{
      "id": "1", "day": 1, "title": "Espaguete", "type": "homemade",
      "cook": "João", "ingredientsReady": true
    }]
  });
  s.put_raw(SNAPSHOT_KEY, raw.to_string()).await.unwrap();

  let loaded = s.load().await.unwrap().unwrap();
  assert_eq!(loaded.meals.len(), 1);
  assert!(loaded.shopping_items.is_empty());
  assert!(loaded.appointments.is_empty());
  assert!(loaded.recipes.is_empty());
  assert!(loaded.agreements.is_empty());
}

#[tokio::test]
async fn malformed_payload_is_a_snapshot_error() {
  let s = store().await;
  for raw in ["{not json", "[1,2,3]", r#"{"recipes": "nope"}"#] {
    s.put_raw(SNAPSHOT_KEY, raw.to_owned()).await.unwrap();
    let err = s.load().await.unwrap_err();
    assert!(matches!(err, Error::Snapshot(_)), "{raw}: {err}");
  }
}

#[tokio::test]
async fn older_keys_are_never_read() {
  let s = store().await;
  s.put_raw("HEARTH_APP_DATA", sample().to_json().unwrap())
    .await
    .unwrap();
  assert!(s.load().await.unwrap().is_none());
  assert!(s.get_raw("HEARTH_APP_DATA").await.unwrap().is_some());
}
