//! Meal suggestions from Google's Gemini `generateContent` API.
//!
//! Implements [`MealSuggester`]: every failure, including a missing API key,
//! collapses to `None` so the organizer keeps working without suggestions.

mod error;

use std::{
  sync::atomic::{AtomicBool, Ordering},
  time::Duration,
};

use hearth_core::suggestion::{MAX_SUGGESTIONS, MealSuggester, MealSuggestion};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

pub use error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Connection settings for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
  /// Without a key the suggester is permanently unavailable.
  pub api_key:  Option<String>,
  pub model:    String,
  pub base_url: String,
  pub timeout:  Duration,
}

impl Default for GeminiConfig {
  fn default() -> Self {
    Self {
      api_key:  None,
      model:    DEFAULT_MODEL.to_owned(),
      base_url: DEFAULT_BASE_URL.to_owned(),
      timeout:  Duration::from_secs(30),
    }
  }
}

/// Cheap to share behind an `Arc`; the inner [`reqwest::Client`] pools
/// connections.
pub struct GeminiSuggester {
  client:       Client,
  config:       GeminiConfig,
  warned_unset: AtomicBool,
}

impl GeminiSuggester {
  pub fn new(config: GeminiConfig) -> Result<Self> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config, warned_unset: AtomicBool::new(false) })
  }

  pub fn is_configured(&self) -> bool {
    self.config.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
  }

  fn endpoint(&self) -> String {
    format!(
      "{}/v1beta/models/{}:generateContent",
      self.config.base_url.trim_end_matches('/'),
      self.config.model
    )
  }

  async fn request(
    &self,
    api_key: &str,
    ingredients: &[String],
    count: usize,
  ) -> Result<Vec<MealSuggestion>> {
    let resp = self
      .client
      .post(self.endpoint())
      .header("x-goog-api-key", api_key)
      .json(&request_body(ingredients, count))
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status(resp.status()));
    }
    let body: Value = resp.json().await?;
    parse_response(&body, count)
  }
}

impl MealSuggester for GeminiSuggester {
  async fn suggest(&self, ingredients: &[String], count: usize) -> Option<Vec<MealSuggestion>> {
    let api_key = self.config.api_key.as_deref().filter(|k| !k.trim().is_empty());
    let Some(api_key) = api_key else {
      if !self.warned_unset.swap(true, Ordering::Relaxed) {
        tracing::warn!("no Gemini API key configured; meal suggestions disabled");
      }
      return None;
    };

    match self.request(api_key, ingredients, count.min(MAX_SUGGESTIONS)).await {
      Ok(suggestions) => Some(suggestions),
      Err(e) => {
        tracing::warn!(error = %e, "meal suggestion request failed");
        None
      }
    }
  }
}

// ─── Wire format ─────────────────────────────────────────────────────────────

/// Instruction sent to the model. Answers come back in Brazilian Portuguese.
pub fn prompt(ingredients: &[String], count: usize) -> String {
  format!(
    "Com base nesses ingredientes: {}, sugira {count} receitas rápidas para o jantar. \
     Responda em Português do Brasil.",
    ingredients.join(", ")
  )
}

/// `generateContent` request asking for a JSON array of suggestions.
pub fn request_body(ingredients: &[String], count: usize) -> Value {
  json!({
    "contents": [{ "parts": [{ "text": prompt(ingredients, count) }] }],
    "generationConfig": {
      "responseMimeType": "application/json",
      "responseSchema": {
        "type": "ARRAY",
        "items": {
          "type": "OBJECT",
          "properties": {
            "name":              { "type": "STRING" },
            "description":       { "type": "STRING" },
            "ingredientsNeeded": { "type": "ARRAY", "items": { "type": "STRING" } }
          },
          "required": ["name", "description", "ingredientsNeeded"]
        }
      }
    }
  })
}

#[derive(Deserialize)]
struct Response {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
  content: Content,
}

#[derive(Deserialize)]
struct Content {
  #[serde(default)]
  parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
  #[serde(default)]
  text: Option<String>,
}

/// Pull the suggestion array out of a `generateContent` response, keeping
/// at most `count` entries.
pub fn parse_response(body: &Value, count: usize) -> Result<Vec<MealSuggestion>> {
  let resp: Response = serde_json::from_value(body.clone())?;
  let text = resp
    .candidates
    .into_iter()
    .next()
    .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
    .ok_or(Error::EmptyResponse)?;

  let mut suggestions: Vec<MealSuggestion> = serde_json::from_str(&text)?;
  suggestions.truncate(count);
  Ok(suggestions)
}
