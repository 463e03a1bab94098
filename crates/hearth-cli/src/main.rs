//! `hearth` — terminal household organizer.
//!
//! # Usage
//!
//! ```
//! hearth
//! hearth --db ~/casa.db --screen shopping
//! hearth --config ~/.config/hearth/config.toml
//! ```
//!
//! Every setting can also come from a `HEARTH_*` environment variable
//! (`HEARTH_DB_PATH`, `HEARTH_DEBOUNCE_MS`, ...). The suggestion key is also
//! read from `GEMINI_API_KEY` or `API_KEY`.

mod app;
mod forms;
mod ui;

use std::{
  fs::{self, File},
  io,
  path::{Path, PathBuf},
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use hearth_core::navigation::Screen;
use hearth_session::{Household, SyncConfig};
use hearth_store_sqlite::SqliteStore;
use hearth_suggest::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig, GeminiSuggester};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "hearth", version, about = "Household organizer for the terminal")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", env = "HEARTH_CONFIG")]
  config: Option<PathBuf>,

  /// SQLite database file.
  #[arg(long, value_name = "FILE")]
  db: Option<PathBuf>,

  /// Where to write logs (default: `hearth.log` next to the database).
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,

  /// Screen to open on start.
  #[arg(long, default_value = "dashboard")]
  screen: Screen,
}

// ─── Settings ─────────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct Settings {
  db_path:         PathBuf,
  #[serde(default)]
  log_file:        Option<PathBuf>,
  debounce_ms:     u64,
  min_visible_ms:  u64,
  #[serde(default)]
  gemini_api_key:  Option<String>,
  gemini_model:    String,
  gemini_base_url: String,
}

impl Settings {
  /// Defaults, then the config file, then `HEARTH_*` variables, then flags.
  fn load(args: &Args) -> Result<Self> {
    let path_str = |p: &Option<PathBuf>| p.as_ref().map(|p| p.to_string_lossy().into_owned());

    let mut builder = config::Config::builder()
      .set_default("db_path", "~/.local/share/hearth/hearth.db")?
      .set_default("debounce_ms", 500)?
      .set_default("min_visible_ms", 600)?
      .set_default("gemini_model", DEFAULT_MODEL)?
      .set_default("gemini_base_url", DEFAULT_BASE_URL)?;
    if let Some(path) = &args.config {
      builder = builder.add_source(config::File::from(path.as_path()).required(true));
    }
    let settings: Self = builder
      .add_source(config::Environment::with_prefix("HEARTH"))
      .set_override_option("db_path", path_str(&args.db))?
      .set_override_option("log_file", path_str(&args.log_file))?
      .build()
      .context("reading configuration")?
      .try_deserialize()
      .context("invalid configuration")?;

    Ok(settings)
  }

  fn db_path(&self) -> PathBuf { expand_tilde(&self.db_path) }

  fn log_file(&self) -> PathBuf {
    match &self.log_file {
      Some(path) => expand_tilde(path),
      None => self.db_path().with_file_name("hearth.log"),
    }
  }

  fn sync(&self) -> SyncConfig {
    SyncConfig {
      debounce:    Duration::from_millis(self.debounce_ms),
      min_visible: Duration::from_millis(self.min_visible_ms),
    }
  }

  fn gemini(&self) -> GeminiConfig {
    let api_key = self
      .gemini_api_key
      .clone()
      .or_else(|| std::env::var("GEMINI_API_KEY").ok())
      .or_else(|| std::env::var("API_KEY").ok())
      .filter(|k| !k.trim().is_empty());
    GeminiConfig {
      api_key,
      model: self.gemini_model.clone(),
      base_url: self.gemini_base_url.clone(),
      ..GeminiConfig::default()
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

fn ensure_parent(path: &Path) -> Result<()> {
  if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
  }
  Ok(())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let settings = Settings::load(&args)?;

  let db_path = settings.db_path();
  let log_path = settings.log_file();
  ensure_parent(&db_path)?;
  ensure_parent(&log_path)?;

  // The terminal belongs to the UI, so logs go to a file.
  let log_file = File::options()
    .create(true)
    .append(true)
    .open(&log_path)
    .with_context(|| format!("opening log file {}", log_path.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(log_file))
    .with_ansi(false)
    .init();

  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("opening database {}", db_path.display()))?;
  let (household, boot) = Household::start(store, settings.sync()).await;
  tracing::info!(db = %db_path.display(), ?boot, "household ready");

  let suggester = GeminiSuggester::new(settings.gemini()).context("building HTTP client")?;
  let mut app = App::new(household, suggester, args.screen);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  // Write out anything still waiting on the debounce timer.
  app
    .into_household()
    .shutdown()
    .await
    .context("flushing pending changes")?;

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    app.poll_suggestions();
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key)
    {
      break;
    }
  }

  Ok(())
}
