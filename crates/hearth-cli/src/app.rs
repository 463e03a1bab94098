//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use hearth_core::{
  model::{Category, Day, Meal, Recipe, ShoppingItem},
  navigation::{Navigation, Screen},
  suggestion::MealSuggestion,
  views,
};
use hearth_session::{Household, StaleGuard, Ticket, suggest::spawn_suggestions};
use hearth_suggest::GeminiSuggester;
use strum::IntoEnumIterator;
use tokio::sync::oneshot;

use crate::forms;

// ─── Input mode ───────────────────────────────────────────────────────────────

/// What a line of typed input will become once Enter is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
  Meal(Day),
  ShoppingItem,
  Appointment,
  Recipe,
  Agreement,
  /// Ingredients to ask the suggestion service about.
  Suggest,
}

impl PromptKind {
  pub fn title(self) -> String {
    match self {
      Self::Meal(day) => format!(" {}: título; cozinheiro; tipo; receita ", day.name()),
      Self::ShoppingItem => " Novo item ".into(),
      Self::Appointment => " AAAA-MM-DD; HH:MM; título; tipo; local ".into(),
      Self::Recipe => " título; ingredientes, ...; link; notas ".into(),
      Self::Agreement => " Novo combinado ".into(),
      Self::Suggest => " O que tem em casa? (separado por vírgulas) ".into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
  Normal,
  Prompt { kind: PromptKind, buffer: String },
  /// Typing a recipe filter.
  Filter,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Live household data; every edit goes through here.
  pub household: Household,

  pub nav: Navigation,

  pub mode: Mode,

  /// Cursor within the list shown on the current screen.
  pub cursor: usize,

  /// Category given to new shopping items.
  pub category: Category,

  /// Fuzzy filter applied to the recipe library.
  pub filter: String,

  /// Latest suggestions for the meal planner.
  pub suggestions: Vec<MealSuggestion>,
  pub suggestion_cursor: usize,

  /// Weekday the dashboard treats as today.
  pub today: Day,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  suggester: Arc<GeminiSuggester>,
  guard:     StaleGuard,
  pending:   Option<oneshot::Receiver<(Ticket, Vec<MealSuggestion>)>>,
}

impl App {
  pub fn new(household: Household, suggester: GeminiSuggester, start: Screen) -> Self {
    Self {
      household,
      nav: Navigation::new(start),
      mode: Mode::Normal,
      cursor: 0,
      category: Category::default(),
      filter: String::new(),
      suggestions: Vec::new(),
      suggestion_cursor: 0,
      today: Day::today(),
      status_msg: String::new(),
      suggester: Arc::new(suggester),
      guard: StaleGuard::default(),
      pending: None,
    }
  }

  pub fn into_household(self) -> Household { self.household }

  pub fn screen(&self) -> Screen { self.nav.current() }

  // ── Derived lists ─────────────────────────────────────────────────────────

  /// Shopping items in display order: pending grouped by category, then
  /// completed.
  pub fn shopping_rows(&self) -> Vec<&ShoppingItem> {
    let items = &self.household.snapshot().shopping_items;
    views::group_by_category(items)
      .into_iter()
      .flat_map(|(_, group)| group)
      .chain(views::completed_items(items))
      .collect()
  }

  /// Recipes matching the current filter.
  pub fn filtered_recipes(&self) -> Vec<&Recipe> {
    let recipes = &self.household.snapshot().recipes;
    if self.filter.is_empty() {
      return recipes.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    recipes
      .iter()
      .filter(|r| {
        matcher.fuzzy_match(&r.title, &self.filter).is_some()
          || r
            .ingredients
            .iter()
            .any(|i| matcher.fuzzy_match(i, &self.filter).is_some())
      })
      .collect()
  }

  fn list_len(&self) -> usize {
    let snap = self.household.snapshot();
    match self.screen() {
      Screen::Dashboard => 0,
      Screen::Meals => 7,
      Screen::Shopping => snap.shopping_items.len(),
      Screen::Calendar => snap.appointments.len(),
      Screen::Recipes => self.filtered_recipes().len(),
      Screen::Agreements => snap.agreements.len(),
      Screen::More => 2,
    }
  }

  fn selected_day(&self) -> Day { Day::new(self.cursor.min(6) as u8).unwrap_or(Day::SUNDAY) }

  fn selected_meal(&self) -> Option<&Meal> {
    views::meal_for_day(&self.household.snapshot().meals, self.selected_day())
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Switch screens. Any in-flight suggestion request is abandoned.
  pub fn navigate(&mut self, screen: Screen) {
    if self.nav.navigate(screen) {
      self.cursor = 0;
      self.filter.clear();
      self.guard.invalidate();
      self.pending = None;
      self.suggestions.clear();
      self.suggestion_cursor = 0;
    }
  }

  fn cycle_tab(&mut self, forward: bool) {
    let tabs = Screen::TABS;
    let here = tabs
      .iter()
      .position(|t| *t == self.nav.highlighted_tab())
      .unwrap_or(0);
    let next = if forward { (here + 1) % tabs.len() } else { (here + tabs.len() - 1) % tabs.len() };
    self.navigate(tabs[next]);
  }

  // ── Suggestions ───────────────────────────────────────────────────────────

  fn request_suggestions(&mut self, ingredients: Vec<String>) {
    if ingredients.is_empty() {
      self.status_msg = "Nenhum ingrediente informado.".into();
      return;
    }
    let ticket = self.guard.issue();
    self.pending = Some(spawn_suggestions(self.suggester.clone(), ingredients, ticket));
    self.suggestions.clear();
    self.suggestion_cursor = 0;
    self.status_msg = "Buscando sugestões…".into();
  }

  /// Apply a finished suggestion request, if it is still wanted. Called once
  /// per frame.
  pub fn poll_suggestions(&mut self) {
    let Some(rx) = self.pending.as_mut() else {
      return;
    };
    match rx.try_recv() {
      Ok((ticket, suggestions)) => {
        self.pending = None;
        if !self.guard.is_current(ticket) {
          return;
        }
        self.status_msg = if suggestions.is_empty() {
          "Sem sugestões no momento.".into()
        } else {
          format!("{} sugestões: [n] próxima  [+] itens à lista", suggestions.len())
        };
        self.suggestions = suggestions;
      }
      Err(oneshot::error::TryRecvError::Empty) => {}
      Err(oneshot::error::TryRecvError::Closed) => self.pending = None,
    }
  }

  pub fn is_fetching(&self) -> bool { self.pending.is_some() }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.mode {
      Mode::Prompt { .. } => {
        self.handle_prompt_key(key);
        return true;
      }
      Mode::Filter => {
        self.handle_filter_key(key);
        return true;
      }
      Mode::Normal => {}
    }

    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Char(c @ '1'..='5') => {
        let i = c as usize - '1' as usize;
        self.navigate(Screen::TABS[i]);
        return true;
      }
      KeyCode::Tab => {
        self.cycle_tab(true);
        return true;
      }
      KeyCode::BackTab => {
        self.cycle_tab(false);
        return true;
      }
      KeyCode::Esc => {
        let back = match self.screen() {
          Screen::Recipes | Screen::Agreements => Screen::More,
          _ => Screen::Dashboard,
        };
        self.navigate(back);
        return true;
      }
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.list_len() {
          self.cursor += 1;
        }
        return true;
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
        return true;
      }
      _ => {}
    }

    match self.screen() {
      Screen::Dashboard => self.handle_dashboard_key(key),
      Screen::Meals => self.handle_meals_key(key),
      Screen::Shopping => self.handle_shopping_key(key),
      Screen::Calendar => self.handle_calendar_key(key),
      Screen::Recipes => self.handle_recipes_key(key),
      Screen::Agreements => self.handle_agreements_key(key),
      Screen::More => self.handle_more_key(key),
    }
    true
  }

  fn open_prompt(&mut self, kind: PromptKind, prefill: String) {
    self.mode = Mode::Prompt { kind, buffer: prefill };
  }

  fn handle_prompt_key(&mut self, key: KeyEvent) {
    let Mode::Prompt { kind, buffer } = &mut self.mode else {
      return;
    };
    match key.code {
      KeyCode::Esc => self.mode = Mode::Normal,
      KeyCode::Backspace => {
        buffer.pop();
      }
      KeyCode::Char(c) => buffer.push(c),
      KeyCode::Enter => {
        let (kind, line) = (*kind, std::mem::take(buffer));
        self.mode = Mode::Normal;
        self.submit(kind, &line);
      }
      _ => {}
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter.clear();
        self.mode = Mode::Normal;
      }
      KeyCode::Enter => self.mode = Mode::Normal,
      KeyCode::Backspace => {
        self.filter.pop();
      }
      KeyCode::Char(c) => self.filter.push(c),
      _ => {}
    }
    self.cursor = 0;
  }

  /// Turn a submitted prompt line into a mutation.
  fn submit(&mut self, kind: PromptKind, line: &str) {
    let result = match kind {
      PromptKind::Meal(day) => {
        let snap = self.household.snapshot();
        let existing = views::meal_for_day(&snap.meals, day);
        forms::meal_draft(line, &snap.recipes, existing)
          .map(|draft| self.household.plan_meal(day, draft))
      }
      PromptKind::ShoppingItem => Ok(self.household.add_shopping_item(line, self.category)),
      PromptKind::Appointment => {
        forms::appointment(line).map(|appt| self.household.add_appointment(appt))
      }
      PromptKind::Recipe => forms::recipe(line).map(|r| self.household.add_recipe(r)),
      PromptKind::Agreement => Ok(self.household.add_agreement(line)),
      PromptKind::Suggest => {
        self.request_suggestions(hearth_core::collections::parse_ingredients(line));
        return;
      }
    };

    self.status_msg = match result {
      Ok(true) => "Salvo.".into(),
      Ok(false) => "Nada a salvar.".into(),
      Err(e) => format!("Erro: {e:#}"),
    };
  }

  // ── Per-screen keys ───────────────────────────────────────────────────────

  fn handle_dashboard_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('m') => self.navigate(Screen::Meals),
      KeyCode::Char('s') => self.navigate(Screen::Shopping),
      KeyCode::Char('c') => self.navigate(Screen::Calendar),
      KeyCode::Char('a') => self.navigate(Screen::Agreements),
      _ => {}
    }
  }

  fn handle_meals_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Enter | KeyCode::Char('e') => {
        let day = self.selected_day();
        let prefill = self
          .selected_meal()
          .map(|m| forms::meal_line(m, &self.household.snapshot().recipes))
          .unwrap_or_default();
        self.open_prompt(PromptKind::Meal(day), prefill);
      }
      KeyCode::Char('r') => {
        if let Some(meal) = self.selected_meal().cloned() {
          let ready = !meal.ingredients_ready;
          self.household.upsert_meal(Meal { ingredients_ready: ready, ..meal });
        }
      }
      KeyCode::Char('g') => {
        let bought = views::completed_items(&self.household.snapshot().shopping_items)
          .into_iter()
          .map(|i| i.name.as_str())
          .collect::<Vec<_>>()
          .join(", ");
        self.open_prompt(PromptKind::Suggest, bought);
      }
      KeyCode::Char('n') if !self.suggestions.is_empty() => {
        self.suggestion_cursor = (self.suggestion_cursor + 1) % self.suggestions.len();
      }
      KeyCode::Char('+') => {
        let Some(s) = self.suggestions.get(self.suggestion_cursor).cloned() else {
          return;
        };
        let mut added = 0;
        for item in &s.ingredients_needed {
          if self.household.add_shopping_item(item, Category::Mercado) {
            added += 1;
          }
        }
        self.status_msg = format!("{added} itens de \"{}\" na lista.", s.name);
      }
      _ => {}
    }
  }

  fn handle_shopping_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('a') => self.open_prompt(PromptKind::ShoppingItem, String::new()),
      KeyCode::Char('c') => {
        let all: Vec<_> = Category::iter().collect();
        let i = all.iter().position(|c| *c == self.category).unwrap_or(0);
        self.category = all[(i + 1) % all.len()];
      }
      KeyCode::Char(' ') | KeyCode::Enter => {
        let id = self.shopping_rows().get(self.cursor).map(|i| i.id.clone());
        if let Some(id) = id {
          self.household.toggle_shopping_item(&id);
        }
      }
      KeyCode::Char('X') => {
        self.household.clear_shopping_items();
        self.cursor = 0;
        self.status_msg = "Lista limpa.".into();
      }
      _ => {}
    }
  }

  fn handle_calendar_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('a') {
      let today = chrono::Local::now().format("%Y-%m-%d; ").to_string();
      self.open_prompt(PromptKind::Appointment, today);
    }
  }

  fn handle_recipes_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('a') => self.open_prompt(PromptKind::Recipe, String::new()),
      KeyCode::Char('/') => {
        self.filter.clear();
        self.mode = Mode::Filter;
        self.cursor = 0;
      }
      KeyCode::Enter => {
        let recipe = self
          .filtered_recipes()
          .get(self.cursor)
          .map(|r| (r.id.clone(), r.title.clone()));
        if let Some((id, title)) = recipe {
          if self.household.add_recipe_ingredients(&id, self.category) {
            self.status_msg = format!("Ingredientes de \"{title}\" na lista.");
          } else {
            self.status_msg = format!("\"{title}\" não tem ingredientes.");
          }
        }
      }
      _ => {}
    }
  }

  fn handle_agreements_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('a') => self.open_prompt(PromptKind::Agreement, String::new()),
      KeyCode::Char(' ') | KeyCode::Enter => {
        let id = self
          .household
          .snapshot()
          .agreements
          .get(self.cursor)
          .map(|a| a.id.clone());
        if let Some(id) = id {
          self.household.toggle_agreement(&id);
        }
      }
      _ => {}
    }
  }

  fn handle_more_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('r') => self.navigate(Screen::Recipes),
      KeyCode::Char('a') => self.navigate(Screen::Agreements),
      KeyCode::Enter => {
        let target = if self.cursor == 0 { Screen::Recipes } else { Screen::Agreements };
        self.navigate(target);
      }
      _ => {}
    }
  }
}
