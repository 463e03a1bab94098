//! TUI rendering: header, current screen, tab bar, status line.

pub mod calendar;
pub mod dashboard;
pub mod library;
pub mod meals;
pub mod shopping;

use chrono::Local;
use hearth_core::navigation::Screen;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::{App, Mode};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // tab bar
      Constraint::Length(1), // status / prompt
    ])
    .split(f.area());

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_tabs(f, rows[2], app);
  draw_status(f, rows[3], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%d/%m").to_string();

  let left = Span::styled(
    format!(" hearth · {}", app.screen().label()),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let sync = if app.household.is_syncing() { "● salvando  " } else { "" };
  let right = Span::styled(
    format!("{sync}{} {date} ", app.today.name()),
    Style::default().fg(Color::Gray),
  );

  let pad = area
    .width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  match app.screen() {
    Screen::Dashboard => dashboard::draw(f, area, app),
    Screen::Meals => meals::draw(f, area, app),
    Screen::Shopping => shopping::draw(f, area, app),
    Screen::Calendar => calendar::draw(f, area, app),
    Screen::Recipes => library::draw_recipes(f, area, app),
    Screen::Agreements => library::draw_agreements(f, area, app),
    Screen::More => library::draw_more(f, area, app),
  }
}

// ─── Tab bar ──────────────────────────────────────────────────────────────────

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
  let active = app.nav.highlighted_tab();
  let spans: Vec<Span> = Screen::TABS
    .iter()
    .enumerate()
    .map(|(i, tab)| {
      let style = if *tab == active {
        Style::default()
          .fg(Color::Black)
          .bg(Color::Cyan)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };
      Span::styled(format!(" {} {} ", i + 1, tab.label()), style)
    })
    .collect();

  f.render_widget(
    Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  if let Mode::Prompt { kind, buffer } = &app.mode {
    let line = Line::from(vec![
      Span::styled(
        kind.title(),
        Style::default()
          .fg(Color::Black)
          .bg(Color::Yellow)
          .add_modifier(Modifier::BOLD),
      ),
      Span::raw(format!(" {buffer}_")),
    ]);
    f.render_widget(Paragraph::new(line), area);
    return;
  }

  let hints = match app.screen() {
    Screen::Dashboard => "m jantares  s lista  c agenda  a combinados  q sair",
    Screen::Meals => "jk dia  Enter editar  r ingredientes  g sugestões  q sair",
    Screen::Shopping => "a adicionar  c categoria  Espaço marcar  X limpar  q sair",
    Screen::Calendar => "a novo compromisso  q sair",
    Screen::Recipes if app.mode == Mode::Filter => "Digite para filtrar  Enter ok  Esc cancelar",
    Screen::Recipes => "a nova  / buscar  Enter ingredientes à lista  Esc voltar",
    Screen::Agreements => "a novo  Espaço resolver  Esc voltar",
    Screen::More => "r receitas  a combinados  q sair",
  };

  let status = if app.status_msg.is_empty() { hints.to_string() } else { app.status_msg.clone() };

  f.render_widget(
    Paragraph::new(Span::styled(format!(" {status}"), Style::default().fg(Color::Gray)))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared widgets ───────────────────────────────────────────────────────────

pub(crate) fn panel(title: impl Into<String>) -> Block<'static> {
  Block::default()
    .title(format!(" {} ", title.into()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray))
}

pub(crate) fn dim(text: impl Into<String>) -> Span<'static> {
  Span::styled(text.into(), Style::default().fg(Color::DarkGray))
}

/// Render a list with the cursor row highlighted.
pub(crate) fn draw_list<'a>(
  f: &mut Frame,
  area: Rect,
  block: Block<'a>,
  items: Vec<ListItem<'a>>,
  cursor: usize,
) {
  let mut state = ListState::default();
  state.select((!items.is_empty()).then_some(cursor));

  f.render_stateful_widget(
    List::new(items).block(block).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    area,
    &mut state,
  );
}
