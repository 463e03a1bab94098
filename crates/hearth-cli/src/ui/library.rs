//! Secondary screens: the recipe library, agreements, and the menu that
//! leads to them.

use hearth_core::model::AgreementStatus;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{ListItem, Paragraph},
};

use super::{dim, draw_list, panel};
use crate::app::{App, Mode};

pub fn draw_recipes(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_recipes();
  let total = app.household.snapshot().recipes.len();

  let filtering = app.mode == Mode::Filter || !app.filter.is_empty();
  let title = if filtering {
    format!("Receitas ({}/{total})", filtered.len())
  } else {
    format!("Receitas ({total})")
  };

  let items: Vec<ListItem> = filtered
    .iter()
    .map(|r| {
      let mut lines = vec![Line::from(Span::styled(
        r.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
      ))];
      if !r.ingredients.is_empty() {
        lines.push(Line::from(dim(format!("  {}", r.ingredients.join(", ")))));
      }
      if let Some(url) = &r.instagram_url {
        lines.push(Line::from(dim(format!("  {url}"))));
      }
      ListItem::new(lines)
    })
    .collect();

  if !filtering {
    draw_list(f, area, panel(title), items, app.cursor);
    return;
  }

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(0), Constraint::Length(1)])
    .split(area);
  draw_list(f, rows[0], panel(title), items, app.cursor);

  let cursor = if app.mode == Mode::Filter { "_" } else { "" };
  f.render_widget(
    Paragraph::new(format!("/{}{cursor}", app.filter)).style(Style::default().fg(Color::Yellow)),
    rows[1],
  );
}

pub fn draw_agreements(f: &mut Frame, area: Rect, app: &App) {
  let items: Vec<ListItem> = app
    .household
    .snapshot()
    .agreements
    .iter()
    .map(|a| {
      let line = match a.status {
        AgreementStatus::Pending => Line::from(vec![
          Span::styled("○ ", Style::default().fg(Color::Yellow)),
          Span::raw(a.text.clone()),
        ]),
        AgreementStatus::Resolved => Line::from(vec![
          Span::styled("● ", Style::default().fg(Color::Green)),
          Span::styled(
            a.text.clone(),
            Style::default()
              .fg(Color::DarkGray)
              .add_modifier(Modifier::CROSSED_OUT),
          ),
        ]),
      };
      ListItem::new(line)
    })
    .collect();

  draw_list(f, area, panel("Combinados"), items, app.cursor);
}

pub fn draw_more(f: &mut Frame, area: Rect, app: &App) {
  let snap = app.household.snapshot();
  let items = vec![
    ListItem::new(Line::from(vec![
      Span::raw("Receitas  "),
      dim(format!("({})", snap.recipes.len())),
    ])),
    ListItem::new(Line::from(vec![
      Span::raw("Combinados  "),
      dim(format!("({})", snap.agreements.len())),
    ])),
  ];
  draw_list(f, area, panel("Mais"), items, app.cursor);
}
