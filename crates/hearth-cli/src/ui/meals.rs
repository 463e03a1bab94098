//! Weekly dinner planner, plus the suggestion panel.

use hearth_core::{model::Day, views};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{ListItem, Paragraph, Wrap},
};

use super::{dim, draw_list, panel};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
    .split(area);

  let snap = app.household.snapshot();
  let items: Vec<ListItem> = Day::all()
    .map(|day| {
      let marker = if day == app.today { "▸" } else { " " };
      let mut spans = vec![Span::raw(format!("{marker} {:<8} ", day.name()))];
      match views::meal_for_day(&snap.meals, day) {
        Some(meal) => {
          spans.push(Span::styled(
            meal.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
          ));
          spans.push(dim(format!("  {} · {}", meal.kind.label(), meal.cook)));
          if let Some(recipe) = views::recipe_label(&snap.recipes, meal) {
            spans.push(dim(format!(" · {recipe}")));
          }
          if meal.ingredients_ready {
            spans.push(Span::styled(" ✓", Style::default().fg(Color::Green)));
          }
        }
        None => spans.push(dim("—")),
      }
      ListItem::new(Line::from(spans))
    })
    .collect();

  draw_list(f, cols[0], panel("Jantares da semana"), items, app.cursor);
  draw_suggestions(f, cols[1], app);
}

fn draw_suggestions(f: &mut Frame, area: Rect, app: &App) {
  let lines = if app.is_fetching() {
    vec![Line::from(dim("Pensando…"))]
  } else if let Some(s) = app.suggestions.get(app.suggestion_cursor) {
    let mut lines = vec![
      Line::from(Span::styled(
        format!("{}/{}  {}", app.suggestion_cursor + 1, app.suggestions.len(), s.name),
        Style::default().add_modifier(Modifier::BOLD),
      )),
      Line::from(s.description.clone()),
      Line::from(""),
    ];
    if !s.ingredients_needed.is_empty() {
      lines.push(Line::from(dim("Falta comprar:")));
      lines.extend(s.ingredients_needed.iter().map(|i| Line::from(format!("  • {i}"))));
    }
    lines
  } else {
    vec![Line::from(dim("[g] pedir ideias com o que tem em casa."))]
  };

  f.render_widget(
    Paragraph::new(lines)
      .block(panel("Sugestões"))
      .wrap(Wrap { trim: true }),
    area,
  );
}
