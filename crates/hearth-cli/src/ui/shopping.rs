//! Shopping list, pending items grouped by category then completed ones.

use hearth_core::views;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::ListItem,
};

use super::{dim, draw_list, panel};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let snap = app.household.snapshot();
  let pending = views::pending_items(&snap.shopping_items).len();

  // Same order as `App::shopping_rows`, so the cursor lines up.
  let items: Vec<ListItem> = app
    .shopping_rows()
    .into_iter()
    .map(|item| {
      if item.checked {
        ListItem::new(Line::from(vec![
          Span::styled("[x] ", Style::default().fg(Color::Green)),
          Span::styled(
            item.name.clone(),
            Style::default()
              .fg(Color::DarkGray)
              .add_modifier(Modifier::CROSSED_OUT),
          ),
        ]))
      } else {
        ListItem::new(Line::from(vec![
          Span::raw("[ ] "),
          Span::raw(item.name.clone()),
          dim(format!("  {}", item.category)),
        ]))
      }
    })
    .collect();

  let title = format!(
    "Lista ({pending} pendentes) · novos em {}",
    app.category
  );
  draw_list(f, area, panel(title), items, app.cursor);
}
