//! Appointments in chronological order.

use hearth_core::{model::AppointmentType, views};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Style},
  text::{Line, Span},
  widgets::ListItem,
};

use super::{dim, draw_list, panel};
use crate::app::App;

fn colour(kind: AppointmentType) -> Color {
  match kind {
    AppointmentType::Trabalho => Color::Blue,
    AppointmentType::Casa => Color::Green,
    AppointmentType::Criancas => Color::Yellow,
    AppointmentType::Casal => Color::Magenta,
  }
}

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let snap = app.household.snapshot();
  let items: Vec<ListItem> = views::sorted_appointments(&snap.appointments)
    .into_iter()
    .map(|a| {
      let mut spans = vec![
        Span::raw(format!("{} {}  ", a.date, a.time)),
        Span::styled(format!("{:<9}", a.kind.to_string()), Style::default().fg(colour(a.kind))),
        Span::raw(a.title.clone()),
      ];
      if let Some(place) = &a.location {
        spans.push(dim(format!("  @ {place}")));
      }
      ListItem::new(Line::from(spans))
    })
    .collect();

  draw_list(f, area, panel("Agenda"), items, app.cursor);
}
