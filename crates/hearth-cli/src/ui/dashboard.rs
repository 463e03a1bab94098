//! Home screen: today's dinner, the next appointment, and open counts.

use hearth_core::views::Dashboard;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::Paragraph,
};

use super::{dim, panel};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let board = Dashboard::build(app.household.snapshot(), app.today);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(5),
      Constraint::Length(4),
      Constraint::Min(3),
    ])
    .split(area);

  // Tonight.
  let dinner = match board.todays_meal {
    Some(meal) => {
      let mut lines = vec![
        Line::from(Span::styled(
          meal.title.clone(),
          Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
          dim(format!("{} · ", meal.kind.label())),
          Span::raw(format!("quem cozinha: {}", meal.cook)),
        ]),
      ];
      if let Some(recipe) = board.todays_recipe {
        lines.push(Line::from(dim(format!("receita: {recipe}"))));
      }
      lines
    }
    None => vec![Line::from(dim("Nada planejado. [m] para planejar."))],
  };
  f.render_widget(
    Paragraph::new(dinner).block(panel(format!("Jantar de {}", board.today.name()))),
    rows[0],
  );

  // Next appointment.
  let next = match board.next_appointment {
    Some(a) => vec![
      Line::from(Span::styled(
        a.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
      )),
      Line::from(dim(format!("{} {} · {}", a.date, a.time, a.kind))),
    ],
    None => vec![Line::from(dim("Agenda livre."))],
  };
  f.render_widget(Paragraph::new(next).block(panel("Próximo compromisso")), rows[1]);

  // Counters.
  let counter = |n: usize, what: &str| {
    let style = if n > 0 {
      Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Green)
    };
    Line::from(vec![Span::styled(format!("{n:>3} "), style), Span::raw(what.to_string())])
  };
  f.render_widget(
    Paragraph::new(vec![
      counter(board.pending_items, "itens na lista de compras"),
      counter(board.pending_agreements, "combinados pendentes"),
    ])
    .block(panel("Pendências")),
    rows[2],
  );
}
