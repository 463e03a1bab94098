//! Which screen is showing, and which bottom-bar tab that highlights.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display,
  EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Screen {
  #[default]
  Dashboard,
  Meals,
  Shopping,
  Calendar,
  Recipes,
  Agreements,
  /// Hub screen linking to recipes and agreements.
  More,
}

impl Screen {
  /// The bottom-bar tabs, left to right.
  pub const TABS: [Screen; 5] =
    [Screen::Dashboard, Screen::Meals, Screen::Shopping, Screen::Calendar, Screen::More];

  /// The tab highlighted while this screen is showing. Recipes and
  /// agreements live under "more".
  pub fn nav_tab(self) -> Screen {
    match self {
      Screen::Recipes | Screen::Agreements => Screen::More,
      other => other,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Screen::Dashboard => "Início",
      Screen::Meals => "Jantares",
      Screen::Shopping => "Lista",
      Screen::Calendar => "Agenda",
      Screen::Recipes => "Receitas",
      Screen::Agreements => "Combinados",
      Screen::More => "Mais",
    }
  }
}

/// Current-screen holder. There is no history: every navigation replaces
/// the current screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigation {
  current: Screen,
}

impl Navigation {
  pub fn new(start: Screen) -> Self { Self { current: start } }

  pub fn current(&self) -> Screen { self.current }

  pub fn highlighted_tab(&self) -> Screen { self.current.nav_tab() }

  /// Switch to `screen`. Returns `true` if the screen actually changed.
  pub fn navigate(&mut self, screen: Screen) -> bool {
    let changed = self.current != screen;
    self.current = screen;
    changed
  }
}
