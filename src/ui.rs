//! The keyboard and pointer interaction state machine of the widget.
//!
//! `Interaction` knows nothing about a DOM. Hosts translate their events
//! into [`UiEvent`]s, feed them to [`Interaction::handle`] and apply the
//! returned [`Effect`]s in order. This keeps the behaviour testable and lets
//! the same machine drive a browser binding or a terminal front-end.

use serde::{Deserialize, Serialize};

/// Whether the result modal is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalState {
  #[default]
  Closed,
  Open,
}

/// Which element holds keyboard focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Focus {
  #[default]
  Input,
  /// A rendered result row, by position.
  Row(usize),
}

/// Keys the widget reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
  Escape,
  ArrowUp,
  ArrowDown,
  Enter,
  Backspace,
  Delete,
  /// The global `/` shortcut.
  Slash,
  Other(String),
}

impl Key {
  /// Parses a DOM `KeyboardEvent.key` value.
  pub fn from_name(name: &str) -> Self {
    match name {
      "Escape" | "Esc" => Key::Escape,
      "ArrowUp" | "Up" => Key::ArrowUp,
      "ArrowDown" | "Down" => Key::ArrowDown,
      "Enter" => Key::Enter,
      "Backspace" => Key::Backspace,
      "Delete" | "Del" => Key::Delete,
      "/" => Key::Slash,
      other => Key::Other(other.to_string()),
    }
  }
}

/// Where a page-level key press originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyTarget {
  /// The widget's own text input.
  SearchInput,
  /// Some other text input on the page.
  OtherInput,
  /// Anything else.
  Page,
}

/// Something that happened in the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
  /// The input value changed (typing, paste, programmatic fill).
  Input(String),
  /// The native clear affordance of a search input was used.
  Clear,
  /// The input was clicked.
  ClickInput,
  /// Something other than the input was clicked.
  ClickOutside,
  /// A key was pressed while the input had focus.
  InputKey(Key),
  /// A key was pressed while a result row had focus.
  RowKey { row: usize, key: Key },
  /// A key press that bubbled up to the page.
  GlobalKey { key: Key, target: KeyTarget },
}

/// An instruction for the host, applied in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
  /// Suppress the browser's default action for the event.
  PreventDefault,
  /// Replace the result list markup.
  Render(String),
  ShowModal { fullscreen: bool },
  HideModal,
  /// Stop the page from scrolling behind the open modal.
  LockScroll,
  UnlockScroll,
  /// Set `aria-expanded` on the input.
  SetExpanded(bool),
  SetInputValue(String),
  FocusInput,
  FocusRow(usize),
  /// Set `aria-selected` on a row.
  SelectRow { row: usize, selected: bool },
  /// Follow a result link.
  Navigate(String),
}

/// The `closed`/`open` machine plus focus and the rendered rows.
///
/// Initial state is closed with focus on the input. The machine has no
/// terminal state.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
  state: ModalState,
  focus: Focus,
  value: String,
  /// URL of each rendered row.
  rows: Vec<Option<String>>,
  fullscreen: bool,
}

impl Interaction {
  pub fn new(fullscreen: bool) -> Self {
    Self {
      fullscreen,
      ..Self::default()
    }
  }

  pub fn state(&self) -> ModalState {
    self.state
  }

  pub fn focus(&self) -> Focus {
    self.focus
  }

  pub fn value(&self) -> &str {
    &self.value
  }

  pub fn is_open(&self) -> bool {
    self.state == ModalState::Open
  }

  /// Records the rows the host just rendered.
  pub fn set_rows(&mut self, rows: Vec<Option<String>>) {
    self.rows = rows;
    if let Focus::Row(row) = self.focus {
      if row >= self.rows.len() {
        self.focus = Focus::Input;
      }
    }
  }

  /// Advances the machine and returns what the host should do.
  pub fn handle(&mut self, event: UiEvent) -> Vec<Effect> {
    let mut effects = Vec::new();

    match event {
      UiEvent::Input(value) => {
        self.value = value;
        self.focus = Focus::Input;
        if !self.is_open() {
          self.open(&mut effects);
        }
      }

      UiEvent::Clear => {
        self.clear_search(&mut effects);
        self.close(&mut effects);
      }

      UiEvent::ClickInput => self.open(&mut effects),

      UiEvent::ClickOutside => self.close(&mut effects),

      UiEvent::InputKey(key) => match key {
        Key::Escape => {
          effects.push(Effect::PreventDefault);
          self.clear_search(&mut effects);
          self.close(&mut effects);
        }
        Key::ArrowDown | Key::Enter => {
          effects.push(Effect::PreventDefault);
          if self.is_open() && !self.rows.is_empty() {
            self.move_to(Some(0), &mut effects);
          }
        }
        _ => {}
      },

      UiEvent::RowKey { row, key } => {
        if !self.is_open() || row >= self.rows.len() {
          return effects;
        }
        self.focus = Focus::Row(row);
        effects.push(Effect::PreventDefault);

        match key {
          Key::Escape => {
            self.clear_search(&mut effects);
            self.close(&mut effects);
            self.move_to(None, &mut effects);
          }
          Key::Backspace | Key::Delete => self.move_to(None, &mut effects),
          Key::ArrowUp => {
            let target = row.checked_sub(1);
            self.move_to(target, &mut effects);
          }
          Key::ArrowDown => {
            if row + 1 < self.rows.len() {
              self.move_to(Some(row + 1), &mut effects);
            }
          }
          Key::Enter => {
            if let Some(url) = &self.rows[row] {
              effects.push(Effect::Navigate(url.clone()));
            }
          }
          _ => {}
        }
      }

      UiEvent::GlobalKey { key: Key::Slash, target } => {
        if target == KeyTarget::OtherInput {
          return effects;
        }
        effects.push(Effect::PreventDefault);
        if self.is_open() {
          self.close(&mut effects);
        } else {
          self.move_to(None, &mut effects);
          self.open(&mut effects);
        }
      }

      UiEvent::GlobalKey { .. } => {}
    }

    effects
  }

  /// Opens the modal unless it is open already or the input is empty.
  fn open(&mut self, effects: &mut Vec<Effect>) {
    if self.is_open() || self.value.is_empty() {
      return;
    }
    self.state = ModalState::Open;
    effects.push(Effect::ShowModal {
      fullscreen: self.fullscreen,
    });
    effects.push(Effect::LockScroll);
    effects.push(Effect::SetExpanded(true));
  }

  fn close(&mut self, effects: &mut Vec<Effect>) {
    if !self.is_open() {
      return;
    }
    self.state = ModalState::Closed;
    effects.push(Effect::HideModal);
    effects.push(Effect::UnlockScroll);
    effects.push(Effect::SetExpanded(false));
  }

  /// Empties the input and the result list.
  fn clear_search(&mut self, effects: &mut Vec<Effect>) {
    self.value.clear();
    self.rows.clear();
    effects.push(Effect::Render(String::new()));
    effects.push(Effect::SetInputValue(String::new()));
  }

  /// Moves focus to a row, or to the input for `None`, updating selection.
  fn move_to(&mut self, target: Option<usize>, effects: &mut Vec<Effect>) {
    let previous = self.focus;
    match target {
      Some(row) => {
        effects.push(Effect::FocusRow(row));
        effects.push(Effect::SelectRow {
          row,
          selected: true,
        });
        self.focus = Focus::Row(row);
      }
      None => {
        effects.push(Effect::FocusInput);
        self.focus = Focus::Input;
      }
    }
    if let Focus::Row(old) = previous {
      if Some(old) != target && old < self.rows.len() {
        effects.push(Effect::SelectRow {
          row: old,
          selected: false,
        });
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_key_names() {
    assert_eq!(Key::from_name("ArrowDown"), Key::ArrowDown);
    assert_eq!(Key::from_name("/"), Key::Slash);
    assert_eq!(Key::from_name("a"), Key::Other("a".into()));
  }

  #[test]
  fn test_never_opens_empty() {
    let mut ui = Interaction::default();
    assert!(ui.handle(UiEvent::Input(String::new())).is_empty());
    assert!(ui.handle(UiEvent::ClickInput).is_empty());
    assert_eq!(ui.state(), ModalState::Closed);
  }

  #[test]
  fn test_open_then_click_outside() {
    let mut ui = Interaction::new(true);
    let effects = ui.handle(UiEvent::Input("ru".into()));
    assert_eq!(
      effects,
      vec![
        Effect::ShowModal { fullscreen: true },
        Effect::LockScroll,
        Effect::SetExpanded(true),
      ]
    );
    assert!(ui.is_open());

    let effects = ui.handle(UiEvent::ClickOutside);
    assert_eq!(
      effects,
      vec![Effect::HideModal, Effect::UnlockScroll, Effect::SetExpanded(false)]
    );
    assert_eq!(ui.state(), ModalState::Closed);
    assert_eq!(ui.value(), "ru");
  }
}
