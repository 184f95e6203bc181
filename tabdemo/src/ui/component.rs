//! The component model shared by every widget frontend.

use std::fmt::Debug;

use crossterm::event::KeyEvent;
use crossterm::event::MouseEvent;

use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Color;
use tui::style::Modifier;
use tui::style::Style;

/// An input event routed to a component.
#[derive(Copy, Clone, Debug)]
pub enum Event {
  Key(KeyEvent),
  Mouse(MouseEvent),
}

/// A buffer for issuing commands to the app in response to an event.
///
/// Buffered commands will not take effect until event processing completes.
#[derive(Debug, Default)]
pub struct CommandBuffer {
  status: Option<String>,
  claimed: bool,
}

impl CommandBuffer {
  /// Creates an empty buffer.
  pub fn new() -> Self {
    Self::default()
  }

  /// Asks the app to show `message` on its status line.
  pub fn report(&mut self, message: impl ToString) {
    self.status = Some(message.to_string())
  }

  pub fn take_status(&mut self) -> Option<String> {
    self.status.take()
  }

  /// Claims the event being processed, so it will not be further propagated to
  /// other components.
  pub fn claim(&mut self) {
    self.claimed = true
  }

  /// Returns whether a callee has already claimed the event associated with
  /// this buffer.
  pub fn is_claimed(&self) -> bool {
    self.claimed
  }
}

#[derive(Copy, Clone, Debug)]
pub struct StyleSheet {
  pub focused: Style,
  pub unfocused: Style,
  pub selected: Style,
  pub disabled: Style,
  pub cursor: Style,
}

impl Default for StyleSheet {
  fn default() -> Self {
    StyleSheet {
      focused: Style::default().fg(Color::White),
      unfocused: Style::default().fg(Color::Gray),
      selected: Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD),
      disabled: Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM),
      cursor: Style::default().add_modifier(Modifier::REVERSED),
    }
  }
}

/// Arguments for [`Component::process_event()`].
pub struct EventArgs<'app> {
  pub event: Event,
  pub rect: Rect,
  pub commands: &'app mut CommandBuffer,
}

/// Arguments for [`Component::render()`].
pub struct RenderArgs<'app> {
  pub is_focused: bool,
  pub rect: Rect,
  pub output: &'app mut Buffer,
  pub style_sheet: StyleSheet,
}

impl RenderArgs<'_> {
  /// Returns the base style for the component being rendered.
  pub fn base_style(&self) -> Style {
    if self.is_focused {
      self.style_sheet.focused
    } else {
      self.style_sheet.unfocused
    }
  }
}

/// A component, which is like a `Widget` but which can process input and
/// owns its state between frames.
pub trait Component: Debug {
  /// Processes an event, either mutating own state or issuing a command to
  /// the app.
  fn process_event(&mut self, args: &mut EventArgs) {
    let _ = args;
  }

  /// Renders this component.
  fn render(&mut self, args: &mut RenderArgs);

  /// Returns whether this component should be given focus at all.
  fn wants_focus(&self) -> bool {
    false
  }
}
