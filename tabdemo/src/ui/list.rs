//! Select lists.

use crossterm::event::KeyCode;
use crossterm::event::MouseButton;
use crossterm::event::MouseEventKind;

use tui::layout::Rect;
use tui::text::Span;
use tui::text::Spans;
use tui::widgets::Block;
use tui::widgets::Borders;
use tui::widgets::Widget;

use tabset::SelectionModel;

use crate::ui::component::CommandBuffer;
use crate::ui::component::Component;
use crate::ui::component::Event;
use crate::ui::component::EventArgs;
use crate::ui::component::RenderArgs;
use crate::util;

/// A bordered, vertical select list over a [`SelectionModel`].
///
/// Up and down move a cursor; enter or space selects the choice under it.
/// Clicking a row selects it directly.
#[derive(Debug)]
pub struct SelectList {
  model: SelectionModel,
  title: String,
  cursor: usize,
  offset: usize,
  // The rectangle the rows were last drawn into, for mapping clicks.
  rows_rect: Rect,
}

impl SelectList {
  pub fn new(model: SelectionModel) -> Self {
    let cursor = model.active_index().unwrap_or(0);
    Self {
      model,
      title: "Select".to_string(),
      cursor,
      offset: 0,
      rows_rect: Rect::default(),
    }
  }

  pub fn title(mut self, title: impl ToString) -> Self {
    self.title = title.to_string();
    self
  }

  pub fn model(&self) -> &SelectionModel {
    &self.model
  }

  fn select_cursor(&mut self, commands: &mut CommandBuffer) {
    if let Err(e) = self.model.select_at(self.cursor) {
      commands.report(e);
    }
    commands.claim();
  }
}

impl Component for SelectList {
  fn wants_focus(&self) -> bool {
    !self.model.is_empty()
  }

  fn process_event(&mut self, args: &mut EventArgs) {
    match args.event {
      Event::Key(k) => match k.code {
        KeyCode::Up => {
          if self.cursor > 0 {
            self.cursor -= 1;
            args.commands.claim();
          }
        }
        KeyCode::Down => {
          if self.cursor + 1 < self.model.len() {
            self.cursor += 1;
            args.commands.claim();
          }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
          self.select_cursor(args.commands)
        }
        _ => {}
      },

      Event::Mouse(m) => {
        if m.kind != MouseEventKind::Down(MouseButton::Left)
          || !util::rect_contains(self.rows_rect, m.column, m.row)
        {
          return;
        }

        let index = self.offset + (m.row - self.rows_rect.y) as usize;
        if index < self.model.len() {
          self.cursor = index;
          self.select_cursor(args.commands);
        }
      }
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    if args.rect.width == 0 || args.rect.height == 0 {
      return;
    }

    let style = args.base_style();
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(style)
      .title(Span::styled(format!(" {} ", self.title), style));
    let inner = block.inner(args.rect);
    block.render(args.rect, args.output);
    self.rows_rect = inner;

    let height = inner.height as usize;
    self.offset = util::scroll_to(self.offset, self.cursor, height);

    for (row, (i, choice)) in self
      .model
      .choices()
      .iter()
      .enumerate()
      .skip(self.offset)
      .take(height)
      .enumerate()
    {
      let mut item_style = if choice.disabled {
        style.patch(args.style_sheet.disabled)
      } else if choice.active {
        style.patch(args.style_sheet.selected)
      } else {
        style
      };
      if args.is_focused && i == self.cursor {
        item_style = item_style.patch(args.style_sheet.cursor);
      }

      let marker = if choice.active { "● " } else { "○ " };
      let line = Spans::from(vec![
        Span::styled(marker, item_style),
        Span::styled(choice.display_label().to_string(), item_style),
      ]);
      args
        .output
        .set_spans(inner.x, inner.y + row as u16, &line, inner.width);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crossterm::event::KeyEvent;
  use crossterm::event::KeyModifiers;
  use crossterm::event::MouseEvent;

  use tui::buffer::Buffer;

  use tabset::Choice;
  use tabset::Options;

  use crate::ui::component::StyleSheet;

  fn list(required: bool) -> SelectList {
    let choices = vec![
      Choice::new("a").label("Alpha"),
      Choice::new("b").label("Beta").disabled(true),
      Choice::new("c").label("Gamma"),
    ];
    SelectList::new(SelectionModel::new(choices, Options::required(required)))
  }

  fn key(list: &mut SelectList, code: KeyCode) -> CommandBuffer {
    let mut commands = CommandBuffer::new();
    list.process_event(&mut EventArgs {
      event: Event::Key(KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
      }),
      rect: Rect::default(),
      commands: &mut commands,
    });
    commands
  }

  fn draw(list: &mut SelectList, rect: Rect) -> Buffer {
    let mut buf = Buffer::empty(rect);
    list.render(&mut RenderArgs {
      is_focused: true,
      rect,
      output: &mut buf,
      style_sheet: StyleSheet::default(),
    });
    buf
  }

  fn row(buf: &Buffer, y: u16) -> String {
    let area = buf.area;
    (area.x..area.x + area.width)
      .map(|x| buf.get(x, y).symbol.as_str())
      .collect()
  }

  #[test]
  fn keyboard_select() {
    let mut list = list(false);
    assert_eq!(list.model().value(), None);

    key(&mut list, KeyCode::Down);
    key(&mut list, KeyCode::Down);
    let mut commands = key(&mut list, KeyCode::Enter);
    assert!(commands.is_claimed());
    assert_eq!(commands.take_status(), None);
    assert_eq!(list.model().value(), Some("c"));

    key(&mut list, KeyCode::Char(' '));
    assert_eq!(list.model().value(), None);
  }

  #[test]
  fn disabled_reports_status() {
    let mut list = list(true);
    key(&mut list, KeyCode::Down);
    let mut commands = key(&mut list, KeyCode::Enter);
    assert_eq!(
      commands.take_status().as_deref(),
      Some("cannot select `b`: choice is disabled")
    );
    assert_eq!(list.model().value(), Some("a"));
  }

  #[test]
  fn cursor_stays_in_bounds() {
    let mut list = list(true);
    assert!(!key(&mut list, KeyCode::Up).is_claimed());
    for _ in 0..5 {
      key(&mut list, KeyCode::Down);
    }
    assert_eq!(list.cursor, 2);
  }

  #[test]
  fn render_and_click() {
    let mut list = list(true);
    let rect = Rect::new(0, 0, 16, 5);
    let buf = draw(&mut list, rect);
    assert!(row(&buf, 1).contains("● Alpha"));
    assert!(row(&buf, 3).contains("○ Gamma"));

    let mut commands = CommandBuffer::new();
    list.process_event(&mut EventArgs {
      event: Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 3,
        row: 3,
        modifiers: KeyModifiers::NONE,
      }),
      rect,
      commands: &mut commands,
    });
    assert!(commands.is_claimed());
    assert_eq!(list.model().value(), Some("c"));

    let buf = draw(&mut list, rect);
    assert!(row(&buf, 3).contains("● Gamma"));
  }
}
