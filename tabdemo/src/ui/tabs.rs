//! Tabbed views.

use std::convert::TryFrom;
use std::iter;

use crossterm::event::KeyCode;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use tui::layout::Rect;
use tui::style::Style;
use tui::text::Span;
use tui::text::Spans;
use tui::text::Text;
use tui::widgets::Block;
use tui::widgets::Borders;
use tui::widgets::Paragraph;
use tui::widgets::Widget;
use tui::widgets::Wrap;

use tabset::Direction;
use tabset::LinkedPanelSwitcher;

use crate::ui::component::Component;
use crate::ui::component::Event;
use crate::ui::component::EventArgs;
use crate::ui::component::RenderArgs;

/// Height of the tab strip itself; the panel is drawn underneath.
const STRIP_HEIGHT: u16 = 3;

/// A tab strip over a [`LinkedPanelSwitcher`], with the active panel's text
/// drawn below it.
#[derive(Debug)]
pub struct WindowTabs {
  switcher: LinkedPanelSwitcher<String>,
  rendered_boundaries: Vec<u16>,
  strip_rect: Rect,
}

impl WindowTabs {
  pub fn new(switcher: LinkedPanelSwitcher<String>) -> Self {
    Self {
      switcher,
      rendered_boundaries: Vec::new(),
      strip_rect: Rect::default(),
    }
  }

  pub fn switcher(&self) -> &LinkedPanelSwitcher<String> {
    &self.switcher
  }

  /// Shows or hides the tabs and their panels.
  pub fn toggle_visibility(&mut self) {
    if self.switcher.is_visible() {
      self.switcher.hide();
    } else {
      self.switcher.show();
    }
  }

  /// Returns which tab a click at `column` landed on.
  fn tab_at(&self, column: u16) -> Option<usize> {
    let len = self.rendered_boundaries.len();
    match self.rendered_boundaries.binary_search(&column) {
      Ok(index) if index + 1 < len => Some(index),
      Err(index) if index > 0 && index < len => Some(index - 1),
      _ => None,
    }
  }

  fn render_strip(&mut self, args: &mut RenderArgs, rect: Rect) {
    let style = args.base_style();
    let selected = style.patch(args.style_sheet.selected);
    let active = self.switcher.model().active_index();
    let count = self.switcher.model().len();

    // What we're going for:
    //    ▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁
    //   ╱  Bonk ╱  Foo  ╲ Bar  ╲ Baz  ╲
    // ▔▔▔▔▔▔▔▔▔▔         ▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔
    //
    // With nothing active, every tab leans right and the baseline is unbroken.

    self.rendered_boundaries.clear();
    self.rendered_boundaries.push(rect.x + 2);
    let mut top = vec![Span::styled("  ", style)];
    let mut middle = vec![Span::styled("  ", style)];
    let mut bottom = vec![Span::styled("▔▔", style)];
    for (i, choice) in self.switcher.model().choices().iter().enumerate() {
      let label = choice.display_label();
      let label_style = if choice.disabled {
        style.patch(args.style_sheet.disabled)
      } else {
        style
      };
      let is_last = i + 1 == count;

      let (span, top_bar, bottom_bar) = match active {
        Some(a) if i < a => {
          let span = Span::styled(format!("╱  {} ", label), label_style);
          let width = span.width();
          let lead = if i == 0 { ' ' } else { '▁' };
          let top_bar = iter::once(lead)
            .chain(iter::repeat('▁').take(width - 1))
            .collect::<String>();
          (span, Span::styled(top_bar, style), bar('▔', width, style))
        }
        Some(a) if i == a => {
          let span = Span::styled(format!("╱  {}  ╲", label), selected);
          let width = span.width();
          let lead = if i == 0 { ' ' } else { '▁' };
          let tail = if is_last { ' ' } else { '▁' };
          let top_bar = iter::once(lead)
            .chain(iter::repeat('▁').take(width - 2))
            .chain(iter::once(tail))
            .collect::<String>();
          (span, Span::styled(top_bar, selected), bar(' ', width, selected))
        }
        _ => {
          let span = Span::styled(format!(" {}  ╲", label), label_style);
          let width = span.width();
          let tail = if is_last { ' ' } else { '▁' };
          let top_bar = iter::repeat('▁')
            .take(width - 1)
            .chain(iter::once(tail))
            .collect::<String>();
          (span, Span::styled(top_bar, style), bar('▔', width, style))
        }
      };

      let last = self.rendered_boundaries.last().copied().unwrap_or_default();
      let width = u16::try_from(span.width()).unwrap_or(u16::MAX);
      self.rendered_boundaries.push(last.saturating_add(width));
      top.push(top_bar);
      middle.push(span);
      bottom.push(bottom_bar);
    }

    let rest_len = (rect.width as usize)
      .saturating_sub(bottom.iter().map(|s| s.width()).sum());
    bottom.push(bar('▔', rest_len, style));

    let flavor = if self.switcher.model().is_required() {
      "required"
    } else {
      "optional"
    };
    let spacer = iter::repeat(' ')
      .take(rest_len.saturating_sub(flavor.len() + 1).max(1))
      .collect::<String>();
    middle.push(Span::styled(spacer, style));
    middle.push(Span::styled(flavor, style.patch(args.style_sheet.disabled)));

    Paragraph::new(Text::from(vec![
      Spans::from(top),
      Spans::from(middle),
      Spans::from(bottom),
    ]))
    .render(rect, args.output);
  }

  fn render_panel(&mut self, args: &mut RenderArgs, rect: Rect) {
    let style = args.base_style();
    let text = match (self.switcher.active_panel(), self.switcher.model().active()) {
      (Some(panel), _) => Span::styled(panel.clone(), style),
      (None, Some(choice)) => Span::styled(
        format!("{} has no panel.", choice.display_label()),
        style.patch(args.style_sheet.disabled),
      ),
      (None, None) => Span::styled(
        "Nothing selected.",
        style.patch(args.style_sheet.disabled),
      ),
    };

    let block = Block::default()
      .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
      .border_style(style);
    Paragraph::new(Spans::from(text))
      .block(block)
      .wrap(Wrap { trim: true })
      .render(rect, args.output);
  }
}

fn bar(c: char, width: usize, style: Style) -> Span<'static> {
  Span::styled(iter::repeat(c).take(width).collect::<String>(), style)
}

impl Component for WindowTabs {
  fn wants_focus(&self) -> bool {
    self.switcher.is_visible()
  }

  fn process_event(&mut self, args: &mut EventArgs) {
    if !self.switcher.is_visible() {
      return;
    }

    match args.event {
      Event::Key(k) => {
        let direction = match k.code {
          KeyCode::Left => Direction::Previous,
          KeyCode::Right => Direction::Next,
          _ => return,
        };
        match self.switcher.navigate(direction) {
          Ok(true) => args.commands.claim(),
          Ok(false) => {}
          Err(e) => args.commands.report(e),
        }
      }

      Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        ..
      }) => {
        if row < self.strip_rect.y
          || row >= self.strip_rect.y + self.strip_rect.height
        {
          return;
        }

        if let Some(index) = self.tab_at(column) {
          if let Err(e) = self.switcher.select_at(index) {
            args.commands.report(e);
          }
          args.commands.claim();
        }
      }
      _ => {}
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    if args.rect.width == 0 || args.rect.height == 0 {
      return;
    }

    if !self.switcher.is_visible() {
      self.rendered_boundaries.clear();
      Paragraph::new(Spans::from(Span::styled(
        "Tabs hidden; press h to show them.",
        args.base_style().patch(args.style_sheet.disabled),
      )))
      .render(args.rect, args.output);
      return;
    }

    let strip_height = STRIP_HEIGHT.min(args.rect.height);
    let strip = Rect::new(args.rect.x, args.rect.y, args.rect.width, strip_height);
    let panel = Rect::new(
      args.rect.x,
      args.rect.y + strip_height,
      args.rect.width,
      args.rect.height - strip_height,
    );

    self.strip_rect = strip;
    self.render_strip(args, strip);
    self.render_panel(args, panel);
  }
}
