//! The root app type.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crossterm::event::KeyCode;
use crossterm::event::MouseButton;
use crossterm::event::MouseEventKind;

use tui::backend::Backend;
use tui::buffer::Buffer;
use tui::layout::Constraint;
use tui::layout::Direction;
use tui::layout::Layout;
use tui::layout::Rect;
use tui::text::Span;
use tui::text::Spans;
use tui::widgets::Block;
use tui::widgets::Borders;
use tui::widgets::Paragraph;
use tui::widgets::Widget;
use tui::Frame;

use tabset::Bus;
use tabset::Notification;
use tabset::WidgetConfig;

use crate::ui::component::CommandBuffer;
use crate::ui::component::Component;
use crate::ui::component::Event;
use crate::ui::component::EventArgs;
use crate::ui::component::RenderArgs;
use crate::ui::component::StyleSheet;
use crate::ui::list::SelectList;
use crate::ui::tabs::WindowTabs;
use crate::util;

/// The widget description used when no `--config` is given.
pub const SAMPLE: &str = include_str!("../sample.json");

const LOG_LINES: usize = 6;
const HELP: &str =
  "tab: focus  ←/→: tabs  ↑/↓ enter: list  h: hide tabs  q: quit";

type Log = Rc<RefCell<VecDeque<String>>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Focus {
  List,
  Tabs,
}

/// The whole demo: a select list, a tab strip, and a notification log.
#[derive(Debug)]
pub struct App {
  list: SelectList,
  tabs: WindowTabs,
  focus: Focus,
  list_rect: Rect,
  tabs_rect: Rect,
  log: Log,
  status: Option<String>,
}

impl App {
  /// Builds both widgets from the same description.
  pub fn new(config: &WidgetConfig) -> Self {
    let log = Log::default();
    let list = config.build_list(recorder(&log, "list"));
    let tabs = config.build_tabs(recorder(&log, "tabs"));
    Self {
      list: SelectList::new(list).title("Select"),
      tabs: WindowTabs::new(tabs),
      focus: Focus::Tabs,
      list_rect: Rect::default(),
      tabs_rect: Rect::default(),
      log,
      status: None,
    }
  }

  fn move_focus(&mut self) {
    let next = match self.focus {
      Focus::List => Focus::Tabs,
      Focus::Tabs => Focus::List,
    };
    let wants = match next {
      Focus::List => self.list.wants_focus(),
      Focus::Tabs => self.tabs.wants_focus(),
    };
    if wants {
      self.focus = next;
    }
  }

  /// Propagates a terminal event to the widget it is meant for.
  ///
  /// Key presses go to the focused widget; clicks go to the widget under the
  /// pointer, which also gains focus.
  pub fn process_event(&mut self, e: crossterm::event::Event) {
    let event = match e {
      crossterm::event::Event::Key(k) => match k.code {
        KeyCode::Tab | KeyCode::BackTab => return self.move_focus(),
        KeyCode::Char('h') => {
          self.tabs.toggle_visibility();
          if !self.tabs.wants_focus() && self.list.wants_focus() {
            self.focus = Focus::List;
          }
          return;
        }
        _ => Event::Key(k),
      },
      crossterm::event::Event::Mouse(m) => {
        if m.kind == MouseEventKind::Down(MouseButton::Left) {
          if util::rect_contains(self.list_rect, m.column, m.row) {
            self.focus = Focus::List;
          } else if util::rect_contains(self.tabs_rect, m.column, m.row)
            && self.tabs.wants_focus()
          {
            self.focus = Focus::Tabs;
          }
        }
        Event::Mouse(m)
      }
      _ => return,
    };

    let mut commands = CommandBuffer::new();
    let rect = match self.focus {
      Focus::List => self.list_rect,
      Focus::Tabs => self.tabs_rect,
    };
    let component: &mut dyn Component = match self.focus {
      Focus::List => &mut self.list,
      Focus::Tabs => &mut self.tabs,
    };
    component.process_event(&mut EventArgs {
      event,
      rect,
      commands: &mut commands,
    });

    tracing::debug!(
      list = ?self.list.model().value(),
      panel = ?self.tabs.switcher().active_panel_key(),
      claimed = commands.is_claimed(),
      "processed event"
    );
    if let Some(status) = commands.take_status() {
      tracing::info!(%status, "rejected input");
      self.status = Some(status);
    } else if commands.is_claimed() {
      self.status = None;
    }
  }

  /// Renders the app onto a `Frame`.
  pub fn render<B: Backend>(&mut self, f: &mut Frame<B>) {
    struct AppAsWidget<'a>(&'a mut App);
    impl Widget for AppAsWidget<'_> {
      fn render(self, rect: Rect, buf: &mut Buffer) {
        self.0.draw(rect, buf);
      }
    }

    let size = f.size();
    f.render_widget(AppAsWidget(self), size);
  }

  fn draw(&mut self, rect: Rect, buf: &mut Buffer) {
    let style_sheet = StyleSheet::default();
    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints(vec![
        Constraint::Min(5),
        Constraint::Length(LOG_LINES as u16 + 2),
        Constraint::Length(1),
      ])
      .split(rect);
    let columns = Layout::default()
      .direction(Direction::Horizontal)
      .constraints(vec![Constraint::Percentage(30), Constraint::Percentage(70)])
      .split(rows[0]);

    self.list_rect = columns[0];
    self.tabs_rect = columns[1];

    self.list.render(&mut RenderArgs {
      is_focused: self.focus == Focus::List,
      rect: self.list_rect,
      output: buf,
      style_sheet,
    });
    self.tabs.render(&mut RenderArgs {
      is_focused: self.focus == Focus::Tabs,
      rect: self.tabs_rect,
      output: buf,
      style_sheet,
    });

    let lines = self
      .log
      .borrow()
      .iter()
      .map(|line| Spans::from(Span::styled(line.clone(), style_sheet.unfocused)))
      .collect::<Vec<_>>();
    Paragraph::new(lines)
      .block(
        Block::default()
          .borders(Borders::ALL)
          .border_style(style_sheet.unfocused)
          .title(" Notifications "),
      )
      .render(rows[1], buf);

    let status = match &self.status {
      Some(status) => Span::styled(status.clone(), style_sheet.selected),
      None => Span::styled(HELP, style_sheet.unfocused),
    };
    Paragraph::new(Spans::from(status)).render(rows[2], buf);
  }
}

/// Returns a bus that appends every notification, as JSON, to `log`.
fn recorder(log: &Log, source: &'static str) -> Bus<Notification> {
  let log = Rc::clone(log);
  Bus::new().with(move |n: &Notification| {
    let line = match serde_json::to_string(n) {
      Ok(json) => format!("{}: {}", source, json),
      Err(e) => format!("{}: <{}>", source, e),
    };

    let mut log = log.borrow_mut();
    if log.len() == LOG_LINES {
      log.pop_front();
    }
    log.push_back(line);
  })
}
