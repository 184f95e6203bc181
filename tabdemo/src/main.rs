//! A terminal playground for `tabset` widgets.

use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::Parser;

use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::KeyCode;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;

use tui::backend::Backend;
use tui::backend::CrosstermBackend;
use tui::Terminal;

use tabset::WidgetConfig;

mod app;
mod logging;
mod ui;
mod util;

/// Plays with a select list and a tab strip in the terminal.
#[derive(Debug, Parser)]
#[command(name = "tabdemo", version)]
struct Args {
  /// A JSON widget description to load instead of the built-in sample.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Where to write logs.
  #[arg(long, default_value = "tabdemo.log")]
  log: PathBuf,

  /// Allow deselecting the active choice, whatever the description says.
  #[arg(long)]
  optional: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
  let args = Args::parse();
  logging::init(&args.log)?;

  let mut config = match &args.config {
    Some(path) => WidgetConfig::load(path)?,
    None => WidgetConfig::from_json_str(app::SAMPLE)?,
  };
  if args.optional {
    config.options.required = false;
  }
  tracing::info!(
    choices = config.choices.len(),
    panels = config.panels.len(),
    required = config.options.required,
    "starting"
  );

  let mut app = app::App::new(&config);

  enable_raw_mode()?;
  execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
  let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

  let result = run(&mut terminal, &mut app);

  disable_raw_mode()?;
  execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
  terminal.show_cursor()?;

  if let Err(e) = &result {
    tracing::error!(error = %e, "exiting on error");
  }
  result
}

fn run<B: Backend>(
  terminal: &mut Terminal<B>,
  app: &mut app::App,
) -> Result<(), Box<dyn Error>> {
  loop {
    terminal.draw(|f| app.render(f))?;

    let e = event::read()?;
    if let event::Event::Key(k) = e {
      match k.code {
        KeyCode::Char('c') if k.modifiers == KeyModifiers::CONTROL => {
          return Ok(())
        }
        KeyCode::Char('q') => return Ok(()),
        _ => {}
      }
    }
    app.process_event(e);
  }
}
