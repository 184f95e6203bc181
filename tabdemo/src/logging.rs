//! Log setup.
//!
//! The terminal is in raw mode while the demo runs, so logs go to a file
//! instead. Filtering follows `RUST_LOG`, e.g. `RUST_LOG=tabset=debug` to see
//! every selection change, and defaults to `info`.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Installs a global subscriber writing to `path`, truncating it first.
pub fn init(path: &Path) -> io::Result<()> {
  let file = File::create(path)?;
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .with_target(true)
    .init();
  Ok(())
}
