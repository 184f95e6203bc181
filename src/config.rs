//! Declarative widget descriptions, loaded from JSON.
//!
//! A description looks like this:
//!
//! ```json
//! {
//!   "options": { "required": true, "keyboard_navigation": true },
//!   "choices": [
//!     { "key": "stats", "label": "Stats" },
//!     { "key": "moves", "label": "Moves", "disabled": true }
//!   ],
//!   "panels": { "stats": "HP 45 / Atk 49 / Def 49" }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::choice::Choice;
use crate::notify::Bus;
use crate::notify::Notification;
use crate::select::Options;
use crate::select::SelectionModel;
use crate::tabs::LinkedPanelSwitcher;
use crate::Error;

/// A description of a select list or tab strip.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
  /// Behavior flags.
  #[serde(default)]
  pub options: Options,
  /// The choices, in display order.
  #[serde(default)]
  pub choices: Vec<Choice>,
  /// Panel bodies, keyed by choice key.
  #[serde(default)]
  pub panels: BTreeMap<String, String>,
}

impl WidgetConfig {
  /// Parses a description from a JSON string.
  pub fn from_json_str(json: &str) -> Result<Self, Error> {
    Ok(serde_json::from_str(json)?)
  }

  /// Parses a description from a reader producing JSON.
  pub fn from_reader(reader: impl io::Read) -> Result<Self, Error> {
    Ok(serde_json::from_reader(reader)?)
  }

  /// Loads a description from a JSON file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
    let file = File::open(path)?;
    Self::from_reader(BufReader::new(file))
  }

  /// Builds a select list from this description, ignoring any panels.
  pub fn build_list(&self, bus: Bus<Notification>) -> SelectionModel {
    SelectionModel::with_bus(self.choices.iter().cloned(), self.options, bus)
  }

  /// Builds a panel switcher from this description.
  pub fn build_tabs(&self, bus: Bus<Notification>) -> LinkedPanelSwitcher<String> {
    LinkedPanelSwitcher::with_bus(
      self.choices.iter().cloned(),
      self.panels.clone(),
      self.options,
      bus,
    )
  }
}
