//! Selectable choices.

use serde::Deserialize;
use serde::Serialize;

/// One selectable option in a list or tab strip.
///
/// Choices are identified by their `key`, which must be unique among the
/// choices of a single model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
  /// The opaque identifier for this choice.
  pub key: String,
  /// Human-readable text for this choice. Defaults to the key.
  #[serde(default)]
  pub label: String,
  /// Whether this choice refuses selection.
  #[serde(default)]
  pub disabled: bool,
  /// Marks this choice as the one that should start out active.
  ///
  /// This is only a construction hint; after construction, the model's own
  /// active index is authoritative.
  #[serde(default)]
  pub active: bool,
}

impl Choice {
  /// Creates an enabled choice whose label is its key.
  pub fn new(key: impl ToString) -> Self {
    let key = key.to_string();
    Self {
      label: key.clone(),
      key,
      disabled: false,
      active: false,
    }
  }

  /// Sets the label.
  pub fn label(mut self, label: impl ToString) -> Self {
    self.label = label.to_string();
    self
  }

  /// Sets whether this choice is disabled.
  pub fn disabled(mut self, flag: bool) -> Self {
    self.disabled = flag;
    self
  }

  /// Marks this choice as initially active.
  pub fn active(mut self, flag: bool) -> Self {
    self.active = flag;
    self
  }

  /// Returns the label, falling back to the key if it is empty.
  pub fn display_label(&self) -> &str {
    if self.label.is_empty() {
      &self.key
    } else {
      &self.label
    }
  }

  /// Returns whether this choice may be selected.
  pub fn is_selectable(&self) -> bool {
    !self.disabled
  }
}

impl From<&str> for Choice {
  fn from(key: &str) -> Self {
    Self::new(key)
  }
}

impl From<String> for Choice {
  fn from(key: String) -> Self {
    Self::new(key)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builder() {
    let c = Choice::new("fire").label("Fire").disabled(true);
    assert_eq!(c.key, "fire");
    assert_eq!(c.display_label(), "Fire");
    assert!(!c.is_selectable());
    assert!(!c.active);
  }

  #[test]
  fn label_defaults_to_key() {
    let c: Choice = serde_json::from_str(r#"{"key": "water"}"#).unwrap();
    assert_eq!(c.display_label(), "water");
    assert!(c.is_selectable());
    assert_eq!(Choice::from("grass").label, "grass");
  }
}
