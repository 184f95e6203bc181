//! Errors produced by selection widgets.

use std::fmt;
use std::io;

/// Why a selection request was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvalidReason {
  /// No choice with the requested key exists.
  Missing,
  /// The choice exists but is disabled, and disabled choices are never
  /// selectable.
  Disabled,
}

impl fmt::Display for InvalidReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Missing => f.write_str("no such choice"),
      Self::Disabled => f.write_str("choice is disabled"),
    }
  }
}

/// A widget error.
///
/// None of these are fatal: a rejected operation leaves the widget exactly as
/// it was.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
  #[error("cannot select `{key}`: {reason}")]
  InvalidChoice { key: String, reason: InvalidReason },

  #[error("key `{0}` is already bound")]
  DuplicateKey(String),

  #[error(transparent)]
  Io(#[from] io::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

impl Error {
  pub(crate) fn missing(key: &str) -> Self {
    Self::InvalidChoice {
      key: key.to_string(),
      reason: InvalidReason::Missing,
    }
  }

  pub(crate) fn disabled(key: &str) -> Self {
    Self::InvalidChoice {
      key: key.to_string(),
      reason: InvalidReason::Disabled,
    }
  }

  /// Returns true if this error is a rejected selection of any kind.
  pub fn is_invalid_choice(&self) -> bool {
    matches!(self, Self::InvalidChoice { .. })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages() {
    assert_eq!(
      Error::disabled("b").to_string(),
      "cannot select `b`: choice is disabled"
    );
    assert_eq!(
      Error::missing("zz").to_string(),
      "cannot select `zz`: no such choice"
    );
    assert_eq!(
      Error::DuplicateKey("a".into()).to_string(),
      "key `a` is already bound"
    );
  }
}
