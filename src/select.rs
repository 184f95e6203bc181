//! The selection model behind select lists and tab strips.
//!
//! A [`SelectionModel`] owns an ordered set of [`Choice`]s, at most one of
//! which is active at a time. All state changes funnel through a single toggle
//! rule:
//!
//! - Selecting a choice other than the active one makes it active.
//! - Selecting the active choice again deactivates it, unless the model is
//!   *required*, in which case nothing changes (but a notification still
//!   fires, re-affirming the current state).
//!
//! Disabled choices are never selectable, though one marked active up front
//! still starts out active.

use serde::Deserialize;
use serde::Serialize;

use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::choice::Choice;
use crate::notify::Bus;
use crate::notify::Notification;
use crate::notify::Subscription;
use crate::Error;

/// Behavior flags shared by every selection widget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
  /// Whether some choice must always be active.
  pub required: bool,
  /// Whether directional keys move the selection. Only meaningful for panel
  /// switchers.
  pub keyboard_navigation: bool,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      required: true,
      keyboard_navigation: true,
    }
  }
}

impl Options {
  /// Returns default options with `required` set to `flag`.
  pub fn required(flag: bool) -> Self {
    Self {
      required: flag,
      ..Self::default()
    }
  }
}

/// A direction to move a selection in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
  /// Towards the end of the list, wrapping to the start.
  Next,
  /// Towards the start of the list, wrapping to the end.
  Previous,
}

/// An ordered set of choices with at most one active.
#[derive(Debug)]
pub struct SelectionModel {
  choices: Vec<Choice>,

  // NOTE: Always in range of `choices`. Only points at a disabled choice if
  // that choice was marked active at construction.
  active: Option<usize>,
  required: bool,
  bus: Bus<Notification>,
}

impl SelectionModel {
  /// Creates a new model with no listeners.
  pub fn new(choices: impl IntoIterator<Item = Choice>, options: Options) -> Self {
    Self::with_bus(choices, options, Bus::new())
  }

  /// Creates a new model that reports to `bus`.
  ///
  /// The initial active choice is, in order of preference: the first choice
  /// already marked active, even a disabled one; the first enabled choice, if
  /// the model is required; nothing. [`Notification::ListInitialized`] is emitted once this
  /// is resolved.
  ///
  /// Choices with a key that already appeared earlier are dropped.
  pub fn with_bus(
    choices: impl IntoIterator<Item = Choice>,
    options: Options,
    bus: Bus<Notification>,
  ) -> Self {
    let mut unique: Vec<Choice> = Vec::new();
    for choice in choices {
      if unique.iter().any(|c| c.key == choice.key) {
        warn!(key = %choice.key, "dropping choice with duplicate key");
        continue;
      }
      unique.push(choice);
    }

    let active = unique
      .iter()
      .position(|c| c.active)
      .or_else(|| {
        if options.required {
          unique.iter().position(Choice::is_selectable)
        } else {
          None
        }
      });

    let mut model = Self {
      choices: unique,
      active: None,
      required: options.required,
      bus,
    };
    for choice in &mut model.choices {
      choice.active = false;
    }
    model.mark(active);

    debug!(active = ?model.value(), required = model.required, "selection initialized");
    let message = Notification::ListInitialized {
      active: model.value().map(str::to_string),
    };
    model.emit(&message);
    model
  }

  /// Returns the choices, in display order.
  pub fn choices(&self) -> &[Choice] {
    &self.choices
  }

  /// Returns the number of choices.
  pub fn len(&self) -> usize {
    self.choices.len()
  }

  /// Returns whether there are no choices at all.
  pub fn is_empty(&self) -> bool {
    self.choices.is_empty()
  }

  /// Returns whether some choice must always be active.
  pub fn is_required(&self) -> bool {
    self.required
  }

  /// Looks up a choice by key.
  pub fn get(&self, key: &str) -> Option<&Choice> {
    self.choices.iter().find(|c| c.key == key)
  }

  /// Returns the display index of the choice with the given key.
  pub fn position(&self, key: &str) -> Option<usize> {
    self.choices.iter().position(|c| c.key == key)
  }

  /// Returns the active choice, if any.
  pub fn active(&self) -> Option<&Choice> {
    self.choices.get(self.active?)
  }

  /// Returns the display index of the active choice, if any.
  pub fn active_index(&self) -> Option<usize> {
    self.active
  }

  /// Returns the key of the active choice, if any.
  pub fn value(&self) -> Option<&str> {
    self.active().map(|c| c.key.as_str())
  }

  /// Requests the choice with the given key.
  ///
  /// Unknown and disabled choices are rejected with
  /// [`Error::InvalidChoice`], without any state change or notification.
  /// Otherwise the toggle rule is applied, [`Notification::Changed`] is
  /// emitted, and the new active choice is returned.
  pub fn select(&mut self, key: &str) -> Result<Option<&Choice>, Error> {
    let index = match self.position(key) {
      Some(index) => index,
      None => {
        debug!(key, "ignoring selection of unknown choice");
        return Err(Error::missing(key));
      }
    };

    if self.choices.get(index).map_or(true, |c| c.disabled) {
      debug!(key, "ignoring selection of disabled choice");
      return Err(Error::disabled(key));
    }

    self.toggle(index);
    Ok(self.active())
  }

  /// Requests the choice at the given display index.
  ///
  /// See [`SelectionModel::select()`].
  pub fn select_at(&mut self, index: usize) -> Result<Option<&Choice>, Error> {
    let key = match self.choices.get(index) {
      Some(choice) => choice.key.clone(),
      None => return Err(Error::missing(&index.to_string())),
    };
    self.select(&key)
  }

  /// Sets the active choice by key.
  ///
  /// This is [`SelectionModel::select()`] without the return value: setting
  /// the active key again deactivates it unless the model is required.
  pub fn set_value(&mut self, key: &str) -> Result<(), Error> {
    self.select(key).map(|_| ())
  }

  /// Returns the nearest enabled choice in `direction` from the active one,
  /// wrapping around the ends of the list.
  ///
  /// With nothing active, [`Direction::Next`] starts from the first choice
  /// and [`Direction::Previous`] from the last. Returns `None` if no enabled
  /// choice other than the active one exists.
  pub fn neighbor(&self, direction: Direction) -> Option<&Choice> {
    let count = self.choices.len();
    if count == 0 {
      return None;
    }

    let mut index = match (self.active, direction) {
      (Some(index), _) => index,
      (None, Direction::Next) => count - 1,
      (None, Direction::Previous) => 0,
    };
    for _ in 0..count {
      index = match direction {
        Direction::Next => (index + 1) % count,
        Direction::Previous => (index + count - 1) % count,
      };
      if Some(index) == self.active {
        return None;
      }
      match self.choices.get(index) {
        Some(choice) if choice.is_selectable() => return Some(choice),
        _ => {}
      }
    }
    None
  }

  /// Appends a choice to the end of the list.
  ///
  /// If nothing is active and the new choice is enabled, it becomes active
  /// when the model is required or the choice is marked active, and
  /// [`Notification::Changed`] is emitted.
  pub fn push(&mut self, mut choice: Choice) -> Result<(), Error> {
    if self.get(&choice.key).is_some() {
      return Err(Error::DuplicateKey(choice.key));
    }

    let activate = self.active.is_none()
      && choice.is_selectable()
      && (choice.active || self.required);
    choice.active = false;
    self.choices.push(choice);

    if activate {
      self.mark(Some(self.choices.len() - 1));
      self.emit_changed();
    }
    Ok(())
  }

  /// Removes the choice with the given key, returning it.
  ///
  /// Removing the active choice deactivates it; a required model then falls
  /// back to its first enabled choice. Either way, [`Notification::Changed`]
  /// is emitted.
  pub fn remove(&mut self, key: &str) -> Option<Choice> {
    let index = self.position(key)?;
    let mut removed = self.choices.remove(index);
    removed.active = false;

    match self.active {
      Some(active) if active == index => {
        self.active = None;
        if self.required {
          let fallback = self.choices.iter().position(Choice::is_selectable);
          self.mark(fallback);
        }
        debug!(key, active = ?self.value(), "removed active choice");
        self.emit_changed();
      }
      Some(active) if active > index => self.active = Some(active - 1),
      _ => {}
    }
    Some(removed)
  }

  /// Adds a listener for this model's notifications.
  pub fn subscribe(
    &mut self,
    listener: impl FnMut(&Notification) + 'static,
  ) -> Subscription {
    self.bus.subscribe(listener)
  }

  /// Removes a listener.
  pub fn unsubscribe(&mut self, sub: Subscription) -> bool {
    self.bus.unsubscribe(sub)
  }

  pub(crate) fn emit(&mut self, message: &Notification) {
    trace!(?message, listeners = self.bus.len(), "emitting");
    self.bus.emit(message);
  }

  fn toggle(&mut self, index: usize) {
    if self.active != Some(index) {
      self.mark(Some(index));
    } else if !self.required {
      self.mark(None);
    }

    debug!(active = ?self.value(), "selection changed");
    self.emit_changed();
  }

  fn emit_changed(&mut self) {
    let message = Notification::Changed {
      active: self.value().map(str::to_string),
    };
    self.emit(&message);
  }

  /// Moves the active marker, keeping each choice's `active` flag in sync.
  fn mark(&mut self, index: Option<usize>) {
    if let Some(old) = self.active.and_then(|i| self.choices.get_mut(i)) {
      old.active = false;
    }
    self.active = index;
    if let Some(new) = index.and_then(|i| self.choices.get_mut(i)) {
      new.active = true;
    }
  }
}
