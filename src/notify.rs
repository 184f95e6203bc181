//! Synchronous publish/subscribe for widget notifications.

use std::fmt;

use serde::Serialize;

/// A notification emitted by a selection widget.
///
/// Each variant carries the key of whatever is active once the operation has
/// finished, or `None` if nothing is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
  /// The initial active choice was resolved. Fires once per model.
  ListInitialized {
    /// The initially active choice.
    active: Option<String>,
  },
  /// A selection request went through the toggle rule.
  Changed {
    /// The active choice after the toggle.
    active: Option<String>,
  },
  /// A panel switcher finished resolving its visible panel.
  PanelChanged {
    /// The key of the visible panel.
    active: Option<String>,
  },
}

impl Notification {
  /// Returns the active key carried by this notification.
  pub fn active(&self) -> Option<&str> {
    match self {
      Self::ListInitialized { active }
      | Self::Changed { active }
      | Self::PanelChanged { active } => active.as_deref(),
    }
  }
}

/// A handle for removing a listener from a [`Bus`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// A list of listeners for notifications of type `T`.
///
/// Delivery is synchronous: [`Bus::emit()`] returns only after every listener
/// has run, and listeners run in the order they subscribed.
pub struct Bus<T> {
  listeners: Vec<(Subscription, Box<dyn FnMut(&T)>)>,
  next_id: u64,
}

impl<T> Bus<T> {
  /// Creates a bus with no listeners.
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a listener, returning a handle that can later remove it.
  pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> Subscription {
    let id = Subscription(self.next_id);
    self.next_id += 1;
    self.listeners.push((id, Box::new(listener)));
    id
  }

  /// Builder-style [`Bus::subscribe()`], for when the handle is not needed.
  pub fn with(mut self, listener: impl FnMut(&T) + 'static) -> Self {
    self.subscribe(listener);
    self
  }

  /// Removes a listener.
  ///
  /// Returns false if `sub` was not subscribed to this bus.
  pub fn unsubscribe(&mut self, sub: Subscription) -> bool {
    let len = self.listeners.len();
    self.listeners.retain(|(id, _)| *id != sub);
    self.listeners.len() != len
  }

  /// Delivers `message` to every listener.
  pub fn emit(&mut self, message: &T) {
    for (_, listener) in &mut self.listeners {
      listener(message);
    }
  }

  /// Returns the number of listeners.
  pub fn len(&self) -> usize {
    self.listeners.len()
  }

  /// Returns whether there are no listeners.
  pub fn is_empty(&self) -> bool {
    self.listeners.is_empty()
  }
}

impl<T> Default for Bus<T> {
  fn default() -> Self {
    Self {
      listeners: Vec::new(),
      next_id: 0,
    }
  }
}

impl<T> fmt::Debug for Bus<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Bus")
      .field("listeners", &self.listeners.len())
      .finish()
  }
}
