//! Tab strips with linked content panels.

use std::collections::HashMap;

use tracing::debug;
use tracing::warn;

use crate::choice::Choice;
use crate::notify::Bus;
use crate::notify::Notification;
use crate::notify::Subscription;
use crate::select::Direction;
use crate::select::Options;
use crate::select::SelectionModel;
use crate::Error;

/// A [`SelectionModel`] where each choice may show a panel of type `P`.
///
/// Whenever the model's active choice changes, the panel bound to it is
/// resolved with the same toggle rule the model uses, and
/// [`Notification::PanelChanged`] follows the model's
/// [`Notification::Changed`] on the shared bus. A choice with no panel simply
/// shows nothing.
#[derive(Debug)]
pub struct LinkedPanelSwitcher<P> {
  model: SelectionModel,
  panels: HashMap<String, P>,
  active_panel: Option<String>,
  keyboard_navigation: bool,
  visible: bool,
}

impl<P> LinkedPanelSwitcher<P> {
  /// Creates a new switcher with no listeners.
  pub fn new(
    choices: impl IntoIterator<Item = Choice>,
    panels: impl IntoIterator<Item = (String, P)>,
    options: Options,
  ) -> Self {
    Self::with_bus(choices, panels, options, Bus::new())
  }

  /// Creates a new switcher that reports to `bus`.
  ///
  /// Panels whose key matches no choice are dropped, as are panels for a key
  /// that was already bound. The initial panel is resolved from the model's
  /// initial choice, emitting [`Notification::PanelChanged`].
  pub fn with_bus(
    choices: impl IntoIterator<Item = Choice>,
    panels: impl IntoIterator<Item = (String, P)>,
    options: Options,
    bus: Bus<Notification>,
  ) -> Self {
    let model = SelectionModel::with_bus(choices, options, bus);

    let mut bound = HashMap::new();
    for (key, panel) in panels {
      if model.get(&key).is_none() {
        warn!(%key, "dropping panel without a matching choice");
        continue;
      }
      if bound.contains_key(&key) {
        warn!(%key, "dropping panel for an already bound key");
        continue;
      }
      bound.insert(key, panel);
    }

    let mut switcher = Self {
      model,
      panels: bound,
      active_panel: None,
      keyboard_navigation: options.keyboard_navigation,
      visible: true,
    };
    switcher.on_selection_changed();
    switcher
  }

  /// Returns the underlying selection model.
  pub fn model(&self) -> &SelectionModel {
    &self.model
  }

  /// Returns the visible panel, if any.
  #[doc(alias = "window")]
  pub fn active_panel(&self) -> Option<&P> {
    self.panels.get(self.active_panel.as_deref()?)
  }

  /// Returns the key of the visible panel, if any.
  pub fn active_panel_key(&self) -> Option<&str> {
    self.active_panel.as_deref()
  }

  /// Returns the panel bound to `key`.
  pub fn panel(&self, key: &str) -> Option<&P> {
    self.panels.get(key)
  }

  /// Returns the panel bound to `key`, mutably.
  pub fn panel_mut(&mut self, key: &str) -> Option<&mut P> {
    self.panels.get_mut(key)
  }

  /// Iterates over every choice in display order, alongside its panel.
  pub fn tabs(&self) -> impl Iterator<Item = (&Choice, Option<&P>)> + '_ {
    self
      .model
      .choices()
      .iter()
      .map(move |c| (c, self.panels.get(&c.key)))
  }

  /// Requests the choice with the given key, then resolves its panel.
  ///
  /// Rejected selections leave both the model and the panel untouched. See
  /// [`SelectionModel::select()`].
  pub fn select(&mut self, key: &str) -> Result<Option<&P>, Error> {
    self.model.select(key)?;
    self.on_selection_changed();
    Ok(self.active_panel())
  }

  /// Requests the choice at the given display index.
  pub fn select_at(&mut self, index: usize) -> Result<Option<&P>, Error> {
    let key = match self.model.choices().get(index) {
      Some(choice) => choice.key.clone(),
      None => return Err(Error::missing(&index.to_string())),
    };
    self.select(&key)
  }

  /// Sets the active choice by key.
  ///
  /// See [`SelectionModel::set_value()`].
  pub fn set_value(&mut self, key: &str) -> Result<(), Error> {
    self.select(key).map(|_| ())
  }

  /// Resolves the visible panel from the model's active choice and emits
  /// [`Notification::PanelChanged`].
  fn on_selection_changed(&mut self) {
    // The model has already applied the toggle rule: a deselecting re-click
    // arrives here with nothing active.
    self.active_panel = self
      .model
      .value()
      .filter(|key| self.panels.contains_key(*key))
      .map(str::to_string);

    debug!(panel = ?self.active_panel, "panel changed");
    let message = Notification::PanelChanged {
      active: self.active_panel.clone(),
    };
    self.model.emit(&message);
  }

  /// Adds a panel for `key`, creating a choice labeled with the key itself if
  /// none exists yet.
  ///
  /// Fails with [`Error::DuplicateKey`] if the key already has a panel.
  pub fn add_binding(&mut self, key: impl ToString, panel: P) -> Result<(), Error> {
    let key = key.to_string();
    if self.model.get(&key).is_none() {
      return self.add_tab(Choice::new(key), panel);
    }
    self.bind(key, panel)
  }

  /// Appends `choice` as a new tab showing `panel`.
  ///
  /// Fails with [`Error::DuplicateKey`] if a choice with the same key already
  /// exists, bound or not; use [`LinkedPanelSwitcher::add_binding()`] to give
  /// an existing choice a panel. If the new tab ends up active, its panel
  /// becomes visible.
  pub fn add_tab(&mut self, choice: Choice, panel: P) -> Result<(), Error> {
    let key = choice.key.clone();
    self.model.push(choice)?;
    self.bind(key, panel)
  }

  fn bind(&mut self, key: String, panel: P) -> Result<(), Error> {
    if self.panels.contains_key(&key) {
      return Err(Error::DuplicateKey(key));
    }

    let is_active = self.model.value() == Some(key.as_str());
    self.panels.insert(key, panel);
    if is_active {
      self.on_selection_changed();
    }
    Ok(())
  }

  /// Removes the choice with the given key along with its panel, returning the
  /// panel.
  ///
  /// Does nothing if the key is unknown.
  pub fn remove_binding(&mut self, key: &str) -> Option<P> {
    let was_active = self.model.value() == Some(key);
    let panel = self.panels.remove(key);
    let choice = self.model.remove(key);
    if panel.is_none() && choice.is_none() {
      return None;
    }

    if was_active || self.active_panel.as_deref() == Some(key) {
      self.on_selection_changed();
    }
    panel
  }

  /// Moves the selection to the next enabled choice in `direction`, wrapping
  /// around the ends.
  ///
  /// Returns whether a choice was selected. Does nothing if keyboard
  /// navigation is turned off or no other enabled choice exists.
  pub fn navigate(&mut self, direction: Direction) -> Result<bool, Error> {
    if !self.keyboard_navigation {
      return Ok(false);
    }

    let key = match self.model.neighbor(direction) {
      Some(choice) => choice.key.clone(),
      None => return Ok(false),
    };
    self.select(&key)?;
    Ok(true)
  }

  /// Returns whether keyboard navigation is on.
  pub fn keyboard_navigation(&self) -> bool {
    self.keyboard_navigation
  }

  /// Turns keyboard navigation on or off.
  pub fn set_keyboard_navigation(&mut self, flag: bool) {
    self.keyboard_navigation = flag;
  }

  /// Shows the tab strip and its panels.
  pub fn show(&mut self) {
    self.visible = true;
  }

  /// Hides the tab strip and its panels.
  pub fn hide(&mut self) {
    self.visible = false;
  }

  /// Returns whether the switcher is shown.
  pub fn is_visible(&self) -> bool {
    self.visible
  }

  /// Adds a listener for notifications from this switcher and its model.
  pub fn subscribe(
    &mut self,
    listener: impl FnMut(&Notification) + 'static,
  ) -> Subscription {
    self.model.subscribe(listener)
  }

  /// Removes a listener.
  pub fn unsubscribe(&mut self, sub: Subscription) -> bool {
    self.model.unsubscribe(sub)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use std::cell::RefCell;
  use std::rc::Rc;

  type Log = Rc<RefCell<Vec<Notification>>>;

  fn switcher(options: Options) -> (LinkedPanelSwitcher<&'static str>, Log) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = Rc::clone(&log);
    let bus = Bus::new().with(move |n: &Notification| l.borrow_mut().push(n.clone()));
    let choices = vec![
      Choice::new("a"),
      Choice::new("b").disabled(true),
      Choice::new("c"),
    ];
    let panels = vec![
      ("a".to_string(), "panel a"),
      ("b".to_string(), "panel b"),
      ("c".to_string(), "panel c"),
    ];
    let s = LinkedPanelSwitcher::with_bus(choices, panels, options, bus);
    (s, log)
  }

  fn panel_changed(key: Option<&str>) -> Notification {
    Notification::PanelChanged {
      active: key.map(str::to_string),
    }
  }

  #[test]
  fn initial_panel() {
    let (s, log) = switcher(Options::required(true));
    assert_eq!(s.active_panel(), Some(&"panel a"));
    assert_eq!(
      *log.borrow(),
      vec![
        Notification::ListInitialized {
          active: Some("a".into())
        },
        panel_changed(Some("a")),
      ]
    );
  }

  #[test]
  fn changed_precedes_panel_changed() {
    let (mut s, log) = switcher(Options::required(true));
    assert_eq!(s.select("c").unwrap(), Some(&"panel c"));
    assert_eq!(
      log.borrow()[2..],
      [
        Notification::Changed {
          active: Some("c".into())
        },
        panel_changed(Some("c")),
      ]
    );
  }

  #[test]
  fn required_reclick_keeps_panel() {
    let (mut s, _) = switcher(Options::required(true));
    s.select("a").unwrap();
    assert_eq!(s.active_panel_key(), Some("a"));
  }

  #[test]
  fn optional_reclick_hides_panel() {
    let (mut s, log) = switcher(Options::required(false));
    assert_eq!(s.active_panel(), None);
    s.select("a").unwrap();
    assert_eq!(s.active_panel(), Some(&"panel a"));
    assert_eq!(s.select("a").unwrap(), None);
    assert_eq!(log.borrow().last(), Some(&panel_changed(None)));
  }

  #[test]
  fn disabled_leaves_panel() {
    let (mut s, log) = switcher(Options::required(true));
    let before = log.borrow().len();
    assert!(s.select("b").is_err());
    assert_eq!(s.active_panel_key(), Some("a"));
    assert_eq!(log.borrow().len(), before);
  }

  #[test]
  fn unbound_choice_shows_nothing() {
    let choices = vec![Choice::new("a"), Choice::new("bare")];
    let mut s = LinkedPanelSwitcher::new(
      choices,
      vec![("a".to_string(), 1)],
      Options::required(true),
    );
    assert_eq!(s.active_panel(), Some(&1));
    assert_eq!(s.select("bare").unwrap(), None);
    assert_eq!(s.model().value(), Some("bare"));
    assert_eq!(s.active_panel_key(), None);
  }

  #[test]
  fn orphan_panels_dropped() {
    let s = LinkedPanelSwitcher::new(
      vec![Choice::new("a")],
      vec![("a".to_string(), 1), ("a".to_string(), 2), ("x".to_string(), 3)],
      Options::default(),
    );
    assert_eq!(s.panel("a"), Some(&1));
    assert_eq!(s.panel("x"), None);
  }

  #[test]
  fn add_binding() {
    let (mut s, _) = switcher(Options::required(true));
    s.add_binding("d", "panel d").unwrap();
    assert_eq!(s.model().len(), 4);
    assert_eq!(s.model().get("d").unwrap().label, "d");
    assert!(matches!(
      s.add_binding("d", "again"),
      Err(Error::DuplicateKey(k)) if k == "d"
    ));
    assert_eq!(s.panel("d"), Some(&"panel d"));
  }

  #[test]
  fn add_binding_to_existing_choice() {
    let mut s = LinkedPanelSwitcher::new(
      vec![Choice::new("a")],
      Vec::new(),
      Options::required(true),
    );
    assert_eq!(s.active_panel(), None);
    s.add_binding("a", 7).unwrap();
    assert_eq!(s.model().len(), 1);
    assert_eq!(s.active_panel(), Some(&7));
  }

  #[test]
  fn add_tab_to_empty_required() {
    let mut s = LinkedPanelSwitcher::new(Vec::new(), Vec::new(), Options::required(true));
    s.add_tab(Choice::new("x").label("X"), "x").unwrap();
    assert_eq!(s.model().value(), Some("x"));
    assert_eq!(s.active_panel(), Some(&"x"));
    assert_eq!(s.tabs().map(|(c, _)| c.display_label()).collect::<Vec<_>>(), ["X"]);
  }

  #[test]
  fn add_tab_rejects_existing_choice() {
    let mut s = LinkedPanelSwitcher::new(
      vec![Choice::new("a").label("Alpha")],
      Vec::new(),
      Options::required(true),
    );
    assert!(matches!(
      s.add_tab(Choice::new("a").label("Other").disabled(true), 1),
      Err(Error::DuplicateKey(k)) if k == "a"
    ));
    assert_eq!(s.model().len(), 1);
    assert_eq!(s.model().get("a").unwrap().label, "Alpha");
    assert!(!s.model().get("a").unwrap().disabled);
    assert_eq!(s.panel("a"), None);
  }

  #[test]
  fn set_value_toggles_when_optional() {
    let (mut s, log) = switcher(Options::required(false));
    s.set_value("a").unwrap();
    assert_eq!(s.active_panel(), Some(&"panel a"));

    log.borrow_mut().clear();
    s.set_value("a").unwrap();
    assert_eq!(s.model().value(), None);
    assert_eq!(s.active_panel(), None);
    assert_eq!(
      *log.borrow(),
      vec![Notification::Changed { active: None }, panel_changed(None)]
    );
  }

  #[test]
  fn set_value_reaffirms_when_required() {
    let (mut s, log) = switcher(Options::required(true));
    log.borrow_mut().clear();
    s.set_value("a").unwrap();
    assert_eq!(s.active_panel_key(), Some("a"));
    assert_eq!(
      *log.borrow(),
      vec![
        Notification::Changed {
          active: Some("a".into())
        },
        panel_changed(Some("a")),
      ]
    );
  }

  /// The visible panel is always the active choice's, if it has one.
  fn assert_mirrors_model<P>(s: &LinkedPanelSwitcher<P>) {
    let expected = s.model().value().filter(|key| s.panel(key).is_some());
    assert_eq!(s.active_panel_key(), expected);
  }

  #[test]
  fn panel_follows_model() {
    for required in [true, false].iter().copied() {
      let (mut s, _) = switcher(Options::required(required));
      assert_mirrors_model(&s);

      s.select("a").unwrap();
      assert_mirrors_model(&s);
      s.select("a").unwrap();
      assert_mirrors_model(&s);
      assert!(s.select("b").is_err());
      assert_mirrors_model(&s);

      s.navigate(Direction::Next).unwrap();
      assert_mirrors_model(&s);
      s.navigate(Direction::Previous).unwrap();
      assert_mirrors_model(&s);

      s.add_tab(Choice::new("d"), "panel d").unwrap();
      assert_mirrors_model(&s);
      s.select("d").unwrap();
      assert_mirrors_model(&s);
      s.add_tab(Choice::new("e").active(true), "panel e").unwrap();
      assert_mirrors_model(&s);

      s.remove_binding("d");
      assert_mirrors_model(&s);
      s.remove_binding("a");
      assert_mirrors_model(&s);
      s.set_value("c").unwrap();
      assert_mirrors_model(&s);
      s.set_value("c").unwrap();
      assert_mirrors_model(&s);
    }
  }

  #[test]
  fn binding_round_trip() {
    let (mut s, _) = switcher(Options::required(false));
    s.add_binding("d", "panel d").unwrap();
    s.select("d").unwrap();
    assert_eq!(s.active_panel(), Some(&"panel d"));

    assert_eq!(s.remove_binding("d"), Some("panel d"));
    assert_eq!(s.model().get("d"), None);
    assert_eq!(s.panel("d"), None);
    assert_eq!(s.active_panel(), None);
    assert_eq!(s.model().value(), None);

    assert_eq!(s.remove_binding("d"), None);
  }

  #[test]
  fn remove_active_when_required() {
    let (mut s, log) = switcher(Options::required(true));
    s.remove_binding("a");
    assert_eq!(s.model().value(), Some("c"));
    assert_eq!(s.active_panel(), Some(&"panel c"));
    assert_eq!(log.borrow().last(), Some(&panel_changed(Some("c"))));
  }

  #[test]
  fn navigation_wraps() {
    let choices = vec![Choice::new("x"), Choice::new("y"), Choice::new("z")];
    let mut s: LinkedPanelSwitcher<()> =
      LinkedPanelSwitcher::new(choices, Vec::new(), Options::default());
    assert!(s.navigate(Direction::Previous).unwrap());
    assert_eq!(s.model().active_index(), Some(2));
    assert!(s.navigate(Direction::Next).unwrap());
    assert_eq!(s.model().active_index(), Some(0));
  }

  #[test]
  fn navigation_skips_disabled() {
    let (mut s, _) = switcher(Options::required(true));
    assert!(s.navigate(Direction::Next).unwrap());
    assert_eq!(s.model().value(), Some("c"));
    assert_eq!(s.active_panel(), Some(&"panel c"));
  }

  #[test]
  fn navigation_off() {
    let (mut s, _) = switcher(Options {
      required: true,
      keyboard_navigation: false,
    });
    assert!(!s.keyboard_navigation());
    assert!(!s.navigate(Direction::Next).unwrap());
    assert_eq!(s.model().value(), Some("a"));

    s.set_keyboard_navigation(true);
    assert!(s.navigate(Direction::Next).unwrap());
  }

  #[test]
  fn show_hide() {
    let (mut s, _) = switcher(Options::default());
    assert!(s.is_visible());
    s.hide();
    assert!(!s.is_visible());
    s.show();
    assert!(s.is_visible());
  }
}
