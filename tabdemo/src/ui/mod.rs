//! The tabdemo UI.
//!
//! The screen is split into a select list on the left and a tab strip with
//! its panel on the right, with a log of widget notifications underneath.
//! Only one of the two widgets has focus at a time; key presses go to the
//! focused one, while mouse clicks go to whichever widget is under the
//! pointer (and focus it).
//!
//! Each widget is a [`component::Component`] wrapping a `tabset` model. The
//! component only translates input into model calls and draws the model's
//! state; it never decides what is active on its own.

pub mod component;
pub mod list;
pub mod tabs;
