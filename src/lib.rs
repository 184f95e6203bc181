//! `tabset` is a small library of selection widgets: select lists and tab
//! strips with linked content panels.
//!
//! The widgets here are purely logical; they know which choice is active and
//! which panel is visible, and they report changes through a [`Bus`], but they
//! never draw anything. A frontend renders them and feeds input back in.

#![deny(missing_docs)]

pub mod choice;
pub mod config;
pub mod error;
pub mod notify;
pub mod select;
pub mod tabs;

pub use choice::Choice;
pub use config::WidgetConfig;
pub use error::Error;
pub use error::InvalidReason;
pub use notify::Bus;
pub use notify::Notification;
pub use notify::Subscription;
pub use select::Direction;
pub use select::Options;
pub use select::SelectionModel;
pub use tabs::LinkedPanelSwitcher;
