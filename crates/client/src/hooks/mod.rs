//! Hooks binding the core state machines to Dioxus signals.

mod signal_cell;
mod use_api;
mod use_countdown;
mod use_form;

pub use signal_cell::SignalCell;
pub use use_api::{use_api, UseApi};
pub use use_countdown::use_countdown;
pub use use_form::{use_form, UseForm};
