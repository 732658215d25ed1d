//! Reusable components.

pub mod countdown;
pub mod event_card;
pub mod ui;

pub use countdown::Countdown;
pub use event_card::{category_tone, status_tone, EventCard};
