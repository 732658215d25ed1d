//! Administrator pages.

mod dashboard;
mod event_form;
mod events;

pub use dashboard::AdminDashboard;
pub use event_form::{AdminEventCreate, AdminEventEdit};
pub use events::AdminEvents;
