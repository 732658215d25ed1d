//! Typed REST endpoints, one module per backend resource. Each module adds
//! methods to [`crate::api_client::ApiClient`].

mod account;
mod admin;
mod comments;
mod events;
mod recommendations;
mod registrations;

pub use events::EventQuery;
pub use recommendations::DEFAULT_RECOMMENDATION_LIMIT;
