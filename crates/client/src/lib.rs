//! EventNow client - Dioxus web application
//!
//! Pages, providers and hooks for the EventNow event portal. The state
//! machines they drive live in `eventnow-core`.

#![allow(non_snake_case)]

pub mod auth_session;
pub mod components;
pub mod hooks;
pub mod notifications;
pub mod routes;
pub mod views;

pub use auth_session::{AuthContext, AuthProvider};
pub use notifications::{NotificationContext, NotificationProvider};
pub use routes::Route;
