//! Shared types and utilities for the EventNow client crates.

pub mod countdown;
pub mod error;
pub mod form;
pub mod formatting;
pub mod forms;
pub mod models;
pub mod validation;

pub use countdown::TimeLeft;
pub use error::*;
pub use form::{FieldErrors, FieldValue, FileRef, FormValues, Touched};
pub use models::*;
