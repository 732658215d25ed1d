//! Platform-independent client logic for EventNow: configuration, storage,
//! the API client and the state machines the UI binds to.

pub mod api_client;
pub mod cell;
pub mod config;
pub mod form;
pub mod http;
pub mod logging;
pub mod notifications;
pub mod request;
pub mod services;
pub mod session;
pub mod storage;
pub mod timer;

#[cfg(test)]
pub(crate) mod testing;

pub use api_client::ApiClient;
pub use cell::StateCell;
pub use config::AppConfig;
pub use form::{Form, FormOptions, FormState, SubmitOutcome, Validate};
pub use request::{ApiRequest, Request, RequestOutcome, RequestPhase, RequestState};
pub use session::{AuthFailure, SessionManager, SessionState};
pub use storage::{AuthStorage, Persistence};
