//! View components for the application.

pub mod admin;
pub mod event_detail;
pub mod events;
pub mod home;
pub mod layouts;
pub mod login;
pub mod password;
pub mod profile;
pub mod register;
pub mod verification;

pub use admin::{AdminDashboard, AdminEventCreate, AdminEventEdit, AdminEvents};
pub use event_detail::EventDetail;
pub use events::Events;
pub use home::{Home, NotFound};
pub use layouts::{AdminLayout, MainLayout, RequireAuth};
pub use login::Login;
pub use password::{ForgotPassword, ResetPassword};
pub use profile::Profile;
pub use register::Register;
pub use verification::{ResendVerification, VerifyEmail};
