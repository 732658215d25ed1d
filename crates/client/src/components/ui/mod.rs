//! UI primitives (Button, Card, Input, etc.)

pub mod button;
pub mod card;
pub mod feedback;
pub mod input;
pub mod modal;
pub mod pagination;

pub use button::*;
pub use card::*;
pub use feedback::*;
pub use input::*;
pub use modal::*;
pub use pagination::*;
