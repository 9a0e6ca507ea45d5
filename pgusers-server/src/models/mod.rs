//! Domain models with validation at construction
//!
//! Request input is validated when building a `NewUser`.
//! Invalid input returns ValidationError, not panic.

pub mod user;
pub mod validation;

pub use user::{NewUser, User, UserPayload};
pub use validation::ValidationError;
