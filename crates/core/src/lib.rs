//! `studentapp-core` — shared primitives for the student app backend.
//!
//! Pure types only: identifiers and the domain error model.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::UserId;
