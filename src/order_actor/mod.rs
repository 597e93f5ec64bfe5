//! Order-specific store bindings: the document impl, query filter, validation and errors.

pub mod entity;
pub mod error;
mod validation;

pub use entity::*;
pub use error::*;
