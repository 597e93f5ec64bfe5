//! Product-specific store bindings, used for reference resolution and seeding.

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;
