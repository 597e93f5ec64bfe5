//! Typed handles over the collections. [`OrderClient`] is the order repository.

#[macro_use]
mod macros;
mod order_client;
mod product_client;

pub use order_client::*;
pub use product_client::*;
