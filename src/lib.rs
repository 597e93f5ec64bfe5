//! # order-store
//!
//! An order repository over an in-process document store.
//!
//! - **Documents** live in [`store::CollectionActor`]s, one tokio task per collection,
//!   reached through cloneable [`store::CollectionClient`] handles.
//! - **Orders** are managed by [`clients::OrderClient`]: `list`, `get`, `create`,
//!   `edit`, `destroy`. Single-order reads resolve product references through
//!   [`clients::ProductClient`].
//! - **Wiring** lives in [`app_system`]: configuration, tracing setup, and the
//!   [`app_system::OrderSystem`] that starts and stops the collections.
//!
//! ```no_run
//! use order_store::app_system::{load_config, OrderSystem};
//! use order_store::domain::{NewOrder, ProductCreate};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let system = OrderSystem::new(&load_config()?);
//! let product_id = system.product_client.create_product(ProductCreate::new("Widget", 9.99)).await?;
//! let order = system.order_client.create(NewOrder::new("alice@example.com", [product_id])).await?;
//! assert_eq!(order.products[0].name, "Widget");
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod app_system;
pub mod clients;
pub mod domain;
pub mod order_actor;
pub mod product_actor;
pub mod store;

#[cfg(test)]
mod mock_framework;
