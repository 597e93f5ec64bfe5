use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use super::{AppConfig, SystemError};
use crate::clients::{OrderClient, ProductClient};
use crate::domain::{Order, Product};
use crate::store::CollectionActor;

/// Production id factory: time-ordered UUIDv7 strings, so ascending-id listings
/// follow creation order.
pub fn new_document_id() -> String {
    Uuid::now_v7().to_string()
}

/// Owns the collection tasks and hands out the clients that talk to them.
pub struct OrderSystem {
    pub order_client: OrderClient,
    pub product_client: ProductClient,
    handles: Vec<JoinHandle<()>>,
}

impl OrderSystem {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_id_factories(config, new_document_id, new_document_id)
    }

    /// Start the system with custom id factories, e.g. deterministic ids in tests.
    pub fn with_id_factories(
        config: &AppConfig,
        next_product_id: impl Fn() -> String + Send + Sync + 'static,
        next_order_id: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        info!(channel_capacity = config.channel_capacity, "Starting order system");

        let (product_actor, product_collection) =
            CollectionActor::<Product>::new(config.channel_capacity, next_product_id);
        let product_client = ProductClient::new(product_collection);
        let product_handle = tokio::spawn(product_actor.run());

        let (order_actor, order_collection) =
            CollectionActor::<Order>::new(config.channel_capacity, next_order_id);
        let order_client = OrderClient::new(order_collection, product_client.clone());
        let order_handle = tokio::spawn(order_actor.run());

        Self {
            order_client,
            product_client,
            handles: vec![product_handle, order_handle],
        }
    }

    /// Drop the clients and wait for every collection task to drain.
    ///
    /// Clones of the clients held elsewhere keep their collections alive, so
    /// callers must drop those first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        drop(self.order_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Collection task failed");
                return Err(SystemError::Task(e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
