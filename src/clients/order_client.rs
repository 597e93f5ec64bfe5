use tracing::{debug, info, instrument, warn};

use crate::clients::ProductClient;
use crate::domain::{ListOptions, NewOrder, Order, OrderCreate, OrderPatch, PopulatedOrder};
use crate::order_actor::{OrderError, OrderFilter};
use crate::store::{CollectionClient, FindOptions};

/// The order repository.
///
/// Wraps the orders collection and resolves product references through the
/// [`ProductClient`] on every single-order read.
#[derive(Clone)]
pub struct OrderClient {
    inner: CollectionClient<Order>,
    product_client: ProductClient,
}

impl OrderClient {
    pub fn new(inner: CollectionClient<Order>, product_client: ProductClient) -> Self {
        Self {
            inner,
            product_client,
        }
    }

    /// Orders matching every supplied predicate, ascending by id, paged by
    /// `offset`/`limit`. Product references are returned unresolved.
    #[instrument(skip(self))]
    pub async fn list(&self, options: ListOptions) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let filter = OrderFilter::from(&options);
        let orders = self
            .inner
            .find(filter, FindOptions::new(options.offset, options.limit))
            .await?;
        debug!(count = orders.len(), "Listed orders");
        Ok(orders)
    }

    /// A missing order is `Ok(None)`, not an error.
    #[instrument(skip(self))]
    pub async fn get(&self, id: String) -> Result<Option<PopulatedOrder>, OrderError> {
        debug!("Sending request");
        match self.inner.find_by_id(id).await? {
            Some(order) => Ok(Some(self.populate(order).await?)),
            None => {
                debug!("Order not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, fields))]
    pub async fn create(&self, fields: NewOrder) -> Result<PopulatedOrder, OrderError> {
        debug!("Sending request");
        let payload = OrderCreate::try_from(fields).inspect_err(|e| {
            warn!(error = ?e, "Rejected order");
        })?;

        let order = self.inner.insert(payload).await?;
        info!(order_id = %order.id, status = %order.status, "Order created");
        self.populate(order).await
    }

    #[instrument(skip(self))]
    pub async fn edit(&self, id: String, changes: OrderPatch) -> Result<PopulatedOrder, OrderError> {
        debug!("Sending request");
        let order = self
            .inner
            .find_by_id_and_update(id.clone(), changes)
            .await?
            .ok_or(OrderError::NotFound(id))?;
        info!(order_id = %order.id, status = %order.status, "Order updated");
        self.populate(order).await
    }

    #[instrument(skip(self))]
    pub async fn destroy(&self, id: String) -> Result<(), OrderError> {
        debug!("Sending request");
        match self.inner.find_by_id_and_delete(id.clone()).await? {
            Some(_) => {
                info!(order_id = %id, "Order deleted");
                Ok(())
            }
            None => Err(OrderError::NotFound(id)),
        }
    }

    /// Read-time join of `order.products` against the products collection.
    async fn populate(&self, order: Order) -> Result<PopulatedOrder, OrderError> {
        if order.products.is_empty() {
            return Ok(order.populate(&[]));
        }
        let resolved = self.product_client.find_by_ids(&order.products).await?;
        let populated = order.populate(&resolved);
        debug!(products = populated.products.len(), "Populated order");
        Ok(populated)
    }
}
