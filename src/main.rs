use tracing::{error, info, Instrument};

use order_store::app_system::{load_config, setup_tracing, OrderSystem};
use order_store::domain::{ListOptions, NewOrder, OrderPatch, OrderStatus, ProductCreate};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    setup_tracing(&config.log_filter);

    info!("Starting order store demo");

    let system = OrderSystem::new(&config);

    let span = tracing::info_span!("catalog_seeding");
    let (widget, gadget) = async {
        info!("Creating demo products");
        let widget = system.product_client.create_product(ProductCreate::new("Widget", 9.99)).await?;
        let gadget = system.product_client.create_product(ProductCreate::new("Gadget", 24.50)).await?;
        Ok::<_, order_store::product_actor::ProductError>((widget, gadget))
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("order_lifecycle");
    async {
        let order = system
            .order_client
            .create(NewOrder::new("alice@example.com", [widget, gadget.clone()]))
            .await?;
        info!(order_id = %order.id, products = order.products.len(), "Order placed");

        let order = system
            .order_client
            .edit(order.id.clone(), OrderPatch::status(OrderStatus::Pending))
            .await?;
        info!(order_id = %order.id, status = %order.status, "Order moved on");

        let pending = system
            .order_client
            .list(ListOptions::default().with_status(OrderStatus::Pending).with_product(gadget.clone()))
            .await?;
        info!(count = pending.len(), "Pending orders containing the gadget");

        match system.order_client.create(NewOrder::default()).await {
            Ok(order) => error!(order_id = %order.id, "Empty order was accepted"),
            Err(e) => info!(error = %e, "Empty order rejected"),
        }

        system.order_client.destroy(order.id.clone()).await?;
        match system.order_client.get(order.id.clone()).await? {
            Some(_) => error!(order_id = %order.id, "Order still present after destroy"),
            None => info!(order_id = %order.id, "Order removed"),
        }
        Ok::<_, order_store::order_actor::OrderError>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
