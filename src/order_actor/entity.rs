use crate::domain::{ListOptions, Order, OrderCreate, OrderPatch, OrderStatus};
use crate::store::Document;

/// Equality predicates for order queries. Unset predicates match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    /// Matches orders whose `products` contain this id.
    pub product_id: Option<String>,
    pub status: Option<OrderStatus>,
}

/// An empty `product_id` is treated as absent.
impl From<&ListOptions> for OrderFilter {
    fn from(options: &ListOptions) -> Self {
        Self {
            product_id: options.product_id.clone().filter(|id| !id.is_empty()),
            status: options.status,
        }
    }
}

impl Document for Order {
    type Id = String;
    type Insert = OrderCreate;
    type Update = OrderPatch;
    type Filter = OrderFilter;

    const COLLECTION: &'static str = "orders";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_insert(id: String, payload: OrderCreate) -> Self {
        Self {
            id,
            buyer_email: payload.buyer_email,
            products: payload.products,
            status: payload.status,
        }
    }

    /// Overwrites whichever fields the patch carries. No required-field
    /// checks run here, so a patch may leave `buyer_email` or `products` empty.
    fn apply_update(&mut self, patch: OrderPatch) {
        if let Some(buyer_email) = patch.buyer_email {
            self.buyer_email = buyer_email;
        }
        if let Some(products) = patch.products {
            self.products = products;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        let product_ok = filter
            .product_id
            .as_ref()
            .map_or(true, |id| self.products.contains(id));
        let status_ok = filter.status.map_or(true, |status| self.status == status);
        product_ok && status_ok
    }
}
