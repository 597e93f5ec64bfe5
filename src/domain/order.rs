use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Product;

/// Default page size for order listings.
pub const DEFAULT_LIST_LIMIT: usize = 25;

/// Lifecycle state of an order. Callers set it directly; no transition rules apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Created,
    Pending,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Pending => "PENDING",
            OrderStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(OrderStatus::Created),
            "PENDING" => Ok(OrderStatus::Pending),
            "COMPLETED" => Ok(OrderStatus::Completed),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// A stored order. `products` holds Product ids, not Product records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub buyer_email: String,
    pub products: Vec<String>,
    #[serde(default)]
    pub status: OrderStatus,
}

/// An order as returned by reads: product references resolved into records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedOrder {
    #[serde(rename = "_id")]
    pub id: String,
    pub buyer_email: String,
    pub products: Vec<Product>,
    pub status: OrderStatus,
}

/// Caller-supplied fields for a new order, validated before anything is stored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub buyer_email: Option<String>,
    pub products: Option<Vec<String>>,
    pub status: Option<OrderStatus>,
}

/// Validated insert payload handed to the orders collection.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreate {
    pub buyer_email: String,
    pub products: Vec<String>,
    pub status: OrderStatus,
}

/// Field-level overwrite for an existing order. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    pub buyer_email: Option<String>,
    pub products: Option<Vec<String>>,
    pub status: Option<OrderStatus>,
}

/// Query for [`crate::clients::OrderClient::list`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListOptions {
    pub offset: usize,
    pub limit: usize,
    pub product_id: Option<String>,
    pub status: Option<OrderStatus>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIST_LIMIT,
            product_id: None,
            status: None,
        }
    }
}

impl NewOrder {
    pub fn new<I, S>(buyer_email: impl Into<String>, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            buyer_email: Some(buyer_email.into()),
            products: Some(products.into_iter().map(Into::into).collect()),
            status: None,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl OrderPatch {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl ListOptions {
    pub fn page(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit,
            ..Self::default()
        }
    }

    pub fn with_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl Order {
    /// Join this order with already-fetched products, keeping reference order.
    ///
    /// References with no matching record are dropped.
    pub fn populate(self, resolved: &[Product]) -> PopulatedOrder {
        let products = self
            .products
            .iter()
            .filter_map(|id| resolved.iter().find(|p| &p.id == id).cloned())
            .collect();
        PopulatedOrder {
            id: self.id,
            buyer_email: self.buyer_email,
            products,
            status: self.status,
        }
    }
}
