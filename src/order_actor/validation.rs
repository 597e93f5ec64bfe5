use crate::domain::{NewOrder, OrderCreate};
use super::OrderError;

impl TryFrom<NewOrder> for OrderCreate {
    type Error = OrderError;

    /// Checks presence of the required fields. An empty email or an empty
    /// product list counts as missing; an empty list is rejected on purpose,
    /// which is stricter than a plain truthiness check.
    fn try_from(fields: NewOrder) -> Result<Self, OrderError> {
        let buyer_email = fields.buyer_email.filter(|email| !email.is_empty());
        let products = fields.products.filter(|products| !products.is_empty());

        match (buyer_email, products) {
            (Some(buyer_email), Some(products)) => Ok(Self {
                buyer_email,
                products,
                status: fields.status.unwrap_or_default(),
            }),
            (buyer_email, products) => {
                let mut missing = Vec::new();
                if buyer_email.is_none() {
                    missing.push("buyerEmail");
                }
                if products.is_none() {
                    missing.push("products");
                }
                Err(OrderError::Validation { missing })
            }
        }
    }
}
