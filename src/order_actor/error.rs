use thiserror::Error;

use crate::product_actor::ProductError;
use crate::store::StoreError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Missing required fields")]
    Validation { missing: Vec<&'static str> },
    #[error("Order with id {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Product(#[from] ProductError),
}
