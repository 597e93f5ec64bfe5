use tracing::{debug, instrument};

use crate::domain::{Product, ProductCreate, ProductPatch};
use crate::product_actor::{ProductError, ProductFilter};
use crate::store::{CollectionClient, FindOptions};

/// Client for the products collection.
#[derive(Clone)]
pub struct ProductClient {
    inner: CollectionClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

impl ProductClient {
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    pub async fn create_product(&self, product: ProductCreate) -> Result<String, ProductError> {
        debug!("Sending request");
        if product.name.is_empty() {
            return Err(ProductError::ValidationError("name required".to_string()));
        }
        if !product.price.is_finite() || product.price < 0.0 {
            return Err(ProductError::ValidationError(format!("invalid price: {}", product.price)));
        }
        let created = self.inner.insert(product).await?;
        Ok(created.id)
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: String, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .find_by_id_and_update(id.clone(), patch)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Fetch every product whose id is in `ids`, in ascending id order.
    /// Unknown ids are skipped.
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let products = self
            .inner
            .find(ProductFilter::ids(ids.iter().cloned()), FindOptions::default())
            .await?;
        debug!(found = products.len(), "Resolved products");
        Ok(products)
    }
}
