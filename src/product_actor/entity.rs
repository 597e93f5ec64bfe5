use crate::domain::{Product, ProductCreate, ProductPatch};
use crate::store::Document;

/// Product query. `ids: None` matches every product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub ids: Option<Vec<String>>,
}

impl ProductFilter {
    pub fn ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: Some(ids.into_iter().map(Into::into).collect()),
        }
    }
}

impl Document for Product {
    type Id = String;
    type Insert = ProductCreate;
    type Update = ProductPatch;
    type Filter = ProductFilter;

    const COLLECTION: &'static str = "products";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_insert(id: String, payload: ProductCreate) -> Self {
        Self {
            id,
            name: payload.name,
            price: payload.price,
        }
    }

    /// Updates the product's name and/or price.
    fn apply_update(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }

    fn matches(&self, filter: &ProductFilter) -> bool {
        filter.ids.as_ref().map_or(true, |ids| ids.contains(&self.id))
    }
}
