use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, ProductId};

/// One entry of a category's top-products list, as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub url: String,
}

/// Product row as written to the top-products table.
///
/// `category_id` is not part of the API payload; the extraction driver
/// injects the id of the category whose detail call produced the product.
/// It sits last to keep the published column order stable.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub url: String,
    pub category_id: CategoryId,
}

impl ProductRow {
    pub fn new(product: Product, category_id: CategoryId) -> Self {
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            url: product.url,
            category_id,
        }
    }
}
