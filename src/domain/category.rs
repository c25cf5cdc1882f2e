use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::domain::types::CategoryId;

/// Catalog category record as returned by the `category.index` call.
///
/// Field order is load-bearing: the categories table serializes these seven
/// fields as its columns in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    /// `None` for root categories.
    pub parent_id: Option<CategoryId>,
    pub name: String,
    pub slug: String,
    pub is_leaf: bool,
    pub product_count: u64,
    pub url: String,
}

/// Category record plus its server-selected top products, from `category.get`.
///
/// `top_products` is required: an empty list is the valid no-top-products
/// outcome, a missing field is a protocol error.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub top_products: Vec<Product>,
}
