//! Domain records exchanged with the catalog API.

pub mod category;
pub mod product;
pub mod types;
