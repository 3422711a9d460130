//! Cache types for backend catalog responses.

use bazaar_core::{Category, CategoryId, Page, Product, ProductId};

use super::ProductQuery;

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Categories,
    Category(CategoryId),
    CategoryProducts { id: CategoryId, page: u32 },
    Products(ProductQuery),
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Vec<Category>),
    Category(Box<Category>),
    Products(Page<Product>),
    Product(Box<Product>),
}
