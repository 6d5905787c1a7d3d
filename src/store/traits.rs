//! Trait abstraction for the product store to enable mocking in tests

use crate::product::Product;
use anyhow::Result;
use async_trait::async_trait;

/// Trait for product store operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// List every product in the store
    async fn list_products(&mut self) -> Result<Vec<Product>>;

    /// Create a new product, returning its assigned id
    async fn create_product(
        &mut self,
        title: &str,
        description: &str,
        image_url: &str,
        price: f64,
    ) -> Result<String>;

    /// Update an existing product (the price is fixed at creation time)
    async fn update_product(
        &mut self,
        product_id: &str,
        title: &str,
        description: &str,
        image_url: &str,
    ) -> Result<()>;
}
