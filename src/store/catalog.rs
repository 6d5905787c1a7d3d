//! In-memory product catalog
//!
//! Reference implementation of the store seam. The catalog plays the role of
//! the centralized product store for the lifetime of the process; durable or
//! remote stores live behind other implementations of the trait.

use super::traits::ProductStore;
use crate::product::Product;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

/// In-memory product store
#[derive(Debug, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog seeded with existing products
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Look up a product by id
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Number of products in the catalog
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductStore for ProductCatalog {
    async fn list_products(&mut self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn create_product(
        &mut self,
        title: &str,
        description: &str,
        image_url: &str,
        price: f64,
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        self.products.push(Product {
            id: id.clone(),
            title: title.to_string(),
            image_url: image_url.to_string(),
            price,
            description: description.to_string(),
            created_at: now,
            updated_at: now,
        });
        tracing::debug!("Created product {id}");
        Ok(id)
    }

    async fn update_product(
        &mut self,
        product_id: &str,
        title: &str,
        description: &str,
        image_url: &str,
    ) -> Result<()> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| anyhow!("No product found with id {product_id}"))?;
        product.title = title.to_string();
        product.description = description.to_string();
        product.image_url = image_url.to_string();
        product.updated_at = Utc::now();
        tracing::debug!("Updated product {product_id}");
        Ok(())
    }
}
