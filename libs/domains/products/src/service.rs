use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductData};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The service layer orchestrates lookups, field replacement, and
/// persistence; request-shape validation has already happened at the
/// handler boundary.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List all products
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    /// Get a product by id
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.find_product(id).await
    }

    /// Create a new product
    #[instrument(skip(self, data), fields(product_name = %data.name))]
    pub async fn create_product(&self, data: ProductData) -> ProductResult<Product> {
        self.repository.create(data).await
    }

    /// Replace an existing product's fields
    ///
    /// The stored product's name, maker, price and image URL are all
    /// overwritten with the request's values.
    #[instrument(skip(self, data))]
    pub async fn update_product(&self, id: i64, data: ProductData) -> ProductResult<Product> {
        let mut product = self.find_product(id).await?;

        product.change_with(data);

        self.repository.update(&product).await
    }

    /// Delete a product
    ///
    /// Returns the removed product value for reporting; the row itself is
    /// gone from the store.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<Product> {
        let product = self.find_product(id).await?;

        self.repository.delete(id).await?;

        Ok(product)
    }

    // Shared lookup for get/update/delete
    async fn find_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
