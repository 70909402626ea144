use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductData};

/// Repository trait for Product persistence
///
/// Defines the data access interface for products. The store owns id
/// assignment: `create` returns the entity with its identifier filled in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List every stored product
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Get a product by id
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Insert a new product, assigning its id
    async fn create(&self, data: ProductData) -> ProductResult<Product>;

    /// Persist the current state of an existing product
    async fn update(&self, product: &Product) -> ProductResult<Product>;

    /// Remove a product by id, returning whether a row was removed
    async fn delete(&self, id: i64) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i64, Product>>>,
    next_id: AtomicI64,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(0),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn create(&self, data: ProductData) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let product = Product {
            id,
            name: data.name,
            maker: data.maker,
            price: data.price,
            image_url: data.image_url,
        };
        products.insert(id, product.clone());

        tracing::info!(product_id = %id, "Created product");
        Ok(product)
    }

    async fn update(&self, product: &Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if !products.contains_key(&product.id) {
            return Err(ProductError::NotFound(product.id));
        }

        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoe_data() -> ProductData {
        ProductData {
            name: "Shoe".to_string(),
            maker: "Acme".to_string(),
            price: 5000,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(shoe_data()).await.unwrap();
        let second = repo.create(shoe_data()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let repo = InMemoryProductRepository::new();

        let created = repo.create(shoe_data()).await.unwrap();

        let fetched = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_find_all_returns_insertion_order() {
        let repo = InMemoryProductRepository::new();

        repo.create(shoe_data()).await.unwrap();
        repo.create(ProductData {
            name: "Boot".to_string(),
            ..shoe_data()
        })
        .await
        .unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Shoe");
        assert_eq!(all[1].name, "Boot");
    }

    #[tokio::test]
    async fn test_update_replaces_stored_row() {
        let repo = InMemoryProductRepository::new();

        let mut product = repo.create(shoe_data()).await.unwrap();
        product.price = 9000;

        let updated = repo.update(&product).await.unwrap();
        assert_eq!(updated.price, 9000);

        let fetched = repo.find_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(fetched.price, 9000);
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails() {
        let repo = InMemoryProductRepository::new();

        let product = Product {
            id: 42,
            name: "Ghost".to_string(),
            maker: "Nobody".to_string(),
            price: 0,
            image_url: None,
        };

        let result = repo.update(&product).await;
        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let repo = InMemoryProductRepository::new();

        let created = repo.create(shoe_data()).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert_eq!(repo.find_by_id(created.id).await.unwrap(), None);
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
