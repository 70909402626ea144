//! PostgreSQL implementation of ProductRepository using SeaORM

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductData};
use crate::repository::ProductRepository;

/// PostgreSQL implementation of the ProductRepository
#[derive(Clone)]
pub struct PostgresProductRepository {
    db: sea_orm::DatabaseConnection,
}

impl PostgresProductRepository {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Helper struct for deserializing product rows from the database
#[derive(Debug, FromQueryResult)]
struct ProductRow {
    id: i64,
    name: String,
    maker: String,
    price: i64,
    image_url: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            maker: row.maker,
            price: row.price,
            image_url: row.image_url,
        }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let sql = "SELECT * FROM products ORDER BY id";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, []);

        let rows = ProductRow::find_by_statement(stmt).all(&self.db).await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let sql = "SELECT * FROM products WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let row = ProductRow::find_by_statement(stmt).one(&self.db).await?;

        Ok(row.map(|r| r.into()))
    }

    #[instrument(skip(self, data), fields(product_name = %data.name))]
    async fn create(&self, data: ProductData) -> ProductResult<Product> {
        let sql = r#"
            INSERT INTO products (name, maker, price, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                data.name.into(),
                data.maker.into(),
                data.price.into(),
                data.image_url.into(),
            ],
        );

        let row = ProductRow::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .ok_or_else(|| ProductError::Database("Failed to create product".to_string()))?;

        tracing::info!(product_id = %row.id, "Product created");
        Ok(row.into())
    }

    #[instrument(skip(self, product))]
    async fn update(&self, product: &Product) -> ProductResult<Product> {
        let sql = r#"
            UPDATE products
            SET name = $2, maker = $3, price = $4, image_url = $5
            WHERE id = $1
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                product.id.into(),
                product.name.clone().into(),
                product.maker.clone().into(),
                product.price.into(),
                product.image_url.clone().into(),
            ],
        );

        let row = ProductRow::find_by_statement(stmt).one(&self.db).await?;

        tracing::info!(product_id = %product.id, "Product updated");
        row.map(|r| r.into())
            .ok_or(ProductError::NotFound(product.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let sql = "DELETE FROM products WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let result = self.db.execute_raw(stmt).await?;

        Ok(result.rows_affected() > 0)
    }
}
