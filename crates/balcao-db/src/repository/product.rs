//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! The catalog is flat: one row per product, no child tables. Prices are
//! integer centavos, status is the ATIVO/INATIVO text pair. `updated_at`
//! is bumped on every update.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use balcao_core::{Money, Product};

/// Repository for product catalog operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products sorted by name.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, nome, descricao, fabricante, categoria,
                   preco_unitario_centavos, quantidade_estoque,
                   estoque_minimo, estoque_maximo, codigo_barras,
                   status, created_at, updated_at
            FROM produtos
            ORDER BY nome COLLATE NOCASE, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_product).collect()
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row = sqlx::query(
            r#"
            SELECT id, nome, descricao, fabricante, categoria,
                   preco_unitario_centavos, quantidade_estoque,
                   estoque_minimo, estoque_maximo, codigo_barras,
                   status, created_at, updated_at
            FROM produtos
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(map_product(&row)?)),
            None => Ok(None),
        }
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, nome = %product.nome, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO produtos
                (id, nome, descricao, fabricante, categoria,
                 preco_unitario_centavos, quantidade_estoque,
                 estoque_minimo, estoque_maximo, codigo_barras,
                 status, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&product.id)
        .bind(&product.nome)
        .bind(&product.descricao)
        .bind(&product.fabricante)
        .bind(&product.categoria)
        .bind(product.preco_unitario.centavos())
        .bind(product.quantidade_estoque)
        .bind(product.estoque_minimo)
        .bind(product.estoque_maximo)
        .bind(&product.codigo_barras)
        .bind(product.status)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing product and bumps `updated_at`.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE produtos SET
                nome = ?2,
                descricao = ?3,
                fabricante = ?4,
                categoria = ?5,
                preco_unitario_centavos = ?6,
                quantidade_estoque = ?7,
                estoque_minimo = ?8,
                estoque_maximo = ?9,
                codigo_barras = ?10,
                status = ?11,
                updated_at = ?12
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.nome)
        .bind(&product.descricao)
        .bind(&product.fabricante)
        .bind(&product.categoria)
        .bind(product.preco_unitario.centavos())
        .bind(product.quantidade_estoque)
        .bind(product.estoque_minimo)
        .bind(product.estoque_maximo)
        .bind(&product.codigo_barras)
        .bind(product.status)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM produtos WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts catalog products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM produtos")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Maps a `produtos` row to a Product.
fn map_product(row: &SqliteRow) -> DbResult<Product> {
    Ok(Product {
        id: row.try_get("id")?,
        nome: row.try_get("nome")?,
        descricao: row.try_get("descricao")?,
        fabricante: row.try_get("fabricante")?,
        categoria: row.try_get("categoria")?,
        preco_unitario: Money::from_centavos(row.try_get("preco_unitario_centavos")?),
        quantidade_estoque: row.try_get("quantidade_estoque")?,
        estoque_minimo: row.try_get("estoque_minimo")?,
        estoque_maximo: row.try_get("estoque_maximo")?,
        codigo_barras: row.try_get("codigo_barras")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use balcao_core::ProductStatus;

    fn produto(id: &str, nome: &str) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            nome: nome.to_string(),
            descricao: "".to_string(),
            fabricante: "Logitech".to_string(),
            categoria: "Periféricos".to_string(),
            preco_unitario: Money::from_centavos(4550),
            quantidade_estoque: 12,
            estoque_minimo: 3,
            estoque_maximo: 50,
            codigo_barras: "7891234567890".to_string(),
            status: ProductStatus::Ativo,
            created_at: now,
            updated_at: now,
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_roundtrip() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(&produto("prod-1", "Mouse Sem Fio")).await.unwrap();

        let fetched = repo.get_by_id("prod-1").await.unwrap().unwrap();
        assert_eq!(fetched.nome, "Mouse Sem Fio");
        assert_eq!(fetched.preco_unitario, Money::from_centavos(4550));
        assert_eq!(fetched.status, ProductStatus::Ativo);
        assert!(fetched.is_active());
    }

    #[tokio::test]
    async fn test_list_all_sorted_by_name() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(&produto("prod-1", "Teclado")).await.unwrap();
        repo.insert(&produto("prod-2", "caixa de som")).await.unwrap();
        repo.insert(&produto("prod-3", "Mouse")).await.unwrap();

        let products = repo.list_all().await.unwrap();
        let nomes: Vec<&str> = products.iter().map(|p| p.nome.as_str()).collect();
        assert_eq!(nomes, vec!["caixa de som", "Mouse", "Teclado"]);
    }

    #[tokio::test]
    async fn test_update_persists_changes() {
        let db = test_db().await;
        let repo = db.products();

        let mut product = produto("prod-1", "Mouse");
        repo.insert(&product).await.unwrap();

        product.status = ProductStatus::Inativo;
        product.quantidade_estoque = 0;
        repo.update(&product).await.unwrap();

        let fetched = repo.get_by_id("prod-1").await.unwrap().unwrap();
        assert_eq!(fetched.status, ProductStatus::Inativo);
        assert_eq!(fetched.quantidade_estoque, 0);
        assert!(fetched.below_minimum_stock());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = test_db().await;

        let err = db.products().update(&produto("ghost", "X")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_and_count() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(&produto("prod-1", "Mouse")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        repo.delete("prod-1").await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.get_by_id("prod-1").await.unwrap().is_none());
    }
}
