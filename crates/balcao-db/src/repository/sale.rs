//! # Sale Repository
//!
//! Database operations for sale aggregates.
//!
//! ## Aggregate Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sale Aggregate                                     │
//! │                                                                         │
//! │  vendas                          venda_itens                            │
//! │  ┌──────────────────────┐        ┌────────────────────────────┐        │
//! │  │ id                   │◄───────│ venda_id                   │        │
//! │  │ cliente (JSON)       │        │ posicao  (item order)      │        │
//! │  │ valor_total_centavos │        │ produto_id, nome, ...      │        │
//! │  │ forma_pagamento      │        │ quantidade                 │        │
//! │  │ created_at           │        │ preco_unitario_centavos    │        │
//! │  └──────────────────────┘        └────────────────────────────┘        │
//! │                                                                         │
//! │  Writes replace the whole aggregate in one transaction.                │
//! │  Reads stitch items back in `posicao` order.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use balcao_core::{LineItem, Money, Sale};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Lists all sales, newest first, with line items attached.
    ///
    /// ## How It Works
    /// Two statements instead of N+1: one for the parent rows, one for
    /// every line item, stitched together by `venda_id` in memory.
    pub async fn list_all(&self) -> DbResult<Vec<Sale>> {
        let rows = sqlx::query(
            r#"
            SELECT id, cliente, valor_total_centavos, forma_pagamento, created_at
            FROM vendas
            ORDER BY created_at DESC, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut sales: Vec<Sale> = Vec::with_capacity(rows.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(rows.len());
        for row in &rows {
            let sale = map_sale(row)?;
            index.insert(sale.id.clone(), sales.len());
            sales.push(sale);
        }

        let item_rows = sqlx::query(
            r#"
            SELECT venda_id, produto_id, nome, fabricante, quantidade, preco_unitario_centavos
            FROM venda_itens
            ORDER BY venda_id, posicao
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        for row in &item_rows {
            let venda_id: String = row.try_get("venda_id")?;
            if let Some(&pos) = index.get(&venda_id) {
                sales[pos].produtos.push(map_item(row)?);
            }
        }

        debug!(count = sales.len(), "Listed sales");
        Ok(sales)
    }

    /// Gets a sale by ID, with line items attached.
    ///
    /// ## Returns
    /// * `Ok(Some(Sale))` - Sale found
    /// * `Ok(None)` - Sale not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let row = sqlx::query(
            r#"
            SELECT id, cliente, valor_total_centavos, forma_pagamento, created_at
            FROM vendas
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let mut sale = map_sale(&row)?;
                sale.produtos = self.items_for(id).await?;
                Ok(Some(sale))
            }
            None => Ok(None),
        }
    }

    /// Inserts a sale and its line items in one transaction.
    pub async fn insert(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, items = sale.produtos.len(), "Inserting sale");

        let cliente = serde_json::to_string(&sale.cliente)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO vendas (id, cliente, valor_total_centavos, forma_pagamento, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&sale.id)
        .bind(cliente)
        .bind(sale.valor_total.centavos())
        .bind(sale.forma_pagamento)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        insert_items(&mut tx, &sale.id, &sale.produtos).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Updates a sale, replacing its line items.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Sale doesn't exist
    pub async fn update(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, "Updating sale");

        let cliente = serde_json::to_string(&sale.cliente)?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE vendas SET
                cliente = ?2,
                valor_total_centavos = ?3,
                forma_pagamento = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&sale.id)
        .bind(cliente)
        .bind(sale.valor_total.centavos())
        .bind(sale.forma_pagamento)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", &sale.id));
        }

        sqlx::query("DELETE FROM venda_itens WHERE venda_id = ?1")
            .bind(&sale.id)
            .execute(&mut *tx)
            .await?;

        insert_items(&mut tx, &sale.id, &sale.produtos).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Deletes a sale. Line items cascade.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Sale doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting sale");

        let result = sqlx::query("DELETE FROM vendas WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", id));
        }

        Ok(())
    }

    /// Counts sales (for diagnostics and seed guards).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vendas")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Fetches line items for a single sale in `posicao` order.
    async fn items_for(&self, venda_id: &str) -> DbResult<Vec<LineItem>> {
        let rows = sqlx::query(
            r#"
            SELECT produto_id, nome, fabricante, quantidade, preco_unitario_centavos
            FROM venda_itens
            WHERE venda_id = ?1
            ORDER BY posicao
            "#,
        )
        .bind(venda_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_item).collect()
    }
}

/// Inserts line items under a parent sale, numbering positions from 0.
async fn insert_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    venda_id: &str,
    produtos: &[LineItem],
) -> DbResult<()> {
    for (posicao, item) in produtos.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO venda_itens
                (venda_id, posicao, produto_id, nome, fabricante, quantidade, preco_unitario_centavos)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(venda_id)
        .bind(posicao as i64)
        .bind(&item.produto_id)
        .bind(&item.nome)
        .bind(&item.fabricante)
        .bind(item.quantidade)
        .bind(item.preco_unitario.centavos())
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Maps a `vendas` row to a Sale with an empty item list.
fn map_sale(row: &SqliteRow) -> DbResult<Sale> {
    let cliente: String = row.try_get("cliente")?;

    Ok(Sale {
        id: row.try_get("id")?,
        cliente: serde_json::from_str(&cliente)?,
        produtos: Vec::new(),
        valor_total: Money::from_centavos(row.try_get("valor_total_centavos")?),
        forma_pagamento: row.try_get("forma_pagamento")?,
        created_at: row.try_get("created_at")?,
        compras: None,
    })
}

/// Maps a `venda_itens` row to a LineItem.
fn map_item(row: &SqliteRow) -> DbResult<LineItem> {
    Ok(LineItem {
        produto_id: row.try_get("produto_id")?,
        nome: row.try_get("nome")?,
        fabricante: row.try_get("fabricante")?,
        quantidade: row.try_get("quantidade")?,
        preco_unitario: Money::from_centavos(row.try_get("preco_unitario_centavos")?),
    })
}

/// Helper to generate a new sale ID.
pub fn generate_sale_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
