//! # Purchase Repository
//!
//! Database operations for purchase aggregates.
//!
//! ## Soft Reference to Sales
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  compras.venda_id holds the id of the sale the purchase restocks.      │
//! │                                                                         │
//! │  It is deliberately NOT a foreign key: a purchase must survive the     │
//! │  deletion of its sale, and reconciliation treats a dangling venda_id   │
//! │  as "no pending sale fulfilled" rather than an error.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Everything else mirrors the sale aggregate: a parent row plus ordered
//! line items, written transactionally and stitched on read.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use balcao_core::{LineItem, Money, Purchase};

/// Repository for purchase database operations.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    pool: SqlitePool,
}

impl PurchaseRepository {
    /// Creates a new PurchaseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PurchaseRepository { pool }
    }

    /// Lists all purchases, newest first, with line items attached.
    pub async fn list_all(&self) -> DbResult<Vec<Purchase>> {
        let rows = sqlx::query(
            r#"
            SELECT id, venda_id, fornecedor, valor_total_centavos, forma_pagamento, created_at
            FROM compras
            ORDER BY created_at DESC, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut purchases: Vec<Purchase> = Vec::with_capacity(rows.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(rows.len());
        for row in &rows {
            let purchase = map_purchase(row)?;
            index.insert(purchase.id.clone(), purchases.len());
            purchases.push(purchase);
        }

        let item_rows = sqlx::query(
            r#"
            SELECT compra_id, produto_id, nome, fabricante, quantidade, preco_unitario_centavos
            FROM compra_itens
            ORDER BY compra_id, posicao
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        for row in &item_rows {
            let compra_id: String = row.try_get("compra_id")?;
            if let Some(&pos) = index.get(&compra_id) {
                purchases[pos].produtos.push(map_item(row)?);
            }
        }

        debug!(count = purchases.len(), "Listed purchases");
        Ok(purchases)
    }

    /// Gets a purchase by ID, with line items attached.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Purchase>> {
        let row = sqlx::query(
            r#"
            SELECT id, venda_id, fornecedor, valor_total_centavos, forma_pagamento, created_at
            FROM compras
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let mut purchase = map_purchase(&row)?;
                purchase.produtos = self.items_for(id).await?;
                Ok(Some(purchase))
            }
            None => Ok(None),
        }
    }

    /// Lists the purchases recorded against one sale, oldest first.
    ///
    /// Oldest-first matches reconciliation: the earliest purchase is the
    /// one that fulfilled the sale.
    pub async fn list_for_sale(&self, venda_id: &str) -> DbResult<Vec<Purchase>> {
        let rows = sqlx::query(
            r#"
            SELECT id, venda_id, fornecedor, valor_total_centavos, forma_pagamento, created_at
            FROM compras
            WHERE venda_id = ?1
            ORDER BY created_at, id
            "#,
        )
        .bind(venda_id)
        .fetch_all(&self.pool)
        .await?;

        let mut purchases = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut purchase = map_purchase(row)?;
            purchase.produtos = self.items_for(&purchase.id).await?;
            purchases.push(purchase);
        }

        Ok(purchases)
    }

    /// Inserts a purchase and its line items in one transaction.
    pub async fn insert(&self, purchase: &Purchase) -> DbResult<()> {
        debug!(
            id = %purchase.id,
            venda_id = %purchase.venda_id,
            items = purchase.produtos.len(),
            "Inserting purchase"
        );

        let fornecedor = serde_json::to_string(&purchase.fornecedor)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO compras
                (id, venda_id, fornecedor, valor_total_centavos, forma_pagamento, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&purchase.id)
        .bind(&purchase.venda_id)
        .bind(fornecedor)
        .bind(purchase.valor_total.centavos())
        .bind(purchase.forma_pagamento)
        .bind(purchase.created_at)
        .execute(&mut *tx)
        .await?;

        insert_items(&mut tx, &purchase.id, &purchase.produtos).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Deletes a purchase. Line items cascade.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Purchase doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting purchase");

        let result = sqlx::query("DELETE FROM compras WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Purchase", id));
        }

        Ok(())
    }

    /// Counts purchases (for diagnostics and seed guards).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM compras")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Fetches line items for a single purchase in `posicao` order.
    async fn items_for(&self, compra_id: &str) -> DbResult<Vec<LineItem>> {
        let rows = sqlx::query(
            r#"
            SELECT produto_id, nome, fabricante, quantidade, preco_unitario_centavos
            FROM compra_itens
            WHERE compra_id = ?1
            ORDER BY posicao
            "#,
        )
        .bind(compra_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_item).collect()
    }
}

/// Inserts line items under a parent purchase, numbering positions from 0.
async fn insert_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    compra_id: &str,
    produtos: &[LineItem],
) -> DbResult<()> {
    for (posicao, item) in produtos.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO compra_itens
                (compra_id, posicao, produto_id, nome, fabricante, quantidade, preco_unitario_centavos)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(compra_id)
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

/// Maps a `compras` row to a Purchase with an empty item list.
fn map_purchase(row: &SqliteRow) -> DbResult<Purchase> {
    let fornecedor: String = row.try_get("fornecedor")?;

    Ok(Purchase {
        id: row.try_get("id")?,
        venda_id: row.try_get("venda_id")?,
        fornecedor: serde_json::from_str(&fornecedor)?,
        produtos: Vec::new(),
        valor_total: Money::from_centavos(row.try_get("valor_total_centavos")?),
        forma_pagamento: row.try_get("forma_pagamento")?,
        created_at: row.try_get("created_at")?,
        venda: None,
    })
}

/// Maps a `compra_itens` row to a LineItem.
fn map_item(row: &SqliteRow) -> DbResult<LineItem> {
    Ok(LineItem {
        produto_id: row.try_get("produto_id")?,
        nome: row.try_get("nome")?,
        fabricante: row.try_get("fabricante")?,
        quantidade: row.try_get("quantidade")?,
        preco_unitario: Money::from_centavos(row.try_get("preco_unitario_centavos")?),
    })
}

/// Helper to generate a new purchase ID.
pub fn generate_purchase_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use balcao_core::{Address, Contact, PaymentMethod, Supplier};
    use chrono::{Duration, Utc};

    fn fornecedor(razao_social: &str, cnpj: &str) -> Supplier {
        Supplier {
            razao_social: razao_social.to_string(),
            nome_fantasia: razao_social.split_whitespace().next().unwrap().to_string(),
            cnpj: cnpj.to_string(),
            email: "vendas@fornecedor.com".to_string(),
            telefone: "(11) 3333-0000".to_string(),
            endereco: Address {
                rua: "Av. Industrial".to_string(),
                numero: "1500".to_string(),
                complemento: Some("Galpão 3".to_string()),
                bairro: "Distrito".to_string(),
                cidade: "Guarulhos".to_string(),
                estado: "SP".to_string(),
                cep: "07000-000".to_string(),
            },
            contato: Contact {
                nome: "Carlos Lima".to_string(),
                email: "carlos@fornecedor.com".to_string(),
                telefone: "(11) 98888-0000".to_string(),
                cargo: "Comercial".to_string(),
            },
        }
    }

    fn item(nome: &str, quantidade: i64, preco_centavos: i64) -> LineItem {
        LineItem {
            produto_id: format!("prod-{nome}"),
            nome: nome.to_string(),
            fabricante: "Fabricante".to_string(),
            quantidade,
            preco_unitario: Money::from_centavos(preco_centavos),
        }
    }

    fn compra(id: &str, venda_id: &str, minutes_ago: i64) -> Purchase {
        let produtos = vec![item("Mouse Sem Fio", 2, 3000)];

        Purchase {
            id: id.to_string(),
            venda_id: venda_id.to_string(),
            fornecedor: fornecedor("Distribuidora Alfa LTDA", "12.345.678/0001-90"),
            produtos,
            valor_total: Money::from_centavos(6000),
            forma_pagamento: PaymentMethod::Boleto,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
            venda: None,
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_roundtrip() {
        let db = test_db().await;
        let repo = db.purchases();

        let purchase = compra("compra-1", "venda-1", 0);
        repo.insert(&purchase).await.unwrap();

        let fetched = repo.get_by_id("compra-1").await.unwrap().unwrap();
        assert_eq!(fetched.id, "compra-1");
        assert_eq!(fetched.venda_id, "venda-1");
        assert_eq!(fetched.fornecedor, purchase.fornecedor);
        assert_eq!(fetched.produtos, purchase.produtos);
        assert_eq!(fetched.valor_total, Money::from_centavos(6000));
        assert_eq!(fetched.forma_pagamento, PaymentMethod::Boleto);
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let db = test_db().await;
        let repo = db.purchases();

        repo.insert(&compra("compra-old", "venda-1", 60))
            .await
            .unwrap();
        repo.insert(&compra("compra-new", "venda-2", 1))
            .await
            .unwrap();

        let purchases = repo.list_all().await.unwrap();
        assert_eq!(purchases.len(), 2);
        assert_eq!(purchases[0].id, "compra-new");
        assert_eq!(purchases[1].id, "compra-old");
        assert_eq!(purchases[0].produtos.len(), 1);
    }

    #[tokio::test]
    async fn test_list_for_sale_filters_and_orders_oldest_first() {
        let db = test_db().await;
        let repo = db.purchases();

        repo.insert(&compra("compra-a", "venda-1", 60)).await.unwrap();
        repo.insert(&compra("compra-b", "venda-1", 5)).await.unwrap();
        repo.insert(&compra("compra-c", "venda-2", 1)).await.unwrap();

        let for_sale = repo.list_for_sale("venda-1").await.unwrap();
        assert_eq!(for_sale.len(), 2);
        assert_eq!(for_sale[0].id, "compra-a");
        assert_eq!(for_sale[1].id, "compra-b");

        assert!(repo.list_for_sale("venda-3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dangling_venda_id_is_accepted() {
        // venda_id is a soft reference: inserting a purchase for a sale
        // that was never stored (or was deleted) must succeed.
        let db = test_db().await;
        let repo = db.purchases();

        repo.insert(&compra("compra-1", "venda-apagada", 0))
            .await
            .unwrap();

        let fetched = repo.get_by_id("compra-1").await.unwrap().unwrap();
        assert_eq!(fetched.venda_id, "venda-apagada");
    }

    #[tokio::test]
    async fn test_delete_cascades_items() {
        let db = test_db().await;
        let repo = db.purchases();

        repo.insert(&compra("compra-1", "venda-1", 0)).await.unwrap();
        repo.delete("compra-1").await.unwrap();

        assert!(repo.get_by_id("compra-1").await.unwrap().is_none());

        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM compra_itens")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = test_db().await;

        let err = db.purchases().delete("ghost").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
