//! # Supplier Repository
//!
//! Database operations for the supplier registry.
//!
//! The registry holds the suppliers the shop buys from, independent of the
//! supplier snapshots embedded in past purchases. CNPJ is unique across the
//! registry; `endereco` and `contato` are JSON sub-documents.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use balcao_core::SupplierRecord;

/// Repository for supplier registry operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Lists all registry suppliers sorted by legal name.
    pub async fn list_all(&self) -> DbResult<Vec<SupplierRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, razao_social, nome_fantasia, cnpj, email, telefone,
                   endereco, contato, created_at, updated_at
            FROM fornecedores
            ORDER BY razao_social COLLATE NOCASE, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_supplier).collect()
    }

    /// Gets a registry supplier by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<SupplierRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, razao_social, nome_fantasia, cnpj, email, telefone,
                   endereco, contato, created_at, updated_at
            FROM fornecedores
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(map_supplier(&row)?)),
            None => Ok(None),
        }
    }

    /// Gets a registry supplier by CNPJ.
    pub async fn get_by_cnpj(&self, cnpj: &str) -> DbResult<Option<SupplierRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, razao_social, nome_fantasia, cnpj, email, telefone,
                   endereco, contato, created_at, updated_at
            FROM fornecedores
            WHERE cnpj = ?1
            "#,
        )
        .bind(cnpj)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(map_supplier(&row)?)),
            None => Ok(None),
        }
    }

    /// Inserts a new registry supplier.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - CNPJ already registered
    pub async fn insert(&self, supplier: &SupplierRecord) -> DbResult<()> {
        debug!(id = %supplier.id, cnpj = %supplier.cnpj, "Inserting supplier");

        let endereco = serde_json::to_string(&supplier.endereco)?;
        let contato = serde_json::to_string(&supplier.contato)?;

        sqlx::query(
            r#"
            INSERT INTO fornecedores
                (id, razao_social, nome_fantasia, cnpj, email, telefone,
                 endereco, contato, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&supplier.id)
        .bind(&supplier.razao_social)
        .bind(&supplier.nome_fantasia)
        .bind(&supplier.cnpj)
        .bind(&supplier.email)
        .bind(&supplier.telefone)
        .bind(endereco)
        .bind(contato)
        .bind(supplier.created_at)
        .bind(supplier.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing registry supplier and bumps `updated_at`.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Supplier doesn't exist
    pub async fn update(&self, supplier: &SupplierRecord) -> DbResult<()> {
        debug!(id = %supplier.id, "Updating supplier");

        let endereco = serde_json::to_string(&supplier.endereco)?;
        let contato = serde_json::to_string(&supplier.contato)?;
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE fornecedores SET
                razao_social = ?2,
                nome_fantasia = ?3,
                cnpj = ?4,
                email = ?5,
                telefone = ?6,
                endereco = ?7,
                contato = ?8,
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(&supplier.id)
        .bind(&supplier.razao_social)
        .bind(&supplier.nome_fantasia)
        .bind(&supplier.cnpj)
        .bind(&supplier.email)
        .bind(&supplier.telefone)
        .bind(endereco)
        .bind(contato)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", &supplier.id));
        }

        Ok(())
    }

    /// Deletes a registry supplier.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Supplier doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting supplier");

        let result = sqlx::query("DELETE FROM fornecedores WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", id));
        }

        Ok(())
    }

    /// Counts registry suppliers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fornecedores")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Maps a `fornecedores` row to a SupplierRecord.
fn map_supplier(row: &SqliteRow) -> DbResult<SupplierRecord> {
    let endereco: String = row.try_get("endereco")?;
    let contato: String = row.try_get("contato")?;

    Ok(SupplierRecord {
        id: row.try_get("id")?,
        razao_social: row.try_get("razao_social")?,
        nome_fantasia: row.try_get("nome_fantasia")?,
        cnpj: row.try_get("cnpj")?,
        email: row.try_get("email")?,
        telefone: row.try_get("telefone")?,
        endereco: serde_json::from_str(&endereco)?,
        contato: serde_json::from_str(&contato)?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Helper to generate a new supplier ID.
pub fn generate_supplier_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use balcao_core::{Address, Contact};

    fn fornecedor(id: &str, razao_social: &str, cnpj: &str) -> SupplierRecord {
        let now = Utc::now();
        SupplierRecord {
            id: id.to_string(),
            razao_social: razao_social.to_string(),
            nome_fantasia: razao_social.split_whitespace().next().unwrap().to_string(),
            cnpj: cnpj.to_string(),
            email: "vendas@fornecedor.com".to_string(),
            telefone: "(11) 3333-0000".to_string(),
            endereco: Address {
                rua: "Av. Industrial".to_string(),
                numero: "1500".to_string(),
                complemento: None,
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
        let repo = db.suppliers();

        let supplier = fornecedor("forn-1", "Distribuidora Alfa LTDA", "12.345.678/0001-90");
        repo.insert(&supplier).await.unwrap();

        let fetched = repo.get_by_id("forn-1").await.unwrap().unwrap();
        assert_eq!(fetched.razao_social, "Distribuidora Alfa LTDA");
        assert_eq!(fetched.endereco, supplier.endereco);
        assert_eq!(fetched.contato, supplier.contato);
        assert_eq!(fetched.info().cnpj, "12.345.678/0001-90");
    }

    #[tokio::test]
    async fn test_get_by_cnpj() {
        let db = test_db().await;
        let repo = db.suppliers();

        repo.insert(&fornecedor("forn-1", "Alfa LTDA", "11.111.111/0001-11"))
            .await
            .unwrap();

        let found = repo.get_by_cnpj("11.111.111/0001-11").await.unwrap();
        assert_eq!(found.unwrap().id, "forn-1");

        assert!(repo.get_by_cnpj("99.999.999/0001-99").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_cnpj_rejected() {
        let db = test_db().await;
        let repo = db.suppliers();

        repo.insert(&fornecedor("forn-1", "Alfa LTDA", "11.111.111/0001-11"))
            .await
            .unwrap();

        let err = repo
            .insert(&fornecedor("forn-2", "Beta LTDA", "11.111.111/0001-11"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_sorted_by_razao_social() {
        let db = test_db().await;
        let repo = db.suppliers();

        repo.insert(&fornecedor("forn-1", "Gama Comércio", "33.333.333/0001-33"))
            .await
            .unwrap();
        repo.insert(&fornecedor("forn-2", "alfa distribuidora", "11.111.111/0001-11"))
            .await
            .unwrap();

        let suppliers = repo.list_all().await.unwrap();
        assert_eq!(suppliers[0].razao_social, "alfa distribuidora");
        assert_eq!(suppliers[1].razao_social, "Gama Comércio");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = test_db().await;
        let repo = db.suppliers();

        let mut supplier = fornecedor("forn-1", "Alfa LTDA", "11.111.111/0001-11");
        repo.insert(&supplier).await.unwrap();

        supplier.telefone = "(11) 4444-0000".to_string();
        repo.update(&supplier).await.unwrap();
        let fetched = repo.get_by_id("forn-1").await.unwrap().unwrap();
        assert_eq!(fetched.telefone, "(11) 4444-0000");

        repo.delete("forn-1").await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);

        let err = repo.delete("forn-1").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
