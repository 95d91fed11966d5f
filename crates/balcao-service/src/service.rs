//! # Dashboard Service
//!
//! The orchestration layer every front end talks to.
//!
//! ## Refresh Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Snapshot Refresh                                     │
//! │                                                                         │
//! │  refresh()                                                             │
//! │       │                                                                 │
//! │       ├──────────────┬─────────────────┐                               │
//! │       ▼              ▼                 │ tokio::try_join!              │
//! │  sales().list_all()  purchases().list_all()                            │
//! │       │              │                                                  │
//! │       └──────┬───────┘                                                  │
//! │              ▼                                                          │
//! │  RwLock::write → *snapshot = Snapshot { sales, purchases, now }        │
//! │                                                                         │
//! │  Every read operation (stats, reports, search, pending) takes the     │
//! │  read lock and computes over the snapshot with balcao-core functions.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write Operations
//! Writes go to the database first and refresh the snapshot afterwards,
//! so a successful write is visible in the very next read. Purchase
//! creation checks the database directly (not the snapshot) before
//! inserting; a stale snapshot can never let a duplicate purchase through.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::{ServiceError, ServiceResult};
use crate::snapshot::Snapshot;
use balcao_core::purchase::build_purchase_request;
use balcao_core::report::{ProductsReport, SalesReport};
use balcao_core::stats::{
    PaymentMethodCount, ProductProfit, ProductQuantity, PurchaseStats, SaleStats,
};
use balcao_core::{
    reconcile, report, search, stats, suppliers, validation, CoreError, CreateProductRequest,
    CreateSaleRequest, Money, PaymentMethod, Product, Purchase, Sale, Supplier, SupplierRecord,
    ValidationError, TOP_PROFIT_COUNT, TOP_QUANTITY_COUNT,
};
use balcao_db::repository::product::generate_product_id;
use balcao_db::repository::purchase::generate_purchase_id;
use balcao_db::repository::sale::generate_sale_id;
use balcao_db::repository::supplier::generate_supplier_id;
use balcao_db::Database;

// =============================================================================
// View Payloads
// =============================================================================

/// Everything the dashboard overview page shows, in one payload.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Overview card: number of sales.
    pub total_vendas: usize,

    /// Overview card: gross revenue across all sales.
    pub faturamento_total: Money,

    /// Overview card: units sold across all line items.
    pub total_produtos_vendidos: i64,

    /// Overview card: revenue / sale count.
    pub ticket_medio: Money,

    /// Sales still waiting for a restock purchase.
    pub vendas_pendentes: usize,

    /// Payment method breakdown (every method listed, zeros included).
    pub vendas_por_forma_pagamento: Vec<PaymentMethodCount>,

    /// Best sellers by unit count.
    pub produtos_mais_vendidos: Vec<ProductQuantity>,

    /// Highest-margin products.
    pub produtos_maior_lucro: Vec<ProductProfit>,
}

// =============================================================================
// Service
// =============================================================================

/// Dashboard service: owns the database handle and the snapshot.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./balcao.db")).await?;
/// let service = DashboardService::new(db);
/// service.refresh().await?;
///
/// let view = service.dashboard().await;
/// let pendentes = service.pending_sales().await;
/// ```
#[derive(Debug)]
pub struct DashboardService {
    db: Database,
    snapshot: RwLock<Snapshot>,
}

impl DashboardService {
    /// Creates a service with an empty snapshot. Call [`refresh`] before
    /// reading.
    ///
    /// [`refresh`]: DashboardService::refresh
    pub fn new(db: Database) -> Self {
        DashboardService {
            db,
            snapshot: RwLock::new(Snapshot::empty()),
        }
    }

    // =========================================================================
    // Snapshot Lifecycle
    // =========================================================================

    /// Reloads sales and purchases and replaces the snapshot whole.
    ///
    /// Both collections load concurrently; the snapshot is only swapped
    /// once both have arrived, so readers never see a half-updated pair.
    pub async fn refresh(&self) -> ServiceResult<()> {
        debug!("Refreshing dashboard snapshot");

        let sales_repo = self.db.sales();
        let purchases_repo = self.db.purchases();
        let (sales, purchases) =
            tokio::try_join!(sales_repo.list_all(), purchases_repo.list_all())?;

        let mut snapshot = self.snapshot.write().await;
        *snapshot = Snapshot {
            sales,
            purchases,
            loaded_at: Utc::now(),
        };

        info!(
            sales = snapshot.sales.len(),
            purchases = snapshot.purchases.len(),
            "Snapshot refreshed"
        );
        Ok(())
    }

    /// When the current snapshot was loaded.
    pub async fn loaded_at(&self) -> DateTime<Utc> {
        self.snapshot.read().await.loaded_at
    }

    // =========================================================================
    // Snapshot Reads
    // =========================================================================

    /// All sales in the snapshot, newest first.
    pub async fn list_sales(&self) -> Vec<Sale> {
        self.snapshot.read().await.sales.clone()
    }

    /// All purchases in the snapshot, newest first.
    pub async fn list_purchases(&self) -> Vec<Purchase> {
        self.snapshot.read().await.purchases.clone()
    }

    /// Sales with no purchase yet, in snapshot order.
    pub async fn pending_sales(&self) -> Vec<Sale> {
        let snapshot = self.snapshot.read().await;
        reconcile::pending_sales(&snapshot.sales, &snapshot.purchases)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Sale-side aggregate statistics.
    pub async fn sale_stats(&self) -> SaleStats {
        let snapshot = self.snapshot.read().await;
        stats::compute_sale_stats(&snapshot.sales)
    }

    /// Purchase-side aggregate statistics.
    pub async fn purchase_stats(&self) -> PurchaseStats {
        let snapshot = self.snapshot.read().await;
        stats::compute_purchase_stats(&snapshot.sales, &snapshot.purchases)
    }

    /// The full dashboard overview payload.
    pub async fn dashboard(&self) -> DashboardView {
        let snapshot = self.snapshot.read().await;
        let sales = &snapshot.sales;
        let sale_stats = stats::compute_sale_stats(sales);

        DashboardView {
            total_vendas: sale_stats.total_orders,
            faturamento_total: sale_stats.total_amount,
            total_produtos_vendidos: stats::total_items_sold(sales),
            ticket_medio: sale_stats.average_ticket,
            vendas_pendentes: reconcile::pending_sales(sales, &snapshot.purchases).len(),
            vendas_por_forma_pagamento: stats::sales_by_payment_method(sales),
            produtos_mais_vendidos: stats::top_products_by_quantity(sales, TOP_QUANTITY_COUNT),
            produtos_maior_lucro: stats::top_products_by_profit(
                sales,
                &snapshot.purchases,
                TOP_PROFIT_COUNT,
            ),
        }
    }

    /// The sales report (summary + one row per sale).
    pub async fn sales_report(&self) -> SalesReport {
        let snapshot = self.snapshot.read().await;
        report::sales_report(&snapshot.sales)
    }

    /// The products report (summary + one row per distinct product).
    pub async fn products_report(&self) -> ProductsReport {
        let snapshot = self.snapshot.read().await;
        report::products_report(&snapshot.sales)
    }

    /// The suppliers seen across all purchases, deduplicated by CNPJ.
    pub async fn suppliers(&self) -> Vec<Supplier> {
        let snapshot = self.snapshot.read().await;
        suppliers::unique_suppliers(&snapshot.purchases)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Purchases matching a free-text query.
    pub async fn search_purchases(&self, query: &str) -> ServiceResult<Vec<Purchase>> {
        let query = validation::validate_search_query(query)?;
        let snapshot = self.snapshot.read().await;
        Ok(search::filter_purchases(&snapshot.purchases, &query)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Purchase-derived suppliers matching a free-text query.
    pub async fn search_suppliers(&self, query: &str) -> ServiceResult<Vec<Supplier>> {
        let query = validation::validate_search_query(query)?;
        let snapshot = self.snapshot.read().await;
        let all: Vec<Supplier> = suppliers::unique_suppliers(&snapshot.purchases)
            .into_iter()
            .cloned()
            .collect();
        Ok(search::filter_suppliers(&all, &query)
            .into_iter()
            .cloned()
            .collect())
    }

    // =========================================================================
    // Purchase Creation
    // =========================================================================

    /// Creates the purchase that fulfills a pending sale.
    ///
    /// ## Flow
    /// 1. Validate the supplier
    /// 2. Load the sale; absent → `NOT_FOUND`
    /// 3. Check for an existing purchase; found → `BUSINESS_LOGIC`
    /// 4. Copy the sale's items into the purchase and insert it
    /// 5. Refresh the snapshot
    ///
    /// Steps 1-3 abort before anything is written.
    pub async fn create_purchase(
        &self,
        sale_id: &str,
        fornecedor: Supplier,
        forma_pagamento: PaymentMethod,
    ) -> ServiceResult<Purchase> {
        debug!(sale_id = %sale_id, "create_purchase");

        validation::validate_supplier(&fornecedor)?;

        let sale = self
            .db
            .sales()
            .get_by_id(sale_id)
            .await?
            .ok_or_else(|| CoreError::SaleNotFound(sale_id.to_string()))?;

        let existing = self.db.purchases().list_for_sale(sale_id).await?;
        if !existing.is_empty() {
            return Err(CoreError::SaleAlreadyFulfilled {
                sale_id: sale_id.to_string(),
            }
            .into());
        }

        let request = build_purchase_request(&sale, fornecedor, forma_pagamento);
        let purchase = Purchase::from_request(request, generate_purchase_id(), Utc::now());

        self.db.purchases().insert(&purchase).await?;
        self.refresh().await?;

        info!(
            purchase_id = %purchase.id,
            sale_id = %sale_id,
            total = %purchase.valor_total,
            "Purchase created"
        );
        Ok(purchase)
    }

    // =========================================================================
    // Detail Lookups
    // =========================================================================

    /// A sale with its purchases attached (display-only relation).
    pub async fn sale_with_purchases(&self, sale_id: &str) -> ServiceResult<Sale> {
        let mut sale = self
            .db
            .sales()
            .get_by_id(sale_id)
            .await?
            .ok_or_else(|| CoreError::SaleNotFound(sale_id.to_string()))?;

        sale.compras = Some(self.db.purchases().list_for_sale(sale_id).await?);
        Ok(sale)
    }

    /// A purchase with its sale attached (display-only relation).
    ///
    /// A dangling `venda_id` leaves the relation unset rather than failing.
    pub async fn purchase_with_sale(&self, purchase_id: &str) -> ServiceResult<Purchase> {
        let mut purchase = self
            .db
            .purchases()
            .get_by_id(purchase_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Purchase", purchase_id))?;

        purchase.venda = self.db.sales().get_by_id(&purchase.venda_id).await?;
        Ok(purchase)
    }

    // =========================================================================
    // Sale CRUD
    // =========================================================================

    /// Creates a sale from a request and refreshes the snapshot.
    pub async fn create_sale(&self, request: CreateSaleRequest) -> ServiceResult<Sale> {
        validation::validate_customer(&request.cliente)?;
        validation::validate_line_items(&request.produtos)?;

        let sale = Sale::from_request(request, generate_sale_id(), Utc::now());
        self.db.sales().insert(&sale).await?;
        self.refresh().await?;

        info!(sale_id = %sale.id, total = %sale.valor_total, "Sale created");
        Ok(sale)
    }

    /// Updates a sale, recomputing its total from the line items.
    pub async fn update_sale(&self, mut sale: Sale) -> ServiceResult<Sale> {
        validation::validate_customer(&sale.cliente)?;
        validation::validate_line_items(&sale.produtos)?;

        sale.valor_total = sale.items_total();
        self.db.sales().update(&sale).await?;
        self.refresh().await?;

        info!(sale_id = %sale.id, "Sale updated");
        Ok(sale)
    }

    /// Deletes a sale and refreshes the snapshot.
    ///
    /// Purchases referencing the sale survive; their `venda_id` dangles.
    pub async fn delete_sale(&self, sale_id: &str) -> ServiceResult<()> {
        self.db.sales().delete(sale_id).await?;
        self.refresh().await?;

        info!(sale_id = %sale_id, "Sale deleted");
        Ok(())
    }

    /// Deletes a purchase and refreshes the snapshot.
    ///
    /// The fulfilled sale, if still present, becomes pending again.
    pub async fn delete_purchase(&self, purchase_id: &str) -> ServiceResult<()> {
        self.db.purchases().delete(purchase_id).await?;
        self.refresh().await?;

        info!(purchase_id = %purchase_id, "Purchase deleted");
        Ok(())
    }

    // =========================================================================
    // Product Catalog CRUD
    // =========================================================================
    // The catalog does not feed the snapshot, so no refresh here.

    /// All catalog products sorted by name.
    pub async fn list_products(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.db.products().list_all().await?)
    }

    /// Creates a catalog product.
    pub async fn create_product(&self, request: CreateProductRequest) -> ServiceResult<Product> {
        if request.nome.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "nome".to_string(),
            }
            .into());
        }
        validation::validate_unit_price(request.preco_unitario.centavos())?;

        let product = Product::from_request(request, generate_product_id(), Utc::now());
        self.db.products().insert(&product).await?;

        info!(product_id = %product.id, nome = %product.nome, "Product created");
        Ok(product)
    }

    /// Updates a catalog product.
    pub async fn update_product(&self, product: &Product) -> ServiceResult<()> {
        if product.nome.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "nome".to_string(),
            }
            .into());
        }
        validation::validate_unit_price(product.preco_unitario.centavos())?;

        self.db.products().update(product).await?;
        Ok(())
    }

    /// Deletes a catalog product.
    pub async fn delete_product(&self, product_id: &str) -> ServiceResult<()> {
        self.db.products().delete(product_id).await?;
        Ok(())
    }

    // =========================================================================
    // Supplier Registry CRUD
    // =========================================================================
    // Registry entries are a convenience for the purchase form; the
    // snapshot only knows suppliers embedded in purchases.

    /// All registry suppliers sorted by legal name.
    pub async fn list_registered_suppliers(&self) -> ServiceResult<Vec<SupplierRecord>> {
        Ok(self.db.suppliers().list_all().await?)
    }

    /// Registers a supplier for reuse on future purchases.
    pub async fn register_supplier(&self, info: Supplier) -> ServiceResult<SupplierRecord> {
        validation::validate_supplier(&info)?;

        let record = SupplierRecord::from_info(info, generate_supplier_id(), Utc::now());
        self.db.suppliers().insert(&record).await?;

        info!(supplier_id = %record.id, cnpj = %record.cnpj, "Supplier registered");
        Ok(record)
    }

    /// Updates a registry supplier.
    pub async fn update_registered_supplier(&self, record: &SupplierRecord) -> ServiceResult<()> {
        validation::validate_supplier(&record.info())?;

        self.db.suppliers().update(record).await?;
        Ok(())
    }

    /// Deletes a registry supplier.
    pub async fn delete_registered_supplier(&self, supplier_id: &str) -> ServiceResult<()> {
        self.db.suppliers().delete(supplier_id).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
