//! # Repository Module
//!
//! Database repository implementations for Balcão.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  DashboardService                                                      │
//! │       │                                                                 │
//! │       │  db.sales().list_all()                                         │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │  ├── list_all(&self)                                                   │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, sale)                                               │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Row Mapping
//!
//! Sales and purchases are aggregates: a parent row (`vendas`/`compras`)
//! plus ordered line item rows (`venda_itens`/`compra_itens`). List
//! queries fetch parents and items in two statements and stitch them
//! together in memory, preserving item order via the `posicao` column.
//! Sub-documents with no relational use (cliente, fornecedor) live in
//! JSON columns and round-trip through serde.
//!
//! ## Available Repositories
//!
//! - [`SaleRepository`] - Sale aggregates (venda + itens)
//! - [`PurchaseRepository`] - Purchase aggregates (compra + itens)
//! - [`ProductRepository`] - Product catalog CRUD
//! - [`SupplierRepository`] - Supplier registry CRUD
//!
//! [`SaleRepository`]: sale::SaleRepository
//! [`PurchaseRepository`]: purchase::PurchaseRepository
//! [`ProductRepository`]: product::ProductRepository
//! [`SupplierRepository`]: supplier::SupplierRepository

pub mod product;
pub mod purchase;
pub mod sale;
pub mod supplier;
