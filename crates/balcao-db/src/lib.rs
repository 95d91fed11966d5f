//! # balcao-db: Storage Layer for Balcão
//!
//! This crate provides database access for the Balcão dashboard.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Balcão Data Flow                                 │
//! │                                                                         │
//! │  DashboardService (refresh / create_purchase)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     balcao-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐ │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │ │   │
//! │  │   │   (pool.rs)   │    │  (sale.rs,     │    │  (embedded)  │ │   │
//! │  │   │               │    │   purchase.rs, │    │              │ │   │
//! │  │   │ SqlitePool    │◄───│   product.rs,  │    │ 0001_...sql  │ │   │
//! │  │   │ Connection    │    │   supplier.rs) │    │              │ │   │
//! │  │   │ Management    │    │                │    │              │ │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘ │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (./balcao.db)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (sale, purchase, product, supplier)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use balcao_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let config = DbConfig::new("path/to/balcao.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let vendas = db.sales().list_all().await?;
//! let compras = db.purchases().list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::purchase::PurchaseRepository;
pub use repository::sale::SaleRepository;
pub use repository::supplier::SupplierRepository;
