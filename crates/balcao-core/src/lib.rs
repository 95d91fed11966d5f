//! # balcao-core: Pure Business Logic for Balcão
//!
//! Entity model and pure domain functions for the inventory/sales
//! dashboard. Everything in this crate is deterministic and I/O-free;
//! persistence and orchestration live in `balcao-db` and `balcao-service`.
//!
//! ## Data Flow
//! ```text
//! sales ──┐
//!         ├──► reconcile::pending_sales ──► purchase::build_purchase_request
//! compras ┘            │
//!                      ▼
//!          stats / report / suppliers / search   (derived views)
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sale, Purchase, Supplier, Product, ...)
//! - [`money`] - Money type with integer centavos arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`reconcile`] - Pending vs. fulfilled sale classification
//! - [`stats`] - Aggregate statistics and product rankings
//! - [`purchase`] - Purchase request assembly from a pending sale
//! - [`suppliers`] - Supplier projection from recorded purchases
//! - [`search`] - Text filters for the purchases/suppliers list views
//! - [`report`] - Sales and products report data
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same input, same output; no hidden state
//! 2. **No I/O**: database, network, and file access are forbidden here
//! 3. **Integer money**: all monetary values are centavos (i64), never floats
//! 4. **Explicit errors**: typed errors, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use balcao_core::money::Money;
//! use balcao_core::stats::compute_sale_stats;
//!
//! // Create money from centavos (never from floats!)
//! let price = Money::from_centavos(1099); // R$ 10,99
//! assert_eq!(price.to_string(), "R$ 10,99");
//!
//! // Aggregations are total: the empty collection is a valid input
//! let stats = compute_sale_stats(&[]);
//! assert_eq!(stats.average_ticket, Money::zero());
//! assert_eq!(stats.total_orders, 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod purchase;
pub mod reconcile;
pub mod report;
pub mod search;
pub mod stats;
pub mod suppliers;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items in a single sale or purchase.
pub const MAX_SALE_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Number of entries in the dashboard's best-seller ranking.
pub const TOP_QUANTITY_COUNT: usize = 3;

/// Number of entries in the dashboard's profit ranking.
pub const TOP_PROFIT_COUNT: usize = 5;

/// Digits of a bare CNPJ (company tax id) after stripping punctuation.
pub const CNPJ_DIGITS: usize = 14;
