//! # balcao-service: Dashboard Orchestration for Balcão
//!
//! Sits between the front ends and the storage layer. Owns an in-memory
//! [`Snapshot`] of sales and purchases, refreshes it from `balcao-db`,
//! and answers every read from the snapshot with `balcao-core` functions.
//!
//! ## Architecture
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      DashboardService                        │
//! │                                                              │
//! │   RwLock<Snapshot> ◄── refresh() ◄── balcao-db repositories  │
//! │        │                                                     │
//! │        ├─► pending_sales / stats / dashboard / reports       │
//! │        └─► search (purchases, suppliers)                     │
//! │                                                              │
//! │   create_purchase / CRUD ──► balcao-db ──► refresh()         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure crosses this boundary as a [`ServiceError`] with a
//! machine-readable [`ErrorCode`]; storage details never leak through.

pub mod error;
pub mod service;
pub mod snapshot;

pub use error::{ErrorCode, ServiceError, ServiceResult};
pub use service::{DashboardService, DashboardView};
pub use snapshot::Snapshot;
