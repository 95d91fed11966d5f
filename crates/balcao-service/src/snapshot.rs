//! # Dashboard Snapshot
//!
//! The in-memory working set every dashboard computation runs against.
//!
//! A snapshot is the full Sales and Purchases collections as of one load,
//! plus the load timestamp. It is never patched in place: `refresh()`
//! builds a new snapshot and swaps it in whole, so readers always see a
//! pair of collections loaded at the same instant.

use chrono::{DateTime, Utc};

use balcao_core::{Purchase, Sale};

/// The most recently loaded Sales + Purchases pair.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// All sales, newest first.
    pub sales: Vec<Sale>,

    /// All purchases, newest first.
    pub purchases: Vec<Purchase>,

    /// When this snapshot was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    /// Creates an empty snapshot (service state before the first refresh).
    pub fn empty() -> Self {
        Snapshot {
            sales: Vec::new(),
            purchases: Vec::new(),
            loaded_at: Utc::now(),
        }
    }

    /// Whether anything has been loaded.
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty() && self.purchases.is_empty()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot::empty()
    }
}
