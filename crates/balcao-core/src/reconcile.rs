//! # Sale/Purchase Reconciliation
//!
//! Classifies sales as pending or fulfilled against the purchase
//! collection. A sale is pending while no purchase references it through
//! `venda_id`; recording one purchase fulfills it.
//!
//! Classification is a set-membership pass: one scan over the purchases to
//! collect referenced ids, one scan over the sales to filter. O(|P| + |S|),
//! never a nested scan. The output preserves the input sale order and
//! nothing is mutated.

use std::collections::HashSet;

use crate::types::{Purchase, Sale};

/// Collects the ids of all sales that have at least one purchase.
///
/// Duplicate `venda_id`s collapse by set semantics; a sale with two
/// purchases is fulfilled exactly once.
pub fn fulfilled_sale_ids(purchases: &[Purchase]) -> HashSet<&str> {
    purchases
        .iter()
        .map(|purchase| purchase.venda_id.as_str())
        .collect()
}

/// Returns the sales that have no associated purchase, in input order.
///
/// With an empty purchase collection every sale is pending.
///
/// ## Example
/// ```rust
/// use balcao_core::reconcile::pending_sales;
///
/// let sales: Vec<balcao_core::Sale> = vec![];
/// assert!(pending_sales(&sales, &[]).is_empty());
/// ```
pub fn pending_sales<'a>(sales: &'a [Sale], purchases: &[Purchase]) -> Vec<&'a Sale> {
    let fulfilled = fulfilled_sale_ids(purchases);
    sales
        .iter()
        .filter(|sale| !fulfilled.contains(sale.id.as_str()))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
