//! # List View Filters
//!
//! Substring filters backing the search boxes of the purchases and
//! suppliers screens. Name matching is case-insensitive; cnpj matching is
//! a raw substring test so users can paste formatted or bare digits. An
//! empty (or whitespace-only) query selects everything.

use crate::types::{Purchase, Supplier};

/// Filters purchases by supplier name, supplier cnpj, or any line item's
/// product name or manufacturer.
pub fn filter_purchases<'a>(purchases: &'a [Purchase], query: &str) -> Vec<&'a Purchase> {
    let raw = query.trim();
    if raw.is_empty() {
        return purchases.iter().collect();
    }
    let term = raw.to_lowercase();

    purchases
        .iter()
        .filter(|purchase| {
            purchase
                .fornecedor
                .razao_social
                .to_lowercase()
                .contains(&term)
                || purchase.fornecedor.cnpj.contains(raw)
                || purchase.produtos.iter().any(|item| {
                    item.nome.to_lowercase().contains(&term)
                        || item.fabricante.to_lowercase().contains(&term)
                })
        })
        .collect()
}

/// Filters suppliers by legal name, trade name, or cnpj.
pub fn filter_suppliers<'a>(suppliers: &'a [Supplier], query: &str) -> Vec<&'a Supplier> {
    let raw = query.trim();
    if raw.is_empty() {
        return suppliers.iter().collect();
    }
    let term = raw.to_lowercase();

    suppliers
        .iter()
        .filter(|supplier| {
            supplier.razao_social.to_lowercase().contains(&term)
                || supplier.nome_fantasia.to_lowercase().contains(&term)
                || supplier.cnpj.contains(raw)
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
