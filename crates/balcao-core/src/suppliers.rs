//! # Supplier Projection
//!
//! The suppliers list view is derived from recorded purchases, not from
//! the registry: every supplier that ever appeared on a purchase shows up
//! exactly once, keyed by cnpj.

use std::collections::HashSet;

use crate::types::{Purchase, Supplier};

/// Deduplicates the suppliers embedded in purchases by exact cnpj
/// equality. The first occurrence wins and first-seen order is preserved.
pub fn unique_suppliers(purchases: &[Purchase]) -> Vec<&Supplier> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut suppliers = Vec::new();

    for purchase in purchases {
        if seen.insert(purchase.fornecedor.cnpj.as_str()) {
            suppliers.push(&purchase.fornecedor);
        }
    }

    suppliers
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{Address, Contact, PaymentMethod};
    use chrono::Utc;

    fn supplier(razao_social: &str, cnpj: &str) -> Supplier {
        Supplier {
            razao_social: razao_social.to_string(),
            nome_fantasia: razao_social.to_string(),
            cnpj: cnpj.to_string(),
            email: "contato@example.com".to_string(),
            telefone: "(51) 3333-0000".to_string(),
            endereco: Address {
                rua: "Rua D".to_string(),
                numero: "4".to_string(),
                complemento: None,
                bairro: "Moinhos".to_string(),
                cidade: "Porto Alegre".to_string(),
                estado: "RS".to_string(),
                cep: "90000-000".to_string(),
            },
            contato: Contact {
                nome: "Contato".to_string(),
                email: "pessoa@example.com".to_string(),
                telefone: "(51) 98888-0000".to_string(),
                cargo: "Vendas".to_string(),
            },
        }
    }

    fn purchase(id: &str, fornecedor: Supplier) -> Purchase {
        Purchase {
            id: id.to_string(),
            venda_id: format!("venda-{id}"),
            fornecedor,
            produtos: vec![],
            valor_total: Money::zero(),
            forma_pagamento: PaymentMethod::Boleto,
            created_at: Utc::now(),
            venda: None,
        }
    }

    #[test]
    fn test_deduplicates_by_cnpj_first_wins() {
        let purchases = vec![
            purchase("c1", supplier("Alfa LTDA", "11.111.111/0001-11")),
            purchase("c2", supplier("Alfa Matriz LTDA", "11.111.111/0001-11")),
            purchase("c3", supplier("Beta LTDA", "22.222.222/0001-22")),
        ];

        let suppliers = unique_suppliers(&purchases);
        assert_eq!(suppliers.len(), 2);
        // First occurrence kept, later record with same cnpj ignored
        assert_eq!(suppliers[0].razao_social, "Alfa LTDA");
        assert_eq!(suppliers[1].razao_social, "Beta LTDA");
    }

    #[test]
    fn test_preserves_first_seen_order() {
        let purchases = vec![
            purchase("c1", supplier("Gama", "33.333.333/0001-33")),
            purchase("c2", supplier("Alfa", "11.111.111/0001-11")),
            purchase("c3", supplier("Beta", "22.222.222/0001-22")),
        ];

        let names: Vec<&str> = unique_suppliers(&purchases)
            .iter()
            .map(|s| s.razao_social.as_str())
            .collect();
        assert_eq!(names, vec!["Gama", "Alfa", "Beta"]);
    }

    #[test]
    fn test_empty_purchases() {
        assert!(unique_suppliers(&[]).is_empty());
    }
}
