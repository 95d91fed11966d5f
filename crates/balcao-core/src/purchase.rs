//! # Purchase Request Assembly
//!
//! Builds the create-purchase payload for a chosen pending sale. The
//! sale's line items are copied verbatim (product id, name, manufacturer,
//! quantity, unit price); no re-pricing or re-quantifying happens here.
//!
//! The effectful half (pending-membership check, persistence, snapshot
//! reload) lives in `balcao-service`; this module stays pure.

use crate::types::{CreatePurchaseRequest, PaymentMethod, Sale, Supplier};

/// Assembles a purchase request from a sale and the user-provided
/// supplier and payment method.
///
/// ## Example
/// ```rust
/// # use balcao_core::money::Money;
/// # use balcao_core::purchase::build_purchase_request;
/// # use balcao_core::types::*;
/// # use chrono::Utc;
/// # let endereco = Address {
/// #     rua: "Rua A".into(), numero: "1".into(), complemento: None,
/// #     bairro: "Centro".into(), cidade: "SP".into(), estado: "SP".into(),
/// #     cep: "01000-000".into(),
/// # };
/// # let sale = Sale {
/// #     id: "venda-1".into(),
/// #     cliente: Customer {
/// #         nome: "Ana".into(), documento: "111".into(),
/// #         email: "a@a.com".into(), telefone: "1".into(),
/// #         endereco: endereco.clone(),
/// #     },
/// #     produtos: vec![],
/// #     valor_total: Money::zero(),
/// #     forma_pagamento: PaymentMethod::Pix,
/// #     created_at: Utc::now(),
/// #     compras: None,
/// # };
/// # let fornecedor = Supplier {
/// #     razao_social: "F LTDA".into(), nome_fantasia: "F".into(),
/// #     cnpj: "12345678000190".into(), email: "f@f.com".into(),
/// #     telefone: "2".into(), endereco,
/// #     contato: Contact {
/// #         nome: "João".into(), email: "j@f.com".into(),
/// #         telefone: "3".into(), cargo: "Vendas".into(),
/// #     },
/// # };
/// let request = build_purchase_request(&sale, fornecedor, PaymentMethod::Boleto);
/// assert_eq!(request.venda_id, sale.id);
/// assert_eq!(request.produtos, sale.produtos);
/// ```
pub fn build_purchase_request(
    sale: &Sale,
    fornecedor: Supplier,
    forma_pagamento: PaymentMethod,
) -> CreatePurchaseRequest {
    CreatePurchaseRequest {
        venda_id: sale.id.clone(),
        fornecedor,
        produtos: sale.produtos.clone(),
        forma_pagamento,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{Address, Contact, Customer, LineItem};
    use chrono::Utc;

    fn address() -> Address {
        Address {
            rua: "Avenida Brasil".to_string(),
            numero: "500".to_string(),
            complemento: Some("Sala 3".to_string()),
            bairro: "Centro".to_string(),
            cidade: "Rio de Janeiro".to_string(),
            estado: "RJ".to_string(),
            cep: "20000-000".to_string(),
        }
    }

    fn supplier() -> Supplier {
        Supplier {
            razao_social: "Distribuidora Beta LTDA".to_string(),
            nome_fantasia: "Beta".to_string(),
            cnpj: "98.765.432/0001-10".to_string(),
            email: "vendas@beta.com".to_string(),
            telefone: "(21) 3333-0000".to_string(),
            endereco: address(),
            contato: Contact {
                nome: "Paula".to_string(),
                email: "paula@beta.com".to_string(),
                telefone: "(21) 98888-0000".to_string(),
                cargo: "Gerente".to_string(),
            },
        }
    }

    fn sale_with_two_items() -> Sale {
        Sale {
            id: "venda-7".to_string(),
            cliente: Customer {
                nome: "Bruno Lima".to_string(),
                documento: "222.333.444-55".to_string(),
                email: "bruno@example.com".to_string(),
                telefone: "(21) 99999-0000".to_string(),
                endereco: address(),
            },
            produtos: vec![
                LineItem {
                    produto_id: "prod-1".to_string(),
                    nome: "Mouse Logitech M170".to_string(),
                    fabricante: "Logitech".to_string(),
                    quantidade: 2,
                    preco_unitario: Money::from_centavos(4550),
                },
                LineItem {
                    produto_id: "prod-2".to_string(),
                    nome: "Teclado Redragon Kumara".to_string(),
                    fabricante: "Redragon".to_string(),
                    quantidade: 1,
                    preco_unitario: Money::from_centavos(19900),
                },
            ],
            valor_total: Money::from_centavos(29000),
            forma_pagamento: PaymentMethod::Pix,
            created_at: Utc::now(),
            compras: None,
        }
    }

    #[test]
    fn test_items_are_copied_verbatim() {
        let sale = sale_with_two_items();
        let request = build_purchase_request(&sale, supplier(), PaymentMethod::Boleto);

        // Both line items appear unchanged: same ids, names, manufacturers,
        // quantities, and unit prices
        assert_eq!(request.produtos, sale.produtos);
        assert_eq!(request.produtos.len(), 2);
        assert_eq!(request.produtos[0].produto_id, "prod-1");
        assert_eq!(request.produtos[0].quantidade, 2);
        assert_eq!(request.produtos[0].preco_unitario, Money::from_centavos(4550));
    }

    #[test]
    fn test_request_references_the_sale() {
        let sale = sale_with_two_items();
        let request = build_purchase_request(&sale, supplier(), PaymentMethod::Boleto);

        assert_eq!(request.venda_id, "venda-7");
        assert_eq!(request.forma_pagamento, PaymentMethod::Boleto);
        assert_eq!(request.fornecedor.cnpj, "98.765.432/0001-10");
    }

    #[test]
    fn test_sale_is_not_mutated() {
        let sale = sale_with_two_items();
        let before = sale.clone();

        let _ = build_purchase_request(&sale, supplier(), PaymentMethod::CartaoCredito);

        assert_eq!(sale.produtos, before.produtos);
        assert_eq!(sale.valor_total, before.valor_total);
    }
}
