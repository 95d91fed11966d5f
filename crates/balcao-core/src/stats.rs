//! # Aggregate Statistics
//!
//! Derived quantities for the dashboard and list screens: sale/purchase
//! totals, payment-method breakdown, and the product rankings.
//!
//! Every function here is a pure fold over the loaded collections and is
//! recomputed on each snapshot refresh; no cached or incremental state
//! exists. All of them accept empty input and return zeroed results.
//!
//! Product rankings group by the **full** product name. `short_label`
//! shortens names for display only and never affects grouping: "Mouse
//! Logitech" and "Mouse Razer" stay separate entries that both render as
//! "Mouse".

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::reconcile::pending_sales;
use crate::types::{PaymentMethod, Purchase, Sale};

// =============================================================================
// Stat Shapes
// =============================================================================

/// Sale-side dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleStats {
    pub total_amount: Money,
    pub average_ticket: Money,
    pub total_orders: usize,
    pub unique_customers: usize,
}

/// Purchase-side dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseStats {
    pub total_amount: Money,
    pub total_items: i64,
    pub active_suppliers: usize,
    pub pending_purchases: usize,
}

/// One row of the payment-method breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodCount {
    pub method: PaymentMethod,
    pub label: String,
    pub count: usize,
}

/// One row of the best-seller ranking: full product name, summed quantity,
/// summed revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuantity {
    pub nome: String,
    pub quantidade: i64,
    pub valor: Money,
}

/// One row of the profit ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductProfit {
    pub nome: String,
    pub lucro: Money,
}

// =============================================================================
// Scalar Statistics
// =============================================================================

/// Sale totals, average ticket, and unique-customer count.
///
/// Average ticket is integer centavos division, defined as zero for an
/// empty collection. Customers are distinct by exact `documento` equality.
pub fn compute_sale_stats(sales: &[Sale]) -> SaleStats {
    let total_orders = sales.len();
    let total_amount = sales
        .iter()
        .fold(Money::zero(), |acc, sale| acc + sale.valor_total);
    let unique_customers = sales
        .iter()
        .map(|sale| sale.cliente.documento.as_str())
        .collect::<HashSet<_>>()
        .len();

    SaleStats {
        total_amount,
        average_ticket: total_amount.average_over(total_orders as i64),
        total_orders,
        unique_customers,
    }
}

/// Purchase totals, item count, active suppliers, and the number of sales
/// still awaiting a purchase.
///
/// Takes both collections because `pending_purchases` is the pending-sale
/// count from reconciliation. Suppliers are distinct by exact `cnpj`
/// equality.
pub fn compute_purchase_stats(sales: &[Sale], purchases: &[Purchase]) -> PurchaseStats {
    let total_amount = purchases
        .iter()
        .fold(Money::zero(), |acc, purchase| acc + purchase.valor_total);
    let total_items = purchases
        .iter()
        .map(|purchase| purchase.total_quantity())
        .sum();
    let active_suppliers = purchases
        .iter()
        .map(|purchase| purchase.fornecedor.cnpj.as_str())
        .collect::<HashSet<_>>()
        .len();

    PurchaseStats {
        total_amount,
        total_items,
        active_suppliers,
        pending_purchases: pending_sales(sales, purchases).len(),
    }
}

/// Sum of quantities over every line item of every sale.
pub fn total_items_sold(sales: &[Sale]) -> i64 {
    sales.iter().map(|sale| sale.total_quantity()).sum()
}

/// Sale counts per payment method, one row per method in declaration
/// order. Methods with no sales appear with a zero count.
pub fn sales_by_payment_method(sales: &[Sale]) -> Vec<PaymentMethodCount> {
    PaymentMethod::ALL
        .iter()
        .map(|&method| PaymentMethodCount {
            method,
            label: method.label().to_string(),
            count: sales
                .iter()
                .filter(|sale| sale.forma_pagamento == method)
                .count(),
        })
        .collect()
}

// =============================================================================
// Product Rankings
// =============================================================================

/// Top `n` products by total quantity sold.
///
/// Groups line items by full product name in first-occurrence order, then
/// stable-sorts descending by quantity, so ties keep their first-seen
/// relative order.
pub fn top_products_by_quantity(sales: &[Sale], n: usize) -> Vec<ProductQuantity> {
    let mut groups: Vec<ProductQuantity> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for sale in sales {
        for item in &sale.produtos {
            match index.get(item.nome.as_str()) {
                Some(&at) => {
                    groups[at].quantidade += item.quantidade;
                    groups[at].valor += item.line_total();
                }
                None => {
                    index.insert(item.nome.as_str(), groups.len());
                    groups.push(ProductQuantity {
                        nome: item.nome.clone(),
                        quantidade: item.quantidade,
                        valor: item.line_total(),
                    });
                }
            }
        }
    }

    groups.sort_by(|a, b| b.quantidade.cmp(&a.quantidade));
    groups.truncate(n);
    groups
}

/// Top `n` products by accumulated profit.
///
/// Per sale line item: revenue is quantidade × preco_unitario; cost comes
/// from the first purchase referencing that sale whose items contain the
/// same product name, using the first such line (quantities are NOT
/// re-matched). A line with no matching purchase contributes its full
/// revenue as profit.
pub fn top_products_by_profit(
    sales: &[Sale],
    purchases: &[Purchase],
    n: usize,
) -> Vec<ProductProfit> {
    let mut groups: Vec<ProductProfit> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for sale in sales {
        for item in &sale.produtos {
            let lucro = item.line_total() - purchase_cost(purchases, &sale.id, &item.nome);

            match index.get(item.nome.as_str()) {
                Some(&at) => groups[at].lucro += lucro,
                None => {
                    index.insert(item.nome.as_str(), groups.len());
                    groups.push(ProductProfit {
                        nome: item.nome.clone(),
                        lucro,
                    });
                }
            }
        }
    }

    groups.sort_by(|a, b| b.lucro.cmp(&a.lucro));
    groups.truncate(n);
    groups
}

/// Cost of a sale line: the first matching line of the first purchase for
/// that sale carrying the product name, zero when none matches.
fn purchase_cost(purchases: &[Purchase], venda_id: &str, nome: &str) -> Money {
    purchases
        .iter()
        .find(|purchase| {
            purchase.venda_id == venda_id
                && purchase.produtos.iter().any(|line| line.nome == nome)
        })
        .and_then(|purchase| purchase.produtos.iter().find(|line| line.nome == nome))
        .map(|line| line.line_total())
        .unwrap_or(Money::zero())
}

/// Display-only shortening: the first whitespace-delimited token of a
/// product name. Never used as a grouping key.
pub fn short_label(nome: &str) -> &str {
    nome.split_whitespace().next().unwrap_or(nome)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, Contact, Customer, LineItem, Supplier};
    use chrono::Utc;

    fn address() -> Address {
        Address {
            rua: "Rua B".to_string(),
            numero: "22".to_string(),
            complemento: None,
            bairro: "Centro".to_string(),
            cidade: "Recife".to_string(),
            estado: "PE".to_string(),
            cep: "50000-000".to_string(),
        }
    }

    fn item(nome: &str, quantidade: i64, preco_centavos: i64) -> LineItem {
        LineItem {
            produto_id: format!("prod-{nome}"),
            nome: nome.to_string(),
            fabricante: "Fabricante".to_string(),
            quantidade,
            preco_unitario: Money::from_centavos(preco_centavos),
        }
    }

    fn sale(id: &str, documento: &str, total_centavos: i64, forma: PaymentMethod) -> Sale {
        Sale {
            id: id.to_string(),
            cliente: Customer {
                nome: "Cliente".to_string(),
                documento: documento.to_string(),
                email: "c@example.com".to_string(),
                telefone: "(81) 99999-0000".to_string(),
                endereco: address(),
            },
            produtos: vec![],
            valor_total: Money::from_centavos(total_centavos),
            forma_pagamento: forma,
            created_at: Utc::now(),
            compras: None,
        }
    }

    fn purchase(venda_id: &str, cnpj: &str, produtos: Vec<LineItem>) -> Purchase {
        let valor_total = produtos
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.line_total());
        Purchase {
            id: format!("compra-{venda_id}"),
            venda_id: venda_id.to_string(),
            fornecedor: Supplier {
                razao_social: "Fornecedor LTDA".to_string(),
                nome_fantasia: "Fornecedor".to_string(),
                cnpj: cnpj.to_string(),
                email: "f@example.com".to_string(),
                telefone: "(81) 3333-0000".to_string(),
                endereco: address(),
                contato: Contact {
                    nome: "Maria".to_string(),
                    email: "maria@example.com".to_string(),
                    telefone: "(81) 98888-0000".to_string(),
                    cargo: "Comercial".to_string(),
                },
            },
            produtos,
            valor_total,
            forma_pagamento: PaymentMethod::Boleto,
            created_at: Utc::now(),
            venda: None,
        }
    }

    #[test]
    fn test_sale_stats_empty_collection() {
        let stats = compute_sale_stats(&[]);
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_amount, Money::zero());
        // No divide-by-zero: average ticket is defined as zero
        assert_eq!(stats.average_ticket, Money::zero());
        assert_eq!(stats.unique_customers, 0);
    }

    #[test]
    fn test_sale_stats_totals_and_average() {
        // Totals 100, 50, 0 reais: total 150, average 50
        let sales = vec![
            sale("v1", "111", 10000, PaymentMethod::Pix),
            sale("v2", "222", 5000, PaymentMethod::Boleto),
            sale("v3", "333", 0, PaymentMethod::Pix),
        ];

        let stats = compute_sale_stats(&sales);
        assert_eq!(stats.total_amount, Money::from_centavos(15000));
        assert_eq!(stats.average_ticket, Money::from_centavos(5000));
        assert_eq!(stats.total_orders, 3);
    }

    #[test]
    fn test_unique_customers_by_documento() {
        // Documents "111", "111", "222": two unique customers
        let sales = vec![
            sale("v1", "111", 1000, PaymentMethod::Pix),
            sale("v2", "111", 2000, PaymentMethod::Pix),
            sale("v3", "222", 3000, PaymentMethod::Pix),
        ];

        assert_eq!(compute_sale_stats(&sales).unique_customers, 2);
    }

    #[test]
    fn test_purchase_stats() {
        let sales = vec![
            sale("v1", "111", 10000, PaymentMethod::Pix),
            sale("v2", "222", 5000, PaymentMethod::Pix),
            sale("v3", "333", 2000, PaymentMethod::Pix),
        ];
        let purchases = vec![
            purchase("v1", "00.000.000/0001-00", vec![item("Mouse", 2, 3000)]),
            purchase("v2", "00.000.000/0001-00", vec![item("Teclado", 3, 1000)]),
        ];

        let stats = compute_purchase_stats(&sales, &purchases);
        assert_eq!(stats.total_amount, Money::from_centavos(9000));
        assert_eq!(stats.total_items, 5);
        // Same cnpj on both purchases: one active supplier
        assert_eq!(stats.active_suppliers, 1);
        // v3 still has no purchase
        assert_eq!(stats.pending_purchases, 1);
    }

    #[test]
    fn test_total_items_sold() {
        let mut v1 = sale("v1", "111", 0, PaymentMethod::Pix);
        v1.produtos = vec![item("Mouse", 2, 1000), item("Teclado", 1, 2000)];
        let mut v2 = sale("v2", "222", 0, PaymentMethod::Pix);
        v2.produtos = vec![item("Monitor", 3, 5000)];

        assert_eq!(total_items_sold(&[v1, v2]), 6);
    }

    #[test]
    fn test_payment_breakdown_includes_zero_counts() {
        let sales = vec![
            sale("v1", "111", 1000, PaymentMethod::Pix),
            sale("v2", "222", 2000, PaymentMethod::Pix),
        ];

        let breakdown = sales_by_payment_method(&sales);
        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown[0].method, PaymentMethod::Boleto);
        assert_eq!(breakdown[0].label, "Boleto");
        assert_eq!(breakdown[0].count, 0);
        assert_eq!(breakdown[1].method, PaymentMethod::Pix);
        assert_eq!(breakdown[1].label, "PIX");
        assert_eq!(breakdown[1].count, 2);
        assert_eq!(breakdown[2].method, PaymentMethod::CartaoCredito);
        assert_eq!(breakdown[2].label, "Cartão de Crédito");
        assert_eq!(breakdown[2].count, 0);
    }

    #[test]
    fn test_top_by_quantity_groups_full_names() {
        // "Mouse Logi" and "Mouse Razer" share the display label "Mouse"
        // but must remain separate ranking entries
        let mut v1 = sale("v1", "111", 0, PaymentMethod::Pix);
        v1.produtos = vec![item("Mouse Logi", 1, 4000), item("Mouse Razer", 1, 9000)];

        let top = top_products_by_quantity(&[v1], 3);
        assert_eq!(top.len(), 2);
        assert_eq!(short_label(&top[0].nome), "Mouse");
        assert_eq!(short_label(&top[1].nome), "Mouse");
        assert_ne!(top[0].nome, top[1].nome);
    }

    #[test]
    fn test_top_by_quantity_sums_across_sales() {
        let mut v1 = sale("v1", "111", 0, PaymentMethod::Pix);
        v1.produtos = vec![item("Mouse", 2, 1000), item("Teclado", 5, 2000)];
        let mut v2 = sale("v2", "222", 0, PaymentMethod::Pix);
        v2.produtos = vec![item("Mouse", 4, 1000)];

        let top = top_products_by_quantity(&[v1, v2], 3);
        assert_eq!(top[0].nome, "Mouse");
        assert_eq!(top[0].quantidade, 6);
        assert_eq!(top[0].valor, Money::from_centavos(6000));
        assert_eq!(top[1].nome, "Teclado");
        assert_eq!(top[1].quantidade, 5);
    }

    #[test]
    fn test_top_by_quantity_truncates_and_keeps_tie_order() {
        let mut v1 = sale("v1", "111", 0, PaymentMethod::Pix);
        v1.produtos = vec![
            item("A", 1, 100),
            item("B", 1, 100),
            item("C", 1, 100),
            item("D", 9, 100),
        ];

        let top = top_products_by_quantity(&[v1], 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].nome, "D");
        // Stable sort: tied entries keep first-occurrence order
        assert_eq!(top[1].nome, "A");
        assert_eq!(top[2].nome, "B");
    }

    #[test]
    fn test_profit_uses_first_matching_purchase() {
        let mut v1 = sale("v1", "111", 0, PaymentMethod::Pix);
        v1.produtos = vec![item("Mouse", 2, 100)]; // revenue 200

        // Two purchases for v1 both carrying "Mouse": only the first
        // supplies the cost
        let purchases = vec![
            purchase("v1", "111", vec![item("Mouse", 2, 60)]), // cost 120
            purchase("v1", "222", vec![item("Mouse", 2, 10)]), // ignored
        ];

        let top = top_products_by_profit(&[v1], &purchases, 5);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].lucro, Money::from_centavos(80));
    }

    #[test]
    fn test_profit_without_purchase_costs_nothing() {
        let mut v1 = sale("v1", "111", 0, PaymentMethod::Pix);
        v1.produtos = vec![item("Teclado", 1, 500)];

        let top = top_products_by_profit(&[v1], &[], 5);
        assert_eq!(top[0].lucro, Money::from_centavos(500));
    }

    #[test]
    fn test_profit_ignores_purchases_of_other_sales() {
        let mut v1 = sale("v1", "111", 0, PaymentMethod::Pix);
        v1.produtos = vec![item("Mouse", 1, 1000)];

        // Purchase carries the same product name but references another sale
        let purchases = vec![purchase("v2", "111", vec![item("Mouse", 1, 900)])];

        let top = top_products_by_profit(&[v1], &purchases, 5);
        assert_eq!(top[0].lucro, Money::from_centavos(1000));
    }

    #[test]
    fn test_profit_ranking_sorted_descending() {
        let mut v1 = sale("v1", "111", 0, PaymentMethod::Pix);
        v1.produtos = vec![item("Barato", 1, 100), item("Caro", 1, 9000)];

        let top = top_products_by_profit(&[v1], &[], 5);
        assert_eq!(top[0].nome, "Caro");
        assert_eq!(top[1].nome, "Barato");
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let sales = vec![
            sale("v1", "111", 10000, PaymentMethod::Pix),
            sale("v2", "222", 5000, PaymentMethod::Boleto),
        ];

        assert_eq!(compute_sale_stats(&sales), compute_sale_stats(&sales));
        assert_eq!(
            sales_by_payment_method(&sales),
            sales_by_payment_method(&sales)
        );
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("Mouse Logitech M170"), "Mouse");
        assert_eq!(short_label("Monitor"), "Monitor");
        assert_eq!(short_label(""), "");
        assert_eq!(short_label("  Teclado Mecânico"), "Teclado");
    }

    #[test]
    fn test_stats_wire_shape() {
        let stats = compute_sale_stats(&[sale("v1", "111", 4200, PaymentMethod::Pix)]);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalAmount"], serde_json::json!(4200));
        assert_eq!(value["averageTicket"], serde_json::json!(4200));
        assert_eq!(value["totalOrders"], serde_json::json!(1));
        assert_eq!(value["uniqueCustomers"], serde_json::json!(1));
    }
}
