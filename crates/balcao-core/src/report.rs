//! # Report Assembly
//!
//! Builds the data behind the sales and products reports. Assembly only:
//! rendering (PDF, tables) belongs to the presentation layer.
//!
//! Row order is deliberate: sales report rows keep the input sale order,
//! products report rows keep first-occurrence product order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{PaymentMethod, Sale};

// =============================================================================
// Sales Report
// =============================================================================

/// Header numbers of the sales report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportSummary {
    pub total_vendas: usize,
    pub faturamento_total: Money,
}

/// One sales report table row. `itens` counts line items, not quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportRow {
    #[ts(as = "String")]
    pub data: DateTime<Utc>,
    pub cliente: String,
    pub itens: usize,
    pub valor_total: Money,
    pub forma_pagamento: PaymentMethod,
}

/// The assembled sales report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub summary: SalesReportSummary,
    pub rows: Vec<SalesReportRow>,
}

/// Assembles the sales report: one row per sale in input order plus the
/// count/revenue summary.
pub fn sales_report(sales: &[Sale]) -> SalesReport {
    let faturamento_total = sales
        .iter()
        .fold(Money::zero(), |acc, sale| acc + sale.valor_total);

    let rows = sales
        .iter()
        .map(|sale| SalesReportRow {
            data: sale.created_at,
            cliente: sale.cliente.nome.clone(),
            itens: sale.produtos.len(),
            valor_total: sale.valor_total,
            forma_pagamento: sale.forma_pagamento,
        })
        .collect();

    SalesReport {
        summary: SalesReportSummary {
            total_vendas: sales.len(),
            faturamento_total,
        },
        rows,
    }
}

// =============================================================================
// Products Report
// =============================================================================

/// Header numbers of the products report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductsReportSummary {
    pub total_produtos: usize,
    pub total_vendido: Money,
}

/// One products report row. `preco_medio` is total ÷ quantity in integer
/// centavos, zero when the quantity is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductsReportRow {
    pub nome: String,
    pub quantidade: i64,
    pub valor_total: Money,
    pub preco_medio: Money,
}

/// The assembled products report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductsReport {
    pub summary: ProductsReportSummary,
    pub rows: Vec<ProductsReportRow>,
}

/// Assembles the products report: line items grouped by full product name
/// in first-occurrence order, with summed quantity and revenue per group.
pub fn products_report(sales: &[Sale]) -> ProductsReport {
    let mut rows: Vec<ProductsReportRow> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for sale in sales {
        for item in &sale.produtos {
            match index.get(item.nome.as_str()) {
                Some(&at) => {
                    rows[at].quantidade += item.quantidade;
                    rows[at].valor_total += item.line_total();
                }
                None => {
                    index.insert(item.nome.as_str(), rows.len());
                    rows.push(ProductsReportRow {
                        nome: item.nome.clone(),
                        quantidade: item.quantidade,
                        valor_total: item.line_total(),
                        preco_medio: Money::zero(),
                    });
                }
            }
        }
    }

    let mut total_vendido = Money::zero();
    for row in &mut rows {
        row.preco_medio = row.valor_total.average_over(row.quantidade);
        total_vendido += row.valor_total;
    }

    ProductsReport {
        summary: ProductsReportSummary {
            total_produtos: rows.len(),
            total_vendido,
        },
        rows,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, Customer, LineItem};

    fn item(nome: &str, quantidade: i64, preco_centavos: i64) -> LineItem {
        LineItem {
            produto_id: format!("prod-{nome}"),
            nome: nome.to_string(),
            fabricante: "Fabricante".to_string(),
            quantidade,
            preco_unitario: Money::from_centavos(preco_centavos),
        }
    }

    fn sale(id: &str, cliente_nome: &str, produtos: Vec<LineItem>) -> Sale {
        let valor_total = produtos
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.line_total());
        Sale {
            id: id.to_string(),
            cliente: Customer {
                nome: cliente_nome.to_string(),
                documento: "000.000.000-00".to_string(),
                email: "c@example.com".to_string(),
                telefone: "(31) 99999-0000".to_string(),
                endereco: Address {
                    rua: "Rua C".to_string(),
                    numero: "3".to_string(),
                    complemento: None,
                    bairro: "Savassi".to_string(),
                    cidade: "Belo Horizonte".to_string(),
                    estado: "MG".to_string(),
                    cep: "30000-000".to_string(),
                },
            },
            produtos,
            valor_total,
            forma_pagamento: PaymentMethod::Pix,
            created_at: Utc::now(),
            compras: None,
        }
    }

    #[test]
    fn test_sales_report_summary_and_rows() {
        let sales = vec![
            sale("v1", "João Silva", vec![item("Mouse", 2, 5000), item("Cabo", 1, 1000)]),
            sale("v2", "Maria Santos", vec![item("Monitor", 1, 90000)]),
        ];

        let report = sales_report(&sales);
        assert_eq!(report.summary.total_vendas, 2);
        assert_eq!(report.summary.faturamento_total, Money::from_centavos(101000));

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].cliente, "João Silva");
        // Line-item count, not quantity sum
        assert_eq!(report.rows[0].itens, 2);
        assert_eq!(report.rows[0].valor_total, Money::from_centavos(11000));
        assert_eq!(report.rows[1].cliente, "Maria Santos");
    }

    #[test]
    fn test_sales_report_empty() {
        let report = sales_report(&[]);
        assert_eq!(report.summary.total_vendas, 0);
        assert_eq!(report.summary.faturamento_total, Money::zero());
        assert!(report.rows.is_empty());
    }

    #[test]
    fn test_products_report_groups_across_sales() {
        let sales = vec![
            sale("v1", "A", vec![item("Mouse", 2, 5000)]),
            sale("v2", "B", vec![item("Mouse", 3, 5000), item("Teclado", 1, 20000)]),
        ];

        let report = products_report(&sales);
        assert_eq!(report.summary.total_produtos, 2);
        assert_eq!(report.summary.total_vendido, Money::from_centavos(45000));

        // First-occurrence order, no re-sorting
        assert_eq!(report.rows[0].nome, "Mouse");
        assert_eq!(report.rows[0].quantidade, 5);
        assert_eq!(report.rows[0].valor_total, Money::from_centavos(25000));
        assert_eq!(report.rows[0].preco_medio, Money::from_centavos(5000));
        assert_eq!(report.rows[1].nome, "Teclado");
    }

    #[test]
    fn test_products_report_average_price_zero_quantity() {
        let sales = vec![sale("v1", "A", vec![item("Brinde", 0, 5000)])];

        let report = products_report(&sales);
        assert_eq!(report.rows[0].quantidade, 0);
        assert_eq!(report.rows[0].preco_medio, Money::zero());
    }

    #[test]
    fn test_products_report_average_truncates() {
        // 3 units for 100 centavos total: average 33
        let sales = vec![sale("v1", "A", vec![item("Parafuso", 3, 33)])];

        let report = products_report(&sales);
        assert_eq!(report.rows[0].valor_total, Money::from_centavos(99));
        assert_eq!(report.rows[0].preco_medio, Money::from_centavos(33));
    }
}
