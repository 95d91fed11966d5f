//! # Balcão Console Dashboard
//!
//! Renders the shop dashboard on stdout: overview cards, payment
//! breakdown, product rankings, pending sales, purchase totals, and
//! report summaries.
//!
//! ## Architecture
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   Console Dashboard                          │
//! │                                                              │
//! │  main ─► DashboardConfig ─► Database ─► DashboardService     │
//! │                                              │               │
//! │                   refresh() ◄────────────────┘               │
//! │                       │                                      │
//! │   stdout ◄─ sections ◄┘   (logs go to stderr)                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```text
//! dashboard                      # opens ./balcao.db (or $BALCAO_DB)
//! dashboard --db /path/loja.db
//! dashboard --search "alfa"      # also searches purchases/suppliers
//! ```

mod config;

use std::env;

use tracing::info;
use tracing_subscriber::EnvFilter;

use balcao_core::report::{ProductsReport, SalesReport};
use balcao_core::stats::{short_label, PurchaseStats};
use balcao_core::{Purchase, Sale, Supplier};
use balcao_db::{Database, DbConfig};
use balcao_service::{DashboardService, DashboardView};

use crate::config::DashboardConfig;

const USAGE: &str = "\
Balcão console dashboard

USAGE:
    dashboard [OPTIONS]

OPTIONS:
    -d, --db <PATH>        SQLite database path (env: BALCAO_DB, default: ./balcao.db)
    -s, --search <QUERY>   Also search purchases and suppliers
    -h, --help             Print this help
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print!("{USAGE}");
        return Ok(());
    }

    // Logs on stderr; stdout carries only the rendered dashboard
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DashboardConfig::load(&args)?;
    info!(db = %config.database_path, "Opening database");

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    let service = DashboardService::new(db);
    service.refresh().await?;

    let view = service.dashboard().await;
    let sale_stats = service.sale_stats().await;
    let purchase_stats = service.purchase_stats().await;
    let pending = service.pending_sales().await;
    let sales_report = service.sales_report().await;
    let products_report = service.products_report().await;

    print_header(&config.database_path);
    print_overview(&view, sale_stats.unique_customers);
    print_payment_breakdown(&view);
    print_rankings(&view);
    print_pending_sales(&pending);
    print_purchase_stats(&purchase_stats);
    print_report_summaries(&sales_report, &products_report);

    if let Some(query) = &config.search {
        let purchases = service.search_purchases(query).await?;
        let suppliers = service.search_suppliers(query).await?;
        print_search_results(query, &purchases, &suppliers);
    }

    Ok(())
}

// =============================================================================
// Sections
// =============================================================================

fn print_header(database_path: &str) {
    println!("📊 Balcão: painel da loja");
    println!("   banco: {database_path}");
    println!();
}

fn print_overview(view: &DashboardView, unique_customers: usize) {
    println!("💰 Visão geral");
    println!("   Vendas registradas:  {}", view.total_vendas);
    println!("   Faturamento total:   {}", view.faturamento_total);
    println!("   Produtos vendidos:   {}", view.total_produtos_vendidos);
    println!("   Ticket médio:        {}", view.ticket_medio);
    println!("   Clientes únicos:     {unique_customers}");
    println!("   Vendas pendentes:    {}", view.vendas_pendentes);
    println!();
}

fn print_payment_breakdown(view: &DashboardView) {
    println!("💳 Vendas por forma de pagamento");
    for row in &view.vendas_por_forma_pagamento {
        println!("   {:<18} {:>4}", row.label, row.count);
    }
    println!();
}

fn print_rankings(view: &DashboardView) {
    println!("🏆 Mais vendidos");
    if view.produtos_mais_vendidos.is_empty() {
        println!("   (sem vendas)");
    }
    for (pos, row) in view.produtos_mais_vendidos.iter().enumerate() {
        println!(
            "   {}. {:<14} {:>4} un  {}",
            pos + 1,
            short_label(&row.nome),
            row.quantidade,
            row.valor
        );
    }
    println!();

    println!("📈 Maior lucro");
    if view.produtos_maior_lucro.is_empty() {
        println!("   (sem vendas)");
    }
    for (pos, row) in view.produtos_maior_lucro.iter().enumerate() {
        println!(
            "   {}. {:<14} {}",
            pos + 1,
            short_label(&row.nome),
            row.lucro
        );
    }
    println!();
}

fn print_pending_sales(pending: &[Sale]) {
    println!("⏳ Vendas aguardando compra: {}", pending.len());
    for sale in pending {
        println!(
            "   {}  {:<22} {:>12}  {}",
            sale.created_at.format("%d/%m/%Y %H:%M"),
            sale.cliente.nome,
            sale.valor_total.to_string(),
            sale.forma_pagamento
        );
    }
    println!();
}

fn print_purchase_stats(stats: &PurchaseStats) {
    println!("📦 Compras");
    println!("   Total gasto:          {}", stats.total_amount);
    println!("   Itens comprados:      {}", stats.total_items);
    println!("   Fornecedores ativos:  {}", stats.active_suppliers);
    println!("   Compras pendentes:    {}", stats.pending_purchases);
    println!();
}

fn print_report_summaries(sales: &SalesReport, products: &ProductsReport) {
    println!("🧾 Relatórios");
    println!(
        "   Vendas:   {} registros, faturamento {}",
        sales.summary.total_vendas, sales.summary.faturamento_total
    );
    println!(
        "   Produtos: {} distintos, total vendido {}",
        products.summary.total_produtos, products.summary.total_vendido
    );
    println!();
}

fn print_search_results(query: &str, purchases: &[Purchase], suppliers: &[Supplier]) {
    println!("🔍 Busca por \"{query}\"");
    println!("   Compras: {}", purchases.len());
    for purchase in purchases {
        println!(
            "   {}  {:<26} {}",
            purchase.created_at.format("%d/%m/%Y"),
            purchase.fornecedor.razao_social,
            purchase.valor_total
        );
    }
    println!("   Fornecedores: {}", suppliers.len());
    for supplier in suppliers {
        println!("   {}  {}", supplier.cnpj, supplier.razao_social);
    }
    println!();
}
