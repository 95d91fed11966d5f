//! # Seed Data Generator
//!
//! Populates the database with demo vendas, compras, catalog products and
//! registry suppliers for development.
//!
//! ## Usage
//! ```bash
//! # Generate 12 vendas (default)
//! cargo run -p balcao-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p balcao-db --bin seed -- --vendas 50
//!
//! # Specify database path
//! cargo run -p balcao-db --bin seed -- --db ./data/balcao.db
//! ```
//!
//! ## Generated Data
//! - Vendas with 1-3 line items each, spread over the past weeks
//! - Compras for roughly two thirds of the vendas (the rest stay pending)
//! - Purchase line items repriced to wholesale so profit rankings are
//!   non-trivial
//! - The full product catalog and supplier registry
//!
//! All data is deterministic given the venda count: no RNG, same input
//! produces the same database.

use chrono::{Duration, Utc};
use std::env;

use balcao_core::purchase::build_purchase_request;
use balcao_core::{
    Address, Contact, CreateSaleRequest, Customer, LineItem, Money, PaymentMethod, Product,
    ProductStatus, Purchase, Sale, Supplier, SupplierRecord,
};
use balcao_db::repository::purchase::generate_purchase_id;
use balcao_db::repository::sale::generate_sale_id;
use balcao_db::repository::supplier::generate_supplier_id;
use balcao_db::{Database, DbConfig};

/// Customers cycled through the generated vendas.
const CLIENTES: &[(&str, &str, &str)] = &[
    ("Ana Souza", "123.456.789-00", "São Paulo"),
    ("Bruno Oliveira", "234.567.890-11", "Campinas"),
    ("Carla Mendes", "345.678.901-22", "Santo André"),
    ("Diego Ferreira", "456.789.012-33", "Osasco"),
    ("Elisa Ramos", "567.890.123-44", "Guarulhos"),
    ("Felipe Costa", "678.901.234-55", "Sorocaba"),
    ("Gabriela Nunes", "789.012.345-66", "Jundiaí"),
    ("Heitor Alves", "890.123.456-77", "Barueri"),
];

/// Catalog products: (nome, fabricante, preço de venda em centavos).
const PRODUTOS: &[(&str, &str, i64)] = &[
    ("Mouse Sem Fio", "Logitech", 8990),
    ("Teclado Mecânico", "Redragon", 24900),
    ("Monitor 24 Polegadas", "LG", 89900),
    ("Headset Gamer", "HyperX", 34900),
    ("Webcam Full HD", "Logitech", 27900),
    ("Cabo HDMI 2m", "ELG", 3990),
    ("Hub USB-C", "Baseus", 15900),
    ("SSD 480GB", "Kingston", 32900),
    ("Memória RAM 8GB", "Corsair", 18900),
    ("Fonte 600W", "Cooler Master", 39900),
    ("Gabinete ATX", "Rise Mode", 29900),
    ("Mousepad XL", "Havit", 7990),
];

const CATEGORIAS: &[&str] = &["Periféricos", "Componentes", "Acessórios"];

/// Suppliers: (razão social, nome fantasia, cnpj, cidade, contato).
const FORNECEDORES: &[(&str, &str, &str, &str, &str)] = &[
    (
        "Distribuidora Alfa de Eletrônicos LTDA",
        "Alfa Eletrônicos",
        "12.345.678/0001-90",
        "Guarulhos",
        "Paulo Martins",
    ),
    (
        "Beta Atacado de Informática ME",
        "Beta Informática",
        "23.456.789/0001-01",
        "São Paulo",
        "Renata Dias",
    ),
    (
        "Gama Comércio de Periféricos LTDA",
        "Gama Periféricos",
        "34.567.890/0001-12",
        "Campinas",
        "Sérgio Rocha",
    ),
    (
        "Delta Importadora de Tecnologia SA",
        "Delta Tech",
        "45.678.901/0001-23",
        "Santos",
        "Tatiana Prado",
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 12;
    let mut db_path = String::from("./balcao.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--vendas" | "-n" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(12);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Balcão Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --vendas <N>   Number of vendas to generate (default: 12)");
                println!("  -d, --db <PATH>    Database file path (default: ./balcao.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Balcão Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Vendas:   {}", count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Refuse to seed on top of existing data
    let existing = db.sales().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} vendas", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    // Catalog and registry first, so line items reference real ids
    println!();
    println!("Seeding catalog...");

    for (idx, (nome, fabricante, preco)) in PRODUTOS.iter().enumerate() {
        let now = Utc::now();
        let product = Product {
            id: produto_id(idx),
            nome: nome.to_string(),
            descricao: format!("{} - {}", nome, fabricante),
            fabricante: fabricante.to_string(),
            categoria: CATEGORIAS[idx % CATEGORIAS.len()].to_string(),
            preco_unitario: Money::from_centavos(*preco),
            quantidade_estoque: ((idx * 7) % 40) as i64,
            estoque_minimo: 5,
            estoque_maximo: 60,
            codigo_barras: format!("789{:010}", idx),
            status: ProductStatus::Ativo,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await?;
    }

    for idx in 0..FORNECEDORES.len() {
        let record = SupplierRecord::from_info(fornecedor(idx), generate_supplier_id(), Utc::now());
        db.suppliers().insert(&record).await?;
    }

    println!(
        "  {} produtos, {} fornecedores",
        PRODUTOS.len(),
        FORNECEDORES.len()
    );

    // Vendas, with compras for two of every three
    println!("Generating vendas...");

    let mut compras = 0;
    for idx in 0..count {
        let sale = generate_sale(idx);
        db.sales().insert(&sale).await?;

        if idx % 3 != 2 {
            let purchase = generate_purchase(&sale, idx);
            db.purchases().insert(&purchase).await?;
            compras += 1;
        }

        if count >= 100 && (idx + 1) % 100 == 0 {
            println!("  Generated {} vendas...", idx + 1);
        }
    }

    let elapsed = start.elapsed();
    println!(
        "  ✓ {} vendas ({} with compras, {} pending)",
        count,
        compras,
        count - compras
    );
    println!();
    println!("✓ Seed complete in {:?}", elapsed);

    Ok(())
}

/// Catalog id for the Nth product. Line items reference these.
fn produto_id(idx: usize) -> String {
    format!("prod-{:03}", idx)
}

fn endereco(cidade: &str, numero: usize) -> Address {
    Address {
        rua: "Rua das Palmeiras".to_string(),
        numero: numero.to_string(),
        complemento: None,
        bairro: "Centro".to_string(),
        cidade: cidade.to_string(),
        estado: "SP".to_string(),
        cep: "01000-000".to_string(),
    }
}

fn cliente(idx: usize) -> Customer {
    let (nome, documento, cidade) = CLIENTES[idx % CLIENTES.len()];
    let primeiro = nome
        .split_whitespace()
        .next()
        .unwrap_or(nome)
        .to_lowercase();

    Customer {
        nome: nome.to_string(),
        documento: documento.to_string(),
        email: format!("{}@example.com", primeiro),
        telefone: format!("(11) 98{:03}-{:04}", idx % 1000, (1000 + idx * 61) % 10000),
        endereco: endereco(cidade, 100 + idx),
    }
}

fn fornecedor(idx: usize) -> Supplier {
    let (razao_social, nome_fantasia, cnpj, cidade, contato) =
        FORNECEDORES[idx % FORNECEDORES.len()];
    let dominio = nome_fantasia
        .split_whitespace()
        .next()
        .unwrap_or(nome_fantasia)
        .to_lowercase();

    Supplier {
        razao_social: razao_social.to_string(),
        nome_fantasia: nome_fantasia.to_string(),
        cnpj: cnpj.to_string(),
        email: format!("vendas@{}.com.br", dominio),
        telefone: format!("(11) 33{:02}-00{:02}", idx * 11 % 100, idx + 10),
        endereco: endereco(cidade, 1500 + idx),
        contato: Contact {
            nome: contato.to_string(),
            email: format!("{}@{}.com.br", contato.split_whitespace().next().unwrap_or(contato).to_lowercase(), dominio),
            telefone: format!("(11) 97{:03}-{:04}", idx * 13 % 1000, (2000 + idx * 71) % 10000),
            cargo: "Comercial".to_string(),
        },
    }
}

/// Generates the Nth venda with 1-3 items, spread over the recent past.
fn generate_sale(idx: usize) -> Sale {
    let item_count = 1 + idx % 3;
    let mut produtos = Vec::with_capacity(item_count);

    for k in 0..item_count {
        let catalog_idx = (idx * 3 + k * 5) % PRODUTOS.len();
        let (nome, fabricante, preco) = PRODUTOS[catalog_idx];
        produtos.push(LineItem {
            produto_id: produto_id(catalog_idx),
            nome: nome.to_string(),
            fabricante: fabricante.to_string(),
            quantidade: (1 + (idx + k) % 4) as i64,
            preco_unitario: Money::from_centavos(preco),
        });
    }

    let request = CreateSaleRequest {
        cliente: cliente(idx),
        produtos,
        forma_pagamento: PaymentMethod::ALL[idx % PaymentMethod::ALL.len()],
    };

    let created_at = Utc::now() - Duration::hours(idx as i64 * 9 + 3);
    Sale::from_request(request, generate_sale_id(), created_at)
}

/// Generates the compra that restocks a venda.
///
/// Items are copied from the venda and repriced to 60% (wholesale), the
/// same edit a user would make on the purchase form before submitting.
fn generate_purchase(sale: &Sale, idx: usize) -> Purchase {
    let mut request = build_purchase_request(
        sale,
        fornecedor(idx % FORNECEDORES.len()),
        PaymentMethod::Boleto,
    );

    for item in &mut request.produtos {
        item.preco_unitario = Money::from_centavos(item.preco_unitario.centavos() * 6 / 10);
    }

    let created_at = sale.created_at + Duration::hours(4);
    Purchase::from_request(request, generate_purchase_id(), created_at)
}
