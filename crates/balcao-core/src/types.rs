//! # Domain Types
//!
//! Core domain types used throughout Balcão.
//!
//! ## Type Hierarchy
//! ```text
//! Sale ──── cliente: Customer ──── endereco: Address
//!   │  └─── produtos: Vec<LineItem>
//!   │
//! Purchase ─ fornecedor: Supplier ─┬─ endereco: Address
//!   │  └──── produtos: Vec<LineItem>└─ contato: Contact
//!   │
//!   └── venda_id ──► Sale.id   (soft reference, no FK)
//!
//! Product        - catalog entry (stock levels, status)
//! SupplierRecord - registry entry (Supplier + id + timestamps)
//! ```
//!
//! Serialized field names follow the frontend contract: Portuguese names in
//! camelCase (`valorTotal`, `formaPagamento`, `precoUnitario`). A line
//! item's product id serializes as plain `id` inside the item.
//!
//! Every entity id is a UUID v4 string; timestamps are UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Payment Method
// =============================================================================

/// Accepted payment methods.
///
/// Closed set: values outside it fail deserialization at the data-access
/// boundary instead of reaching the aggregation functions.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Bank slip (boleto bancário).
    Boleto,
    /// Instant transfer.
    Pix,
    /// Credit card.
    CartaoCredito,
}

impl PaymentMethod {
    /// All methods in declaration order. Payment breakdowns iterate this so
    /// every method appears exactly once, zero counts included.
    pub const ALL: [PaymentMethod; 3] =
        [PaymentMethod::Boleto, PaymentMethod::Pix, PaymentMethod::CartaoCredito];

    /// Human-readable label shown on dashboards and reports.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Boleto => "Boleto",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::CartaoCredito => "Cartão de Crédito",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Product Status
// =============================================================================

/// Whether a catalog product is available for sale.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductStatus {
    Ativo,
    Inativo,
}

impl Default for ProductStatus {
    fn default() -> Self {
        ProductStatus::Ativo
    }
}

// =============================================================================
// Embedded Records
// =============================================================================

/// Postal address embedded in customers and suppliers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub rua: String,
    pub numero: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
}

/// Contact person embedded in a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub cargo: String,
}

/// The customer embedded in a sale.
///
/// `documento` is the personal/company tax id; unique-customer counts
/// compare it by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub nome: String,
    pub documento: String,
    pub email: String,
    pub telefone: String,
    pub endereco: Address,
}

/// The supplier sub-record embedded in a purchase.
///
/// Also the create payload for the supplier registry; `SupplierRecord`
/// adds identity and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub razao_social: String,
    pub nome_fantasia: String,
    pub cnpj: String,
    pub email: String,
    pub telefone: String,
    pub endereco: Address,
    pub contato: Contact,
}

/// A supplier registry entry.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SupplierRecord {
    pub id: String,
    pub razao_social: String,
    pub nome_fantasia: String,
    pub cnpj: String,
    pub email: String,
    pub telefone: String,
    pub endereco: Address,
    pub contato: Contact,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl SupplierRecord {
    /// Builds a registry entry from the embedded sub-record form.
    pub fn from_info(info: Supplier, id: String, now: DateTime<Utc>) -> Self {
        SupplierRecord {
            id,
            razao_social: info.razao_social,
            nome_fantasia: info.nome_fantasia,
            cnpj: info.cnpj,
            email: info.email,
            telefone: info.telefone,
            endereco: info.endereco,
            contato: info.contato,
            created_at: now,
            updated_at: now,
        }
    }

    /// The embedded sub-record form of this registry entry.
    pub fn info(&self) -> Supplier {
        Supplier {
            razao_social: self.razao_social.clone(),
            nome_fantasia: self.nome_fantasia.clone(),
            cnpj: self.cnpj.clone(),
            email: self.email.clone(),
            telefone: self.telefone.clone(),
            endereco: self.endereco.clone(),
            contato: self.contato.clone(),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry within a sale or purchase.
///
/// Owned by its parent; carries no identity of its own. `produto_id`
/// serializes as `id` to match the frontend item shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog product id (serialized as `id`).
    #[serde(rename = "id")]
    pub produto_id: String,
    pub nome: String,
    pub fabricante: String,
    pub quantidade: i64,
    pub preco_unitario: Money,
}

impl LineItem {
    /// Line total: quantidade × preco_unitario.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.preco_unitario.multiply_quantity(self.quantidade)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A customer transaction: products sold, amount, payment method.
///
/// `compras` is display-only and populated by detail lookups; it never
/// feeds reconciliation, which works from the full Purchase collection.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub cliente: Customer,
    #[serde(default)]
    pub produtos: Vec<LineItem>,
    #[serde(default)]
    pub valor_total: Money,
    pub forma_pagamento: PaymentMethod,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compras: Option<Vec<Purchase>>,
}

impl Sale {
    /// Builds a sale from a create request. `valor_total` is computed from
    /// the line items here, the only place a sale is born.
    pub fn from_request(request: CreateSaleRequest, id: String, created_at: DateTime<Utc>) -> Self {
        let valor_total = request
            .produtos
            .iter()
            .fold(Money::zero(), |acc, item| acc + item.line_total());
        Sale {
            id,
            cliente: request.cliente,
            produtos: request.produtos,
            valor_total,
            forma_pagamento: request.forma_pagamento,
            created_at,
            compras: None,
        }
    }

    /// Sum of quantities over all line items.
    pub fn total_quantity(&self) -> i64 {
        self.produtos.iter().map(|item| item.quantidade).sum()
    }

    /// Sum of line totals. Equals `valor_total` for well-formed records.
    pub fn items_total(&self) -> Money {
        self.produtos
            .iter()
            .fold(Money::zero(), |acc, item| acc + item.line_total())
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// A supplier transaction recording products bought to fulfill a sale.
///
/// `venda_id` is a soft reference: deleting the originating sale neither
/// cascades to nor is blocked by its purchases.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub venda_id: String,
    pub fornecedor: Supplier,
    #[serde(default)]
    pub produtos: Vec<LineItem>,
    #[serde(default)]
    pub valor_total: Money,
    pub forma_pagamento: PaymentMethod,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venda: Option<Sale>,
}

impl Purchase {
    /// Builds a purchase from a create request, computing `valor_total`
    /// from the line items.
    pub fn from_request(
        request: CreatePurchaseRequest,
        id: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        let valor_total = request
            .produtos
            .iter()
            .fold(Money::zero(), |acc, item| acc + item.line_total());
        Purchase {
            id,
            venda_id: request.venda_id,
            fornecedor: request.fornecedor,
            produtos: request.produtos,
            valor_total,
            forma_pagamento: request.forma_pagamento,
            created_at,
            venda: None,
        }
    }

    /// Sum of quantities over all line items.
    pub fn total_quantity(&self) -> i64 {
        self.produtos.iter().map(|item| item.quantidade).sum()
    }

    /// Sum of line totals. Equals `valor_total` for well-formed records.
    pub fn items_total(&self) -> Money {
        self.produtos
            .iter()
            .fold(Money::zero(), |acc, item| acc + item.line_total())
    }
}

// =============================================================================
// Product (catalog)
// =============================================================================

/// A catalog product with stock levels.
///
/// Aggregations only consume id/nome/fabricante/preco_unitario; the stock
/// fields exist for the catalog CRUD surface.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub nome: String,
    pub descricao: String,
    pub fabricante: String,
    pub categoria: String,
    pub preco_unitario: Money,
    pub quantidade_estoque: i64,
    pub estoque_minimo: i64,
    pub estoque_maximo: i64,
    pub codigo_barras: String,
    pub status: ProductStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Builds a catalog product from a create request.
    pub fn from_request(request: CreateProductRequest, id: String, now: DateTime<Utc>) -> Self {
        Product {
            id,
            nome: request.nome,
            descricao: request.descricao,
            fabricante: request.fabricante,
            categoria: request.categoria,
            preco_unitario: request.preco_unitario,
            quantidade_estoque: request.quantidade_estoque,
            estoque_minimo: request.estoque_minimo,
            estoque_maximo: request.estoque_maximo,
            codigo_barras: request.codigo_barras,
            status: request.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the product is available for sale.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Ativo
    }

    /// Whether the stock level is at or below the minimum threshold.
    #[inline]
    pub fn below_minimum_stock(&self) -> bool {
        self.quantidade_estoque <= self.estoque_minimo
    }
}

// =============================================================================
// Create Requests
// =============================================================================

/// Payload for creating a purchase from a pending sale.
///
/// Assembled by `purchase::build_purchase_request`; id, timestamp, and
/// total are filled in at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    pub venda_id: String,
    pub fornecedor: Supplier,
    pub produtos: Vec<LineItem>,
    pub forma_pagamento: PaymentMethod,
}

/// Payload for creating or replacing a sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    pub cliente: Customer,
    pub produtos: Vec<LineItem>,
    pub forma_pagamento: PaymentMethod,
}

/// Payload for creating or replacing a catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub nome: String,
    pub descricao: String,
    pub fabricante: String,
    pub categoria: String,
    pub preco_unitario: Money,
    pub quantidade_estoque: i64,
    pub estoque_minimo: i64,
    pub estoque_maximo: i64,
    pub codigo_barras: String,
    #[serde(default)]
    pub status: ProductStatus,
}

// =============================================================================
// Unit Tests
// =============================================================================
