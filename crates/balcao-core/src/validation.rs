//! # Validation Module
//!
//! Input validation for user-supplied data, run before entities are built
//! or stored. Database constraints (NOT NULL, UNIQUE) remain the last
//! line of defense; these checks produce the messages users actually see.
//!
//! ## Usage
//! ```rust
//! use balcao_core::validation::{validate_cnpj, validate_quantity};
//!
//! assert_eq!(validate_cnpj("12.345.678/0001-90").unwrap(), "12345678000190");
//! assert!(validate_quantity(5).is_ok());
//! ```

use crate::error::ValidationError;
use crate::types::{Contact, Customer, LineItem, Supplier};
use crate::{CNPJ_DIGITS, MAX_ITEM_QUANTITY, MAX_SALE_ITEMS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a supplier legal name (razão social).
///
/// ## Rules
/// - Must not be empty
/// - Must be between 2 and 120 characters
pub fn validate_razao_social(razao_social: &str) -> ValidationResult<()> {
    let razao_social = razao_social.trim();

    if razao_social.is_empty() {
        return Err(ValidationError::Required {
            field: "razaoSocial".to_string(),
        });
    }

    if razao_social.len() < 2 {
        return Err(ValidationError::TooShort {
            field: "razaoSocial".to_string(),
            min: 2,
        });
    }

    if razao_social.len() > 120 {
        return Err(ValidationError::TooLong {
            field: "razaoSocial".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates a supplier trade name (nome fantasia).
pub fn validate_nome_fantasia(nome_fantasia: &str) -> ValidationResult<()> {
    let nome_fantasia = nome_fantasia.trim();

    if nome_fantasia.is_empty() {
        return Err(ValidationError::Required {
            field: "nomeFantasia".to_string(),
        });
    }

    if nome_fantasia.len() > 120 {
        return Err(ValidationError::TooLong {
            field: "nomeFantasia".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates a CNPJ (company tax id) and returns its bare digits.
///
/// ## Rules
/// - Must not be empty
/// - After stripping `.`/`/`/`-` punctuation, exactly 14 digits remain
///
/// Both formatted ("12.345.678/0001-90") and bare ("12345678000190")
/// input is accepted.
///
/// ## Example
/// ```rust
/// use balcao_core::validation::validate_cnpj;
///
/// assert_eq!(validate_cnpj("12.345.678/0001-90").unwrap(), "12345678000190");
/// assert!(validate_cnpj("12.345.678/0001").is_err());
/// assert!(validate_cnpj("").is_err());
/// ```
pub fn validate_cnpj(cnpj: &str) -> ValidationResult<String> {
    let cnpj = cnpj.trim();

    if cnpj.is_empty() {
        return Err(ValidationError::Required {
            field: "cnpj".to_string(),
        });
    }

    let digits: String = cnpj
        .chars()
        .filter(|c| !matches!(c, '.' | '/' | '-'))
        .collect();

    if digits.len() != CNPJ_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "cnpj".to_string(),
            reason: format!("must have {CNPJ_DIGITS} digits"),
        });
    }

    Ok(digits)
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain `@` with text on both sides
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    };
    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be a valid email address".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (selects everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(quantidade: i64) -> ValidationResult<()> {
    if quantidade <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantidade".to_string(),
        });
    }

    if quantidade > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantidade".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in centavos.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (giveaway items)
pub fn validate_unit_price(centavos: i64) -> ValidationResult<()> {
    if centavos < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "precoUnitario".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a supplier sub-record before it is embedded in a purchase or
/// stored in the registry.
pub fn validate_supplier(supplier: &Supplier) -> ValidationResult<()> {
    validate_razao_social(&supplier.razao_social)?;
    validate_nome_fantasia(&supplier.nome_fantasia)?;
    validate_cnpj(&supplier.cnpj)?;
    validate_email(&supplier.email)?;
    validate_contact(&supplier.contato)?;
    Ok(())
}

/// Validates the contact person of a supplier.
pub fn validate_contact(contato: &Contact) -> ValidationResult<()> {
    if contato.nome.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "contato.nome".to_string(),
        });
    }
    Ok(())
}

/// Validates the customer embedded in a sale.
pub fn validate_customer(cliente: &Customer) -> ValidationResult<()> {
    if cliente.nome.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "cliente.nome".to_string(),
        });
    }
    if cliente.documento.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "cliente.documento".to_string(),
        });
    }
    Ok(())
}

/// Validates the line items of a sale or purchase.
///
/// ## Rules
/// - At least one item, at most MAX_SALE_ITEMS
/// - Every item has a name, a valid quantity, and a non-negative price
pub fn validate_line_items(produtos: &[LineItem]) -> ValidationResult<()> {
    if produtos.is_empty() {
        return Err(ValidationError::Required {
            field: "produtos".to_string(),
        });
    }

    if produtos.len() > MAX_SALE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "produtos".to_string(),
            min: 1,
            max: MAX_SALE_ITEMS as i64,
        });
    }

    for item in produtos {
        if item.nome.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "nome".to_string(),
            });
        }
        validate_quantity(item.quantidade)?;
        validate_unit_price(item.preco_unitario.centavos())?;
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use balcao_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Address;

    fn supplier() -> Supplier {
        Supplier {
            razao_social: "Distribuidora Alfa LTDA".to_string(),
            nome_fantasia: "Alfa".to_string(),
            cnpj: "12.345.678/0001-90".to_string(),
            email: "contato@alfa.com".to_string(),
            telefone: "(11) 3333-0000".to_string(),
            endereco: Address {
                rua: "Rua F".to_string(),
                numero: "6".to_string(),
                complemento: None,
                bairro: "Centro".to_string(),
                cidade: "São Paulo".to_string(),
                estado: "SP".to_string(),
                cep: "01000-000".to_string(),
            },
            contato: Contact {
                nome: "Carlos".to_string(),
                email: "carlos@alfa.com".to_string(),
                telefone: "(11) 98888-0000".to_string(),
                cargo: "Comercial".to_string(),
            },
        }
    }

    fn item(nome: &str, quantidade: i64, preco_centavos: i64) -> LineItem {
        LineItem {
            produto_id: "prod-1".to_string(),
            nome: nome.to_string(),
            fabricante: "Fabricante".to_string(),
            quantidade,
            preco_unitario: Money::from_centavos(preco_centavos),
        }
    }

    #[test]
    fn test_validate_razao_social() {
        assert!(validate_razao_social("Distribuidora Alfa LTDA").is_ok());
        assert!(validate_razao_social("").is_err());
        assert!(validate_razao_social("   ").is_err());
        assert!(validate_razao_social("A").is_err());
        assert!(validate_razao_social(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_cnpj() {
        // Formatted and bare forms both normalize to digits
        assert_eq!(
            validate_cnpj("12.345.678/0001-90").unwrap(),
            "12345678000190"
        );
        assert_eq!(validate_cnpj("12345678000190").unwrap(), "12345678000190");

        assert!(validate_cnpj("").is_err());
        assert!(validate_cnpj("12.345.678/0001").is_err());
        assert!(validate_cnpj("12.345.67X/0001-90").is_err());
        assert!(validate_cnpj("123456780001901").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("sem-arroba").is_err());
        assert!(validate_email("@dominio.com").is_err());
        assert!(validate_email("local@").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(0).is_ok());
        assert!(validate_unit_price(1099).is_ok());
        assert!(validate_unit_price(-100).is_err());
    }

    #[test]
    fn test_validate_supplier() {
        assert!(validate_supplier(&supplier()).is_ok());

        let mut missing_name = supplier();
        missing_name.razao_social = " ".to_string();
        assert!(validate_supplier(&missing_name).is_err());

        let mut bad_cnpj = supplier();
        bad_cnpj.cnpj = "123".to_string();
        assert!(validate_supplier(&bad_cnpj).is_err());

        let mut no_contact = supplier();
        no_contact.contato.nome = String::new();
        assert!(validate_supplier(&no_contact).is_err());
    }

    #[test]
    fn test_validate_line_items() {
        assert!(validate_line_items(&[item("Mouse", 2, 4550)]).is_ok());

        // Empty list
        assert!(validate_line_items(&[]).is_err());

        // Bad quantity / price / name
        assert!(validate_line_items(&[item("Mouse", 0, 100)]).is_err());
        assert!(validate_line_items(&[item("Mouse", 1, -1)]).is_err());
        assert!(validate_line_items(&[item("", 1, 100)]).is_err());

        // Too many items
        let too_many: Vec<LineItem> = (0..=MAX_SALE_ITEMS)
            .map(|_| item("Mouse", 1, 100))
            .collect();
        assert!(validate_line_items(&too_many).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  mouse ").unwrap(), "mouse");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"a".repeat(101)).is_err());
    }
}
