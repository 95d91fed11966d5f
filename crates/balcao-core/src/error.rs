//! # Error Types
//!
//! Domain-specific error types for balcao-core.
//!
//! ## Error Hierarchy
//! ```text
//! balcao-core (this file)
//! ├── CoreError        - Business rule violations
//! └── ValidationError  - Input validation failures
//!
//! balcao-db
//! └── DbError          - Database operation failures
//!
//! balcao-service
//! └── ServiceError     - Uniform boundary errors (serialized)
//!
//! Flow: ValidationError → CoreError → DbError → ServiceError → UI
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Business rule violations raised before any storage write happens.
/// The service boundary translates them into user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Sale cannot be found in the loaded collections.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// The chosen sale already has a purchase and is no longer pending.
    ///
    /// Purchase creation only accepts pending sales; the operation aborts
    /// with this error and writes nothing.
    #[error("Sale {sale_id} already has a purchase")]
    SaleAlreadyFulfilled { sale_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when user input doesn't meet requirements, before business
/// logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., malformed CNPJ, invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
