//! # Money Module
//!
//! `Money` holds monetary values as integer centavos (i64). Floats never
//! enter the pipeline: parsing, storage, arithmetic, and serialization all
//! stay in the smallest currency unit.
//!
//! ## Usage
//! ```rust
//! use balcao_core::money::Money;
//!
//! // Create from centavos (preferred)
//! let price = Money::from_centavos(1099); // R$ 10,99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // R$ 21,98
//! let total = price + Money::from_centavos(500); // R$ 15,99
//! assert_eq!(total.centavos(), 1599);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos, the smallest unit of the Brazilian Real.
///
/// Signed so that corrections and negative profit can be represented.
/// Serializes as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use balcao_core::money::Money;
    ///
    /// let price = Money::from_centavos(1099); // R$ 10,99
    /// assert_eq!(price.centavos(), 1099);
    /// ```
    #[inline]
    pub const fn from_centavos(centavos: i64) -> Self {
        Money(centavos)
    }

    /// Creates a Money value from reais and centavos parts.
    ///
    /// For negative amounts only the reais part carries the sign:
    /// `from_reais(-5, 50)` is -R$ 5,50, not -R$ 4,50.
    ///
    /// ## Example
    /// ```rust
    /// use balcao_core::money::Money;
    ///
    /// assert_eq!(Money::from_reais(10, 99).centavos(), 1099);
    /// assert_eq!(Money::from_reais(-5, 50).centavos(), -550);
    /// ```
    #[inline]
    pub const fn from_reais(reais: i64, centavos: i64) -> Self {
        if reais < 0 {
            Money(reais * 100 - centavos)
        } else {
            Money(reais * 100 + centavos)
        }
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn centavos(&self) -> i64 {
        self.0
    }

    /// Returns the whole-reais portion.
    ///
    /// ## Example
    /// ```rust
    /// use balcao_core::money::Money;
    ///
    /// assert_eq!(Money::from_centavos(1099).reais(), 10);
    /// assert_eq!(Money::from_centavos(-550).reais(), -5);
    /// ```
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use balcao_core::money::Money;
    ///
    /// let unit_price = Money::from_centavos(299); // R$ 2,99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.centavos(), 897); // R$ 8,97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Divides the value evenly over a count, truncating toward zero.
    ///
    /// Defined as zero when `count` is zero or negative, so average ticket
    /// and average price computations are total over empty collections.
    ///
    /// ## Example
    /// ```rust
    /// use balcao_core::money::Money;
    ///
    /// let total = Money::from_centavos(15000); // R$ 150,00
    /// assert_eq!(total.average_over(3).centavos(), 5000);
    /// assert_eq!(total.average_over(0), Money::zero());
    /// ```
    #[inline]
    pub const fn average_over(&self, count: i64) -> Self {
        if count <= 0 {
            Money(0)
        } else {
            Money(self.0 / count)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders Brazilian Real format: "R$ 10,99", "-R$ 5,50".
///
/// Comma decimal separator, no thousands grouping. UI layers can reformat
/// for locale; logs and the console dashboard use this directly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}R$ {},{:02}",
            sign,
            self.reais().abs(),
            self.centavos_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
