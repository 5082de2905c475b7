//! Price values and the "not for sale" sentinel.
//!
//! ## Overview
//!
//! Prices are plain `f64` values. Every query that can fail to produce a
//! price (unlisted item, stopped sales, vanished peer) returns the negative
//! sentinel [`NOT_FOR_SALE`] instead of an error.
//!
//! ## Parsing
//!
//! Price strings are parsed through `rust_decimal` first so that malformed
//! input such as `"1e400"` or `"12.3.4"` is rejected before it can turn into
//! an infinite or surprising float.
//!
//! ## Examples
//!
//! ```
//! use storefront::types::price::{parse_price, format_price, NOT_FOR_SALE};
//!
//! let price = parse_price("5.99").unwrap();
//! assert_eq!(price, 5.99);
//! assert_eq!(format_price(price), "5.99");
//! assert_eq!(format_price(NOT_FOR_SALE), "n/a");
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::PriceError;

/// Returned by `Outlet::sell` and `Item::get_price` when nothing can be sold.
pub const NOT_FOR_SALE: f64 = -1.0;

// ============================================================================
// Predicates
// ============================================================================

/// `true` if `price` is a real price rather than the sentinel.
///
/// Any negative value counts as "not for sale", not just the exact sentinel.
#[inline]
pub fn is_for_sale(price: f64) -> bool {
    price >= 0.0
}

// ============================================================================
// Validation and Parsing
// ============================================================================

/// Check that `price` is finite and non-negative.
///
/// # Example
///
/// ```
/// use storefront::types::price::validate_price;
///
/// assert_eq!(validate_price(10.0), Ok(10.0));
/// assert!(validate_price(-3.0).is_err());
/// assert!(validate_price(f64::NAN).is_err());
/// ```
pub fn validate_price(price: f64) -> Result<f64, PriceError> {
    if !price.is_finite() {
        return Err(PriceError::NotFinite(price));
    }
    if price < 0.0 {
        return Err(PriceError::Negative(price));
    }
    Ok(price)
}

/// Parse a decimal price string.
///
/// # Errors
///
/// * [`PriceError::Invalid`] - not a decimal number, or not representable as `f64`
/// * [`PriceError::Negative`] - the value is below zero
pub fn parse_price(s: &str) -> Result<f64, PriceError> {
    let decimal =
        Decimal::from_str(s.trim()).map_err(|_| PriceError::Invalid(s.to_string()))?;
    // Going through the canonical decimal text keeps the conversion
    // correctly rounded.
    let value = f64::from_str(&decimal.to_string())
        .map_err(|_| PriceError::Invalid(s.to_string()))?;
    validate_price(value)
}

/// Render a price with two decimals; the sentinel renders as `"n/a"`.
pub fn format_price(price: f64) -> String {
    if is_for_sale(price) {
        format!("{:.2}", price)
    } else {
        "n/a".to_string()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
