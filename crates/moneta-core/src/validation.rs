//! # Validation Module
//!
//! Field checks for currency descriptors.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: moneta-config                                                │
//! │  ├── TOML shape (deserialization)                                      │
//! │  └── Table-level rules (unique codes, default code exists)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: CurrencyDescriptor::new / validate                           │
//! │  └── THIS MODULE: per-field rules                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pattern compiler                                             │
//! │  └── Grammar rules on the default pattern                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use moneta_core::validation::{validate_code, validate_separators};
//!
//! assert!(validate_code("USD").is_ok());
//! assert!(validate_separators("USD", '.', ',').is_ok());
//! assert!(validate_separators("USD", '.', '.').is_err());
//! ```

use crate::error::{ParseError, ParseResult};
use crate::MAX_PRECISION;

/// Characters with a fixed meaning in the pattern grammar.
const RESERVED_PATTERN_CHARS: [char; 4] = ['0', '#', 'S', 'C'];

fn invalid(code: &str, reason: impl Into<String>) -> ParseError {
    ParseError::InvalidDescriptor {
        code: code.to_string(),
        reason: reason.into(),
    }
}

// =============================================================================
// Code
// =============================================================================

/// Validates a currency code.
///
/// ## Rules
/// - Must not be empty
/// - ASCII letters only: explicit patterns read the code out of the input
///   as a run of letters, so `"XBT1"` or `"US D"` could never be found
///
/// Codes are conventionally uppercase ISO-4217 strings, but nothing here
/// checks them against a canonical list.
pub fn validate_code(code: &str) -> ParseResult<()> {
    if code.is_empty() {
        return Err(invalid(code, "code is required"));
    }

    if !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid(code, "code must contain only ASCII letters"));
    }

    Ok(())
}

// =============================================================================
// Separators
// =============================================================================

/// Validates the decimal and thousands separators of a descriptor.
///
/// ## Rules
/// - Decimal and thousands separators must differ
/// - Neither may be an ASCII digit or a reserved pattern character
/// - The decimal separator may not be whitespace (whitespace is stripped from
///   input, a space thousands separator is fine)
///
/// ## Example
/// ```rust
/// use moneta_core::validation::validate_separators;
///
/// assert!(validate_separators("EUR", ',', '.').is_ok());
/// assert!(validate_separators("EUR", ',', ' ').is_ok());
/// assert!(validate_separators("EUR", ' ', '.').is_err());
/// ```
pub fn validate_separators(code: &str, decimal: char, thousands: char) -> ParseResult<()> {
    if decimal == thousands {
        return Err(invalid(
            code,
            format!("decimal and thousands separators are both '{}'", decimal),
        ));
    }

    for (name, sep) in [("decimal", decimal), ("thousands", thousands)] {
        if sep.is_ascii_digit() || RESERVED_PATTERN_CHARS.contains(&sep) {
            return Err(invalid(
                code,
                format!("{} separator '{}' is reserved by the pattern grammar", name, sep),
            ));
        }
    }

    if decimal.is_whitespace() {
        return Err(invalid(code, "decimal separator must not be whitespace"));
    }

    Ok(())
}

// =============================================================================
// Precision
// =============================================================================

/// Validates the number of minor-unit digits.
pub fn validate_precision(code: &str, precision: u8) -> ParseResult<()> {
    if precision > MAX_PRECISION {
        return Err(invalid(
            code,
            format!("precision {} exceeds maximum of {}", precision, MAX_PRECISION),
        ));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_code() {
        assert!(validate_code("USD").is_ok());
        assert!(validate_code("xbt").is_ok());

        assert!(validate_code("").is_err());
        assert!(validate_code("US D").is_err());
        assert!(validate_code("XBT1").is_err());
        assert!(validate_code("€UR").is_err());
    }

    #[test]
    fn test_validate_separators() {
        assert!(validate_separators("USD", '.', ',').is_ok());
        assert!(validate_separators("CHF", '.', '\'').is_ok());

        assert!(validate_separators("USD", ',', ',').is_err());
        assert!(validate_separators("USD", '0', ',').is_err());
        assert!(validate_separators("USD", '.', '#').is_err());
        assert!(validate_separators("USD", 'S', ',').is_err());
    }

    #[test]
    fn test_validate_precision() {
        assert!(validate_precision("JPY", 0).is_ok());
        assert!(validate_precision("BHD", 3).is_ok());
        assert!(validate_precision("XXX", MAX_PRECISION).is_ok());
        assert!(validate_precision("XXX", MAX_PRECISION + 1).is_err());
    }

    #[test]
    fn test_error_carries_code() {
        let err = validate_separators("EUR", ',', ',').unwrap_err();
        assert!(matches!(err, ParseError::InvalidDescriptor { ref code, .. } if code == "EUR"));
    }
}
