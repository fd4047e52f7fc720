//! # Error Types
//!
//! Domain-specific error types for moneta-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  moneta-core errors (this file)                                        │
//! │  └── ParseError                                                        │
//! │      ├── Pattern problems   InvalidPattern                             │
//! │      ├── Input problems     PatternMismatch, DigitExpected, OutOfInput │
//! │      ├── Lookup problems    UnknownCurrency                            │
//! │      └── Value problems     AmountOverflow, InvalidDescriptor          │
//! │                                                                         │
//! │  moneta-config errors (separate crate)                                 │
//! │  └── ConfigError       - Currency table load/save failures             │
//! │                                                                         │
//! │  Flow: ParseError → ConfigError (when bootstrapping) → Caller          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include positions in error messages (pattern index, input index)
//! 3. Errors are enum variants, never String
//! 4. No partial results: a failed decode never yields an amount

use thiserror::Error;

// =============================================================================
// Parse Error
// =============================================================================

/// Errors produced while compiling patterns, decoding input or resolving
/// currencies.
///
/// All indices are character positions: `pattern_index` points into the
/// canonical (compiled, whitespace-free) pattern and `input_index` into the
/// whitespace-stripped input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The pattern is malformed or ambiguous.
    ///
    /// ## When This Occurs
    /// - No digit-placeholder run, or more than one (`"0.00.00"`)
    /// - A character outside the grammar (`"S0.00 X"`)
    /// - More `C` markers than the currency code has characters
    /// - Fewer than 2 `C` markers where the code must be extracted
    /// - A decimal separator outside the digit run in the wrong place
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A literal in the pattern did not match the input.
    ///
    /// ## User Workflow
    /// ```text
    /// Pattern "S0.00", currency symbol "$"
    /// Input   "€12.00"
    ///      │
    ///      ▼
    /// PatternMismatch { pattern_index: 0, input_index: 0,
    ///                   expected: "$", found: "€" }
    /// ```
    #[error(
        "Pattern mismatch at pattern index {pattern_index}, input index {input_index}: expected '{expected}', found '{found}'"
    )]
    PatternMismatch {
        pattern_index: usize,
        input_index: usize,
        expected: String,
        found: String,
    },

    /// A digit field found no digits at the current input position.
    #[error("Expected digits at input index {input_index}")]
    DigitExpected { input_index: usize },

    /// The input ended while the pattern still expected a character.
    #[error("Unexpected end of input at index {input_index}")]
    OutOfInput { input_index: usize },

    /// No registered currency matches the extracted or searched code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// The decoded amount does not fit in 128 bits of minor units.
    #[error("Amount {digits} exceeds the supported range")]
    AmountOverflow { digits: String },

    /// A currency descriptor violates its invariants.
    #[error("Invalid currency descriptor '{code}': {reason}")]
    InvalidDescriptor { code: String, reason: String },
}

impl ParseError {
    /// Shorthand for [`ParseError::InvalidPattern`].
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        ParseError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true if the input string is at fault.
    ///
    /// Retrying the same input with another pattern may succeed; retrying with
    /// the same pattern never will.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ParseError::PatternMismatch { .. }
                | ParseError::DigitExpected { .. }
                | ParseError::OutOfInput { .. }
                | ParseError::AmountOverflow { .. }
        )
    }

    /// Returns true if the pattern or descriptor is at fault.
    pub fn is_pattern_error(&self) -> bool {
        matches!(
            self,
            ParseError::InvalidPattern { .. } | ParseError::InvalidDescriptor { .. }
        )
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ParseError.
pub type ParseResult<T> = Result<T, ParseError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ParseError::PatternMismatch {
            pattern_index: 0,
            input_index: 2,
            expected: "$".to_string(),
            found: "€".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Pattern mismatch at pattern index 0, input index 2: expected '$', found '€'"
        );

        let err = ParseError::invalid_pattern("0.00.00", "found 2 digit runs");
        assert_eq!(
            err.to_string(),
            "Invalid pattern '0.00.00': found 2 digit runs"
        );
    }

    #[test]
    fn test_categories() {
        assert!(ParseError::DigitExpected { input_index: 3 }.is_input_error());
        assert!(ParseError::OutOfInput { input_index: 3 }.is_input_error());
        assert!(!ParseError::UnknownCurrency("XYZ".into()).is_input_error());

        assert!(ParseError::invalid_pattern("", "empty").is_pattern_error());
        assert!(!ParseError::UnknownCurrency("XYZ".into()).is_pattern_error());
    }
}
