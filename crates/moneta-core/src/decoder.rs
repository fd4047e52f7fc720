//! # Pattern Decoder
//!
//! Walks a [`CompiledPattern`] against the input and produces an exact amount.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Decoder States                                   │
//! │                                                                         │
//! │   BeforeMajor ──MajorDigits──► InMajor ──DecimalSeparator──►            │
//! │                                                                         │
//! │        AfterDecimal ──MinorDigits──► Done                               │
//! │                                                                         │
//! │   Symbol / Code / CodeChar are valid in every state.                   │
//! │   A '-' is only accepted directly before the major digits.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Minor Digit Normalization
//! The minor run is right-padded with `0` or truncated to the currency
//! precision. Truncation never rounds:
//!
//! ```text
//!   precision 2:   "2"   → "20"
//!                  "219" → "21"
//! ```
//!
//! ## Amount
//! `minor_units = major * 10^precision + minor`, negated as a whole when a
//! sign was read. Negative amounts with no major field (`".-50"`) cannot be
//! written in this grammar.

use std::sync::Arc;

use tracing::debug;

use crate::amount::DecodedAmount;
use crate::currency::CurrencyDescriptor;
use crate::cursor::ScanCursor;
use crate::error::{ParseError, ParseResult};
use crate::pattern::{normalize_input, CompiledPattern, Instruction};

/// Which digit field the decoder has reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    BeforeMajor,
    InMajor,
    AfterDecimal,
    Done,
}

/// Decodes `value` against `pattern` for `currency`.
///
/// Whitespace in `value` and in the currency symbol is ignored. Input left
/// over after the last instruction is not an error.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use moneta_core::{decoder, pattern, CurrencyDescriptor};
///
/// let usd = Arc::new(CurrencyDescriptor::new("USD", "$", '.', ',', 2, "S0.00").unwrap());
/// let compiled = pattern::compile("S0.00", '.', ',').unwrap();
///
/// let amount = decoder::decode(&compiled, &usd, "$1,234.56").unwrap();
/// assert_eq!(amount.minor_units(), 123456);
/// ```
pub fn decode(
    pattern: &CompiledPattern,
    currency: &Arc<CurrencyDescriptor>,
    value: &str,
) -> ParseResult<DecodedAmount> {
    let code: Vec<char> = currency.code().chars().collect();
    let symbol = normalize_input(currency.symbol());
    let code_chars = pattern
        .instructions()
        .iter()
        .filter(|&&i| i == Instruction::CodeChar)
        .count();
    if code_chars > code.len() {
        return Err(ParseError::invalid_pattern(
            pattern.source(),
            format!(
                "{} code markers but currency code '{}' has {} characters",
                code_chars,
                currency.code(),
                code.len()
            ),
        ));
    }

    let mut cursor = ScanCursor::new(&normalize_input(value));
    let mut state = DecodeState::BeforeMajor;
    let mut negative = false;
    let mut code_pos = 0;
    let mut major = 0i128;
    let mut minor = 0i128;

    for (pattern_index, &instruction) in pattern.instructions().iter().enumerate() {
        match (instruction, state) {
            (Instruction::Symbol, _) => {
                expect_literal(&mut cursor, pattern_index, &symbol)?;
            }
            (Instruction::Code, _) => {
                expect_literal(&mut cursor, pattern_index, currency.code())?;
            }
            (Instruction::CodeChar, _) => {
                let input_index = cursor.position();
                let found = cursor.take_one()?;
                let expected = code[code_pos];
                if found != expected {
                    return Err(ParseError::PatternMismatch {
                        pattern_index,
                        input_index,
                        expected: expected.to_string(),
                        found: found.to_string(),
                    });
                }
                code_pos += 1;
            }
            (Instruction::MajorDigits, DecodeState::BeforeMajor) => {
                if !negative && cursor.peek() == Ok('-') {
                    cursor.take_one()?;
                    negative = true;
                }
                major = parse_digits(&cursor.take_digit_run(currency.thousands_separator())?)?;
                state = DecodeState::InMajor;
            }
            (Instruction::DecimalSeparator, DecodeState::InMajor) => {
                let input_index = cursor.position();
                let found = cursor.take_one()?;
                if found != currency.decimal_separator() {
                    return Err(ParseError::PatternMismatch {
                        pattern_index,
                        input_index,
                        expected: currency.decimal_separator().to_string(),
                        found: found.to_string(),
                    });
                }
                state = DecodeState::AfterDecimal;
            }
            (Instruction::MinorDigits, DecodeState::AfterDecimal) => {
                let digits = cursor.take_digit_run(currency.thousands_separator())?;
                minor = parse_digits(&normalize_minor(&digits, currency.precision()))?;
                state = DecodeState::Done;
            }
            (instruction, state) => {
                return Err(ParseError::invalid_pattern(
                    pattern.source(),
                    format!("{:?} not allowed in state {:?}", instruction, state),
                ));
            }
        }
    }

    if !cursor.is_at_end() {
        debug!(
            pattern = %pattern,
            trailing = %cursor.remaining(),
            "Ignoring input after the last pattern instruction"
        );
    }

    let magnitude = major
        .checked_mul(currency.scale()?)
        .and_then(|scaled| scaled.checked_add(minor))
        .ok_or_else(|| ParseError::AmountOverflow {
            digits: format!("{}.{}", major, minor),
        })?;
    let minor_units = if negative { -magnitude } else { magnitude };

    Ok(DecodedAmount::new(minor_units, Arc::clone(currency)))
}

fn expect_literal(
    cursor: &mut ScanCursor,
    pattern_index: usize,
    expected: &str,
) -> ParseResult<()> {
    let input_index = cursor.position();
    let found = cursor.take_n(expected.chars().count());
    if found != expected {
        return Err(ParseError::PatternMismatch {
            pattern_index,
            input_index,
            expected: expected.to_string(),
            found,
        });
    }
    Ok(())
}

/// Pads or truncates a minor-unit digit run to `precision` digits.
pub(crate) fn normalize_minor(digits: &str, precision: u8) -> String {
    let precision = usize::from(precision);
    let mut normalized: String = digits.chars().take(precision).collect();
    while normalized.len() < precision {
        normalized.push('0');
    }
    normalized
}

fn parse_digits(digits: &str) -> ParseResult<i128> {
    if digits.is_empty() {
        return Ok(0);
    }
    digits.parse().map_err(|_| ParseError::AmountOverflow {
        digits: digits.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
