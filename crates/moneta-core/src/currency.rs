//! # Currency Descriptor
//!
//! The immutable set of attributes the decoder needs to read an amount.
//!
//! ## Descriptor Fields
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CurrencyDescriptor                                 │
//! │                                                                         │
//! │   code                "USD"    matched by `C` markers, registry key     │
//! │   symbol              "$"      matched by the `S` marker                │
//! │   decimal_separator   '.'      splits major and minor digits            │
//! │   thousands_separator ','      skipped inside digit runs                │
//! │   precision           2        minor-unit digits (cents)                │
//! │   default_pattern     "S0.00"  used when the caller gives no pattern    │
//! │                                                                         │
//! │   INVARIANT: decimal_separator != thousands_separator                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Descriptors are built by the caller (or loaded by `moneta-config`) and
//! shared as `Arc<CurrencyDescriptor>` between the registry and every
//! [`DecodedAmount`] decoded against them.

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::amount::DecodedAmount;
use crate::decoder;
use crate::error::{ParseError, ParseResult};
use crate::pattern::{self, CompiledPattern};
use crate::validation::{validate_code, validate_precision, validate_separators};

// =============================================================================
// Currency Descriptor
// =============================================================================

/// Attributes of one currency: code, symbol, separators, precision and the
/// pattern used when none is supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CurrencyDescriptor {
    code: String,
    symbol: String,
    decimal_separator: char,
    thousands_separator: char,
    precision: u8,
    default_pattern: String,
}

impl CurrencyDescriptor {
    /// Creates a descriptor, checking its invariants.
    ///
    /// ## Example
    /// ```rust
    /// use moneta_core::CurrencyDescriptor;
    ///
    /// let usd = CurrencyDescriptor::new("USD", "$", '.', ',', 2, "S0.00").unwrap();
    /// assert_eq!(usd.code(), "USD");
    ///
    /// // Same character for both separators is rejected
    /// assert!(CurrencyDescriptor::new("USD", "$", '.', '.', 2, "S0.00").is_err());
    /// ```
    pub fn new(
        code: impl Into<String>,
        symbol: impl Into<String>,
        decimal_separator: char,
        thousands_separator: char,
        precision: u8,
        default_pattern: impl Into<String>,
    ) -> ParseResult<Self> {
        let descriptor = CurrencyDescriptor {
            code: code.into(),
            symbol: symbol.into(),
            decimal_separator,
            thousands_separator,
            precision,
            default_pattern: default_pattern.into(),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Checks the descriptor invariants.
    ///
    /// Deserialized descriptors skip [`CurrencyDescriptor::new`], so loaders
    /// call this after reading them.
    pub fn validate(&self) -> ParseResult<()> {
        validate_code(&self.code)?;
        validate_separators(&self.code, self.decimal_separator, self.thousands_separator)?;
        validate_precision(&self.code, self.precision)?;
        Ok(())
    }

    /// Currency code, e.g. `"USD"`.
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Currency symbol, e.g. `"$"`.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    #[inline]
    pub fn thousands_separator(&self) -> char {
        self.thousands_separator
    }

    /// Number of minor-unit digits (2 for cents).
    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    #[inline]
    pub fn default_pattern(&self) -> &str {
        &self.default_pattern
    }

    /// Returns `10^precision`, the number of minor units in one major unit.
    pub fn scale(&self) -> ParseResult<i128> {
        10i128
            .checked_pow(u32::from(self.precision))
            .ok_or_else(|| ParseError::InvalidDescriptor {
                code: self.code.clone(),
                reason: format!("precision {} overflows the amount range", self.precision),
            })
    }

    /// Compiles `pattern` against this currency's separators.
    pub fn compile(&self, pattern: &str) -> ParseResult<CompiledPattern> {
        pattern::compile(pattern, self.decimal_separator, self.thousands_separator)
    }

    /// Decodes `value` against this currency, without any registry lookup.
    ///
    /// Uses the default pattern when `pattern` is `None`. When the pattern has
    /// no `C` marker, an embedded currency code is removed from the input
    /// first, so `"$USD1.00"` still decodes with pattern `"S0.00"`.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use moneta_core::CurrencyDescriptor;
    ///
    /// let usd = Arc::new(CurrencyDescriptor::new("USD", "$", '.', ',', 2, "S0.00").unwrap());
    ///
    /// let amount = usd.parse("$1,234.56", None).unwrap();
    /// assert_eq!(amount.minor_units(), 123456);
    ///
    /// let amount = usd.parse("USD-1234.56", Some("C0.00")).unwrap();
    /// assert_eq!(amount.minor_units(), -123456);
    /// ```
    pub fn parse(self: &Arc<Self>, value: &str, pattern: Option<&str>) -> ParseResult<DecodedAmount> {
        let pattern = pattern.unwrap_or(self.default_pattern.as_str());
        let compiled = self.compile(pattern)?;

        let value = if compiled.code_markers() == 0 {
            self.strip_code(value, &compiled)
        } else {
            Cow::Borrowed(value)
        };

        decoder::decode(&compiled, self, &value)
    }

    /// Removes the first embedded occurrence of the code from `value`.
    ///
    /// Occurrences accounted for by the symbol (e.g. symbol `"CHF"` for code
    /// `"CHF"`) are left in place for the `S` marker to consume.
    fn strip_code<'a>(&self, value: &'a str, compiled: &CompiledPattern) -> Cow<'a, str> {
        let in_symbols = compiled.symbol_markers() * self.symbol.matches(self.code.as_str()).count();
        if value.matches(self.code.as_str()).count() <= in_symbols {
            return Cow::Borrowed(value);
        }

        debug!(code = %self.code, "Stripping embedded currency code before decoding");
        Cow::Owned(value.replacen(self.code.as_str(), "", 1))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> Arc<CurrencyDescriptor> {
        Arc::new(CurrencyDescriptor::new("USD", "$", '.', ',', 2, "S0.00").unwrap())
    }

    #[test]
    fn test_new_rejects_equal_separators() {
        let err = CurrencyDescriptor::new("EUR", "€", ',', ',', 2, "0,00 S").unwrap_err();
        assert!(matches!(err, ParseError::InvalidDescriptor { .. }));
    }

    #[test]
    fn test_new_rejects_empty_code() {
        assert!(CurrencyDescriptor::new("", "$", '.', ',', 2, "S0.00").is_err());
    }

    #[test]
    fn test_scale() {
        assert_eq!(usd().scale().unwrap(), 100);

        let jpy = CurrencyDescriptor::new("JPY", "¥", '.', ',', 0, "S0").unwrap();
        assert_eq!(jpy.scale().unwrap(), 1);
    }

    #[test]
    fn test_parse_uses_default_pattern() {
        let amount = usd().parse("$12.50", None).unwrap();
        assert_eq!(amount.minor_units(), 1250);
    }

    #[test]
    fn test_parse_strips_embedded_code() {
        let amount = usd().parse("$USD1,234.56", None).unwrap();
        assert_eq!(amount.minor_units(), 123456);

        let amount = usd().parse("$ 7.00 USD", None).unwrap();
        assert_eq!(amount.minor_units(), 700);
    }

    #[test]
    fn test_parse_keeps_code_used_as_symbol() {
        let chf = Arc::new(CurrencyDescriptor::new("CHF", "CHF", '.', '\'', 2, "S 0.00").unwrap());

        let amount = chf.parse("CHF 1'250.00", None).unwrap();
        assert_eq!(amount.minor_units(), 125000);

        let amount = chf.parse("CHF CHF 3.10", None).unwrap();
        assert_eq!(amount.minor_units(), 310);
    }

    #[test]
    fn test_parse_space_thousands_separator() {
        let eur = Arc::new(CurrencyDescriptor::new("EUR", "€", ',', ' ', 2, "# ##0,00 S").unwrap());

        let amount = eur.parse("1 234,56 €", None).unwrap();
        assert_eq!(amount.minor_units(), 123456);

        let amount = eur.parse("12 345 678,9 € EUR", None).unwrap();
        assert_eq!(amount.minor_units(), 1234567890);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(usd().as_ref()).unwrap();
        assert_eq!(json["code"], "USD");
        assert_eq!(json["decimal_separator"], ".");
        assert_eq!(json["precision"], 2);

        let back: CurrencyDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(&back, usd().as_ref());
    }
}
