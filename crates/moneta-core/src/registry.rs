//! # Currency Registry
//!
//! Maps currency codes to descriptors and dispatches raw strings to the
//! decoder.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CurrencyRegistry::parse                              │
//! │                                                                         │
//! │  parse("$USD1,234.56", None)          parse("USD 12.00", Some("CCC0")) │
//! │       │                                    │                            │
//! │       ▼                                    ▼                            │
//! │  find_by_code: longest registered     count C markers (>= 2)           │
//! │  code found inside the string         extract that many letters        │
//! │       │                               find(code)                       │
//! │       ▼                                    │                            │
//! │  descriptor.default_pattern               │                            │
//! │       │                                    │                            │
//! │       └──────────────┬─────────────────────┘                            │
//! │                      ▼                                                  │
//! │     no C marker? strip the code from the input                         │
//! │                      ▼                                                  │
//! │          compile ──► decode ──► DecodedAmount                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The map sits behind a `RwLock`: lookups and parses share the read lock,
//! registration takes the write lock for a single insert. Decoding runs on a
//! cloned `Arc<CurrencyDescriptor>` after the lock is released.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use regex::Regex;
use tracing::{debug, warn};

use crate::amount::DecodedAmount;
use crate::currency::CurrencyDescriptor;
use crate::error::{ParseError, ParseResult};
use crate::MIN_CODE_MARKERS;

/// Code → descriptor mapping with string dispatch.
///
/// An explicit context object: build one, share it behind an `Arc` if several
/// threads need it.
#[derive(Debug, Default)]
pub struct CurrencyRegistry {
    currencies: RwLock<IndexMap<String, Arc<CurrencyDescriptor>>>,
}

impl CurrencyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a descriptor under its code.
    ///
    /// Re-registering a code replaces the previous descriptor (last write
    /// wins) and returns it. The code keeps its original registration slot.
    pub fn register(
        &self,
        descriptor: impl Into<Arc<CurrencyDescriptor>>,
    ) -> Option<Arc<CurrencyDescriptor>> {
        let descriptor = descriptor.into();
        let code = descriptor.code().to_string();

        let previous = self.write().insert(code.clone(), descriptor.clone());
        match &previous {
            Some(old) if **old != *descriptor => {
                warn!(code = %code, "Replacing registered currency with a different descriptor")
            }
            Some(_) => debug!(code = %code, "Re-registered currency"),
            None => debug!(code = %code, "Registered currency"),
        }
        previous
    }

    /// Registers every descriptor in order.
    pub fn register_all<I, D>(&self, descriptors: I)
    where
        I: IntoIterator<Item = D>,
        D: Into<Arc<CurrencyDescriptor>>,
    {
        for descriptor in descriptors {
            self.register(descriptor);
        }
    }

    /// Removes a code from the registry.
    pub fn unregister(&self, code: &str) -> Option<Arc<CurrencyDescriptor>> {
        let removed = self.write().shift_remove(code);
        if removed.is_some() {
            debug!(code = %code, "Unregistered currency");
        }
        removed
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Returns the descriptor registered under `code`.
    pub fn find(&self, code: &str) -> Option<Arc<CurrencyDescriptor>> {
        self.read().get(code).cloned()
    }

    /// Finds the currency whose code occurs in `value`.
    ///
    /// The longest matching code wins, so `"USDX"` beats `"USD"` in
    /// `"USDX 10.00"`. Among equal-length matches the one registered last
    /// wins.
    ///
    /// ## Example
    /// ```rust
    /// use moneta_core::{CurrencyRegistry, CurrencyDescriptor};
    ///
    /// let registry = CurrencyRegistry::new();
    /// registry.register(CurrencyDescriptor::new("USD", "$", '.', ',', 2, "S0.00").unwrap());
    /// registry.register(CurrencyDescriptor::new("USDX", "$", '.', ',', 2, "S0.00").unwrap());
    ///
    /// let found = registry.find_by_code("$USDX12.00").unwrap();
    /// assert_eq!(found.code(), "USDX");
    /// assert!(registry.find_by_code("€12.00").is_none());
    /// ```
    pub fn find_by_code(&self, value: &str) -> Option<Arc<CurrencyDescriptor>> {
        self.read()
            .values()
            .filter(|c| value.contains(c.code()))
            .max_by_key(|c| c.code().chars().count())
            .cloned()
    }

    /// Registered codes in registration order.
    pub fn codes(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Decodes a raw monetary string, resolving its currency first.
    ///
    /// ## Resolution
    /// - `pattern == None`: the longest registered code inside `value`
    ///   selects the currency and its default pattern.
    /// - `pattern == Some(p)`: `p` must have at least two `C` markers; that
    ///   many consecutive letters are read from `value` as the code.
    ///
    /// ## Example
    /// ```rust
    /// use moneta_core::{CurrencyRegistry, CurrencyDescriptor};
    ///
    /// let registry = CurrencyRegistry::new();
    /// registry.register(CurrencyDescriptor::new("USD", "$", '.', ',', 2, "S0.00").unwrap());
    ///
    /// assert_eq!(registry.parse("$USD1,234.56", None).unwrap().minor_units(), 123456);
    /// assert_eq!(registry.parse("USD 99.5", Some("CCC 0.00")).unwrap().minor_units(), 9950);
    /// ```
    pub fn parse(&self, value: &str, pattern: Option<&str>) -> ParseResult<DecodedAmount> {
        let currency = match pattern {
            None => self
                .find_by_code(value)
                .ok_or_else(|| ParseError::UnknownCurrency(value.to_string()))?,
            Some(pattern) => {
                let code = extract_code(value, pattern)?;
                self.find(&code)
                    .ok_or(ParseError::UnknownCurrency(code))?
            }
        };

        debug!(code = %currency.code(), pattern = ?pattern, "Resolved currency for input");
        currency.parse(value, pattern)
    }

    /// Decodes `value` as the currency registered under `code`.
    ///
    /// For callers that already know the currency; no code search or
    /// extraction happens. Uses the default pattern when `pattern` is `None`.
    pub fn parse_as(
        &self,
        code: &str,
        value: &str,
        pattern: Option<&str>,
    ) -> ParseResult<DecodedAmount> {
        let currency = self
            .find(code)
            .ok_or_else(|| ParseError::UnknownCurrency(code.to_string()))?;
        currency.parse(value, pattern)
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexMap<String, Arc<CurrencyDescriptor>>> {
        // Every write is a single map operation, so a poisoned map is intact
        self.currencies.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<String, Arc<CurrencyDescriptor>>> {
        self.currencies.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reads the currency code out of `value` for an explicit pattern.
///
/// The pattern's `C` count gives the code length. Exactly one run of that
/// many ASCII letters must occur in `value`.
fn extract_code(value: &str, pattern: &str) -> ParseResult<String> {
    let markers = pattern.chars().filter(|&c| c == 'C').count();
    if markers < MIN_CODE_MARKERS {
        return Err(ParseError::invalid_pattern(
            pattern,
            format!(
                "needs at least {} code markers to identify the currency, found {}",
                MIN_CODE_MARKERS, markers
            ),
        ));
    }

    let letters = Regex::new(&format!("[A-Za-z]{{{}}}", markers))
        .map_err(|e| ParseError::invalid_pattern(pattern, e.to_string()))?;

    let found: Vec<&str> = letters.find_iter(value).map(|m| m.as_str()).collect();
    match found.as_slice() {
        [code] => Ok(code.to_string()),
        [] => Err(ParseError::invalid_pattern(
            pattern,
            format!("no {}-letter currency code in '{}'", markers, value),
        )),
        more => Err(ParseError::invalid_pattern(
            pattern,
            format!(
                "{} candidate {}-letter currency codes in '{}'",
                more.len(),
                markers,
                value
            ),
        )),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(code: &str, symbol: &str, pattern: &str) -> CurrencyDescriptor {
        CurrencyDescriptor::new(code, symbol, '.', ',', 2, pattern).unwrap()
    }

    fn registry() -> CurrencyRegistry {
        let registry = CurrencyRegistry::new();
        registry.register_all([
            descriptor("USD", "$", "S0.00"),
            descriptor("EUR", "€", "0.00 S"),
            descriptor("GBP", "£", "CCC S0.00"),
        ]);
        registry
    }

    #[test]
    fn test_register_and_find() {
        let registry = CurrencyRegistry::new();
        assert!(registry.is_empty());

        let xyz = descriptor("XYZ", "¤", "S0.00");
        assert!(registry.register(xyz.clone()).is_none());
        assert_eq!(registry.find("XYZ").as_deref(), Some(&xyz));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reregister_replaces() {
        let registry = CurrencyRegistry::new();
        registry.register(descriptor("XYZ", "¤", "S0.00"));

        let replacement = descriptor("XYZ", "X$", "C0.00");
        let previous = registry.register(replacement.clone()).unwrap();
        assert_eq!(previous.symbol(), "¤");
        assert_eq!(registry.find("XYZ").as_deref(), Some(&replacement));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_find_missing() {
        assert!(registry().find("JPY").is_none());
    }

    #[test]
    fn test_find_by_code_longest_wins() {
        let registry = CurrencyRegistry::new();
        registry.register(descriptor("USDX", "$", "S0.00"));
        registry.register(descriptor("USD", "$", "S0.00"));

        assert_eq!(registry.find_by_code("USDX 10.00").unwrap().code(), "USDX");
        assert_eq!(registry.find_by_code("USD 10.00").unwrap().code(), "USD");
    }

    #[test]
    fn test_find_by_code_tie_goes_to_last_registered() {
        let registry = CurrencyRegistry::new();
        registry.register(descriptor("AAA", "$", "S0.00"));
        registry.register(descriptor("BBB", "$", "S0.00"));

        assert_eq!(registry.find_by_code("AAA BBB 1.00").unwrap().code(), "BBB");
    }

    #[test]
    fn test_unregister() {
        let registry = registry();
        assert!(registry.unregister("EUR").is_some());
        assert!(registry.unregister("EUR").is_none());
        assert_eq!(registry.codes(), vec!["USD", "GBP"]);
    }

    #[test]
    fn test_parse_by_search() {
        let registry = registry();

        let amount = registry.parse("$USD1,234.56", None).unwrap();
        assert_eq!(amount.minor_units(), 123456);
        assert_eq!(amount.code(), "USD");

        let amount = registry.parse("12.30 € EUR", None).unwrap();
        assert_eq!(amount.minor_units(), 1230);
        assert_eq!(amount.code(), "EUR");

        // Default pattern with code markers keeps the code in the input
        let amount = registry.parse("GBP £-5.00", None).unwrap();
        assert_eq!(amount.minor_units(), -500);
    }

    #[test]
    fn test_parse_unknown_currency() {
        let err = registry().parse("¥1,000", None).unwrap_err();
        assert_eq!(err, ParseError::UnknownCurrency("¥1,000".to_string()));

        let err = registry().parse("JPY 1000", Some("CCC 0")).unwrap_err();
        assert_eq!(err, ParseError::UnknownCurrency("JPY".to_string()));
    }

    #[test]
    fn test_parse_explicit_pattern() {
        let amount = registry().parse("EUR-12.5", Some("CCC0.00")).unwrap();
        assert_eq!(amount.minor_units(), -1250);
        assert_eq!(amount.code(), "EUR");
    }

    #[test]
    fn test_explicit_pattern_needs_two_markers() {
        let err = registry().parse("USD 1.00", Some("S0.00")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidPattern { .. }));

        let err = registry().parse("USD 1.00", Some("C0.00")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidPattern { .. }));
    }

    #[test]
    fn test_extract_code() {
        assert_eq!(extract_code("USD-1.00", "CCC0.00").unwrap(), "USD");
        assert_eq!(extract_code("$ USD 1.00", "CCC S0.00").unwrap(), "USD");

        // Zero candidates
        assert!(extract_code("$1.00", "CCC0.00").is_err());
        // Two candidates
        assert!(extract_code("USD EUR 1.00", "CCC0.00").is_err());
    }

    #[test]
    fn test_explicit_pattern_finds_every_valid_code() {
        // Any code a descriptor accepts is a letter run extraction can find
        assert!(CurrencyDescriptor::new("XBT1", "₿", '.', ',', 8, "S0.00").is_err());

        let registry = CurrencyRegistry::new();
        registry.register(descriptor("XBTC", "₿", "S0.00"));
        let amount = registry.parse("XBTC 1.50", Some("CCCC 0.00")).unwrap();
        assert_eq!(amount.code(), "XBTC");
        assert_eq!(amount.minor_units(), 150);
    }

    #[test]
    fn test_parse_as() {
        let registry = registry();
        let amount = registry.parse_as("USD", "$3.50", None).unwrap();
        assert_eq!(amount.minor_units(), 350);

        assert!(matches!(
            registry.parse_as("JPY", "¥3", None).unwrap_err(),
            ParseError::UnknownCurrency(_)
        ));
    }

    #[test]
    fn test_concurrent_readers() {
        let registry = Arc::new(registry());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    if i == 0 {
                        registry.register(descriptor("CHF", "Fr.", "S0.00"));
                    }
                    registry.parse("$USD2.00", None).unwrap().minor_units()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 200);
        }
        assert!(registry.find("CHF").is_some());
    }
}
