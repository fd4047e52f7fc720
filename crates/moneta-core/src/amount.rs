//! # Decoded Amount
//!
//! The result of a successful decode: an exact integer number of minor units
//! tagged with the currency it was read against.
//!
//! ## Why Integer Minor Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Parsing "0.10" and "0.20" into f64 and adding them:                    │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    "0.10" → 10, "0.20" → 20, 10 + 20 = 30  ✅                           │
//! │                                                                         │
//! │  Range: i128, so any amount up to ~1.7 × 10^38 minor units is exact.   │
//! │  Larger inputs fail with AmountOverflow instead of wrapping.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use moneta_core::{CurrencyRegistry, CurrencyDescriptor};
//!
//! let registry = CurrencyRegistry::new();
//! registry.register(CurrencyDescriptor::new("USD", "$", '.', ',', 2, "S0.00").unwrap());
//!
//! let amount = registry.parse("$USD-1,234.56", None).unwrap();
//! assert_eq!(amount.minor_units(), -123456);
//! assert_eq!(amount.major_part(), -1234);
//! assert_eq!(amount.minor_part(), 56);
//! assert_eq!(amount.to_string(), "-1234.56 USD");
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::currency::CurrencyDescriptor;

// =============================================================================
// Decoded Amount
// =============================================================================

/// An exact amount in minor units plus the currency it belongs to.
///
/// ## Where It Goes
/// ```text
/// "$USD1,234.56" ──► CurrencyRegistry::parse ──► DecodedAmount
///                                                  │
///                     minor_units: 123456 ◄────────┤
///                     currency:    USD    ◄────────┘
///                                                  │
///                                                  ▼
///                                     display / formatting layer
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DecodedAmount {
    minor_units: i128,
    currency: Arc<CurrencyDescriptor>,
}

impl DecodedAmount {
    pub(crate) fn new(minor_units: i128, currency: Arc<CurrencyDescriptor>) -> Self {
        DecodedAmount {
            minor_units,
            currency,
        }
    }

    /// The amount in minor units (cents for USD).
    #[inline]
    pub fn minor_units(&self) -> i128 {
        self.minor_units
    }

    /// The currency this amount was decoded against.
    #[inline]
    pub fn currency(&self) -> &Arc<CurrencyDescriptor> {
        &self.currency
    }

    /// Shorthand for `currency().code()`.
    #[inline]
    pub fn code(&self) -> &str {
        self.currency.code()
    }

    /// The signed major-unit portion (dollars), truncated toward zero.
    ///
    /// ## Example
    /// ```text
    /// -550 cents → -5
    /// ```
    pub fn major_part(&self) -> i128 {
        self.split().0
    }

    /// The minor-unit portion (always non-negative, below `10^precision`).
    ///
    /// ## Example
    /// ```text
    /// -550 cents → 50
    /// ```
    pub fn minor_part(&self) -> u128 {
        self.split().1
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.minor_units > 0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.minor_units < 0
    }

    fn split(&self) -> (i128, u128) {
        match 10i128.checked_pow(u32::from(self.currency.precision())) {
            Some(scale) => (
                self.minor_units / scale,
                (self.minor_units % scale).unsigned_abs(),
            ),
            // 10^precision exceeds every representable amount
            None => (0, self.minor_units.unsigned_abs()),
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `-1234.56 USD` rendering.
///
/// ## Note
/// This is for logs and debugging. Symbol placement, grouping and locale
/// belong to the formatting layer.
impl fmt::Display for DecodedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let (major, minor) = self.split();
        let precision = usize::from(self.currency.precision());

        if precision == 0 {
            write!(f, "{}{} {}", sign, major.unsigned_abs(), self.code())
        } else {
            write!(
                f,
                "{}{}.{:0width$} {}",
                sign,
                major.unsigned_abs(),
                minor,
                self.code(),
                width = precision
            )
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
