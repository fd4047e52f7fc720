//! # moneta-core: Pattern-Driven Monetary String Decoding
//!
//! Turns strings like `"$USD1,234.56"` into exact integer amounts of minor
//! units, driven by a small pattern grammar and a currency descriptor.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Moneta Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Caller (service, importer, display layer)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ "$USD1,234.56"                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ moneta-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ registry  │─►│  pattern  │─►│  decoder  │─►│  amount   │  │   │
//! │  │   │ dispatch  │  │ compiler  │  │ + cursor  │  │  result   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • EXACT INTEGER AMOUNTS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │           moneta-config (currency tables from TOML/env)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`currency`] - Currency descriptor (code, symbol, separators, precision)
//! - [`cursor`] - Forward-only scan cursor over normalized input
//! - [`pattern`] - Pattern compiler
//! - [`decoder`] - Pattern decoder state machine
//! - [`amount`] - Decoded amount in minor units
//! - [`registry`] - Code → descriptor registry and string dispatch
//! - [`error`] - Parse error types
//! - [`validation`] - Descriptor field checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: decoding is deterministic and does no I/O
//! 2. **Integer Money**: amounts are `i128` minor units, never floats
//! 3. **Explicit Errors**: every failure is a typed [`ParseError`]
//! 4. **No Singletons**: the registry is a value the caller owns
//!
//! ## Example Usage
//!
//! ```rust
//! use moneta_core::{CurrencyDescriptor, CurrencyRegistry};
//!
//! let registry = CurrencyRegistry::new();
//! registry.register(CurrencyDescriptor::new("USD", "$", '.', ',', 2, "S0.00").unwrap());
//! registry.register(CurrencyDescriptor::new("EUR", "€", ',', '.', 2, "0,00 S").unwrap());
//!
//! let usd = registry.parse("$USD1,234.56", None).unwrap();
//! assert_eq!(usd.minor_units(), 123456);
//!
//! let eur = registry.parse("1.234,56 € EUR", None).unwrap();
//! assert_eq!(eur.minor_units(), 123456);
//! assert_eq!(eur.code(), "EUR");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod currency;
pub mod cursor;
pub mod decoder;
pub mod error;
pub mod pattern;
pub mod registry;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use amount::DecodedAmount;
pub use currency::CurrencyDescriptor;
pub use error::{ParseError, ParseResult};
pub use pattern::CompiledPattern;
pub use registry::CurrencyRegistry;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest supported number of minor-unit digits.
///
/// Keeps `10^precision` far inside `i128`, leaving room for the major part.
pub const MAX_PRECISION: u8 = 18;

/// Minimum `C` markers an explicit pattern needs for code extraction.
///
/// A one-letter code cannot be told apart from other letters in the input.
pub const MIN_CODE_MARKERS: usize = 2;
