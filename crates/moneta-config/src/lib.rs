//! # moneta-config: Currency Tables for Moneta
//!
//! Loads currency descriptors from TOML and the environment, validates them,
//! and hands out a ready [`MonetaParser`].
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   currencies.toml ─► MonetaConfig::load ─► validate ─► build_registry  │
//! │                            ▲                                │           │
//! │   MONETA_DEFAULT_CODE ─────┘                                ▼           │
//! │                                              MonetaParser::parse        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - TOML config file, env overrides, validation
//! - [`parser`] - Registry plus default-currency fallback
//! - [`error`] - Config error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use moneta_config::{MonetaConfig, MonetaParser};
//!
//! let config = MonetaConfig::load(None)?;
//! let parser = MonetaParser::from_config(&config)?;
//!
//! let amount = parser.parse("$USD1,234.56", None)?;
//! println!("{}", amount);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod parser;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{MonetaConfig, ParserSettings};
pub use error::{ConfigError, ConfigResult};
pub use parser::MonetaParser;
