//! # Configured Parser
//!
//! A registry built from [`MonetaConfig`] plus the configured fallback
//! currency.
//!
//! ## Fallback
//! ```text
//!   parse("12.50", None)
//!        │
//!        ▼
//!   registry.parse ── Ok ─────────────────────────────► DecodedAmount
//!        │
//!        └─ UnknownCurrency ── default_code set? ── yes ─► parse_as(default)
//!                                       │
//!                                       no ──────────────► UnknownCurrency
//! ```
//!
//! The fallback only applies when the caller gave no pattern. An explicit
//! pattern names its own code, so a miss there is a real error.

use std::sync::Arc;

use moneta_core::{CurrencyRegistry, DecodedAmount, ParseError, ParseResult};
use tracing::debug;

use crate::config::MonetaConfig;
use crate::error::ConfigResult;

/// Registry plus dispatch defaults, ready to decode.
#[derive(Debug, Clone)]
pub struct MonetaParser {
    registry: Arc<CurrencyRegistry>,
    default_code: Option<String>,
}

impl MonetaParser {
    /// Wraps an existing registry.
    pub fn new(registry: Arc<CurrencyRegistry>, default_code: Option<String>) -> Self {
        MonetaParser {
            registry,
            default_code,
        }
    }

    /// Validates `config` and builds a parser from it.
    ///
    /// ## Example
    /// ```rust
    /// use moneta_config::{MonetaConfig, MonetaParser};
    /// use moneta_core::CurrencyDescriptor;
    ///
    /// let mut config = MonetaConfig::new();
    /// config.currencies.push(CurrencyDescriptor::new("USD", "$", '.', ',', 2, "S0.00").unwrap());
    /// config.parser.default_code = Some("USD".into());
    ///
    /// let parser = MonetaParser::from_config(&config).unwrap();
    /// assert_eq!(parser.parse("$12.50", None).unwrap().minor_units(), 1250);
    /// ```
    pub fn from_config(config: &MonetaConfig) -> ConfigResult<Self> {
        let registry = config.build_registry()?;
        Ok(Self::new(
            Arc::new(registry),
            config.parser.default_code.clone(),
        ))
    }

    /// The shared registry, for registering more currencies at runtime.
    pub fn registry(&self) -> &Arc<CurrencyRegistry> {
        &self.registry
    }

    pub fn default_code(&self) -> Option<&str> {
        self.default_code.as_deref()
    }

    /// Decodes `value`, falling back to the default currency when no
    /// pattern was given and no registered code occurs in the input.
    pub fn parse(&self, value: &str, pattern: Option<&str>) -> ParseResult<DecodedAmount> {
        match (self.registry.parse(value, pattern), pattern, &self.default_code) {
            (Err(ParseError::UnknownCurrency(_)), None, Some(code)) => {
                debug!(code = %code, "No currency code in input, using default");
                self.registry.parse_as(code, value, None)
            }
            (result, _, _) => result,
        }
    }

    /// Decodes `value` as a known currency.
    pub fn parse_as(
        &self,
        code: &str,
        value: &str,
        pattern: Option<&str>,
    ) -> ParseResult<DecodedAmount> {
        self.registry.parse_as(code, value, pattern)
    }
}
