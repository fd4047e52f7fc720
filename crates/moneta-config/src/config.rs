//! # Currency Configuration
//!
//! Loads the currency table a process decodes against.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MONETA_DEFAULT_CODE=USD                                            │
//! │                                                                         │
//! │  2. TOML Config File, first of:                                        │
//! │     • the path passed to load()                                        │
//! │     • MONETA_CONFIG=/etc/moneta/currencies.toml                        │
//! │     • ~/.config/moneta/currencies.toml (Linux)                         │
//! │       ~/Library/Application Support/dev.moneta.moneta/... (macOS)      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     no currencies, no default code                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # currencies.toml
//! [parser]
//! default_code = "USD"  # used when the input names no known currency
//!
//! [[currency]]
//! code = "USD"
//! symbol = "$"
//! decimal_separator = "."
//! thousands_separator = ","
//! precision = 2
//! default_pattern = "S0.00"
//!
//! [[currency]]
//! code = "EUR"
//! symbol = "€"
//! decimal_separator = ","
//! thousands_separator = "."
//! precision = 2
//! default_pattern = "0,00 S"
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use moneta_core::{CurrencyDescriptor, CurrencyRegistry};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "MONETA_CONFIG";

/// Environment variable overriding `parser.default_code`.
pub const DEFAULT_CODE_ENV: &str = "MONETA_DEFAULT_CODE";

const CONFIG_FILE_NAME: &str = "currencies.toml";

// =============================================================================
// Parser Settings
// =============================================================================

/// How raw strings are dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserSettings {
    /// Currency assumed when the input contains no registered code and the
    /// caller gave no pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_code: Option<String>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete currency configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetaConfig {
    /// Dispatch settings.
    #[serde(default)]
    pub parser: ParserSettings,

    /// Currency table, in registration order.
    #[serde(default, rename = "currency")]
    pub currencies: Vec<CurrencyDescriptor>,
}

impl MonetaConfig {
    /// Creates an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (currencies.toml)
    /// 3. Environment variables
    ///
    /// A missing file is not an error; the defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::resolve_path(config_path) {
            if path.exists() {
                info!(?path, "Loading currency config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        info!(
            currencies = config.currencies.len(),
            default_code = ?config.parser.default_code,
            "Currency config loaded"
        );
        Ok(config)
    }

    /// Loads configuration, falling back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load currency config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves the configuration as pretty-printed TOML.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = Self::resolve_path(config_path)
            .ok_or_else(|| ConfigError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Currency config saved");
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// ## Rules
    /// - Every currency passes the descriptor checks
    /// - Every default pattern compiles against its own separators
    /// - Codes are unique
    /// - `parser.default_code`, if set, names a configured currency
    pub fn validate(&self) -> ConfigResult<()> {
        let mut seen = HashSet::new();

        for currency in &self.currencies {
            currency.validate()?;
            currency.compile(currency.default_pattern())?;

            if !seen.insert(currency.code()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "currency '{}' is configured more than once",
                    currency.code()
                )));
            }
        }

        if let Some(code) = &self.parser.default_code {
            if !seen.contains(code.as_str()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "default_code '{}' is not a configured currency",
                    code
                )));
            }
        }

        Ok(())
    }

    /// Validates the table and registers every currency in file order.
    pub fn build_registry(&self) -> ConfigResult<CurrencyRegistry> {
        self.validate()?;

        let registry = CurrencyRegistry::new();
        registry.register_all(self.currencies.iter().cloned());
        Ok(registry)
    }

    /// Returns the configured currency with this code.
    pub fn currency(&self, code: &str) -> Option<&CurrencyDescriptor> {
        self.currencies.iter().find(|c| c.code() == code)
    }

    // =========================================================================
    // Environment
    // =========================================================================

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(code) = lookup(DEFAULT_CODE_ENV) {
            let code = code.trim();
            if code.is_empty() {
                debug!("Clearing default currency from environment");
                self.parser.default_code = None;
            } else {
                debug!(code = %code, "Overriding default currency from environment");
                self.parser.default_code = Some(code.to_string());
            }
        }
    }

    /// Explicit path, then `MONETA_CONFIG`, then the platform config dir.
    fn resolve_path(config_path: Option<PathBuf>) -> Option<PathBuf> {
        config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "moneta", "moneta")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
