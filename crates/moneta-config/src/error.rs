//! # Config Error Types
//!
//! Error types for loading, validating and saving currency tables.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Config Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │      I/O        │  │   Validation    │  │     Descriptor          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │ ConfigLoadFailed│  │  InvalidConfig  │  │  Descriptor(ParseError) │ │
//! │  │ ConfigSaveFailed│  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use moneta_core::ParseError;
use thiserror::Error;

/// Result type alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything that can go wrong between a TOML file and a registry.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or parsing the config file failed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Writing the config file failed.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// The file parsed but describes an unusable setup.
    #[error("Invalid currency configuration: {0}")]
    InvalidConfig(String),

    /// A configured currency breaks a descriptor rule.
    #[error(transparent)]
    Descriptor(#[from] ParseError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ConfigError {
    /// Returns true if the file system or TOML layer failed, as opposed to
    /// the content being wrong.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigLoadFailed(_) | ConfigError::ConfigSaveFailed(_)
        )
    }

    /// Returns true if the configured content is unusable.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            ConfigError::InvalidConfig(_) | ConfigError::Descriptor(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert!(ConfigError::ConfigLoadFailed("gone".into()).is_io_error());
        assert!(ConfigError::ConfigSaveFailed("read-only".into()).is_io_error());
        assert!(!ConfigError::InvalidConfig("dup".into()).is_io_error());

        assert!(ConfigError::InvalidConfig("dup".into()).is_validation_error());
        assert!(ConfigError::from(ParseError::UnknownCurrency("XYZ".into())).is_validation_error());
    }

    #[test]
    fn test_descriptor_error_is_transparent() {
        let err = ConfigError::from(ParseError::UnknownCurrency("XYZ".into()));
        assert_eq!(
            err.to_string(),
            ParseError::UnknownCurrency("XYZ".into()).to_string()
        );
    }

    #[test]
    fn test_toml_error_converts_to_load_failure() {
        let err: ConfigError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(matches!(err, ConfigError::ConfigLoadFailed(_)));
    }
}
