//! Encoder configuration.
//!
//! Holds the feed-specific formatting choices: the yes/no tokens booleans are
//! written as, the number of fractional digits for floats, and where the
//! offer identifier comes from.
//!
//! # Example
//!
//! ```rust
//! use yrl_offer::{BooleanTokens, EncoderConfig, IdSource};
//!
//! let config = EncoderConfig {
//!     boolean_tokens: BooleanTokens::new("yes", "no"),
//!     id_source: IdSource::Explicit,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::xml::utils::INTERNAL_ID_ATTRIBUTE;

/// Default affirmative token of the Russian-language feed.
pub const DEFAULT_YES_TOKEN: &str = "да";

/// Default negative token of the Russian-language feed.
pub const DEFAULT_NO_TOKEN: &str = "нет";

/// Default number of fractional digits for floats.
pub const DEFAULT_FLOAT_PRECISION: usize = 2;

/// Largest accepted float precision.
pub const MAX_FLOAT_PRECISION: usize = 10;

/// The two literal tokens booleans are rendered as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanTokens {
    pub yes: String,
    pub no: String,
}

impl BooleanTokens {
    pub fn new(yes: impl Into<String>, no: impl Into<String>) -> Self {
        Self {
            yes: yes.into(),
            no: no.into(),
        }
    }

    pub fn token(&self, value: bool) -> &str {
        if value { &self.yes } else { &self.no }
    }
}

impl Default for BooleanTokens {
    fn default() -> Self {
        Self::new(DEFAULT_YES_TOKEN, DEFAULT_NO_TOKEN)
    }
}

/// Where the `internal-id` attribute value is taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "key")]
pub enum IdSource {
    /// The identifier supplied alongside the listing.
    Explicit,
    /// A top-level property of the listing, looked up by key.
    Property(String),
    /// The explicit identifier when the listing has one, otherwise the
    /// property under the given key.
    ExplicitOrProperty(String),
}

impl IdSource {
    /// Property key consulted by this strategy, if any.
    pub fn property_key(&self) -> Option<&str> {
        match self {
            IdSource::Explicit => None,
            IdSource::Property(key) | IdSource::ExplicitOrProperty(key) => Some(key),
        }
    }
}

impl Default for IdSource {
    fn default() -> Self {
        IdSource::ExplicitOrProperty(INTERNAL_ID_ATTRIBUTE.to_string())
    }
}

/// Formatting and identifier settings shared by every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Tokens for `true` / `false`.
    pub boolean_tokens: BooleanTokens,

    /// Fractional digits written for floats.
    pub float_precision: usize,

    /// Identifier sourcing strategy.
    pub id_source: IdSource,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            boolean_tokens: BooleanTokens::default(),
            float_precision: DEFAULT_FLOAT_PRECISION,
            id_source: IdSource::default(),
        }
    }
}

impl EncoderConfig {
    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.boolean_tokens.yes.is_empty() {
            errors.push("Affirmative boolean token cannot be empty".to_string());
        }

        if self.boolean_tokens.no.is_empty() {
            errors.push("Negative boolean token cannot be empty".to_string());
        }

        if self.boolean_tokens.yes == self.boolean_tokens.no {
            errors.push("Boolean tokens must differ".to_string());
        }

        if self.float_precision > MAX_FLOAT_PRECISION {
            errors.push(format!(
                "Float precision cannot exceed {}",
                MAX_FLOAT_PRECISION
            ));
        }

        if self.id_source.property_key().is_some_and(str::is_empty) {
            errors.push("Identifier property key cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.boolean_tokens.token(true), "да");
        assert_eq!(config.boolean_tokens.token(false), "нет");
        assert_eq!(config.float_precision, 2);
        assert_eq!(
            config.id_source,
            IdSource::ExplicitOrProperty("internal-id".to_string())
        );
    }

    #[test]
    fn test_validate_valid() {
        assert!(EncoderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = EncoderConfig {
            boolean_tokens: BooleanTokens::new("", ""),
            float_precision: 42,
            id_source: IdSource::Property(String::new()),
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.iter().any(|e| e.contains("precision")));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: EncoderConfig =
            serde_json::from_str(r#"{"boolean_tokens": {"yes": "Y", "no": "N"}}"#).unwrap();
        assert_eq!(config.boolean_tokens, BooleanTokens::new("Y", "N"));
        assert_eq!(config.float_precision, 2);
    }

    #[test]
    fn test_deserialize_property_id_source() {
        let config: EncoderConfig =
            serde_json::from_str(r#"{"id_source": {"kind": "property", "key": "sku"}}"#).unwrap();
        assert_eq!(config.id_source, IdSource::Property("sku".to_string()));
        assert_eq!(config.id_source.property_key(), Some("sku"));
    }

    #[test]
    fn test_deserialize_explicit_id_source() {
        let config: EncoderConfig =
            serde_json::from_str(r#"{"id_source": {"kind": "explicit"}}"#).unwrap();
        assert_eq!(config.id_source, IdSource::Explicit);
    }
}
