//! Command line configuration for the `yrl` encoder.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `YRL_OFFER_ID` | | Offer identifier; read from the listing when unset |
//! | `YRL_ID_PROPERTY` | internal-id | Property holding the identifier |
//! | `YRL_REPEATED_GROUPS` | metro,room-space | Repeated-group properties |
//! | `YRL_YES_TOKEN` | да | Token for `true` |
//! | `YRL_NO_TOKEN` | нет | Token for `false` |
//! | `YRL_FLOAT_PRECISION` | 2 | Fractional digits for floats |
//! | `YRL_LOG_LEVEL` | warn | Log level |

use std::path::PathBuf;

use clap::Parser;
use yrl_offer::{BooleanTokens, EncoderConfig, IdSource, RepeatedGroups};

/// Renders one listing (a JSON object) as a YRL `<offer>` fragment.
#[derive(Debug, Clone, Parser)]
#[command(name = "yrl")]
#[command(about = "Render a JSON listing as a YRL <offer> XML fragment")]
pub struct CliConfig {
    /// JSON file with the listing properties. Reads stdin when omitted.
    pub input: Option<PathBuf>,

    /// Offer identifier. When omitted it is read from `--id-property`.
    #[arg(long, env = "YRL_OFFER_ID")]
    pub id: Option<String>,

    /// Property holding the identifier when `--id` is not given.
    #[arg(long, env = "YRL_ID_PROPERTY", default_value = "internal-id")]
    pub id_property: String,

    /// Properties rendered as repeated sibling groups.
    #[arg(
        long = "repeated-group",
        env = "YRL_REPEATED_GROUPS",
        value_delimiter = ',',
        default_value = "metro,room-space"
    )]
    pub repeated_groups: Vec<String>,

    /// Token written for `true`.
    #[arg(long, env = "YRL_YES_TOKEN", default_value = "да")]
    pub yes_token: String,

    /// Token written for `false`.
    #[arg(long, env = "YRL_NO_TOKEN", default_value = "нет")]
    pub no_token: String,

    /// Fractional digits written for floats.
    #[arg(long, env = "YRL_FLOAT_PRECISION", default_value = "2")]
    pub precision: usize,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "YRL_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            input: None,
            id: None,
            id_property: "internal-id".to_string(),
            repeated_groups: vec!["metro".to_string(), "room-space".to_string()],
            yes_token: "да".to_string(),
            no_token: "нет".to_string(),
            precision: 2,
            log_level: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Builds the encoder configuration.
    ///
    /// An explicit `--id` always wins; otherwise the identifier property is
    /// required.
    pub fn encoder_config(&self) -> EncoderConfig {
        let id_source = if self.id.is_some() {
            IdSource::Explicit
        } else {
            IdSource::Property(self.id_property.clone())
        };

        EncoderConfig {
            boolean_tokens: BooleanTokens::new(&self.yes_token, &self.no_token),
            float_precision: self.precision,
            id_source,
        }
    }

    pub fn repeated_groups(&self) -> RepeatedGroups {
        self.repeated_groups
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = match self.encoder_config().validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors,
        };

        if matches!(self.id.as_deref(), Some("")) {
            errors.push("Offer id cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
