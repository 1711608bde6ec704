//! Leaf value formatting.

use crate::config::{BooleanTokens, EncoderConfig};
use crate::value::Scalar;

/// Converts scalars into leaf element text.
///
/// Floats get a fixed number of fractional digits with a `.` separator and no
/// grouping. Booleans become the configured yes/no tokens. Strings and
/// integers pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueFormatter {
    tokens: BooleanTokens,
    precision: usize,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::from_config(&EncoderConfig::default())
    }
}

impl ValueFormatter {
    pub fn new(tokens: BooleanTokens, precision: usize) -> Self {
        Self { tokens, precision }
    }

    pub fn from_config(config: &EncoderConfig) -> Self {
        Self::new(config.boolean_tokens.clone(), config.float_precision)
    }

    pub fn format(&self, value: Scalar<'_>) -> String {
        match value {
            Scalar::Float(f) => format!("{:.*}", self.precision, f),
            Scalar::Bool(b) => self.tokens.token(b).to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::String(s) => s.to_string(),
        }
    }
}
