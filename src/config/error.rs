//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A threshold variable was set but could not be parsed as a float.
    #[error("failed to parse {name}='{value}' as a number: {source}")]
    ThresholdParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// A classification threshold falls outside the unit interval.
    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    /// A threshold pair is ordered the wrong way round.
    #[error("{lower_name} ({lower}) must not reach {upper_name} ({upper})")]
    InvertedBand {
        lower_name: &'static str,
        lower: f64,
        upper_name: &'static str,
        upper: f64,
    },

    /// A duration knob was resolved to zero.
    #[error("{name} must be a positive number of milliseconds")]
    ZeroDuration { name: &'static str },

    /// A penalty or weight knob was resolved to a negative value.
    #[error("{name} must not be negative, got {value}")]
    NegativeValue { name: &'static str, value: f64 },
}
