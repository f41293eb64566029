//! Judge error types.

use thiserror::Error;

/// Failures inside a judge invocation.
///
/// None of these escape the public validate operation; the client converts
/// them into score-less verdicts and the circuit breaker counts them.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// The provider call failed outright.
    #[error("judge transport failed: {0}")]
    Transport(String),

    /// The provider did not answer within the abort timeout.
    #[error("judge call exceeded the {timeout_ms}ms abort timeout")]
    Timeout { timeout_ms: u64 },

    /// The provider answered, but not with a usable `{"score": n}` verdict.
    #[error("judge reply had no usable score: {reply}")]
    MalformedReply { reply: String },
}
