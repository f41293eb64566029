//! Gray-zone escalation to an external LLM judge.
//!
//! The lexical classifier hands ambiguous features to [`JudgeClient`],
//! which wraps a [`JudgeTransport`] in the three resilience layers the
//! validation path needs: a [`VerdictCache`] keyed by input digest, a
//! [`CircuitBreaker`] that fails fast after repeated transport failures,
//! and a hard abort timeout on every attempt. A judge call never retries
//! and never errors out of the validation operation; when it cannot
//! produce a score the caller keeps the lexical verdict.

pub mod breaker;
pub mod cache;
pub mod client;
pub mod error;
pub mod transport;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use breaker::{BreakerSnapshot, CircuitBreaker};
pub use cache::VerdictCache;
pub use client::{JudgeClient, JudgeVerdict};
pub use error::JudgeError;
pub use transport::{GenaiTransport, JudgeTransport};

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockJudgeTransport, MockReply};
