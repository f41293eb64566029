//! Veritrace library crate (used by host services and integration tests).
//!
//! # Public API Surface
//!
//! This crate exposes the full validation pipeline plus its building blocks,
//! so hosts can run the whole thing through [`ValidationEngine`] or compose
//! the pieces themselves. The exports are organized by module:
//!
//! ## Core Types (Stable)
//! - [`EngineConfig`], [`ConfigError`] - Environment-backed configuration
//! - [`ValidationRequest`], [`Feature`], [`Assumption`] - Boundary data model
//! - [`ValidationEngine`], [`ValidationOutcome`] - End-to-end pipeline
//!
//! ## Tracing & Scoring
//! - [`TfIdfIndex`], [`cosine_similarity`] - Lexical similarity
//! - [`TraceStatus`], [`classify_lexical`], [`classify_judge`] - Threshold bands
//! - [`DriftDetector`], [`ValidationLogic`] - Per-request drift analysis
//! - [`ConfidenceScorer`], [`ConfidenceBreakdown`] - Weighted confidence recompute
//!
//! ## Judge Infrastructure
//! - [`JudgeClient`], [`JudgeVerdict`] - Resilient LLM fallback
//! - [`CircuitBreaker`], [`VerdictCache`] - Failure containment and reuse
//! - [`GenaiTransport`], [`JudgeTransport`] - Provider plumbing
//!
//! ## Utilities
//! - [`normalize`], [`tokenize`] - Text preparation
//! - [`verdict_key`] - Judge cache keying
//! - [`AuditSink`], [`MetricsSink`] - Observation hooks
//!
//! ## Constants
//! Threshold defaults and identifier strings are exported for consistency
//! across hosts. Prefer [`EngineConfig`] for runtime tuning.
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod classify;
pub mod confidence;
pub mod config;
pub mod consistency;
pub mod constants;
pub mod drift;
pub mod engine;
pub mod hashing;
pub mod judge;
pub mod model;
pub mod sink;
pub mod text;
pub mod tfidf;

pub use classify::{TraceStatus, classify_judge, classify_lexical};
pub use confidence::{ConfidenceBreakdown, ConfidenceScorer, FactorScore};
pub use config::{ConfigError, EngineConfig};
pub use consistency::{ConsistencyDiagnostic, DRIFT_SPEC_PARITY, enforce};
pub use constants::{
    CONFIDENCE_FORMULA_VERSION, DEFAULT_LLM_ASSUMPTION, DEFAULT_LLM_TRACEABLE,
    DEFAULT_TFIDF_SPECULATIVE, DEFAULT_TFIDF_TRACEABLE, ENGINE_VERSION, EXPECTED_NFR_CATEGORIES,
    SIMILARITY_ENGINE, SOURCE_JUDGE_PREFIX, SOURCE_TFIDF,
};
pub use drift::{ConsistencyCheck, DriftDetector, DriftReport, ValidationLogic};
pub use engine::{ValidationEngine, ValidationOutcome};
pub use hashing::verdict_key;
#[cfg(any(test, feature = "mock"))]
pub use judge::{MockJudgeTransport, MockReply};
pub use judge::{
    BreakerSnapshot, CircuitBreaker, GenaiTransport, JudgeClient, JudgeError, JudgeTransport,
    JudgeVerdict, VerdictCache,
};
pub use model::{
    Assumption, Feature, ImpactValue, IngestError, NonFunctionalRequirement, ValidationRequest,
};
pub use sink::{
    AuditEntry, AuditSink, MemoryAuditSink, MetricsSink, NoopAuditSink, NoopMetricsSink,
    WindowedMetrics,
};
pub use text::{normalize, tokenize};
pub use tfidf::{TfIdfIndex, cosine_similarity};
