//! Cross-cutting, shared constants.
//!
//! These are the compiled-in defaults; the runtime-tunable subset is surfaced
//! through [`crate::config::EngineConfig`], which falls back to the values here
//! when the corresponding `VERITRACE_*` variable is unset.
//!
//! # Threshold Invariants
//!
//! The classification thresholds are ordered: `speculative < traceable` for the
//! lexical pair and `assumption <= traceable` for the judge pair. Config
//! validation enforces this at load time so the classifier never sees an
//! inverted band.

/// Lexical similarity at or above this is `traceable`.
pub const DEFAULT_TFIDF_TRACEABLE: f64 = 0.70;

/// Lexical similarity at or below this is `speculative`.
pub const DEFAULT_TFIDF_SPECULATIVE: f64 = 0.25;

/// Judge score at or above this reclassifies to `traceable`.
pub const DEFAULT_LLM_TRACEABLE: f64 = 0.60;

/// Judge score at or above this (but below traceable) stays `assumption`.
pub const DEFAULT_LLM_ASSUMPTION: f64 = 0.40;

/// Per-validation ceiling on judge consultations.
pub const DEFAULT_MAX_JUDGE_CALLS: u32 = 8;

/// Per-call judge abort timeout in milliseconds.
pub const DEFAULT_ABORT_TIMEOUT_MS: u64 = 4_000;

/// Consecutive judge failures before the breaker trips.
pub const DEFAULT_BREAKER_THRESHOLD: u32 = 5;

/// How long a tripped breaker rejects calls before re-attempting, in milliseconds.
pub const DEFAULT_BREAKER_RESET_MS: u64 = 60_000;

/// Maximum entries held by the judge verdict cache.
pub const DEFAULT_JUDGE_CACHE_CAPACITY: u64 = 10_000;

/// Default model id sent to the judge provider.
pub const DEFAULT_JUDGE_MODEL: &str = "llama-3.3-70b-versatile";

/// Factor weights for the confidence formula. They sum to 1.0.
pub const WEIGHT_INPUT_CLARITY: f64 = 0.30;
pub const WEIGHT_DOMAIN_CONSISTENCY: f64 = 0.30;
pub const WEIGHT_REQUIREMENT_COMPLETENESS: f64 = 0.20;
pub const WEIGHT_LOGICAL_COHERENCE: f64 = 0.20;

/// Subtracted from logical coherence when the internal consistency check is not PASS.
pub const DEFAULT_CONSISTENCY_PENALTY: f64 = 10.0;

/// Subtracted from logical coherence when domain consistency falls below
/// [`DC_PENALTY_THRESHOLD`].
pub const DEFAULT_DC_PENALTY: f64 = 5.0;

/// Domain-consistency floor below which the coherence penalty applies.
pub const DC_PENALTY_THRESHOLD: f64 = 75.0;

/// Flat per-assumption cost used when no explicit impacts dominate.
pub const DEFAULT_ASSUMPTION_UNIT_COST: f64 = 2.0;

/// Upper bound on the total assumption penalty.
pub const DEFAULT_PENALTY_CAP: f64 = 20.0;

/// Impact magnitude assigned to assumptions that carry none of their own.
pub const DEFAULT_ASSUMPTION_IMPACT: f64 = 2.0;

/// Input-clarity score assumed when the caller supplies none.
pub const DEFAULT_INPUT_CLARITY: f64 = 60.0;

/// Logical-coherence baseline before coupling penalties.
pub const DEFAULT_LOGICAL_COHERENCE: f64 = 100.0;

/// Final scores below this floor are rejectable by the caller.
pub const DEFAULT_CONFIDENCE_MIN: f64 = 40.0;

/// Non-functional categories a complete specification is expected to cover.
pub const EXPECTED_NFR_CATEGORIES: [&str; 5] = [
    "security",
    "performance",
    "scalability",
    "reliability",
    "usability",
];

/// Identifier of the lexical similarity engine recorded in validation output.
pub const SIMILARITY_ENGINE: &str = "tfidf-cosine";

/// Crate version stamped onto every validation result.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version tag of the confidence formula, bumped whenever weights or
/// penalties change meaning.
pub const CONFIDENCE_FORMULA_VERSION: &str = "hybrid-2";

/// `similarity_source` value for features settled by lexical scoring alone.
pub const SOURCE_TFIDF: &str = "tfidf";

/// Prefix composed with a provider label for judge-settled features,
/// e.g. `llm-judge-groq`.
pub const SOURCE_JUDGE_PREFIX: &str = "llm-judge";

/// System prompt for the judge provider. The reply contract is a bare JSON
/// object so the client can parse it without provider-specific scaffolding.
pub const JUDGE_SYSTEM_PROMPT: &str = "You grade how well a generated feature \
is supported by the original user request. Respond with exactly one JSON \
object of the form {\"score\": N} where N is a number between 0 and 1. \
1 means the feature is directly requested, 0 means it has no support. \
No prose, no markdown.";
