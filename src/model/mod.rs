//! Boundary data model for validation requests.
//!
//! These types mirror the upstream generator's JSON field names. The shapes
//! upstream emits vary (arrays vs keyed objects vs bare entries), so
//! construction from raw JSON goes through [`ingest`] rather than plain
//! deserialization.

pub mod ingest;


pub use ingest::IngestError;

use serde::{Deserialize, Serialize};

use crate::classify::TraceStatus;
use crate::constants;

/// A machine-generated feature statement under validation.
///
/// The trace fields stay `None` until a validation pass enriches them; each
/// feature is enriched exactly once and never re-entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Source phrases claimed as supporting evidence. May be empty.
    #[serde(default)]
    pub trace_to_input: Vec<String>,

    /// Upstream's own guess. Not authoritative; validation recomputes it.
    #[serde(default)]
    pub is_speculative: bool,

    /// Similarity score in `[0, 1]`, written by the drift detector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_score: Option<f64>,

    /// Verdict derived from `trace_score`, written by the drift detector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_status: Option<TraceStatus>,

    /// Which scorer settled the verdict, e.g. `tfidf` or `llm-judge-groq`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_source: Option<String>,
}

impl Feature {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            trace_to_input: Vec::new(),
            is_speculative: false,
            trace_score: None,
            trace_status: None,
            similarity_source: None,
        }
    }

    /// Text used for similarity scoring: the description, or the name when
    /// the description is blank.
    pub fn trace_text(&self) -> &str {
        if self.description.trim().is_empty() {
            &self.name
        } else {
            &self.description
        }
    }
}

/// `confidence_impact` arrives either as a bare number or as a one-field
/// object wrapping the number. Resolved once at ingestion, consumed through
/// [`ImpactValue::magnitude`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImpactValue {
    Number(f64),
    Object { confidence_impact: f64 },
}

impl ImpactValue {
    /// The signed value as supplied upstream.
    #[inline]
    pub fn value(&self) -> f64 {
        match self {
            Self::Number(n) | Self::Object { confidence_impact: n } => *n,
        }
    }

    /// Absolute contribution to the assumption penalty.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.value().abs()
    }
}

/// A declared or synthesized assumption. Read-only to the scoring core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumption {
    pub assumption: String,

    #[serde(default)]
    pub reason: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_impact: Option<ImpactValue>,
}

impl Assumption {
    pub fn new(assumption: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            assumption: assumption.into(),
            reason: reason.into(),
            confidence_impact: None,
        }
    }

    /// Penalty magnitude this assumption contributes; entries without an
    /// explicit impact cost the default magnitude.
    pub fn impact_magnitude(&self) -> f64 {
        self.confidence_impact
            .as_ref()
            .map(ImpactValue::magnitude)
            .unwrap_or(constants::DEFAULT_ASSUMPTION_IMPACT)
    }
}

/// A non-functional requirement entry; only `category` matters for
/// completeness scoring, extra upstream fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonFunctionalRequirement {
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NonFunctionalRequirement {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            description: None,
        }
    }
}

/// Everything one validation pass consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// The original free-text user intent. The reference document for tracing.
    pub user_input_text: String,

    #[serde(default)]
    pub core_functional_components: Vec<Feature>,

    #[serde(default)]
    pub assumptions_made: Vec<Assumption>,

    #[serde(default)]
    pub non_functional_requirements: Vec<NonFunctionalRequirement>,

    /// Externally supplied clarity score for the raw input, 0-100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_clarity: Option<f64>,

    /// Externally supplied coherence baseline, 0-100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_coherence: Option<f64>,
}

impl ValidationRequest {
    pub fn new(user_input_text: impl Into<String>) -> Self {
        Self {
            user_input_text: user_input_text.into(),
            ..Default::default()
        }
    }
}
