//! Domain drift detection over a generated feature set.
//!
//! The detector walks the features of one request in order, scores each
//! against the original user input with the TF-IDF index, and escalates
//! gray-zone verdicts to the judge while a per-request call budget lasts.
//! Features are enriched in place; the aggregate statistics come back as a
//! [`DriftReport`].


use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{TraceStatus, classify_judge, classify_lexical};
use crate::config::EngineConfig;
use crate::constants::{
    DEFAULT_ASSUMPTION_IMPACT, ENGINE_VERSION, SIMILARITY_ENGINE, SOURCE_JUDGE_PREFIX,
    SOURCE_TFIDF,
};
use crate::judge::JudgeClient;
use crate::model::{Assumption, ImpactValue, ValidationRequest};
use crate::tfidf::TfIdfIndex;

/// Outcome of the drift-parity bookkeeping for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsistencyCheck {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "PARTIAL")]
    Partial,
}

impl ConsistencyCheck {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Partial => "PARTIAL",
        }
    }

    #[inline]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for ConsistencyCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate drift statistics, immutable once produced.
///
/// Invariant: `domain_drift_instances` and `speculative_features_flagged`
/// always have equal length; both are appended together in the same loop
/// iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationLogic {
    pub domain_drift_instances: Vec<String>,
    pub speculative_features_flagged: Vec<String>,
    pub assumption_count: usize,
    pub internal_consistency_check: ConsistencyCheck,
    /// Share of traceable features, 0-100, two decimals.
    pub domain_consistency_computed: f64,
    pub similarity_engine: String,
    pub engine_version: String,
    pub llm_judge_calls: u32,
}

/// Everything a drift pass hands back to the caller, beyond the in-place
/// feature mutation.
#[derive(Debug, Clone)]
pub struct DriftReport {
    pub validation_logic: ValidationLogic,
    /// Assumption records synthesized for gray-zone features. The scorer
    /// counts these alongside the upstream-declared assumptions.
    pub synthesized_assumptions: Vec<Assumption>,
}

/// Per-request drift pass over a feature list.
pub struct DriftDetector<'a> {
    config: &'a EngineConfig,
    judge: &'a JudgeClient,
}

impl<'a> DriftDetector<'a> {
    pub fn new(config: &'a EngineConfig, judge: &'a JudgeClient) -> Self {
        Self { config, judge }
    }

    /// Scores every feature against the request's user input and enriches
    /// it in place with `trace_score`, `trace_status`, and
    /// `similarity_source`.
    ///
    /// Features are processed strictly in order and judge calls are awaited
    /// one at a time, so the judge budget is exact. A judge verdict without
    /// a score leaves the lexical verdict standing; nothing here retries.
    pub async fn analyze(&self, request: &mut ValidationRequest) -> DriftReport {
        let user_input = request.user_input_text.as_str();
        let features = &mut request.core_functional_components;

        let index = {
            let mut documents: Vec<&str> = Vec::with_capacity(features.len() + 1);
            documents.push(user_input);
            documents.extend(features.iter().map(|f| f.trace_text()));
            TfIdfIndex::build(&documents)
        };

        let mut traceable_count = 0usize;
        let mut drift_instances = Vec::new();
        let mut speculative_flagged = Vec::new();
        let mut synthesized = Vec::new();
        let mut judge_calls = 0u32;

        for (idx, feature) in features.iter_mut().enumerate() {
            // Document 0 is the user input itself.
            let mut score = index.similarity_to_reference(idx + 1);
            let mut status = classify_lexical(score, self.config);
            let mut source = SOURCE_TFIDF.to_string();

            if status.is_gray_zone()
                && self.config.judge_enabled
                && judge_calls < self.config.max_judge_calls
            {
                let verdict = self.judge.judge(feature.trace_text(), user_input).await;
                if let Some(judge_score) = verdict.score {
                    judge_calls += 1;
                    score = judge_score;
                    status = classify_judge(judge_score, self.config);
                    source = format!("{SOURCE_JUDGE_PREFIX}-{}", verdict.source);
                    debug!(
                        feature = %feature.name,
                        score,
                        status = status.as_str(),
                        "judge settled gray-zone feature"
                    );
                }
            }

            match status {
                TraceStatus::Traceable => traceable_count += 1,
                TraceStatus::Assumption => {
                    synthesized.push(synthesize_assumption(&feature.name, score, &source));
                }
                TraceStatus::Speculative => {
                    speculative_flagged.push(feature.name.clone());
                    drift_instances.push(format!(
                        "Feature '{}' does not trace to the user input (score {score:.2} via {source})",
                        feature.name
                    ));
                }
            }

            feature.trace_score = Some(score);
            feature.trace_status = Some(status);
            feature.similarity_source = Some(source);
        }

        let total = features.len();
        // No features presented means no evidence of drift.
        let domain_consistency = if total == 0 {
            100.0
        } else {
            round2(traceable_count as f64 / total as f64 * 100.0)
        };
        let internal_consistency_check = if drift_instances.is_empty() {
            ConsistencyCheck::Pass
        } else {
            ConsistencyCheck::Partial
        };

        debug!(
            features = total,
            traceable = traceable_count,
            drift = drift_instances.len(),
            judge_calls,
            domain_consistency,
            "drift analysis complete"
        );

        let assumption_count = request.assumptions_made.len() + synthesized.len();

        DriftReport {
            validation_logic: ValidationLogic {
                domain_drift_instances: drift_instances,
                speculative_features_flagged: speculative_flagged,
                assumption_count,
                internal_consistency_check,
                domain_consistency_computed: domain_consistency,
                similarity_engine: SIMILARITY_ENGINE.to_string(),
                engine_version: ENGINE_VERSION.to_string(),
                llm_judge_calls: judge_calls,
            },
            synthesized_assumptions: synthesized,
        }
    }
}

fn synthesize_assumption(feature_name: &str, score: f64, source: &str) -> Assumption {
    Assumption {
        assumption: format!("'{feature_name}' matches the stated intent"),
        reason: format!("partial similarity {score:.2} via {source}"),
        confidence_impact: Some(ImpactValue::Number(-DEFAULT_ASSUMPTION_IMPACT)),
    }
}

/// Rounds to two decimal places, the precision every reported percentage
/// and score uses.
#[inline]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
