//! Multi-factor confidence scoring.
//!
//! Folds the drift statistics and the request's externally supplied quality
//! signals into one 0-100 score. The factor weights and both coupling
//! penalties are fixed relative to each other; their magnitudes come from
//! [`EngineConfig`].


use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::constants::{
    CONFIDENCE_FORMULA_VERSION, DC_PENALTY_THRESHOLD, DEFAULT_LOGICAL_COHERENCE,
    EXPECTED_NFR_CATEGORIES, WEIGHT_DOMAIN_CONSISTENCY, WEIGHT_INPUT_CLARITY,
    WEIGHT_LOGICAL_COHERENCE, WEIGHT_REQUIREMENT_COMPLETENESS,
};
use crate::drift::{ConsistencyCheck, ValidationLogic, round2};
use crate::model::{Assumption, NonFunctionalRequirement, ValidationRequest};

/// One scored factor with a human-readable justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    /// Integer 0-100.
    pub score: i64,
    pub justification: String,
}

/// The authoritative confidence result for one validated specification.
///
/// `server_computed` is always true: it marks the score as recomputed by
/// this engine rather than echoed from the untrusted upstream generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub input_clarity: FactorScore,
    pub domain_consistency: FactorScore,
    pub requirement_completeness: FactorScore,
    pub logical_coherence: FactorScore,
    /// Zero or negative.
    pub assumption_penalty: f64,
    pub consistency_penalty_applied: bool,
    pub dc_penalty_applied: bool,
    /// In `[0, 100]`, two decimals.
    pub final_score: f64,
    pub server_computed: bool,
    pub version: String,
}

struct FormulaOutcome {
    final_score: f64,
    coherence: f64,
    penalty: f64,
    consistency_penalty_applied: bool,
    dc_penalty_applied: bool,
}

/// Recomputes confidence breakdowns under one configuration.
pub struct ConfidenceScorer<'a> {
    config: &'a EngineConfig,
}

impl<'a> ConfidenceScorer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Builds the full breakdown for one validated request.
    ///
    /// `synthesized` holds the drift detector's additions; they weigh on
    /// the assumption penalty exactly like upstream-declared assumptions.
    pub fn recompute(
        &self,
        request: &ValidationRequest,
        logic: &ValidationLogic,
        synthesized: &[Assumption],
    ) -> ConfidenceBreakdown {
        let input_clarity = request
            .input_clarity
            .unwrap_or(self.config.input_clarity_default)
            .clamp(0.0, 100.0);
        let domain_consistency = logic.domain_consistency_computed;

        let matched = matched_categories(&request.non_functional_requirements);
        let requirement_completeness =
            matched.len() as f64 / EXPECTED_NFR_CATEGORIES.len() as f64 * 100.0;

        let coherence_base = request
            .logical_coherence
            .unwrap_or(DEFAULT_LOGICAL_COHERENCE)
            .clamp(0.0, 100.0);

        let assumption_count = request.assumptions_made.len() + synthesized.len();
        let impact_sum: f64 = request
            .assumptions_made
            .iter()
            .chain(synthesized)
            .map(Assumption::impact_magnitude)
            .sum();

        let outcome = self.apply_formula(
            input_clarity,
            domain_consistency,
            requirement_completeness,
            coherence_base,
            logic.internal_consistency_check,
            assumption_count,
            impact_sum,
        );

        debug!(
            final_score = outcome.final_score,
            penalty = outcome.penalty,
            assumption_count,
            "confidence recomputed"
        );

        ConfidenceBreakdown {
            input_clarity: FactorScore {
                score: input_clarity.round() as i64,
                justification: if request.input_clarity.is_some() {
                    "clarity score supplied with the request".to_string()
                } else {
                    format!(
                        "no clarity supplied, default {} applied",
                        self.config.input_clarity_default
                    )
                },
            },
            domain_consistency: FactorScore {
                score: domain_consistency.round() as i64,
                justification: format!(
                    "{domain_consistency}% of features trace to the user input"
                ),
            },
            requirement_completeness: FactorScore {
                score: requirement_completeness.round() as i64,
                justification: format!(
                    "{} of {} expected non-functional categories covered",
                    matched.len(),
                    EXPECTED_NFR_CATEGORIES.len()
                ),
            },
            logical_coherence: FactorScore {
                score: outcome.coherence.round() as i64,
                justification: coherence_justification(&outcome),
            },
            assumption_penalty: if outcome.penalty > 0.0 {
                -outcome.penalty
            } else {
                0.0
            },
            consistency_penalty_applied: outcome.consistency_penalty_applied,
            dc_penalty_applied: outcome.dc_penalty_applied,
            final_score: outcome.final_score,
            server_computed: true,
            version: CONFIDENCE_FORMULA_VERSION.to_string(),
        }
    }

    /// The weighted formula itself, over already-resolved factor values.
    fn apply_formula(
        &self,
        input_clarity: f64,
        domain_consistency: f64,
        requirement_completeness: f64,
        coherence_base: f64,
        check: ConsistencyCheck,
        assumption_count: usize,
        impact_sum: f64,
    ) -> FormulaOutcome {
        let mut coherence = coherence_base;

        let consistency_penalty_applied = !check.is_pass();
        if consistency_penalty_applied {
            coherence = (coherence - self.config.consistency_penalty).max(0.0);
        }
        let dc_penalty_applied = domain_consistency < DC_PENALTY_THRESHOLD;
        if dc_penalty_applied {
            coherence = (coherence - self.config.dc_penalty).max(0.0);
        }

        let flat = (assumption_count as f64 * self.config.assumption_unit_cost)
            .min(self.config.penalty_cap);
        let penalty = flat.max(impact_sum).min(self.config.penalty_cap);

        let weighted = WEIGHT_INPUT_CLARITY * input_clarity
            + WEIGHT_DOMAIN_CONSISTENCY * domain_consistency
            + WEIGHT_REQUIREMENT_COMPLETENESS * requirement_completeness
            + WEIGHT_LOGICAL_COHERENCE * coherence;
        let final_score = round2(weighted - penalty).clamp(0.0, 100.0);

        FormulaOutcome {
            final_score,
            coherence,
            penalty,
            consistency_penalty_applied,
            dc_penalty_applied,
        }
    }
}

/// Expected categories covered by at least one supplied entry, matched
/// case-insensitively as substrings.
fn matched_categories(entries: &[NonFunctionalRequirement]) -> Vec<&'static str> {
    let lowered: Vec<String> = entries.iter().map(|e| e.category.to_lowercase()).collect();
    EXPECTED_NFR_CATEGORIES
        .iter()
        .copied()
        .filter(|expected| lowered.iter().any(|have| have.contains(expected)))
        .collect()
}

fn coherence_justification(outcome: &FormulaOutcome) -> String {
    match (
        outcome.consistency_penalty_applied,
        outcome.dc_penalty_applied,
    ) {
        (false, false) => "no coherence penalties applied".to_string(),
        (true, false) => "reduced: internal consistency check did not pass".to_string(),
        (false, true) => "reduced: domain consistency below threshold".to_string(),
        (true, true) => {
            "reduced: failed consistency check and low domain consistency".to_string()
        }
    }
}
