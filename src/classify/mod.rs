//! Threshold classification of similarity scores.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// Traceability verdict for a single feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceStatus {
    /// Textually supported by the user input.
    Traceable,
    /// Plausible but unverified; the gray zone eligible for judge fallback.
    Assumption,
    /// No meaningful support in the user input.
    Speculative,
}

impl TraceStatus {
    /// Wire value, matching the serde representation.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Traceable => "traceable",
            Self::Assumption => "assumption",
            Self::Speculative => "speculative",
        }
    }

    /// Whether this verdict is eligible for judge escalation.
    #[inline]
    pub fn is_gray_zone(&self) -> bool {
        matches!(self, Self::Assumption)
    }
}

impl std::fmt::Display for TraceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a lexical similarity score onto a trace status.
///
/// `score >= tfidf_traceable` is traceable, `score <= tfidf_speculative` is
/// speculative, anything between is an assumption. Total over all finite
/// scores; both boundary values resolve away from the gray zone.
#[inline]
pub fn classify_lexical(score: f64, config: &EngineConfig) -> TraceStatus {
    if score >= config.tfidf_traceable {
        TraceStatus::Traceable
    } else if score <= config.tfidf_speculative {
        TraceStatus::Speculative
    } else {
        TraceStatus::Assumption
    }
}

/// Maps a judge score onto a trace status.
///
/// The judge band reads top-down: `>= llm_traceable` is traceable,
/// `>= llm_assumption` stays an assumption, anything lower is speculative.
#[inline]
pub fn classify_judge(score: f64, config: &EngineConfig) -> TraceStatus {
    if score >= config.llm_traceable {
        TraceStatus::Traceable
    } else if score >= config.llm_assumption {
        TraceStatus::Assumption
    } else {
        TraceStatus::Speculative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_boundaries() {
        let config = EngineConfig::default();

        assert_eq!(classify_lexical(1.0, &config), TraceStatus::Traceable);
        assert_eq!(classify_lexical(0.70, &config), TraceStatus::Traceable);
        assert_eq!(classify_lexical(0.69, &config), TraceStatus::Assumption);
        assert_eq!(classify_lexical(0.26, &config), TraceStatus::Assumption);
        assert_eq!(classify_lexical(0.25, &config), TraceStatus::Speculative);
        assert_eq!(classify_lexical(0.0, &config), TraceStatus::Speculative);
    }

    #[test]
    fn test_judge_boundaries() {
        let config = EngineConfig::default();

        assert_eq!(classify_judge(1.0, &config), TraceStatus::Traceable);
        assert_eq!(classify_judge(0.60, &config), TraceStatus::Traceable);
        assert_eq!(classify_judge(0.59, &config), TraceStatus::Assumption);
        assert_eq!(classify_judge(0.40, &config), TraceStatus::Assumption);
        assert_eq!(classify_judge(0.39, &config), TraceStatus::Speculative);
        assert_eq!(classify_judge(0.0, &config), TraceStatus::Speculative);
    }

    #[test]
    fn test_classification_is_total_over_unit_interval() {
        let config = EngineConfig::default();

        for i in 0..=1000 {
            let score = i as f64 / 1000.0;
            // Both classifiers must land on one of the three variants.
            let _ = classify_lexical(score, &config).as_str();
            let _ = classify_judge(score, &config).as_str();
        }
    }

    #[test]
    fn test_custom_thresholds_respected() {
        let config = EngineConfig {
            tfidf_traceable: 0.9,
            tfidf_speculative: 0.1,
            ..Default::default()
        };

        assert_eq!(classify_lexical(0.85, &config), TraceStatus::Assumption);
        assert_eq!(classify_lexical(0.05, &config), TraceStatus::Speculative);
    }

    #[test]
    fn test_gray_zone_predicate() {
        assert!(TraceStatus::Assumption.is_gray_zone());
        assert!(!TraceStatus::Traceable.is_gray_zone());
        assert!(!TraceStatus::Speculative.is_gray_zone());
    }

    #[test]
    fn test_wire_representation() {
        assert_eq!(TraceStatus::Traceable.to_string(), "traceable");
        assert_eq!(
            serde_json::to_string(&TraceStatus::Speculative).unwrap(),
            "\"speculative\""
        );
        assert_eq!(
            serde_json::from_str::<TraceStatus>("\"assumption\"").unwrap(),
            TraceStatus::Assumption
        );
    }
}
