//! Parity check over drift output.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::drift::ValidationLogic;

/// Check id carried by every parity diagnostic.
pub const DRIFT_SPEC_PARITY: &str = "drift_spec_parity";

/// Structured diagnostic for a violated drift invariant. Advisory: callers
/// decide whether a non-null diagnostic rejects the overall result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyDiagnostic {
    pub check: String,
    pub detail: String,
}

/// Re-derives the drift-list parity invariant independently of the
/// detector.
///
/// The detector appends to both lists inside the same loop iteration, so
/// this returns `None` under correct operation; a diagnostic means a
/// regression has decoupled the two collections.
pub fn enforce(logic: &ValidationLogic) -> Option<ConsistencyDiagnostic> {
    let drift = logic.domain_drift_instances.len();
    let flagged = logic.speculative_features_flagged.len();
    if drift == flagged {
        return None;
    }

    error!(drift, flagged, "drift list parity violated");
    Some(ConsistencyDiagnostic {
        check: DRIFT_SPEC_PARITY.to_string(),
        detail: format!("{drift} drift instances vs {flagged} speculative features flagged"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::ConsistencyCheck;

    fn logic(drift: &[&str], flagged: &[&str]) -> ValidationLogic {
        ValidationLogic {
            domain_drift_instances: drift.iter().map(|s| s.to_string()).collect(),
            speculative_features_flagged: flagged.iter().map(|s| s.to_string()).collect(),
            assumption_count: 0,
            internal_consistency_check: ConsistencyCheck::Pass,
            domain_consistency_computed: 100.0,
            similarity_engine: "tfidf-cosine".to_string(),
            engine_version: "0.0.0".to_string(),
            llm_judge_calls: 0,
        }
    }

    #[test]
    fn test_equal_empty_lists_pass() {
        assert_eq!(enforce(&logic(&[], &[])), None);
    }

    #[test]
    fn test_equal_populated_lists_pass() {
        let logic = logic(&["drifted: a", "drifted: b"], &["a", "b"]);
        assert_eq!(enforce(&logic), None);
    }

    #[test]
    fn test_unequal_lists_produce_diagnostic() {
        let logic = logic(&["drifted: a"], &[]);
        let diagnostic = enforce(&logic).unwrap();
        assert_eq!(diagnostic.check, DRIFT_SPEC_PARITY);
        assert!(diagnostic.detail.contains("1 drift instances"));
        assert!(diagnostic.detail.contains("0 speculative"));
    }

    #[test]
    fn test_diagnostic_serializes_check_id() {
        let logic = logic(&[], &["ghost"]);
        let diagnostic = enforce(&logic).unwrap();
        let value = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(value["check"], "drift_spec_parity");
    }
}
