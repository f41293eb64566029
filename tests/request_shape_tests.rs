//! Upstream payload shape tolerance, exercised through the public API.
//!
//! The generator feeding this engine has emitted list fields as arrays, as
//! keyed objects, and as bare single entries. These tests pin down that all
//! three shapes ingest and flow through a full validation pass.

mod common;

use common::fixtures;
use serde_json::json;
use veritrace::{IngestError, ValidationRequest};

#[test]
fn test_array_shaped_lists_ingest() {
    let request = ValidationRequest::from_value(&fixtures::sales_payload()).unwrap();

    assert_eq!(request.user_input_text, fixtures::USER_INPUT);
    assert_eq!(request.core_functional_components.len(), 3);
    assert_eq!(request.assumptions_made.len(), 1);
    assert_eq!(request.non_functional_requirements.len(), 2);
    assert_eq!(request.input_clarity, Some(85.0));
    assert_eq!(request.logical_coherence, Some(90.0));
}

#[test]
fn test_keyed_object_entries_ingest() {
    let payload = json!({
        "user_input_text": fixtures::USER_INPUT,
        "core_functional_components": {
            "export": {"name": "Report export", "description": fixtures::USER_INPUT},
            "unrelated": {"name": "Star tracker", "description": "galaxy meteor comet"}
        }
    });

    let request = ValidationRequest::from_value(&payload).unwrap();

    let names: Vec<_> = request
        .core_functional_components
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["Report export", "Star tracker"]);
}

#[test]
fn test_bare_single_entries_ingest() {
    let payload = json!({
        "user_input_text": fixtures::USER_INPUT,
        "core_functional_components": {
            "name": "Report export",
            "description": fixtures::USER_INPUT
        },
        "assumptions_made": {
            "assumption": "Only one region per export",
            "reason": "not stated"
        }
    });

    let request = ValidationRequest::from_value(&payload).unwrap();

    assert_eq!(request.core_functional_components.len(), 1);
    assert_eq!(request.assumptions_made.len(), 1);
    assert_eq!(request.assumptions_made[0].reason, "not stated");
}

#[test]
fn test_camel_cased_user_input_key_accepted() {
    let payload = json!({"userInputText": fixtures::USER_INPUT});

    let request = ValidationRequest::from_value(&payload).unwrap();

    assert_eq!(request.user_input_text, fixtures::USER_INPUT);
}

#[test]
fn test_missing_or_blank_user_input_is_rejected() {
    let missing = ValidationRequest::from_value(&json!({"core_functional_components": []}))
        .expect_err("payload without user input should be rejected");
    let blank = ValidationRequest::from_value(&json!({"user_input_text": "   "}));

    assert!(matches!(missing, IngestError::MissingUserInput));
    assert!(matches!(blank, Err(IngestError::MissingUserInput)));
    assert!(missing.to_string().contains("user_input_text"));
}

#[tokio::test]
async fn test_wrapped_confidence_impact_counts_toward_penalty() {
    let payload = json!({
        "user_input_text": fixtures::USER_INPUT,
        "core_functional_components": [
            {"name": "Report export", "description": fixtures::USER_INPUT}
        ],
        "assumptions_made": [
            {
                "assumption": "Exports run nightly",
                "reason": "no schedule given",
                "confidence_impact": -4.0
            },
            {
                "assumption": "Reports cover one region each",
                "reason": "not stated",
                "confidence_impact": {"confidence_impact": -6.0}
            }
        ]
    });
    let mut request = ValidationRequest::from_value(&payload).unwrap();
    let engine = fixtures::lexical_engine();

    let outcome = engine.validate(&mut request).await;

    // Explicit impacts 4 + 6 beat the flat cost of 2 per assumption.
    assert_eq!(outcome.confidence_breakdown.assumption_penalty, -10.0);
    // IC 60, DC 100, RC 0, LC 100, minus the penalty.
    assert_eq!(outcome.confidence_breakdown.final_score, 58.00);
}

#[tokio::test]
async fn test_outcome_json_contract() {
    let engine = fixtures::lexical_engine();
    let mut request = ValidationRequest::from_value(&fixtures::sales_payload()).unwrap();

    let outcome = engine.validate(&mut request).await;
    let value = outcome.to_value();

    let logic = &value["validation_logic"];
    assert_eq!(logic["internal_consistency_check"], "PARTIAL");
    assert_eq!(logic["similarity_engine"], "tfidf-cosine");
    assert_eq!(logic["engine_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(logic["llm_judge_calls"], 0);
    assert_eq!(logic["assumption_count"], 2);

    let breakdown = &value["confidence_breakdown"];
    assert_eq!(breakdown["version"], "hybrid-2");
    assert_eq!(breakdown["server_computed"], true);
    assert_eq!(breakdown["final_score"], 53.5);
    assert_eq!(breakdown["input_clarity"]["score"], 85);
    assert!(breakdown["input_clarity"]["justification"].is_string());

    assert!(value["inconsistencies_found"].is_null());

    // Enriched features serialize their trace verdicts.
    let feature = serde_json::to_value(&request.core_functional_components[0]).unwrap();
    assert_eq!(feature["trace_status"], "traceable");
    assert_eq!(feature["similarity_source"], "tfidf");
    assert!(feature["trace_score"].is_number());
}
