//! Shared fixtures for integration tests.

// Each test binary compiles this module separately and uses a subset of it.
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use veritrace::{
    Assumption, EngineConfig, Feature, ImpactValue, JudgeTransport, MockJudgeTransport, MockReply,
    NonFunctionalRequirement, ValidationEngine, ValidationRequest,
};

/// Routes engine logs through the test harness, honoring `RUST_LOG`.
///
/// Safe to call from every test; only the first call in a binary installs
/// the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// User intent every fixture request traces against.
pub const USER_INPUT: &str = "Users can export monthly sales reports and filter them by region";

/// Feature text with enough overlap to land between the lexical thresholds.
pub const GRAY_FEATURE: &str = "Users can export monthly sales invoices";

/// Feature text sharing no vocabulary with [`USER_INPUT`].
pub const UNRELATED_FEATURE: &str = "Immutable blockchain ledger anchors every transaction";

/// A realistic upstream payload: a supported feature, a paraphrased one, an
/// invented one, one declared assumption, and partial non-functional
/// coverage.
pub fn sales_payload() -> Value {
    json!({
        "user_input_text": USER_INPUT,
        "core_functional_components": [
            {
                "name": "Monthly report export",
                "description": "Users can export monthly sales reports"
            },
            {
                "name": "Region filter",
                "description": "Filter reports by region"
            },
            {
                "name": "Blockchain audit trail",
                "description": UNRELATED_FEATURE
            }
        ],
        "assumptions_made": [
            {
                "assumption": "Reports are generated as PDF",
                "reason": "no output format specified",
                "confidence_impact": -3.0
            }
        ],
        "non_functional_requirements": [
            {
                "category": "Security",
                "description": "Row-level access control on report data"
            },
            {
                "category": "Performance"
            }
        ],
        "input_clarity": 85.0,
        "logical_coherence": 90.0
    })
}

/// Builder for typed requests. Unset fields take the same defaults the
/// ingestion path produces: [`USER_INPUT`] as the intent, empty lists,
/// no externally supplied quality scores.
#[derive(Default)]
pub struct RequestBuilder {
    user_input: Option<String>,
    features: Vec<Feature>,
    assumptions: Vec<Assumption>,
    requirements: Vec<NonFunctionalRequirement>,
    input_clarity: Option<f64>,
    logical_coherence: Option<f64>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_input(mut self, text: &str) -> Self {
        self.user_input = Some(text.to_string());
        self
    }

    pub fn feature(mut self, name: &str, description: &str) -> Self {
        self.features.push(Feature::new(name, description));
        self
    }

    pub fn assumption(mut self, text: &str, reason: &str) -> Self {
        self.assumptions.push(Assumption::new(text, reason));
        self
    }

    pub fn assumption_with_impact(mut self, text: &str, reason: &str, impact: f64) -> Self {
        let mut assumption = Assumption::new(text, reason);
        assumption.confidence_impact = Some(ImpactValue::Number(impact));
        self.assumptions.push(assumption);
        self
    }

    pub fn nfr(mut self, category: &str) -> Self {
        self.requirements.push(NonFunctionalRequirement::new(category));
        self
    }

    pub fn input_clarity(mut self, score: f64) -> Self {
        self.input_clarity = Some(score);
        self
    }

    pub fn logical_coherence(mut self, score: f64) -> Self {
        self.logical_coherence = Some(score);
        self
    }

    pub fn build(self) -> ValidationRequest {
        ValidationRequest {
            user_input_text: self.user_input.unwrap_or_else(|| USER_INPUT.to_string()),
            core_functional_components: self.features,
            assumptions_made: self.assumptions,
            non_functional_requirements: self.requirements,
            input_clarity: self.input_clarity,
            logical_coherence: self.logical_coherence,
        }
    }
}

/// A request over [`USER_INPUT`] with the given `(name, description)` features.
pub fn typed_request(features: &[(&str, &str)]) -> ValidationRequest {
    ValidationRequest {
        user_input_text: USER_INPUT.to_string(),
        core_functional_components: features
            .iter()
            .map(|(name, description)| Feature::new(*name, *description))
            .collect(),
        ..Default::default()
    }
}

/// Engine with the judge disabled; verdicts come from lexical scoring alone.
pub fn lexical_engine() -> ValidationEngine {
    init_tracing();
    let config = EngineConfig {
        judge_enabled: false,
        ..Default::default()
    };
    ValidationEngine::with_transport(config, Arc::new(MockJudgeTransport::new()))
}

/// Engine over a scripted mock judge, returned alongside the transport so
/// tests can count calls.
pub fn judged_engine(replies: Vec<MockReply>) -> (Arc<MockJudgeTransport>, ValidationEngine) {
    init_tracing();
    let transport = Arc::new(MockJudgeTransport::scripted(replies));
    let engine = ValidationEngine::with_transport(
        EngineConfig::default(),
        Arc::clone(&transport) as Arc<dyn JudgeTransport>,
    );
    (transport, engine)
}
