//! The validation engine facade.
//!
//! Ties the pipeline together for one request: drift analysis over the
//! features, confidence recompute, the parity check, then sink
//! notifications. Everything an engine shares across requests (judge cache,
//! circuit breaker, sinks) lives on the instance, so isolated engines never
//! interfere with each other.


use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::config::{ConfigError, EngineConfig};
use crate::confidence::{ConfidenceBreakdown, ConfidenceScorer};
use crate::consistency::{self, ConsistencyDiagnostic};
use crate::drift::{DriftDetector, ValidationLogic};
use crate::judge::{BreakerSnapshot, GenaiTransport, JudgeClient, JudgeTransport};
use crate::model::ValidationRequest;
use crate::sink::{AuditEntry, AuditSink, MetricsSink, NoopAuditSink, NoopMetricsSink};

/// The engine's single external artifact for one validated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub validation_logic: ValidationLogic,
    pub confidence_breakdown: ConfidenceBreakdown,
    /// `None` unless the drift parity invariant was violated.
    pub inconsistencies_found: Option<ConsistencyDiagnostic>,
}

impl ValidationOutcome {
    /// Whether the recomputed score clears the given floor.
    #[inline]
    pub fn meets_floor(&self, floor: f64) -> bool {
        self.confidence_breakdown.final_score >= floor
    }

    /// The usual accept/reject signal: clears the configured floor and the
    /// parity check found nothing.
    pub fn is_acceptable(&self, config: &EngineConfig) -> bool {
        self.meets_floor(config.confidence_min) && self.inconsistencies_found.is_none()
    }

    /// The outcome as a JSON value, with `inconsistencies_found` serialized
    /// as `null` when absent.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Hybrid traceability and confidence scoring engine.
pub struct ValidationEngine {
    config: EngineConfig,
    judge: JudgeClient,
    audit: Arc<dyn AuditSink>,
    metrics: Arc<dyn MetricsSink>,
}

impl ValidationEngine {
    /// Engine with the production judge transport and no-op sinks.
    pub fn new(config: EngineConfig) -> Self {
        let transport: Arc<dyn JudgeTransport> =
            Arc::new(GenaiTransport::new(config.judge_model.clone()));
        Self::with_transport(config, transport)
    }

    /// Engine over a caller-supplied judge transport.
    pub fn with_transport(config: EngineConfig, transport: Arc<dyn JudgeTransport>) -> Self {
        let judge = JudgeClient::new(&config, transport);
        Self {
            config,
            judge,
            audit: Arc::new(NoopAuditSink),
            metrics: Arc::new(NoopMetricsSink),
        }
    }

    /// Replaces both sinks.
    pub fn with_sinks(mut self, audit: Arc<dyn AuditSink>, metrics: Arc<dyn MetricsSink>) -> Self {
        self.audit = audit;
        self.metrics = metrics;
        self
    }

    /// Engine from `VERITRACE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = EngineConfig::from_env()?;
        config.validate()?;
        Ok(Self::new(config))
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validates one request end to end.
    ///
    /// Infallible: judge trouble degrades to the lexical verdicts and
    /// malformed entries were normalized at ingestion, so every request
    /// yields an outcome. Features are enriched in place as a side effect.
    pub async fn validate(&self, request: &mut ValidationRequest) -> ValidationOutcome {
        let started = Instant::now();

        let report = DriftDetector::new(&self.config, &self.judge)
            .analyze(request)
            .await;
        let breakdown = ConfidenceScorer::new(&self.config).recompute(
            request,
            &report.validation_logic,
            &report.synthesized_assumptions,
        );
        let inconsistencies = consistency::enforce(&report.validation_logic);

        let duration_ms = started.elapsed().as_millis() as u64;
        self.metrics.record_latency(duration_ms);
        self.metrics.record_confidence(breakdown.final_score);
        self.audit.record(AuditEntry {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            feature_count: request.core_functional_components.len(),
            speculative_count: report.validation_logic.speculative_features_flagged.len(),
            assumption_count: report.validation_logic.assumption_count,
            llm_judge_calls: report.validation_logic.llm_judge_calls,
            internal_consistency_check: report.validation_logic.internal_consistency_check,
            final_score: breakdown.final_score,
            duration_ms,
        });

        info!(
            final_score = breakdown.final_score,
            domain_consistency = report.validation_logic.domain_consistency_computed,
            judge_calls = report.validation_logic.llm_judge_calls,
            duration_ms,
            "validation complete"
        );

        ValidationOutcome {
            validation_logic: report.validation_logic,
            confidence_breakdown: breakdown,
            inconsistencies_found: inconsistencies,
        }
    }

    /// Current judge circuit breaker state, for diagnostics.
    #[inline]
    pub fn breaker_snapshot(&self) -> BreakerSnapshot {
        self.judge.breaker_snapshot()
    }

    /// Approximate verdict cache population, for diagnostics.
    #[inline]
    pub fn judge_cache_len(&self) -> u64 {
        self.judge.cache_len()
    }
}
