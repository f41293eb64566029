//! The judge client: breaker gate, verdict cache, and abort timeout wrapped
//! around a single transport attempt.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use super::breaker::{BreakerSnapshot, CircuitBreaker};
use super::cache::VerdictCache;
use super::error::JudgeError;
use super::transport::JudgeTransport;
use crate::config::EngineConfig;
use crate::constants::JUDGE_SYSTEM_PROMPT;

/// Outcome of one judge invocation.
///
/// `score` is `None` when no verdict was obtainable; `source` names where
/// the result came from: [`JudgeVerdict::SOURCE_CIRCUIT_BREAKER`],
/// [`JudgeVerdict::SOURCE_CACHE`], [`JudgeVerdict::SOURCE_ERROR`], or the
/// transport's provider label on a fresh verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeVerdict {
    pub score: Option<f64>,
    pub source: String,
}

impl JudgeVerdict {
    pub const SOURCE_CIRCUIT_BREAKER: &'static str = "circuit-breaker";
    pub const SOURCE_CACHE: &'static str = "cache";
    pub const SOURCE_ERROR: &'static str = "error";

    fn skipped() -> Self {
        Self {
            score: None,
            source: Self::SOURCE_CIRCUIT_BREAKER.to_string(),
        }
    }

    fn cached(score: f64) -> Self {
        Self {
            score: Some(score),
            source: Self::SOURCE_CACHE.to_string(),
        }
    }

    fn scored(score: f64, provider: &str) -> Self {
        Self {
            score: Some(score),
            source: provider.to_string(),
        }
    }

    fn failed() -> Self {
        Self {
            score: None,
            source: Self::SOURCE_ERROR.to_string(),
        }
    }

    /// True when the verdict carries a score the caller can act on.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.score.is_some()
    }
}

/// Async judge over an arbitrary [`JudgeTransport`].
///
/// Every invocation runs the same sequence: breaker gate, cache probe, one
/// timed transport attempt. There are no retries inside a call; on any
/// failure the caller keeps its lexical verdict and moves on.
pub struct JudgeClient {
    transport: Arc<dyn JudgeTransport>,
    cache: VerdictCache,
    breaker: CircuitBreaker,
    abort_timeout: Duration,
}

impl JudgeClient {
    pub fn new(config: &EngineConfig, transport: Arc<dyn JudgeTransport>) -> Self {
        Self {
            transport,
            cache: VerdictCache::with_capacity(config.judge_cache_capacity),
            breaker: CircuitBreaker::new(config.breaker_threshold, config.breaker_reset),
            abort_timeout: config.abort_timeout,
        }
    }

    /// Judges how well `feature_text` is grounded in `user_input_text`.
    ///
    /// Infallible: every failure mode is folded into a score-less verdict.
    pub async fn judge(&self, feature_text: &str, user_input_text: &str) -> JudgeVerdict {
        // The gate comes before the cache, so an open breaker short-circuits
        // even pairs that were judged earlier.
        if !self.breaker.allow_call() {
            debug!("judge skipped, circuit breaker open");
            return JudgeVerdict::skipped();
        }

        if let Some(score) = self.cache.lookup(feature_text, user_input_text) {
            debug!(score, "judge verdict served from cache");
            return JudgeVerdict::cached(score);
        }

        match self.attempt(feature_text, user_input_text).await {
            Ok(score) => {
                self.cache.insert(feature_text, user_input_text, score);
                debug!(score, provider = self.transport.label(), "judge verdict");
                JudgeVerdict::scored(score, self.transport.label())
            }
            Err(err) => {
                warn!(error = %err, "judge attempt failed");
                self.breaker.record_failure();
                JudgeVerdict::failed()
            }
        }
    }

    async fn attempt(&self, feature_text: &str, user_input_text: &str) -> Result<f64, JudgeError> {
        let user_prompt =
            format!("Feature:\n{feature_text}\n\nOriginal request:\n{user_input_text}");

        let reply = tokio::time::timeout(
            self.abort_timeout,
            self.transport.complete(JUDGE_SYSTEM_PROMPT, &user_prompt),
        )
        .await
        .map_err(|_| JudgeError::Timeout {
            timeout_ms: self.abort_timeout.as_millis() as u64,
        })??;

        parse_score(&reply).ok_or_else(|| JudgeError::MalformedReply {
            reply: truncate_reply(&reply),
        })
    }

    #[inline]
    pub fn breaker_snapshot(&self) -> BreakerSnapshot {
        self.breaker.snapshot()
    }

    #[inline]
    pub fn cache_len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.len()
    }

    #[inline]
    pub fn provider_label(&self) -> &str {
        self.transport.label()
    }
}

/// Extracts a score from a judge reply.
///
/// Accepts a bare JSON body first, then falls back to the outermost braced
/// region of the reply, since providers occasionally wrap the object in
/// prose or code fences. Non-finite scores are rejected; finite scores are
/// clamped into `[0, 1]`.
fn parse_score(reply: &str) -> Option<f64> {
    let trimmed = reply.trim();

    if let Some(score) = score_from_json(trimmed) {
        return Some(score);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    score_from_json(&trimmed[start..=end])
}

fn score_from_json(text: &str) -> Option<f64> {
    let value: Value = serde_json::from_str(text).ok()?;
    let score = value.get("score")?.as_f64()?;
    score.is_finite().then(|| score.clamp(0.0, 1.0))
}

fn truncate_reply(reply: &str) -> String {
    const MAX_CHARS: usize = 120;
    if reply.chars().count() <= MAX_CHARS {
        reply.to_string()
    } else {
        let head: String = reply.chars().take(MAX_CHARS).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_json_body() {
        assert_eq!(parse_score(r#"{"score": 0.85}"#), Some(0.85));
        assert_eq!(parse_score(r#"  {"score": 0}  "#), Some(0.0));
        assert_eq!(parse_score(r#"{"score": 1}"#), Some(1.0));
    }

    #[test]
    fn test_parses_object_embedded_in_prose() {
        let reply = "Here is my assessment:\n```json\n{\"score\": 0.42}\n```\nHope that helps.";
        assert_eq!(parse_score(reply), Some(0.42));
    }

    #[test]
    fn test_clamps_out_of_range_scores() {
        assert_eq!(parse_score(r#"{"score": 1.7}"#), Some(1.0));
        assert_eq!(parse_score(r#"{"score": -0.3}"#), Some(0.0));
    }

    #[test]
    fn test_rejects_replies_without_a_numeric_score() {
        assert_eq!(parse_score("the feature looks traceable to me"), None);
        assert_eq!(parse_score(r#"{"verdict": "traceable"}"#), None);
        assert_eq!(parse_score(r#"{"score": "high"}"#), None);
        assert_eq!(parse_score(r#"{"score": null}"#), None);
        assert_eq!(parse_score(""), None);
    }

    #[test]
    fn test_rejects_unbalanced_braces() {
        assert_eq!(parse_score("score } { 0.5"), None);
    }

    #[test]
    fn test_truncates_long_replies_for_errors() {
        let long = "x".repeat(500);
        let truncated = truncate_reply(&long);
        assert!(truncated.chars().count() <= 123);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_reply("short"), "short");
    }
}
