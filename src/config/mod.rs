//! Environment-backed engine configuration.
//!
//! Most settings have defaults. Override with `VERITRACE_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::time::Duration;

use crate::constants;

/// Engine configuration loaded from environment variables.
///
/// Use [`EngineConfig::from_env`] to read `VERITRACE_*` overrides on top of
/// defaults, then [`EngineConfig::validate`] before handing it to an engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Lexical similarity at or above this classifies as traceable. Default: `0.70`.
    pub tfidf_traceable: f64,

    /// Lexical similarity at or below this classifies as speculative. Default: `0.25`.
    pub tfidf_speculative: f64,

    /// Judge score at or above this reclassifies as traceable. Default: `0.60`.
    pub llm_traceable: f64,

    /// Judge score at or above this keeps the assumption verdict. Default: `0.40`.
    pub llm_assumption: f64,

    /// Whether gray-zone features are escalated to the judge at all. Default: `true`.
    pub judge_enabled: bool,

    /// Model id sent to the judge provider. Default: `llama-3.3-70b-versatile`.
    pub judge_model: String,

    /// Per-validation ceiling on judge consultations. Default: `8`.
    pub max_judge_calls: u32,

    /// Per-call judge abort timeout. Default: `4s`.
    pub abort_timeout: Duration,

    /// Consecutive judge failures before the breaker trips. Default: `5`.
    pub breaker_threshold: u32,

    /// How long a tripped breaker rejects calls before re-attempting. Default: `60s`.
    pub breaker_reset: Duration,

    /// Max entries in the judge verdict cache. Default: `10_000`.
    pub judge_cache_capacity: u64,

    /// Coherence deduction when the internal consistency check is not PASS. Default: `10.0`.
    pub consistency_penalty: f64,

    /// Coherence deduction when domain consistency drops below 75. Default: `5.0`.
    pub dc_penalty: f64,

    /// Flat per-assumption cost. Default: `2.0`.
    pub assumption_unit_cost: f64,

    /// Ceiling on the total assumption penalty. Default: `20.0`.
    pub penalty_cap: f64,

    /// Input-clarity score assumed when the caller supplies none. Default: `60.0`.
    pub input_clarity_default: f64,

    /// Floor below which callers should reject the validated result. Default: `40.0`.
    pub confidence_min: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tfidf_traceable: constants::DEFAULT_TFIDF_TRACEABLE,
            tfidf_speculative: constants::DEFAULT_TFIDF_SPECULATIVE,
            llm_traceable: constants::DEFAULT_LLM_TRACEABLE,
            llm_assumption: constants::DEFAULT_LLM_ASSUMPTION,
            judge_enabled: true,
            judge_model: constants::DEFAULT_JUDGE_MODEL.to_string(),
            max_judge_calls: constants::DEFAULT_MAX_JUDGE_CALLS,
            abort_timeout: Duration::from_millis(constants::DEFAULT_ABORT_TIMEOUT_MS),
            breaker_threshold: constants::DEFAULT_BREAKER_THRESHOLD,
            breaker_reset: Duration::from_millis(constants::DEFAULT_BREAKER_RESET_MS),
            judge_cache_capacity: constants::DEFAULT_JUDGE_CACHE_CAPACITY,
            consistency_penalty: constants::DEFAULT_CONSISTENCY_PENALTY,
            dc_penalty: constants::DEFAULT_DC_PENALTY,
            assumption_unit_cost: constants::DEFAULT_ASSUMPTION_UNIT_COST,
            penalty_cap: constants::DEFAULT_PENALTY_CAP,
            input_clarity_default: constants::DEFAULT_INPUT_CLARITY,
            confidence_min: constants::DEFAULT_CONFIDENCE_MIN,
        }
    }
}

impl EngineConfig {
    const ENV_TFIDF_TRACEABLE: &'static str = "VERITRACE_TFIDF_TRACEABLE";
    const ENV_TFIDF_SPECULATIVE: &'static str = "VERITRACE_TFIDF_SPECULATIVE";
    const ENV_LLM_TRACEABLE: &'static str = "VERITRACE_LLM_TRACEABLE";
    const ENV_LLM_ASSUMPTION: &'static str = "VERITRACE_LLM_ASSUMPTION";
    const ENV_JUDGE_ENABLED: &'static str = "VERITRACE_JUDGE_ENABLED";
    const ENV_JUDGE_MODEL: &'static str = "VERITRACE_JUDGE_MODEL";
    const ENV_MAX_JUDGE_CALLS: &'static str = "VERITRACE_MAX_JUDGE_CALLS";
    const ENV_ABORT_TIMEOUT_MS: &'static str = "VERITRACE_ABORT_TIMEOUT_MS";
    const ENV_BREAKER_THRESHOLD: &'static str = "VERITRACE_BREAKER_THRESHOLD";
    const ENV_BREAKER_RESET_MS: &'static str = "VERITRACE_BREAKER_RESET_MS";
    const ENV_JUDGE_CACHE_CAPACITY: &'static str = "VERITRACE_JUDGE_CACHE_CAPACITY";
    const ENV_CONSISTENCY_PENALTY: &'static str = "VERITRACE_CONSISTENCY_PENALTY";
    const ENV_DC_PENALTY: &'static str = "VERITRACE_DC_PENALTY";
    const ENV_ASSUMPTION_UNIT_COST: &'static str = "VERITRACE_ASSUMPTION_UNIT_COST";
    const ENV_PENALTY_CAP: &'static str = "VERITRACE_PENALTY_CAP";
    const ENV_INPUT_CLARITY_DEFAULT: &'static str = "VERITRACE_INPUT_CLARITY_DEFAULT";
    const ENV_CONFIDENCE_MIN: &'static str = "VERITRACE_CONFIDENCE_MIN";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// Classification thresholds are parsed strictly: a set-but-unparseable
    /// value is an error rather than a silent fallback, since a typo there
    /// changes every verdict. The remaining knobs fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let tfidf_traceable =
            Self::parse_threshold_from_env(Self::ENV_TFIDF_TRACEABLE, defaults.tfidf_traceable)?;
        let tfidf_speculative = Self::parse_threshold_from_env(
            Self::ENV_TFIDF_SPECULATIVE,
            defaults.tfidf_speculative,
        )?;
        let llm_traceable =
            Self::parse_threshold_from_env(Self::ENV_LLM_TRACEABLE, defaults.llm_traceable)?;
        let llm_assumption =
            Self::parse_threshold_from_env(Self::ENV_LLM_ASSUMPTION, defaults.llm_assumption)?;

        let judge_enabled =
            Self::parse_bool_from_env(Self::ENV_JUDGE_ENABLED, defaults.judge_enabled);
        let judge_model = Self::parse_string_from_env(Self::ENV_JUDGE_MODEL, defaults.judge_model);
        let max_judge_calls =
            Self::parse_u32_from_env(Self::ENV_MAX_JUDGE_CALLS, defaults.max_judge_calls);
        let abort_timeout = Duration::from_millis(Self::parse_u64_from_env(
            Self::ENV_ABORT_TIMEOUT_MS,
            defaults.abort_timeout.as_millis() as u64,
        ));
        let breaker_threshold =
            Self::parse_u32_from_env(Self::ENV_BREAKER_THRESHOLD, defaults.breaker_threshold);
        let breaker_reset = Duration::from_millis(Self::parse_u64_from_env(
            Self::ENV_BREAKER_RESET_MS,
            defaults.breaker_reset.as_millis() as u64,
        ));
        let judge_cache_capacity = Self::parse_u64_from_env(
            Self::ENV_JUDGE_CACHE_CAPACITY,
            defaults.judge_cache_capacity,
        );

        let consistency_penalty =
            Self::parse_f64_from_env(Self::ENV_CONSISTENCY_PENALTY, defaults.consistency_penalty);
        let dc_penalty = Self::parse_f64_from_env(Self::ENV_DC_PENALTY, defaults.dc_penalty);
        let assumption_unit_cost = Self::parse_f64_from_env(
            Self::ENV_ASSUMPTION_UNIT_COST,
            defaults.assumption_unit_cost,
        );
        let penalty_cap = Self::parse_f64_from_env(Self::ENV_PENALTY_CAP, defaults.penalty_cap);
        let input_clarity_default = Self::parse_f64_from_env(
            Self::ENV_INPUT_CLARITY_DEFAULT,
            defaults.input_clarity_default,
        );
        let confidence_min =
            Self::parse_f64_from_env(Self::ENV_CONFIDENCE_MIN, defaults.confidence_min);

        Ok(Self {
            tfidf_traceable,
            tfidf_speculative,
            llm_traceable,
            llm_assumption,
            judge_enabled,
            judge_model,
            max_judge_calls,
            abort_timeout,
            breaker_threshold,
            breaker_reset,
            judge_cache_capacity,
            consistency_penalty,
            dc_penalty,
            assumption_unit_cost,
            penalty_cap,
            input_clarity_default,
            confidence_min,
        })
    }

    /// Validates threshold bands and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            (Self::ENV_TFIDF_TRACEABLE, self.tfidf_traceable),
            (Self::ENV_TFIDF_SPECULATIVE, self.tfidf_speculative),
            (Self::ENV_LLM_TRACEABLE, self.llm_traceable),
            (Self::ENV_LLM_ASSUMPTION, self.llm_assumption),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }

        if self.tfidf_speculative >= self.tfidf_traceable {
            return Err(ConfigError::InvertedBand {
                lower_name: Self::ENV_TFIDF_SPECULATIVE,
                lower: self.tfidf_speculative,
                upper_name: Self::ENV_TFIDF_TRACEABLE,
                upper: self.tfidf_traceable,
            });
        }

        if self.llm_assumption > self.llm_traceable {
            return Err(ConfigError::InvertedBand {
                lower_name: Self::ENV_LLM_ASSUMPTION,
                lower: self.llm_assumption,
                upper_name: Self::ENV_LLM_TRACEABLE,
                upper: self.llm_traceable,
            });
        }

        if self.abort_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: Self::ENV_ABORT_TIMEOUT_MS,
            });
        }
        if self.breaker_reset.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: Self::ENV_BREAKER_RESET_MS,
            });
        }

        for (name, value) in [
            (Self::ENV_CONSISTENCY_PENALTY, self.consistency_penalty),
            (Self::ENV_DC_PENALTY, self.dc_penalty),
            (Self::ENV_ASSUMPTION_UNIT_COST, self.assumption_unit_cost),
            (Self::ENV_PENALTY_CAP, self.penalty_cap),
        ] {
            if value < 0.0 {
                return Err(ConfigError::NegativeValue { name, value });
            }
        }

        Ok(())
    }

    fn parse_threshold_from_env(name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match env::var(name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::ThresholdParseError {
                    name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(name: &str, default: String) -> String {
        env::var(name).unwrap_or(default)
    }

    fn parse_bool_from_env(name: &str, default: bool) -> bool {
        env::var(name)
            .ok()
            .and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Some(true),
                "0" | "false" | "no" | "off" => Some(false),
                _ => None,
            })
            .unwrap_or(default)
    }

    fn parse_u32_from_env(name: &str, default: u32) -> u32 {
        env::var(name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(name: &str, default: u64) -> u64 {
        env::var(name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn parse_f64_from_env(name: &str, default: f64) -> f64 {
        env::var(name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
