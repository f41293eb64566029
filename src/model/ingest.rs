//! Lenient ingestion of shape-varying upstream JSON.
//!
//! The upstream generator has emitted list fields as JSON arrays, as keyed
//! objects, and as bare single entries, depending on its own prompt luck.
//! Everything is normalized here, before the scoring core sees it; the core
//! itself only ever works with strongly typed values.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::ValidationRequest;

/// Errors rejecting upstream payloads this engine cannot make sense of.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The payload was not valid JSON at all.
    #[error("request payload is not valid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    /// The top-level payload must be an object.
    #[error("request payload must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    /// `user_input_text` is missing, non-string, or blank. Without the
    /// original intent there is nothing to trace against.
    #[error("missing or empty user_input_text")]
    MissingUserInput,

    /// A list entry existed but did not deserialize into its type.
    #[error("invalid entry in {field}: {source}")]
    MalformedEntry {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A list field was something other than array, object, entry, or null.
    #[error("{field} has an unsupported shape: {found}")]
    UnsupportedShape {
        field: &'static str,
        found: &'static str,
    },
}

impl ValidationRequest {
    /// Builds a strongly typed request from loosely shaped upstream JSON.
    ///
    /// List fields tolerate three upstream shapes: a JSON array of entries, a
    /// keyed object (entries taken in key order), or one bare entry object.
    /// `null` or missing means empty. Anything else is rejected here so the
    /// scoring core never has to care.
    pub fn from_value(value: &Value) -> Result<Self, IngestError> {
        let obj = value.as_object().ok_or(IngestError::NotAnObject {
            found: json_kind(value),
        })?;

        // Older upstream builds emitted the camel-cased key.
        let user_input_text = obj
            .get("user_input_text")
            .or_else(|| obj.get("userInputText"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(IngestError::MissingUserInput)?
            .to_owned();

        let core_functional_components = collect_entries(
            obj.get("core_functional_components"),
            "core_functional_components",
        )?;
        let assumptions_made = collect_entries(obj.get("assumptions_made"), "assumptions_made")?;
        let non_functional_requirements = collect_entries(
            obj.get("non_functional_requirements"),
            "non_functional_requirements",
        )?;

        let input_clarity = obj.get("input_clarity").and_then(Value::as_f64);
        let logical_coherence = obj.get("logical_coherence").and_then(Value::as_f64);

        Ok(Self {
            user_input_text,
            core_functional_components,
            assumptions_made,
            non_functional_requirements,
            input_clarity,
            logical_coherence,
        })
    }

    /// Parses raw JSON text and ingests it via [`ValidationRequest::from_value`].
    pub fn from_json(text: &str) -> Result<Self, IngestError> {
        let value: Value =
            serde_json::from_str(text).map_err(|source| IngestError::InvalidJson { source })?;
        Self::from_value(&value)
    }
}

/// Normalizes one list field into a `Vec<T>`.
///
/// An object is first tried as a single entry; every entry type has at least
/// one required field, so a keyed map of entries never parses as one entry
/// and falls through to the map branch.
fn collect_entries<T: DeserializeOwned>(
    value: Option<&Value>,
    field: &'static str,
) -> Result<Vec<T>, IngestError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };

    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.iter().map(|item| parse_entry(item, field)).collect(),
        Value::Object(map) => {
            if let Ok(single) = serde_json::from_value::<T>(value.clone()) {
                return Ok(vec![single]);
            }
            map.values().map(|item| parse_entry(item, field)).collect()
        }
        other => Err(IngestError::UnsupportedShape {
            field,
            found: json_kind(other),
        }),
    }
}

fn parse_entry<T: DeserializeOwned>(value: &Value, field: &'static str) -> Result<T, IngestError> {
    serde_json::from_value(value.clone())
        .map_err(|source| IngestError::MalformedEntry { field, source })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
