//! Parse LLM output into claims
//!
//! The model is asked for a JSON array but may answer with one of a few
//! related shapes. Each accepted shape is a [`ClaimsPayload`] variant;
//! anything else is rejected instead of being coerced.

use crate::error::ExtractorError;
use factcheck_domain::Claim;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Accepted top-level shapes of an extraction response
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimsPayload {
    /// `[ {...}, {...} ]`
    List(Vec<Value>),
    /// `{"claims": [...]}` or `{"data": [...]}`
    Wrapped {
        /// Key the list was found under
        key: &'static str,
        /// The wrapped list
        items: Vec<Value>,
    },
    /// `{"claim": "...", ...}`
    Single(Map<String, Value>),
}

const WRAPPER_KEYS: [&str; 2] = ["claims", "data"];

impl ClaimsPayload {
    /// Classify a parsed JSON value into one of the accepted shapes
    pub fn classify(value: Value) -> Result<Self, ExtractorError> {
        match value {
            Value::Array(items) => Ok(ClaimsPayload::List(items)),
            Value::Object(mut obj) => {
                for key in WRAPPER_KEYS {
                    if let Some(inner) = obj.remove(key) {
                        return match inner {
                            Value::Array(items) => Ok(ClaimsPayload::Wrapped { key, items }),
                            other => Err(ExtractorError::Parse(format!(
                                "Expected an array under '{}', found {}",
                                key,
                                type_name(&other)
                            ))),
                        };
                    }
                }
                if obj.contains_key("claim") {
                    Ok(ClaimsPayload::Single(obj))
                } else {
                    Err(ExtractorError::Parse(
                        "Object has neither a claim list nor a 'claim' field".to_string(),
                    ))
                }
            }
            other => Err(ExtractorError::Parse(format!(
                "Expected a JSON array or object, found {}",
                type_name(&other)
            ))),
        }
    }

    /// Flatten into the list of raw claim values
    pub fn into_items(self) -> Vec<Value> {
        match self {
            ClaimsPayload::List(items) => items,
            ClaimsPayload::Wrapped { key, items } => {
                debug!("Claims wrapped under '{}'", key);
                items
            }
            ClaimsPayload::Single(obj) => vec![Value::Object(obj)],
        }
    }
}

/// One claim object as the model writes it
#[derive(Debug, Deserialize)]
struct RawClaim {
    claim: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    search_query: Option<String>,
}

/// Parse an LLM response into claims, in response order
///
/// Items that are not claim objects or have an empty `claim` are skipped
/// with a warning; a response whose top level is not an accepted shape is
/// an error.
pub fn parse_claims(response: &str) -> Result<Vec<Claim>, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| ExtractorError::Parse(format!("JSON parse error: {}", e)))?;

    let payload = ClaimsPayload::classify(json)?;

    let mut claims = Vec::new();
    for (idx, item) in payload.into_items().into_iter().enumerate() {
        match parse_claim_json(item) {
            Ok(claim) => claims.push(claim),
            Err(e) => warn!("Skipping claim {}: {}", idx, e),
        }
    }

    Ok(claims)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::Parse("Empty code block".to_string()));
        }

        // Skip the opening fence line and the closing fence if present
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_claim_json(value: Value) -> Result<Claim, String> {
    let raw: RawClaim = serde_json::from_value(value).map_err(|e| e.to_string())?;

    let text = raw.claim.trim();
    if text.is_empty() {
        return Err("claim is empty".to_string());
    }

    let mut claim = Claim::new(text);
    if let Some(category) = raw.category {
        claim = claim.with_category(category);
    }
    if let Some(query) = raw.search_query {
        claim = claim.with_search_query(query);
    }
    Ok(claim)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
