use serde::Deserialize;
use serde_json::Value;

/// One `sql_1` row: total instance count for a label across all data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelCountRow {
    pub label: String,
    pub instance_count: u64,
}

/// One `sql_2` row: object count for a label within one dataset split.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SplitCountRow {
    pub split: String,
    pub label: String,
    pub objects: u64,
    /// Backend-computed share of the split total. Informational only; the
    /// aggregator recomputes percentages from `objects`.
    pub pct_within_split: f64,
}

/// Decoded and validated result payload of a succeeded job.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisResult {
    pub sql_1: Vec<LabelCountRow>,
    pub sql_2: Vec<SplitCountRow>,
}

/// Why a result payload could not be turned into an [`AnalysisResult`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResultError {
    #[error("result payload is not valid JSON: {0}")]
    Json(String),
    #[error("unexpected result shape (missing sql_1/sql_2)")]
    Shape,
    #[error("malformed result rows: {0}")]
    Rows(String),
}

/// Structural check: a non-null object holding `sql_1` and `sql_2` arrays.
///
/// Row contents are not inspected here; that is [`decode_payload`]'s job.
pub fn is_valid_result(value: &Value) -> bool {
    match value.as_object() {
        Some(map) => {
            map.get("sql_1").is_some_and(Value::is_array)
                && map.get("sql_2").is_some_and(Value::is_array)
        }
        None => false,
    }
}

/// Decode a raw `result` payload into typed rows.
///
/// The backend stores results as JSON-encoded text, so string payloads are
/// parsed first; an already-structured value is used as-is.
pub fn decode_payload(payload: &Value) -> Result<AnalysisResult, ResultError> {
    let decoded = match payload {
        Value::String(text) => {
            serde_json::from_str(text).map_err(|err| ResultError::Json(err.to_string()))?
        }
        other => other.clone(),
    };

    if !is_valid_result(&decoded) {
        return Err(ResultError::Shape);
    }

    serde_json::from_value(decoded).map_err(|err| ResultError::Rows(err.to_string()))
}
