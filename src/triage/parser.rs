use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::report::TriageReport;
use super::validate::validate_report;
use super::TriageError;

/// Greedy first-`{` to last-`}` span, the fallback when the model wraps its
/// JSON in prose or markdown fences.
static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// Turn raw model text into a validated [`TriageReport`].
///
/// Ordered attempts, first success wins: strict parse of the whole trimmed
/// text, then parse of the greedy `{…}` substring. Total function; every
/// failure carries the original text so it is never lost to diagnostics.
pub fn parse_triage_response(raw: &str) -> Result<TriageReport, TriageError> {
    let text = raw.trim();

    let first = match try_candidate(text) {
        Ok(report) => return Ok(report),
        Err(failure) => failure,
    };

    let Some(candidate) = JSON_OBJECT.find(text) else {
        return Err(TriageError::NoJson { raw: text.to_string() });
    };

    match try_candidate(candidate.as_str()) {
        Ok(report) => Ok(report),
        Err(second) => Err(TriageError::InvalidReport {
            raw: text.to_string(),
            detail: format!("{first}; fallback: {second}"),
        }),
    }
}

/// Why one candidate was rejected. Malformed JSON and schema violations
/// both fall through to the substring fallback.
#[derive(Debug, Error)]
enum AttemptFailure {
    #[error("malformed JSON: {0}")]
    MalformedJson(String),
    #[error("schema violation: {0}")]
    SchemaViolation(String),
}

fn try_candidate(candidate: &str) -> Result<TriageReport, AttemptFailure> {
    let value: serde_json::Value = serde_json::from_str(candidate)
        .map_err(|e| AttemptFailure::MalformedJson(e.to_string()))?;

    let report: TriageReport = serde_json::from_value(value)
        .map_err(|e| AttemptFailure::SchemaViolation(e.to_string()))?;

    validate_report(&report).map_err(|v| AttemptFailure::SchemaViolation(v.to_string()))?;

    Ok(report)
}
