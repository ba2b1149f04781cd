use serde::{Deserialize, Serialize};

/// Fixed disclaimer every served report must carry.
pub const MEDICAL_DISCLAIMER: &str = "This is not medical advice";

/// Inbound triage request body.
///
/// `patient_id` and `transcript` are required by contract but kept optional
/// here so a missing field surfaces as the documented 400 response instead
/// of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageRequest {
    pub patient_id: Option<String>,
    pub transcript: Option<String>,
    pub age: Option<u32>,
    pub sex: Option<String>,
}

impl TriageRequest {
    /// Both required fields, or `None` when either is missing or blank.
    pub fn required_fields(&self) -> Option<(&str, &str)> {
        let patient_id = non_empty(self.patient_id.as_deref())?;
        let transcript = non_empty(self.transcript.as_deref())?;
        Some((patient_id, transcript))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Structured triage summary produced by the model and validated locally.
///
/// Only `urgency`, `recommended_action`, `summary_for_doctor` and
/// `disclaimers` are guaranteed present; everything else is at the model's
/// discretion. Unknown keys in the model output are tolerated and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Vec<Symptom>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red_flags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_conditions: Option<Vec<PossibleCondition>>,
    pub urgency: Urgency,
    pub recommended_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_ups: Option<Vec<String>>,
    pub summary_for_doctor: String,
    pub disclaimers: Vec<String>,
}

impl TriageReport {
    /// Appends [`MEDICAL_DISCLAIMER`] unless the model already included it.
    pub fn ensure_disclaimer(&mut self) {
        if !self.disclaimers.iter().any(|d| d == MEDICAL_DISCLAIMER) {
            self.disclaimers.push(MEDICAL_DISCLAIMER.to_string());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symptom {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PossibleCondition {
    pub name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
    Other,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}
