//! Range and cardinality checks past serde's structural layer.
//!
//! Applied to every candidate the parser considers, before a report is
//! accepted.

use thiserror::Error;

use super::report::TriageReport;

/// Maximum accepted patient age.
const MAX_AGE: u32 = 120;

/// Maximum number of `possibleConditions` entries.
pub const MAX_POSSIBLE_CONDITIONS: usize = 5;

/// A field constraint the report failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportViolation {
    #[error("age {0} outside the allowed range 0-{MAX_AGE}")]
    AgeOutOfRange(u32),
    #[error("possibleConditions has {0} entries, maximum is {MAX_POSSIBLE_CONDITIONS}")]
    TooManyConditions(usize),
    #[error("confidence {confidence} for '{name}' outside [0, 1]")]
    ConfidenceOutOfRange { name: String, confidence: f64 },
}

/// Check every range/cardinality constraint the wire schema demands.
///
/// Enum domains and required fields are already enforced by
/// deserialization; this covers what the type system cannot express.
pub fn validate_report(report: &TriageReport) -> Result<(), ReportViolation> {
    if let Some(age) = report.age {
        if age > MAX_AGE {
            return Err(ReportViolation::AgeOutOfRange(age));
        }
    }

    if let Some(conditions) = &report.possible_conditions {
        if conditions.len() > MAX_POSSIBLE_CONDITIONS {
            return Err(ReportViolation::TooManyConditions(conditions.len()));
        }
        for condition in conditions {
            if !(0.0..=1.0).contains(&condition.confidence) {
                return Err(ReportViolation::ConfidenceOutOfRange {
                    name: condition.name.clone(),
                    confidence: condition.confidence,
                });
            }
        }
    }

    Ok(())
}
