pub mod engine;
pub mod parser;
pub mod prompt;
pub mod report;
pub mod validate;

pub use engine::*;
pub use parser::*;
pub use prompt::*;
pub use report::*;
pub use validate::*;

use thiserror::Error;

use crate::completion::CompletionError;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Missing required fields: patientId, transcript")]
    InvalidRequest,

    #[error("Model did not return JSON")]
    NoJson { raw: String },

    #[error("Model output invalid JSON matching schema")]
    InvalidReport { raw: String, detail: String },

    #[error("Completion request failed: {0}")]
    Upstream(#[from] CompletionError),
}

impl TriageError {
    /// The raw model text for failures that retained one.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Self::NoJson { raw } | Self::InvalidReport { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
