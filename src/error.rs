use crate::models::Domain;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GramSathiError {
    #[error("Context type mismatch: rule set expects {expected} context, got {found}")]
    ContextTypeMismatch { expected: Domain, found: Domain },

    #[error("Unknown symptom: {0}")]
    UnknownSymptom(String),

    #[error("Unknown soil type: {0}")]
    UnknownSoilType(String),

    #[error("Unknown scheme: {0}")]
    UnknownScheme(String),

    #[error("Invalid rule table: {0}")]
    InvalidRuleTable(String),

    #[error("Rule '{rule_id}' matched but its outcome is malformed: {reason}")]
    EmptyOutcome { rule_id: String, reason: String },

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, GramSathiError>;
