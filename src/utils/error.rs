use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("invalid {kind} data: {messages}")]
    Validation { kind: &'static str, messages: String },

    #[error("{kind} '{key}' not found")]
    NotFound { kind: &'static str, key: String },

    #[error("{kind} '{key}' already exists")]
    Duplicate { kind: &'static str, key: String },

    #[error("person '{person_id}' is already linked to offering '{offering_code}'")]
    DuplicateLink {
        person_id: String,
        offering_code: String,
    },

    #[error("invalid JSON in {path}: {source}")]
    MalformedDocument {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RosterError {
    /// Joins field-level messages into a single recoverable failure.
    pub fn validation(kind: &'static str, messages: Vec<String>) -> Self {
        RosterError::Validation {
            kind,
            messages: messages.join("; "),
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
