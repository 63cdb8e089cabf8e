use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Parse error in '{field}': {reason}")]
    Parse { field: String, reason: String },

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(#[source] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QueueError {
    pub fn parse(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            field:  field.into(),
            reason: reason.into(),
        }
    }

    /// True for malformed or incomplete persisted data.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::MalformedSnapshot(_))
    }
}

pub type QueueResult<T> = Result<T, QueueError>;
