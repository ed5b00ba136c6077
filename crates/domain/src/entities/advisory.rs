//! Advisory entities returned to callers

use serde::{Deserialize, Serialize};

/// Safety warning produced by the language model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Advisory text
    pub message: String,
}

impl Alert {
    /// Create an alert from advisory text
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Final projection of a pipeline run: the summary and the alert together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryOutcome {
    /// One-line weather summary
    pub summary: String,
    /// Generated safety warning
    pub alert: Alert,
}
