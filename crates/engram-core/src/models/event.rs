//! Behavioral event: the atomic unit of a participant's interaction log.

use serde::{Deserialize, Serialize};

use super::TimestampMs;

/// Placeholder raw logs use for a missing identifier.
const ABSENT_PLACEHOLDER: &str = "None";

/// One recorded interaction. Immutable once loaded into an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: TimestampMs,
    /// Page or screen identifier.
    pub page: String,
    /// Widget or control identifier.
    pub widget: String,
    /// Operation type (click, input, scroll, ...).
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Event {
    pub fn new(
        timestamp: TimestampMs,
        page: impl Into<String>,
        widget: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            page: page.into(),
            widget: widget.into(),
            operation: operation.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Whether an identifier carries information. Empty strings and the raw-log
/// placeholder `"None"` do not.
pub fn is_present(identifier: &str) -> bool {
    !identifier.is_empty() && identifier != ABSENT_PLACEHOLDER
}
