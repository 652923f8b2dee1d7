//! Query signatures derived from an anchor's local context.

use serde::{Deserialize, Serialize};

use super::{is_present, Event, FeatureKind, Signature, TimestampMs};

/// A retrieval query. Transient, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySignature {
    pub signature: Signature,
    /// Anchor time; becomes `last_access_time` of every returned chunk.
    pub at: TimestampMs,
    /// Restrict similarity to these categories. `None` compares all of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Vec<FeatureKind>>,
}

impl QuerySignature {
    pub fn new(signature: Signature, at: TimestampMs) -> Self {
        Self {
            signature,
            at,
            scope: None,
        }
    }

    /// Single-event query: the anchor's nearest event's page, widget and operation.
    pub fn from_event(event: &Event, at: TimestampMs) -> Self {
        let single = |value: &str| {
            if is_present(value) {
                vec![value.to_string()]
            } else {
                Vec::new()
            }
        };
        Self::new(
            Signature::new(
                single(&event.page),
                single(&event.widget),
                single(&event.operation),
            ),
            at,
        )
    }

    pub fn restricted_to(mut self, kinds: impl IntoIterator<Item = FeatureKind>) -> Self {
        let mut kinds: Vec<FeatureKind> = kinds.into_iter().collect();
        kinds.sort();
        kinds.dedup();
        self.scope = Some(kinds);
        self
    }

    /// Categories the query compares.
    pub fn kinds(&self) -> &[FeatureKind] {
        self.scope.as_deref().unwrap_or(&FeatureKind::ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_event_skips_absent_identifiers() {
        let event = Event::new(10, "None", "submit", "");
        let q = QuerySignature::from_event(&event, 10);
        assert!(q.signature.pages.is_empty());
        assert_eq!(q.signature.widgets, vec!["submit".to_string()]);
        assert!(q.signature.operations.is_empty());
        assert_eq!(q.kinds(), &FeatureKind::ALL);
    }

    #[test]
    fn restriction_is_sorted_and_deduplicated() {
        let q = QuerySignature::new(Signature::default(), 0).restricted_to([
            FeatureKind::Operation,
            FeatureKind::Widget,
            FeatureKind::Operation,
        ]);
        assert_eq!(q.kinds(), &[FeatureKind::Widget, FeatureKind::Operation]);
    }
}
