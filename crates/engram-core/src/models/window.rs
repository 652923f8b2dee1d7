//! Borrowed, position-aware slices of an event stream.

use super::{Event, TimestampMs};

/// A contiguous run of events together with the stream position of its
/// first event, so chunks cut from it can cite event indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow<'a> {
    pub first_event: usize,
    pub events: &'a [Event],
}

impl<'a> EventWindow<'a> {
    pub fn new(first_event: usize, events: &'a [Event]) -> Self {
        Self {
            first_event,
            events,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Inclusive position of the last event. `None` for an empty window.
    pub fn last_event(&self) -> Option<usize> {
        self.events.len().checked_sub(1).map(|n| self.first_event + n)
    }

    /// Inclusive time span. `None` for an empty window.
    pub fn time_range(&self) -> Option<(TimestampMs, TimestampMs)> {
        Some((self.events.first()?.timestamp, self.events.last()?.timestamp))
    }
}
