//! EventStreamIndex: A participant's ordered, read-only event history.

use engram_core::models::{Event, EventWindow, TimestampMs};

/// Ordered event history of one participant.
///
/// Construction sorts by timestamp (stable, so arrival order breaks ties);
/// afterwards an event's position is its permanent event index.
#[derive(Debug, Clone)]
pub struct EventStreamIndex {
    participant: String,
    events: Vec<Event>,
}

impl EventStreamIndex {
    pub fn new(participant: impl Into<String>, mut events: Vec<Event>) -> Self {
        events.sort_by_key(|e| e.timestamp);
        Self {
            participant: participant.into(),
            events,
        }
    }

    pub fn participant(&self) -> &str {
        &self.participant
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Event> {
        self.events.get(position)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The whole stream as one window.
    pub fn all(&self) -> EventWindow<'_> {
        EventWindow::new(0, &self.events)
    }

    /// Positions `[start, end)`, clamped to the stream.
    pub fn slice(&self, start: usize, end: usize) -> EventWindow<'_> {
        let end = end.min(self.events.len());
        let start = start.min(end);
        EventWindow::new(start, &self.events[start..end])
    }

    /// Position of the event closest in time to `t`; the earliest wins ties.
    pub fn nearest_position(&self, t: TimestampMs) -> Option<usize> {
        self.events
            .iter()
            .enumerate()
            .min_by_key(|(pos, e)| (e.timestamp.abs_diff(t), *pos))
            .map(|(pos, _)| pos)
    }

    /// Up to `left` events before and `right` events after `center`,
    /// including `center`. Empty when `center` is out of range.
    pub fn window_around(&self, center: usize, left: usize, right: usize) -> EventWindow<'_> {
        if center >= self.events.len() {
            return EventWindow::new(self.events.len(), &[]);
        }
        let start = center.saturating_sub(left);
        let end = center.saturating_add(right).saturating_add(1);
        self.slice(start, end)
    }

    /// Events whose timestamps lie within `[t0 - left_ms, t0 + right_ms]`,
    /// `t0` being the timestamp at `center`.
    pub fn time_window_around(
        &self,
        center: usize,
        left_ms: u64,
        right_ms: u64,
    ) -> EventWindow<'_> {
        let Some(anchor) = self.events.get(center) else {
            return EventWindow::new(self.events.len(), &[]);
        };
        let lo = anchor.timestamp.saturating_sub(left_ms);
        let hi = anchor.timestamp.saturating_add(right_ms);
        let start = self.events.partition_point(|e| e.timestamp < lo);
        let end = self.events.partition_point(|e| e.timestamp <= hi);
        self.slice(start, end)
    }

    /// Every event strictly earlier than `t`.
    pub fn before(&self, t: TimestampMs) -> EventWindow<'_> {
        let end = self.events.partition_point(|e| e.timestamp < t);
        self.slice(0, end)
    }
}
