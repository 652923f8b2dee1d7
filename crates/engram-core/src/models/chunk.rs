//! Chunks: summarized slices of a participant's event history.

use std::cmp::Ordering;
use std::fmt;
use std::io::{Cursor, Write};

use serde::{Deserialize, Serialize};

use super::{Signature, TimestampMs};

/// Where a chunk came from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ChunkOrigin {
    /// Cut from the event stream index; `ordinal` is its position in chunk order.
    Indexed { ordinal: usize },
    /// Promoted from a short-term window at `created_at`.
    Promoted { created_at: TimestampMs },
}

/// Chunk identity: participant plus origin tag.
///
/// Ordering is lexicographic on the rendered form (`p01_3`,
/// `p01_promoted_120500`), which is what eviction tie-breaks use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkId {
    pub participant: String,
    pub origin: ChunkOrigin,
}

impl ChunkId {
    pub fn indexed(participant: impl Into<String>, ordinal: usize) -> Self {
        Self {
            participant: participant.into(),
            origin: ChunkOrigin::Indexed { ordinal },
        }
    }

    pub fn promoted(participant: impl Into<String>, created_at: TimestampMs) -> Self {
        Self {
            participant: participant.into(),
            origin: ChunkOrigin::Promoted { created_at },
        }
    }

    pub fn is_promoted(&self) -> bool {
        matches!(self.origin, ChunkOrigin::Promoted { .. })
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.origin {
            ChunkOrigin::Indexed { ordinal } => write!(f, "{}_{}", self.participant, ordinal),
            ChunkOrigin::Promoted { created_at } => {
                write!(f, "{}_promoted_{}", self.participant, created_at)
            }
        }
    }
}

/// Longest rendered suffix: `_promoted_` plus a 20-digit `u64`.
const SUFFIX_CAPACITY: usize = 32;

impl ChunkOrigin {
    /// The rendered identity after the participant, written into `buf`.
    fn render_suffix<'b>(&self, buf: &'b mut [u8; SUFFIX_CAPACITY]) -> &'b [u8] {
        let len = {
            let mut cursor = Cursor::new(&mut buf[..]);
            // Cannot overflow SUFFIX_CAPACITY.
            let _ = match *self {
                ChunkOrigin::Indexed { ordinal } => write!(cursor, "_{ordinal}"),
                ChunkOrigin::Promoted { created_at } => write!(cursor, "_promoted_{created_at}"),
            };
            cursor.position() as usize
        };
        &buf[..len]
    }
}

impl Ord for ChunkId {
    fn cmp(&self, other: &Self) -> Ordering {
        let (mut a, mut b) = ([0u8; SUFFIX_CAPACITY], [0u8; SUFFIX_CAPACITY]);
        let lhs = self
            .participant
            .bytes()
            .chain(self.origin.render_suffix(&mut a).iter().copied());
        let rhs = other
            .participant
            .bytes()
            .chain(other.origin.render_suffix(&mut b).iter().copied());
        // Rendered forms can collide across participants ("a_promoted" + 1 vs
        // "a" promoted at 1); fall back to the structure to stay consistent with Eq.
        lhs.cmp(rhs)
            .then_with(|| self.participant.cmp(&other.participant))
            .then_with(|| self.origin.cmp(&other.origin))
    }
}

impl PartialOrd for ChunkId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The slice of the event stream a chunk summarizes. Both ranges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub first_event: usize,
    pub last_event: usize,
    pub start_time: TimestampMs,
    pub end_time: TimestampMs,
}

impl Provenance {
    pub fn event_count(&self) -> usize {
        self.last_event - self.first_event + 1
    }

    /// Whether the inclusive event range `[first, last]` overlaps this one.
    pub fn overlaps_events(&self, first: usize, last: usize) -> bool {
        first <= self.last_event && last >= self.first_event
    }
}

/// Immutable content of a chunk. Statistics live next to it in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub provenance: Provenance,
    pub signature: Signature,
    pub creation_time: TimestampMs,
}

/// Usage statistics of a stored chunk.
///
/// `access_count` counts retrievals that returned the chunk; `useful_count`
/// counts confirmations that it influenced the downstream output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub access_count: u64,
    pub useful_count: u64,
    pub creation_time: TimestampMs,
    /// `None` until the first retrieval.
    pub last_access_time: Option<TimestampMs>,
}

impl UsageStats {
    pub fn new(creation_time: TimestampMs) -> Self {
        Self {
            access_count: 0,
            useful_count: 0,
            creation_time,
            last_access_time: None,
        }
    }

    /// Last access, or creation when the chunk was never retrieved.
    pub fn last_touch(&self) -> TimestampMs {
        self.last_access_time.unwrap_or(self.creation_time)
    }
}
