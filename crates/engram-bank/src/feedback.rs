//! FeedbackSink: Decides which offered chunks the reasoning step used and
//! reports it back to the bank.
//!
//! Usefulness is judged from what the reasoning step cites:
//! - evidence references (`"12"` or `"12..15"`) that fall inside a chunk's
//!   event range, or
//! - cited features whose Jaccard similarity with the chunk's signature
//!   reaches the configured threshold.
//!
//! An [`Offer`] only comes out of a retrieval and is consumed when applied,
//! so a chunk is credited at most once per retrieval. Before crediting, the
//! sink also checks the bank's live counters: a chunk whose `useful_count`
//! already matches its `access_count` is reported as not useful.

use std::collections::BTreeSet;
use std::str::FromStr;

use engram_core::config::BankConfig;
use engram_core::errors::EngramResult;
use engram_core::models::{ChunkSummary, FeedbackOutcome, QuerySignature, Signature};
use engram_core::traits::IMemoryBank;
use engram_retrieval::similarity::jaccard;
use tracing::debug;

/// An inclusive range of event positions cited as evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvidenceRef {
    pub first: usize,
    pub last: usize,
}

impl EvidenceRef {
    pub fn single(position: usize) -> Self {
        Self {
            first: position,
            last: position,
        }
    }
}

impl FromStr for EvidenceRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid evidence reference {s:?}: {e}"))
        };
        match s.split_once("..") {
            Some((a, b)) => {
                let (first, last) = (parse(a)?, parse(b)?);
                if first > last {
                    return Err(format!("invalid evidence reference {s:?}: reversed range"));
                }
                Ok(Self { first, last })
            }
            None => parse(s).map(Self::single),
        }
    }
}

/// What the reasoning step pointed at when it produced its answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReasoningOutcome {
    pub evidence: Vec<EvidenceRef>,
    pub cited: Signature,
}

impl ReasoningOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw evidence strings. Malformed references are skipped.
    pub fn with_evidence<'a>(mut self, raw: impl IntoIterator<Item = &'a str>) -> Self {
        for r in raw {
            match r.parse::<EvidenceRef>() {
                Ok(evidence) => self.evidence.push(evidence),
                Err(reason) => debug!(%reason, "ignoring malformed evidence reference"),
            }
        }
        self
    }

    pub fn with_cited(mut self, cited: Signature) -> Self {
        self.cited = cited;
        self
    }
}

/// The chunks handed to one reasoning step. Produced by a retrieval, spent
/// by [`FeedbackSink::apply`].
#[derive(Debug, PartialEq)]
pub struct Offer {
    summaries: Vec<ChunkSummary>,
}

impl Offer {
    pub(crate) fn new(summaries: Vec<ChunkSummary>) -> Self {
        Self { summaries }
    }

    /// Retrieve the top-`k` chunks for `query` from `bank` as one offer.
    pub fn retrieve<B>(bank: &mut B, query: &QuerySignature, k: usize) -> EngramResult<Self>
    where
        B: IMemoryBank + ?Sized,
    {
        Ok(Self::new(bank.retrieve(query, k)?))
    }

    pub fn summaries(&self) -> &[ChunkSummary] {
        &self.summaries
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

/// Tally of one applied offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackReport {
    pub credited: usize,
    pub acknowledged: usize,
    pub stale: usize,
}

impl FeedbackReport {
    pub fn total(&self) -> usize {
        self.credited + self.acknowledged + self.stale
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FeedbackSink {
    similarity_threshold: f64,
}

impl FeedbackSink {
    pub fn new(similarity_threshold: f64) -> Self {
        Self {
            similarity_threshold,
        }
    }

    pub fn from_config(config: &BankConfig) -> Self {
        Self::new(config.feedback_similarity_threshold)
    }

    /// Whether `summary` contributed to `outcome`.
    pub fn is_useful(&self, summary: &ChunkSummary, outcome: &ReasoningOutcome) -> bool {
        let provenance = summary.provenance();
        if outcome
            .evidence
            .iter()
            .any(|e| provenance.overlaps_events(e.first, e.last))
        {
            return true;
        }
        if outcome.cited.is_empty() {
            return false;
        }
        jaccard(&outcome.cited.features(), &summary.signature.features())
            >= self.similarity_threshold
    }

    /// Report usefulness of every offered chunk, each at most once.
    ///
    /// A chunk is never credited beyond its access count, whatever the
    /// outcome says.
    pub fn apply<B>(
        &self,
        bank: &mut B,
        offer: Offer,
        outcome: &ReasoningOutcome,
    ) -> EngramResult<FeedbackReport>
    where
        B: IMemoryBank + ?Sized,
    {
        let mut report = FeedbackReport::default();
        let mut seen = BTreeSet::new();
        for summary in &offer.summaries {
            if !seen.insert(&summary.id) {
                continue;
            }
            let creditable = bank
                .usage(&summary.id)?
                .is_some_and(|u| u.useful_count < u.access_count);
            let useful = self.is_useful(summary, outcome);
            if useful && !creditable {
                debug!(chunk = %summary.id, "feedback would exceed accesses; not credited");
            }
            let useful = useful && creditable;
            match bank.record_feedback(&summary.id, useful)? {
                FeedbackOutcome::Credited => report.credited += 1,
                FeedbackOutcome::Acknowledged => report.acknowledged += 1,
                FeedbackOutcome::StaleChunk => report.stale += 1,
            }
        }
        debug!(
            offered = offer.len(),
            credited = report.credited,
            stale = report.stale,
            "applied feedback"
        );
        Ok(report)
    }
}

impl Default for FeedbackSink {
    fn default() -> Self {
        Self::from_config(&BankConfig::default())
    }
}
