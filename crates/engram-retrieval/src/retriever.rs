//! Retriever: Turns a query into an ordered shortlist of candidates.

use engram_core::config::{BankConfig, SimilarityMode};
use engram_core::models::QuerySignature;
use tracing::debug;

use crate::ranking::{blended_score, top_k, Candidate, RankedCandidate};
use crate::similarity::similarity;
use crate::window::within_window;

/// Similarity-plus-exploration ranker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Retriever {
    mode: SimilarityMode,
    window_ms: Option<u64>,
}

impl Retriever {
    pub fn new(mode: SimilarityMode, window_ms: Option<u64>) -> Self {
        Self { mode, window_ms }
    }

    pub fn from_config(config: &BankConfig) -> Self {
        Self::new(config.similarity_mode, config.retrieval_window_ms)
    }

    pub fn mode(&self) -> SimilarityMode {
        self.mode
    }

    /// Rank candidates for `query` and keep at most `k`.
    ///
    /// Zero-similarity candidates are dropped whatever their exploration
    /// bonus; fewer than `k` relevant candidates yields a shorter result.
    pub fn rank<'a>(
        &self,
        candidates: Vec<Candidate<'a>>,
        query: &QuerySignature,
        k: usize,
    ) -> Vec<RankedCandidate<'a>> {
        if k == 0 || candidates.is_empty() {
            return Vec::new();
        }
        let total = candidates.len();
        let pool = within_window(candidates, |c| c.end_time, query.at, self.window_ms);

        let scored: Vec<RankedCandidate<'a>> = pool
            .into_iter()
            .filter_map(|candidate| {
                let sim = similarity(query, candidate.signature, self.mode);
                (sim > 0.0).then(|| RankedCandidate {
                    candidate,
                    similarity: sim,
                    score: blended_score(sim, candidate.estimate.confidence_bound),
                })
            })
            .collect();
        let relevant = scored.len();
        let ranked = top_k(scored, k);

        debug!(
            candidates = total,
            relevant,
            returned = ranked.len(),
            k,
            "ranked retrieval candidates"
        );
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engram_core::models::{ChunkId, Signature, ValueComponents, ValueEstimate};

    fn estimate() -> ValueEstimate {
        ValueEstimate {
            estimated_value: 0.5,
            confidence_bound: 0.0,
            components: ValueComponents {
                usage_rate: 0.5,
                recency: 1.0,
                rarity: 1.0,
            },
        }
    }

    #[test]
    fn mode_follows_config() {
        assert_eq!(Retriever::default().mode(), SimilarityMode::Combined);
        let config = BankConfig {
            similarity_mode: SimilarityMode::CategoryWeighted,
            ..BankConfig::default()
        };
        assert_eq!(
            Retriever::from_config(&config).mode(),
            SimilarityMode::CategoryWeighted
        );
    }

    #[test]
    fn configured_mode_changes_similarity() {
        let id = ChunkId::indexed("p1", 0);
        let stored = Signature::new(vec!["home".into()], vec!["search".into()], vec![]);
        let query = QuerySignature::new(
            Signature::new(vec!["home".into()], vec!["cart".into()], vec![]),
            0,
        );
        let candidate = Candidate {
            id: &id,
            signature: &stored,
            estimate: estimate(),
            last_access_time: None,
            end_time: 0,
        };

        let combined = Retriever::new(SimilarityMode::Combined, None);
        let weighted = Retriever::new(SimilarityMode::CategoryWeighted, None);
        let a = combined.rank(vec![candidate], &query, 1);
        let b = weighted.rank(vec![candidate], &query, 1);
        // {home} of {home, search, cart}
        assert!((a[0].similarity - 1.0 / 3.0).abs() < 1e-12);
        // 0.3 * J(pages) + 0.2 * J(ops, both empty = 0), widgets disjoint
        assert!((b[0].similarity - 0.3).abs() < 1e-12);
    }

    #[test]
    fn zero_k_returns_nothing() {
        let id = ChunkId::indexed("p1", 0);
        let sig = Signature::new(vec!["home".into()], vec![], vec![]);
        let candidate = Candidate {
            id: &id,
            signature: &sig,
            estimate: estimate(),
            last_access_time: None,
            end_time: 0,
        };
        let query = QuerySignature::new(sig.clone(), 0);
        assert!(Retriever::default().rank(vec![candidate], &query, 0).is_empty());
    }
}
