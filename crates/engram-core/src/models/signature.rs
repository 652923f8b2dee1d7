//! Chunk signatures: the bounded feature sets used for similarity.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How many features of each category a signature keeps.
pub const SIGNATURE_TOP_N: usize = 5;

/// Feature category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Page,
    Widget,
    Operation,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 3] = [FeatureKind::Page, FeatureKind::Widget, FeatureKind::Operation];
}

/// A category-tagged feature. `Page("x")` and `Widget("x")` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Feature {
    pub kind: FeatureKind,
    pub value: String,
}

/// Most frequent pages, widgets and operation types of a slice of events,
/// each list ordered by rank. Never mutated after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub pages: Vec<String>,
    pub widgets: Vec<String>,
    pub operations: Vec<String>,
}

impl Signature {
    pub fn new(pages: Vec<String>, widgets: Vec<String>, operations: Vec<String>) -> Self {
        Self {
            pages,
            widgets,
            operations,
        }
    }

    pub fn category(&self, kind: FeatureKind) -> &[String] {
        match kind {
            FeatureKind::Page => &self.pages,
            FeatureKind::Widget => &self.widgets,
            FeatureKind::Operation => &self.operations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.widgets.is_empty() && self.operations.is_empty()
    }

    /// Combined, category-tagged feature set.
    pub fn features(&self) -> BTreeSet<Feature> {
        self.features_in(&FeatureKind::ALL)
    }

    /// Feature set projected onto the given categories.
    pub fn features_in(&self, kinds: &[FeatureKind]) -> BTreeSet<Feature> {
        kinds
            .iter()
            .flat_map(|&kind| {
                self.category(kind).iter().map(move |value| Feature {
                    kind,
                    value: value.clone(),
                })
            })
            .collect()
    }

    /// True when both signatures contain at least one common feature.
    pub fn shares_feature_with(&self, other: &Signature) -> bool {
        FeatureKind::ALL.iter().any(|&kind| {
            let theirs = other.category(kind);
            self.category(kind).iter().any(|v| theirs.contains(v))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(pages: &[&str], widgets: &[&str], ops: &[&str]) -> Signature {
        let owned = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect();
        Signature::new(owned(pages), owned(widgets), owned(ops))
    }

    #[test]
    fn same_value_in_different_categories_is_not_shared() {
        let a = sig(&["upload"], &[], &[]);
        let b = sig(&[], &["upload"], &[]);
        assert!(!a.shares_feature_with(&b));
        assert_eq!(a.features().intersection(&b.features()).count(), 0);
    }

    #[test]
    fn projection_keeps_only_requested_categories() {
        let s = sig(&["home"], &["btn"], &["click"]);
        let widgets_only = s.features_in(&[FeatureKind::Widget]);
        assert_eq!(widgets_only.len(), 1);
        assert!(widgets_only.iter().all(|f| f.kind == FeatureKind::Widget));
        assert_eq!(s.features().len(), 3);
    }
}
