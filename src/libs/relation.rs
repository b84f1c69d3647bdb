//! Probe/target relation built from BLAT hits.
//!
//! A [`Relation`] keeps every distinct `(probe, target)` pair twice, once per
//! direction, so each report is a single walk over one index.

use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};

use crate::libs::error::MalformedRecordError;
use crate::libs::psl::AlignmentRecord;

/// Separator between identifiers in the hit-listing reports.
pub const HIT_SEPARATOR: &str = ", ";

/// A key and the number of distinct partners it has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    pub key: String,
    pub count: usize,
}

/// A key and its distinct partners, sorted and joined with [`HIT_SEPARATOR`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRow {
    pub key: String,
    pub hits: String,
}

/// Deduplicated probe/target pairs, indexed in both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relation {
    targets_of: BTreeMap<String, BTreeSet<String>>,
    probes_of: BTreeMap<String, BTreeSet<String>>,
}

impl Relation {
    pub fn new() -> Self {
        Default::default()
    }

    /// Build the relation in one pass.
    ///
    /// Every record's `blockCount` must be a non-negative integer. The value
    /// is not used, but a failed parse means the line was split wrongly, so
    /// the whole batch is rejected.
    ///
    /// ```
    /// use blatr::libs::psl::AlignmentRecord;
    /// use blatr::libs::relation::Relation;
    ///
    /// let records = vec![
    ///     AlignmentRecord::new("p1", "t1", "1"),
    ///     AlignmentRecord::new("p1", "t2", "1"),
    ///     AlignmentRecord::new("p2", "t1", "2"),
    /// ];
    /// let relation = Relation::from_records(&records).unwrap();
    /// assert_eq!(relation.pair_count(), 3);
    /// assert_eq!(relation.universal_probes(), vec!["p1".to_string()]);
    /// ```
    pub fn from_records<'a, I>(records: I) -> Result<Self, MalformedRecordError>
    where
        I: IntoIterator<Item = &'a AlignmentRecord>,
    {
        let mut relation = Self::new();

        for rec in records {
            if rec.block_count.parse::<u64>().is_err() {
                return Err(MalformedRecordError::BlockCount {
                    probe_id: rec.probe_id.clone(),
                    target_id: rec.target_id.clone(),
                    value: rec.block_count.clone(),
                });
            }
            relation.insert(&rec.probe_id, &rec.target_id);
        }

        Ok(relation)
    }

    /// Register one pair. Returns `false` if it was already present.
    pub fn insert(&mut self, probe_id: &str, target_id: &str) -> bool {
        let is_new = self
            .targets_of
            .entry(probe_id.to_string())
            .or_default()
            .insert(target_id.to_string());
        self.probes_of
            .entry(target_id.to_string())
            .or_default()
            .insert(probe_id.to_string());
        is_new
    }

    pub fn is_empty(&self) -> bool {
        self.targets_of.is_empty()
    }

    pub fn probe_count(&self) -> usize {
        self.targets_of.len()
    }

    pub fn target_count(&self) -> usize {
        self.probes_of.len()
    }

    /// Number of distinct pairs.
    pub fn pair_count(&self) -> usize {
        self.targets_of.values().map(|s| s.len()).sum()
    }

    pub fn targets_of(&self, probe_id: &str) -> Option<&BTreeSet<String>> {
        self.targets_of.get(probe_id)
    }

    pub fn probes_of(&self, target_id: &str) -> Option<&BTreeSet<String>> {
        self.probes_of.get(target_id)
    }

    /// Distinct probes per target, sorted by target.
    pub fn target_counts(&self) -> Vec<CountRow> {
        count_rows(&self.probes_of)
    }

    /// Distinct targets per probe, sorted by probe.
    pub fn probe_counts(&self) -> Vec<CountRow> {
        count_rows(&self.targets_of)
    }

    pub fn probe_to_targets(&self) -> Vec<HitRow> {
        hit_rows(&self.targets_of)
    }

    pub fn target_to_probes(&self) -> Vec<HitRow> {
        hit_rows(&self.probes_of)
    }

    /// Probes whose target set is exactly the set of all observed targets.
    ///
    /// Since every target in the index was contributed by some probe, set
    /// equality reduces to comparing against the target index's keys.
    pub fn universal_probes(&self) -> Vec<String> {
        self.targets_of
            .iter()
            .filter(|(_, targets)| {
                targets.len() == self.probes_of.len()
                    && targets.iter().eq(self.probes_of.keys())
            })
            .map(|(probe, _)| probe.clone())
            .collect()
    }
}

fn count_rows(index: &BTreeMap<String, BTreeSet<String>>) -> Vec<CountRow> {
    index
        .iter()
        .map(|(key, set)| CountRow {
            key: key.clone(),
            count: set.len(),
        })
        .collect()
}

fn hit_rows(index: &BTreeMap<String, BTreeSet<String>>) -> Vec<HitRow> {
    index
        .iter()
        .map(|(key, set)| HitRow {
            key: key.clone(),
            hits: set.iter().join(HIT_SEPARATOR),
        })
        .collect()
}
