//! Single-pass running aggregation keyed by label.
//!
//! [`RunningAggregator`] keeps one [`RunningState`] per distinct key and
//! never stores raw samples. [`CompoundAggregator`] nests it one level deep
//! for `(event, bucket)` keys.

use std::collections::BTreeMap;

use stats_core::calculations::SummaryCalculator;
use stats_core::models::{CompoundKey, Observation, RunningState, Summary};

// ── RunningAggregator ─────────────────────────────────────────────────────────

/// Per-key running statistics.
///
/// Keys live in a `BTreeMap`, so every enumeration (and therefore every
/// report) is in ascending key order.
#[derive(Debug, Clone)]
pub struct RunningAggregator<K: Ord> {
    states: BTreeMap<K, RunningState>,
}

impl<K: Ord> Default for RunningAggregator<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> RunningAggregator<K> {
    pub fn new() -> Self {
        Self {
            states: BTreeMap::new(),
        }
    }

    /// Fold `value` into the state for `key`, creating it on first sight.
    pub fn observe(&mut self, key: K, value: f64) {
        self.states.entry(key).or_default().observe(value);
    }

    /// Fold every observation from `observations`.
    pub fn extend<I>(&mut self, observations: I)
    where
        I: IntoIterator<Item = Observation<K>>,
    {
        for obs in observations {
            self.observe(obs.key, obs.value);
        }
    }

    /// Combine another partial aggregate into this one, key by key.
    pub fn merge(&mut self, other: &RunningAggregator<K>)
    where
        K: Clone,
    {
        for (key, state) in &other.states {
            match self.states.get_mut(key) {
                Some(existing) => existing.merge(state),
                None => {
                    self.states.insert(key.clone(), state.clone());
                }
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&RunningState> {
        self.states.get(key)
    }

    /// Number of distinct keys observed.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Total observations folded in across all keys.
    pub fn observation_count(&self) -> u64 {
        self.states.values().map(|s| s.count).sum()
    }

    /// Summaries for every key, in ascending key order.
    ///
    /// Does not mutate the aggregator and may be called any number of times.
    pub fn finalize(&self) -> BTreeMap<K, Summary>
    where
        K: Clone,
    {
        self.states
            .iter()
            .filter_map(|(key, state)| {
                SummaryCalculator::summarize(state).map(|summary| (key.clone(), summary))
            })
            .collect()
    }
}

// ── CompoundAggregator ────────────────────────────────────────────────────────

/// Running statistics keyed by event name, then by numeric bucket.
#[derive(Debug, Clone, Default)]
pub struct CompoundAggregator {
    groups: BTreeMap<String, RunningAggregator<u64>>,
}

impl CompoundAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `value` into the `(outer, inner)` state, creating either level on
    /// first sight.
    pub fn observe(&mut self, outer: &str, inner: u64, value: f64) {
        match self.groups.get_mut(outer) {
            Some(group) => group.observe(inner, value),
            None => {
                let mut group = RunningAggregator::new();
                group.observe(inner, value);
                self.groups.insert(outer.to_string(), group);
            }
        }
    }

    pub fn observe_key(&mut self, key: &CompoundKey, value: f64) {
        self.observe(&key.outer, key.inner, value);
    }

    pub fn extend<I>(&mut self, observations: I)
    where
        I: IntoIterator<Item = Observation<CompoundKey>>,
    {
        for obs in observations {
            self.observe_key(&obs.key, obs.value);
        }
    }

    pub fn merge(&mut self, other: &CompoundAggregator) {
        for (outer, group) in &other.groups {
            self.groups.entry(outer.clone()).or_default().merge(group);
        }
    }

    pub fn get(&self, outer: &str, inner: u64) -> Option<&RunningState> {
        self.groups.get(outer).and_then(|g| g.get(&inner))
    }

    /// Number of distinct `(outer, inner)` pairs.
    pub fn len(&self) -> usize {
        self.groups.values().map(|g| g.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn observation_count(&self) -> u64 {
        self.groups.values().map(|g| g.observation_count()).sum()
    }

    /// Nested summaries, outer and inner keys both ascending.
    pub fn finalize(&self) -> BTreeMap<String, BTreeMap<u64, Summary>> {
        self.groups
            .iter()
            .map(|(outer, group)| (outer.clone(), group.finalize()))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
