//! Group-by accumulation shared by every summary
//!
//! Groups are kept in a `BTreeMap`, so results come out ordered by key
//! (partner id, level rank or calendar date).

use std::collections::BTreeMap;

/// Aggregation type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AggregateType {
    Count,
    Sum,
    Avg,
}

/// Internal state for an aggregator
#[derive(Debug, Clone, Copy)]
enum AggregatorState {
    Count(u64),
    Sum(f64),
    Avg { sum: f64, count: u64 },
}

impl AggregatorState {
    fn new(func: AggregateType) -> Self {
        match func {
            AggregateType::Count => AggregatorState::Count(0),
            AggregateType::Sum => AggregatorState::Sum(0.0),
            AggregateType::Avg => AggregatorState::Avg { sum: 0.0, count: 0 },
        }
    }

    fn update(&mut self, value: f64) {
        match self {
            AggregatorState::Count(c) => *c += 1,
            AggregatorState::Sum(s) => *s += value,
            AggregatorState::Avg { sum, count } => {
                *sum += value;
                *count += 1;
            }
        }
    }

    fn result(&self) -> f64 {
        match self {
            AggregatorState::Count(c) => *c as f64,
            AggregatorState::Sum(s) => *s,
            AggregatorState::Avg { sum, count } => {
                if *count == 0 {
                    0.0
                } else {
                    *sum / *count as f64
                }
            }
        }
    }
}

/// GROUP BY key with one aggregator per column
#[derive(Debug, Clone)]
pub struct GroupedAggregate<K: Ord> {
    funcs: Vec<AggregateType>,
    groups: BTreeMap<K, Vec<AggregatorState>>,
}

impl<K: Ord> GroupedAggregate<K> {
    pub fn new(funcs: &[AggregateType]) -> Self {
        Self {
            funcs: funcs.to_vec(),
            groups: BTreeMap::new(),
        }
    }

    /// Feed one row. `values` is aligned with the aggregate columns; for
    /// `Count` columns the value is ignored.
    pub fn update(&mut self, key: K, values: &[f64]) {
        let funcs = &self.funcs;
        let states = self
            .groups
            .entry(key)
            .or_insert_with(|| funcs.iter().map(|f| AggregatorState::new(*f)).collect());
        for (state, value) in states.iter_mut().zip(values.iter().chain(std::iter::repeat(&0.0))) {
            state.update(*value);
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in key order with one result per aggregate column
    pub fn finish(self) -> Vec<(K, Vec<f64>)> {
        self.groups
            .into_iter()
            .map(|(key, states)| (key, states.iter().map(AggregatorState::result).collect()))
            .collect()
    }
}
