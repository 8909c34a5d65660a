/// Weighting strategies: how busy are the two people in a pair?
///
/// A participant's occurrence count is the number of valid pairs they sit in.
/// Weights are always recomputed from scratch over the current valid set.
use std::collections::HashMap;

use crate::participant::Seat;
use crate::types::Pair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeightingStrategy {
    /// Number of other valid pairs that clash with this one.
    BusiestSum,
    /// Occurrence count of the less busy member.
    LessBusyMember,
    /// Occurrence count of the busier member.
    MoreBusyMember,
}

impl WeightingStrategy {
    pub const ALL: [WeightingStrategy; 3] = [
        WeightingStrategy::BusiestSum,
        WeightingStrategy::LessBusyMember,
        WeightingStrategy::MoreBusyMember,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WeightingStrategy::BusiestSum => "busiest-sum",
            WeightingStrategy::LessBusyMember => "less-busy-member",
            WeightingStrategy::MoreBusyMember => "more-busy-member",
        }
    }

    /// Set `weight` on every valid pair. Invalid pairs are reset to 0.
    pub fn assign_weights(&self, pairs: &mut [Pair]) {
        let occurrences = count_occurrences(pairs);

        for pair in pairs.iter_mut() {
            if !pair.valid {
                pair.weight = 0;
                continue;
            }
            let a = occurrences.get(&pair.first).copied().unwrap_or(0);
            let b = occurrences.get(&pair.second).copied().unwrap_or(0);
            pair.weight = match self {
                // Each count includes this pair once. Two distinct people
                // share exactly one pair, so nothing else is counted twice.
                WeightingStrategy::BusiestSum => a.saturating_sub(1) + b.saturating_sub(1),
                WeightingStrategy::LessBusyMember => a.min(b),
                WeightingStrategy::MoreBusyMember => a.max(b),
            };
        }
    }
}

/// How many valid pairs each seat appears in.
pub fn count_occurrences(pairs: &[Pair]) -> HashMap<Seat, usize> {
    let mut counts = HashMap::new();
    for pair in pairs.iter().filter(|p| p.valid) {
        *counts.entry(pair.first).or_insert(0) += 1;
        *counts.entry(pair.second).or_insert(0) += 1;
    }
    counts
}
