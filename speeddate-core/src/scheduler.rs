/// Greedy round construction.
///
/// Each attempt owns a private pool of weighted valid pairs. Rounds are filled
/// table by table with the first pooled pair, in the active weight order, that
/// shares nobody with the pairs already seated in the round.
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::types::{Pair, Round, Schedule};
use crate::weighting::WeightingStrategy;

/// Which end of the weight order a table is filled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMode {
    Min,
    Max,
}

impl SelectionMode {
    fn flipped(self) -> Self {
        match self {
            SelectionMode::Min => SelectionMode::Max,
            SelectionMode::Max => SelectionMode::Min,
        }
    }
}

/// Selection policy for one scheduling attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionPolicy {
    FixedMin,
    FixedMax,
    /// Min for the first table of each round, then flips after every table.
    AlternatingFromMin,
    /// Max for the first table of each round, then flips after every table.
    AlternatingFromMax,
}

impl SelectionPolicy {
    pub const ALL: [SelectionPolicy; 4] = [
        SelectionPolicy::FixedMin,
        SelectionPolicy::FixedMax,
        SelectionPolicy::AlternatingFromMin,
        SelectionPolicy::AlternatingFromMax,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SelectionPolicy::FixedMin => "min",
            SelectionPolicy::FixedMax => "max",
            SelectionPolicy::AlternatingFromMin => "alternating-min",
            SelectionPolicy::AlternatingFromMax => "alternating-max",
        }
    }

    pub fn initial_mode(&self) -> SelectionMode {
        match self {
            SelectionPolicy::FixedMin | SelectionPolicy::AlternatingFromMin => SelectionMode::Min,
            SelectionPolicy::FixedMax | SelectionPolicy::AlternatingFromMax => SelectionMode::Max,
        }
    }

    pub fn alternates(&self) -> bool {
        matches!(
            self,
            SelectionPolicy::AlternatingFromMin | SelectionPolicy::AlternatingFromMax
        )
    }
}

/// Pool of unseated pairs with both weight orders precomputed.
///
/// Walking `ascending` front to back visits the lightest tier first, then the
/// next heavier tier, and so on; `descending` does the reverse. Both sorts
/// are stable over generation order, so ties resolve to the pair the
/// round-robin produced first.
struct PairPool {
    pairs: Vec<Pair>,
    seated: Vec<bool>,
    ascending: Vec<usize>,
    descending: Vec<usize>,
    remaining: usize,
}

impl PairPool {
    fn new(pairs: Vec<Pair>) -> Self {
        let mut ascending: Vec<usize> = (0..pairs.len()).collect();
        ascending.sort_by_key(|&i| pairs[i].weight);
        let mut descending: Vec<usize> = (0..pairs.len()).collect();
        descending.sort_by_key(|&i| std::cmp::Reverse(pairs[i].weight));

        let remaining = pairs.len();
        PairPool {
            seated: vec![false; pairs.len()],
            pairs,
            ascending,
            descending,
            remaining,
        }
    }

    fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Take the first unseated pair, in `mode` order, that does not clash
    /// with `round`.
    fn take_next(&mut self, mode: SelectionMode, round: &Round) -> Option<Pair> {
        let order = match mode {
            SelectionMode::Min => &self.ascending,
            SelectionMode::Max => &self.descending,
        };
        let found = order
            .iter()
            .copied()
            .find(|&i| !self.seated[i] && !round.clashes_with(&self.pairs[i]))?;

        self.seated[found] = true;
        self.remaining -= 1;
        Some(self.pairs[found])
    }
}

/// Seat every valid pair into rounds of at most `tables` pairs.
///
/// `pairs` must already be filtered and weighted; invalid entries are
/// ignored. The input is copied, never modified, so attempts cannot affect
/// each other. A round that seats nobody while pairs remain is reported as
/// `Error::SchedulingStall` instead of looping or dropping pairs.
pub fn schedule_rounds(
    pairs: &[Pair],
    tables: usize,
    weighting: WeightingStrategy,
    selection: SelectionPolicy,
) -> Result<Schedule> {
    let pool_pairs: Vec<Pair> = pairs.iter().filter(|p| p.valid).copied().collect();
    let expected = pool_pairs.len();
    let mut pool = PairPool::new(pool_pairs);
    let mut schedule = Schedule::empty(tables);

    if pool.is_empty() {
        return Ok(schedule);
    }
    if tables == 0 {
        return Err(Error::NoTables { pairs: expected });
    }

    while !pool.is_empty() {
        let round = next_round(&mut pool, tables, weighting, selection, schedule.rounds.len() + 1)?;
        schedule.rounds.push(round);
    }
    check_complete(expected, &schedule)?;

    debug!(
        weighting = weighting.label(),
        selection = selection.label(),
        tables,
        rounds = schedule.round_count(),
        "attempt finished"
    );
    Ok(schedule)
}

/// Fill one round from the pool. With at least one table the first pick
/// never clashes, so an empty round means the pool lost track of its pairs.
fn next_round(
    pool: &mut PairPool,
    tables: usize,
    weighting: WeightingStrategy,
    selection: SelectionPolicy,
    round_number: usize,
) -> Result<Round> {
    let mut round = Round::default();
    let mut mode = selection.initial_mode();

    while round.len() < tables && !pool.is_empty() {
        let Some(pair) = pool.take_next(mode, &round) else {
            break;
        };
        trace!(index = pair.index, weight = pair.weight, ?mode, "seated pair");
        round.pairs.push(pair);
        if selection.alternates() {
            mode = mode.flipped();
        }
    }

    if round.is_empty() {
        return Err(Error::SchedulingStall {
            weighting,
            selection,
            round: round_number,
            remaining: pool.remaining,
        });
    }
    Ok(round)
}

/// Every pooled pair must end up in exactly one round.
fn check_complete(expected: usize, schedule: &Schedule) -> Result<()> {
    let scheduled = schedule.seated_pairs();
    if scheduled != expected {
        return Err(Error::IncompleteSchedule { expected, scheduled });
    }
    Ok(())
}
