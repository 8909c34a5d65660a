/// Errors surfaced by the scheduling engine.
///
/// Input shape problems are reported by `Roster::new` before any pairing
/// starts. The scheduling variants are internal invariant failures: they are
/// returned as values so a broken schedule is never handed back silently.
use thiserror::Error;

use crate::scheduler::SelectionPolicy;
use crate::weighting::WeightingStrategy;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("participant at position {position} has an empty name")]
    EmptyName { position: usize },
    #[error("duplicate participant name \"{0}\"")]
    DuplicateName(String),
    #[error("table count is zero but {pairs} valid pairs need seating")]
    NoTables { pairs: usize },
    #[error(
        "scheduling stalled in round {round} ({weighting:?} weights, {selection:?} selection): \
         {remaining} pairs could not be seated"
    )]
    SchedulingStall {
        weighting: WeightingStrategy,
        selection: SelectionPolicy,
        round: usize,
        remaining: usize,
    },
    #[error("schedule seated {scheduled} pairs but {expected} valid pairs exist")]
    IncompleteSchedule { expected: usize, scheduled: usize },
}

pub type Result<T> = core::result::Result<T, Error>;
