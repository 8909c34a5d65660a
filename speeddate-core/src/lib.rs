/// speeddate-core: Pure-computation speed dating scheduler.
///
/// Roster → round-robin pairs → compatibility filter → weighted greedy rounds
/// → best of twelve attempts → per-person itineraries.
/// Never touches files or text: the caller brings a parsed roster.
///
/// Participants are identified by their position in the `Roster`. Names must
/// be unique; the roster rejects duplicates before any pairing happens.
///
/// # Quick start
///
/// ```rust
/// use speeddate_core::{EngineConfig, ParticipantRecord, Roster, SchedulingEngine};
///
/// let record = |name: &str, is_woman: bool| ParticipantRecord {
///     name: name.to_string(),
///     is_woman,
///     is_man: !is_woman,
///     is_nonbinary: false,
///     dates_women: !is_woman,
///     dates_men: is_woman,
/// };
/// let roster = Roster::new(&[
///     record("Ada", true),
///     record("Ben", false),
///     record("Cleo", true),
///     record("Dev", false),
/// ])?;
///
/// let engine = SchedulingEngine::new(roster, EngineConfig::default());
/// let plan = engine.plan()?;
///
/// for (i, round) in plan.schedule.rounds.iter().enumerate() {
///     for (t, pair) in round.pairs.iter().enumerate() {
///         let a = engine.roster().name(pair.first).unwrap_or("-");
///         let b = engine.roster().name(pair.second).unwrap_or("-");
///         println!("Round {} Table {}: {a} & {b}", i + 1, t + 1);
///     }
/// }
/// # Ok::<(), speeddate_core::Error>(())
/// ```

pub mod constants;
pub mod engine;
pub mod error;
pub mod pairing;
pub mod participant;
pub mod scheduler;
pub mod types;
pub mod weighting;

// Re-export primary public API at crate root.
pub use engine::{
    build_itineraries, effective_tables, select_best, Attempt, EngineConfig, Plan,
    SchedulingEngine, TableOptions,
};
pub use error::{Error, Result};
pub use pairing::{filter_compatible, generate_round_robin_pairs, valid_pairs};
pub use participant::{Gender, Interest, Participant, ParticipantRecord, Seat};
pub use scheduler::{schedule_rounds, SelectionMode, SelectionPolicy};
pub use types::{Assignment, Itinerary, Pair, Round, Roster, Schedule};
pub use weighting::WeightingStrategy;
