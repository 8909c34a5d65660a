/// Scheduling engine orchestrator.
///
/// Pure computation: no async, no IO. The caller hands over a validated
/// `Roster`; the engine generates and filters the round-robin pairs once, then
/// runs every weighting × selection attempt on private copies and keeps the
/// best schedule.
use tracing::debug;

use crate::constants::{ATTEMPTS_PER_TABLE_COUNT, MIN_PLANNED_TABLES};
use crate::error::Result;
use crate::pairing::{filter_compatible, generate_round_robin_pairs};
use crate::scheduler::{schedule_rounds, SelectionPolicy};
use crate::types::{Assignment, Itinerary, Pair, Roster, Schedule};
use crate::weighting::WeightingStrategy;

/// Configuration for the scheduling engine.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Requested table count. `None` = as many as the roster can fill.
    pub tables: Option<usize>,
    /// Move fuller rounds to the front of each attempt before comparing.
    pub order_rounds_by_size: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tables: None,
            order_rounds_by_size: true,
        }
    }
}

/// Table count actually used: floor(n / 2), or the request if smaller.
pub fn effective_tables(num_participants: usize, requested: Option<usize>) -> usize {
    let max_tables = num_participants / 2;
    match requested {
        Some(t) => t.min(max_tables),
        None => max_tables,
    }
}

/// One finished scheduling attempt.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attempt {
    pub weighting: WeightingStrategy,
    pub selection: SelectionPolicy,
    pub schedule: Schedule,
}

/// The chosen schedule for one table count, with everyone's itinerary.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    pub tables: usize,
    pub weighting: WeightingStrategy,
    pub selection: SelectionPolicy,
    pub schedule: Schedule,
    /// One entry per roster participant, in roster order.
    pub itineraries: Vec<Itinerary>,
}

/// Two views of the same event.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableOptions {
    /// Schedule for the full table count.
    pub most_tables: Plan,
    /// Fewest tables that still need no more rounds than any other option.
    pub most_efficient: Plan,
}

pub struct SchedulingEngine {
    roster: Roster,
    /// Round-robin output after compatibility filtering, filler pairs included.
    pairs: Vec<Pair>,
    config: EngineConfig,
}

impl SchedulingEngine {
    pub fn new(roster: Roster, config: EngineConfig) -> Self {
        let mut pairs = generate_round_robin_pairs(roster.len());
        filter_compatible(roster.participants(), &mut pairs);

        debug!(
            participants = roster.len(),
            generated = pairs.len(),
            valid = pairs.iter().filter(|p| p.valid).count(),
            "pairs prepared"
        );

        SchedulingEngine {
            roster,
            pairs,
            config,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// All generated pairs, including invalid and filler pairs.
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn valid_pair_count(&self) -> usize {
        self.pairs.iter().filter(|p| p.valid).count()
    }

    pub fn effective_tables(&self) -> usize {
        effective_tables(self.roster.len(), self.config.tables)
    }

    /// Run every weighting × selection combination for `tables` tables.
    ///
    /// Attempts come back weighting-major, in `ALL` order. Each strategy gets
    /// its own weighted copy of the pairs; the scheduler copies again per
    /// attempt, so no attempt sees another's pool.
    pub fn run_attempts(&self, tables: usize) -> Result<Vec<Attempt>> {
        let mut attempts = Vec::with_capacity(ATTEMPTS_PER_TABLE_COUNT);
        for weighting in WeightingStrategy::ALL {
            let mut weighted = self.pairs.clone();
            weighting.assign_weights(&mut weighted);

            for selection in SelectionPolicy::ALL {
                let mut schedule = schedule_rounds(&weighted, tables, weighting, selection)?;
                if self.config.order_rounds_by_size {
                    schedule.sort_rounds_by_size();
                }
                attempts.push(Attempt {
                    weighting,
                    selection,
                    schedule,
                });
            }
        }
        Ok(attempts)
    }

    /// Best schedule for exactly `tables` tables (already clamped by caller).
    pub fn plan_for(&self, tables: usize) -> Result<Plan> {
        let attempts = self.run_attempts(tables)?;
        let best = select_best(attempts).unwrap_or_else(|| Attempt {
            weighting: WeightingStrategy::ALL[0],
            selection: SelectionPolicy::ALL[0],
            schedule: Schedule::empty(tables),
        });

        debug!(
            tables,
            rounds = best.schedule.round_count(),
            penalty = best.schedule.empty_table_penalty(),
            weighting = best.weighting.label(),
            selection = best.selection.label(),
            "selected schedule"
        );

        let itineraries = build_itineraries(self.roster.len(), &best.schedule);
        Ok(Plan {
            tables,
            weighting: best.weighting,
            selection: best.selection,
            schedule: best.schedule,
            itineraries,
        })
    }

    /// Best schedule for the configured table count.
    pub fn plan(&self) -> Result<Plan> {
        self.plan_for(self.effective_tables())
    }

    /// Try the configured table count and then smaller ones, down to
    /// `MIN_PLANNED_TABLES`.
    ///
    /// A smaller count is only tried when the previous option actually filled
    /// more tables than that in some round; otherwise it would produce the
    /// same schedule again.
    pub fn plan_table_options(&self) -> Result<TableOptions> {
        let top = self.effective_tables();
        let mut options = vec![self.plan_for(top)?];

        let mut tables = top;
        while tables > MIN_PLANNED_TABLES {
            tables -= 1;
            let previous_busiest = options
                .last()
                .map(|plan| plan.schedule.busiest_round())
                .unwrap_or(0);
            if previous_busiest > tables {
                options.push(self.plan_for(tables)?);
            }
        }

        let fewest_rounds = options
            .iter()
            .map(|plan| plan.schedule.round_count())
            .min()
            .unwrap_or(0);
        let most_efficient_idx = options
            .iter()
            .rposition(|plan| plan.schedule.round_count() == fewest_rounds)
            .unwrap_or(0);

        debug!(
            options = options.len(),
            most_tables = top,
            most_efficient = options[most_efficient_idx].tables,
            "table options planned"
        );

        let most_efficient = options[most_efficient_idx].clone();
        let most_tables = options.swap_remove(0);
        Ok(TableOptions {
            most_tables,
            most_efficient,
        })
    }
}

/// Pick the attempt with the fewest rounds; break ties by the lowest
/// `Schedule::empty_table_penalty`, then by position in `attempts`.
pub fn select_best(attempts: Vec<Attempt>) -> Option<Attempt> {
    let fewest_rounds = attempts.iter().map(|a| a.schedule.round_count()).min()?;

    let mut best: Option<(usize, Attempt)> = None;
    for attempt in attempts {
        if attempt.schedule.round_count() != fewest_rounds {
            continue;
        }
        let penalty = attempt.schedule.empty_table_penalty();
        let better = match &best {
            Some((best_penalty, _)) => penalty < *best_penalty,
            None => true,
        };
        if better {
            best = Some((penalty, attempt));
        }
    }
    best.map(|(_, attempt)| attempt)
}

/// Per-participant seatings, in round and table order.
///
/// Returns `num_participants` itineraries indexed like the roster. Filler
/// seats never appear in a schedule, and would be skipped if they did.
pub fn build_itineraries(num_participants: usize, schedule: &Schedule) -> Vec<Itinerary> {
    let mut itineraries: Vec<Itinerary> = (0..num_participants)
        .map(|participant| Itinerary {
            participant,
            assignments: Vec::new(),
        })
        .collect();

    for (round, r) in schedule.rounds.iter().enumerate() {
        for (table, pair) in r.pairs.iter().enumerate() {
            let Some((a, b)) = pair.people() else {
                continue;
            };
            if let Some(it) = itineraries.get_mut(a) {
                it.assignments.push(Assignment { round, table, partner: b });
            }
            if let Some(it) = itineraries.get_mut(b) {
                it.assignments.push(Assignment { round, table, partner: a });
            }
        }
    }
    itineraries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::{Gender, Interest, Participant, ParticipantRecord, Seat};
    use crate::types::Round;
    use std::collections::HashSet;

    fn open_person(name: &str) -> Participant {
        Participant::new(
            name,
            Gender { woman: true, man: false, nonbinary: false },
            Interest { women: true, men: true },
        )
    }

    fn open_roster(n: usize) -> Roster {
        Roster::from_participants((0..n).map(|i| open_person(&format!("p{i}"))).collect()).unwrap()
    }

    fn random_roster(n: usize, seed: u64) -> Roster {
        use rand::{rngs::SmallRng, Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(seed);
        let records: Vec<ParticipantRecord> = (0..n)
            .map(|i| ParticipantRecord {
                name: format!("p{i}"),
                is_woman: rng.random_bool(0.5),
                is_man: rng.random_bool(0.5),
                is_nonbinary: rng.random_bool(0.2),
                dates_women: rng.random_bool(0.6),
                dates_men: rng.random_bool(0.6),
            })
            .collect();
        Roster::new(&records).unwrap()
    }

    fn check_schedule(engine: &SchedulingEngine, schedule: &Schedule) {
        for (r, round) in schedule.rounds.iter().enumerate() {
            let mut seen = HashSet::new();
            for pair in &round.pairs {
                assert!(seen.insert(pair.first) && seen.insert(pair.second), "clash in round {r}");
            }
            assert!(round.len() <= schedule.tables);
        }

        let mut expected: Vec<(Seat, Seat)> = engine.pairs().iter().filter(|p| p.valid).map(Pair::key).collect();
        let mut scheduled: Vec<(Seat, Seat)> = schedule.iter_pairs().map(Pair::key).collect();
        expected.sort();
        scheduled.sort();
        assert_eq!(expected, scheduled, "scheduled pairs differ from valid pairs");
    }

    #[test]
    fn test_effective_tables_clamps() {
        assert_eq!(effective_tables(10, None), 5);
        assert_eq!(effective_tables(11, None), 5);
        assert_eq!(effective_tables(10, Some(3)), 3);
        assert_eq!(effective_tables(10, Some(9)), 5);
        assert_eq!(effective_tables(1, None), 0);
    }

    #[test]
    fn test_engine_clamps_requested_tables() {
        let engine = SchedulingEngine::new(open_roster(6), EngineConfig { tables: Some(10), ..Default::default() });
        assert_eq!(engine.effective_tables(), 3);
        let plan = engine.plan().unwrap();
        assert_eq!(plan.tables, 3);
        assert_eq!(plan.schedule.tables, 3);
    }

    #[test]
    fn test_four_compatible_people_two_tables() {
        let engine = SchedulingEngine::new(open_roster(4), EngineConfig { tables: Some(2), ..Default::default() });
        assert_eq!(engine.pairs().len(), 6);
        assert_eq!(engine.valid_pair_count(), 6);

        let plan = engine.plan().unwrap();
        assert_eq!(plan.schedule.round_count(), 3);
        assert!(plan.schedule.rounds.iter().all(|r| r.len() == 2));
        assert_eq!(plan.schedule.empty_table_penalty(), 0);
        check_schedule(&engine, &plan.schedule);
    }

    #[test]
    fn test_five_people_sit_out_once_each() {
        let engine = SchedulingEngine::new(open_roster(5), EngineConfig::default());
        assert_eq!(engine.pairs().len(), 15);
        assert_eq!(engine.valid_pair_count(), 10);

        let plan = engine.plan().unwrap();
        assert_eq!(plan.tables, 2);
        assert!(plan.schedule.round_count() >= 5);
        check_schedule(&engine, &plan.schedule);

        assert_eq!(plan.itineraries.len(), 5);
        for it in &plan.itineraries {
            assert_eq!(it.assignments.len(), 4, "participant {}", it.participant);
        }
    }

    #[test]
    fn test_degenerate_rosters_give_empty_schedules() {
        for n in 0..2 {
            let engine = SchedulingEngine::new(open_roster(n), EngineConfig::default());
            let plan = engine.plan().unwrap();
            assert_eq!(plan.schedule.round_count(), 0);
            assert_eq!(plan.itineraries.len(), n);
        }
    }

    #[test]
    fn test_nobody_compatible_gives_empty_schedule() {
        let men: Vec<Participant> = (0..4)
            .map(|i| {
                Participant::new(
                    format!("m{i}"),
                    Gender { woman: false, man: true, nonbinary: false },
                    Interest { women: true, men: false },
                )
            })
            .collect();
        let engine = SchedulingEngine::new(Roster::from_participants(men).unwrap(), EngineConfig::default());
        assert_eq!(engine.valid_pair_count(), 0);
        let plan = engine.plan().unwrap();
        assert_eq!(plan.schedule.round_count(), 0);
        assert!(plan.itineraries.iter().all(|it| it.assignments.is_empty()));
    }

    #[test]
    fn test_explicit_zero_tables_is_rejected() {
        let engine = SchedulingEngine::new(open_roster(4), EngineConfig { tables: Some(0), ..Default::default() });
        assert!(engine.plan().is_err());
    }

    #[test]
    fn test_run_attempts_covers_cross_product() {
        let engine = SchedulingEngine::new(open_roster(6), EngineConfig::default());
        let attempts = engine.run_attempts(3).unwrap();
        assert_eq!(attempts.len(), ATTEMPTS_PER_TABLE_COUNT);
        let combos: HashSet<(WeightingStrategy, SelectionPolicy)> =
            attempts.iter().map(|a| (a.weighting, a.selection)).collect();
        assert_eq!(combos.len(), 12);
        assert_eq!(attempts[0].weighting, WeightingStrategy::BusiestSum);
        assert_eq!(attempts[0].selection, SelectionPolicy::FixedMin);
        assert_eq!(attempts[4].weighting, WeightingStrategy::LessBusyMember);
    }

    fn attempt(rounds: Vec<usize>, tables: usize, selection: SelectionPolicy) -> Attempt {
        let p = Pair::new(Seat::Person(0), Seat::Person(1), 0);
        Attempt {
            weighting: WeightingStrategy::BusiestSum,
            selection,
            schedule: Schedule {
                tables,
                rounds: rounds.into_iter().map(|n| Round { pairs: vec![p; n] }).collect(),
            },
        }
    }

    #[test]
    fn test_select_best_prefers_fewer_rounds() {
        let attempts = vec![
            attempt(vec![2, 2, 2], 2, SelectionPolicy::FixedMin),
            attempt(vec![2, 2], 2, SelectionPolicy::FixedMax),
        ];
        let best = select_best(attempts).unwrap();
        assert_eq!(best.selection, SelectionPolicy::FixedMax);
    }

    #[test]
    fn test_select_best_breaks_ties_with_penalty_then_order() {
        let attempts = vec![
            attempt(vec![1, 2], 2, SelectionPolicy::FixedMin), // penalty 2
            attempt(vec![2, 1], 2, SelectionPolicy::FixedMax), // penalty 1
            attempt(vec![2, 1], 2, SelectionPolicy::AlternatingFromMin), // penalty 1, later
        ];
        let best = select_best(attempts).unwrap();
        assert_eq!(best.selection, SelectionPolicy::FixedMax);
        assert!(select_best(Vec::new()).is_none());
    }

    #[test]
    fn test_build_itineraries_follows_table_order() {
        let schedule = Schedule {
            tables: 2,
            rounds: vec![
                Round { pairs: vec![Pair::new(Seat::Person(0), Seat::Person(1), 0), Pair::new(Seat::Person(2), Seat::Person(3), 1)] },
                Round { pairs: vec![Pair::new(Seat::Person(2), Seat::Person(0), 2)] },
            ],
        };
        let its = build_itineraries(4, &schedule);
        assert_eq!(
            its[0].assignments,
            vec![
                Assignment { round: 0, table: 0, partner: 1 },
                Assignment { round: 1, table: 0, partner: 2 },
            ]
        );
        assert_eq!(its[3].assignments, vec![Assignment { round: 0, table: 1, partner: 2 }]);
        assert_eq!(its[2].assignments.len(), 2);
    }

    #[test]
    fn test_random_rosters_keep_invariants() {
        for seed in 0..40u64 {
            let n = 2 + (seed as usize % 15);
            let roster = random_roster(n, seed);
            let engine = SchedulingEngine::new(roster, EngineConfig::default());
            let tables = engine.effective_tables();

            let attempts = engine.run_attempts(tables).unwrap();
            let fewest = attempts.iter().map(|a| a.schedule.round_count()).min().unwrap();
            for a in &attempts {
                check_schedule(&engine, &a.schedule);
            }

            let plan = engine.plan().unwrap();
            assert_eq!(plan.schedule.round_count(), fewest, "seed {seed}");
            check_schedule(&engine, &plan.schedule);

            let seats: usize = plan.itineraries.iter().map(|it| it.assignments.len()).sum();
            assert_eq!(seats, 2 * engine.valid_pair_count(), "seed {seed}");
            for it in &plan.itineraries {
                let rounds: Vec<usize> = it.assignments.iter().map(|a| a.round).collect();
                let mut sorted = rounds.clone();
                sorted.sort();
                sorted.dedup();
                assert_eq!(rounds, sorted, "itinerary out of order or double-booked, seed {seed}");
            }
        }
    }

    #[test]
    fn test_ordering_rounds_by_size_keeps_round_count() {
        for seed in 100..120u64 {
            let sorted = SchedulingEngine::new(random_roster(11, seed), EngineConfig::default());
            let unsorted = SchedulingEngine::new(
                random_roster(11, seed),
                EngineConfig { order_rounds_by_size: false, ..Default::default() },
            );
            let a = sorted.plan().unwrap();
            let b = unsorted.plan().unwrap();
            assert_eq!(a.schedule.round_count(), b.schedule.round_count(), "seed {seed}");
            let sizes: Vec<usize> = a.schedule.rounds.iter().map(Round::len).collect();
            assert!(sizes.windows(2).all(|w| w[0] >= w[1]), "seed {seed}: {sizes:?}");
        }
    }

    #[test]
    fn test_table_options() {
        let engine = SchedulingEngine::new(open_roster(10), EngineConfig::default());
        let options = engine.plan_table_options().unwrap();
        assert_eq!(options.most_tables.tables, 5);
        assert!(options.most_efficient.tables <= 5);
        assert!(options.most_efficient.tables >= MIN_PLANNED_TABLES);
        assert!(options.most_efficient.schedule.round_count() <= options.most_tables.schedule.round_count());
        check_schedule(&engine, &options.most_efficient.schedule);
    }

    #[test]
    fn test_table_options_small_roster() {
        let engine = SchedulingEngine::new(open_roster(4), EngineConfig::default());
        let options = engine.plan_table_options().unwrap();
        assert_eq!(options.most_tables.tables, 2);
        assert_eq!(options.most_efficient.tables, 2);
    }
}
