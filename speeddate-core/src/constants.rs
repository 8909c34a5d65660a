/// Smallest table count `plan_table_options` will try when looking for a
/// schedule that fits the same number of rounds into fewer tables.
///
/// Below three tables an event stops feeling like a room full of dates, and
/// the number of rounds grows quickly, so smaller counts are only used when
/// the roster itself cannot fill more.
pub const MIN_PLANNED_TABLES: usize = 3;

/// Number of scheduling attempts per table count: every weighting strategy
/// crossed with every selection policy.
pub const ATTEMPTS_PER_TABLE_COUNT: usize =
    crate::weighting::WeightingStrategy::ALL.len() * crate::scheduler::SelectionPolicy::ALL.len();
