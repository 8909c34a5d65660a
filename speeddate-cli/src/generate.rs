/// Random roster generator for trying the scheduler on larger events.
use rand::Rng;
use speeddate_core::ParticipantRecord;

const FIRST_NAMES: &[&str] = &[
    "Alex", "Billie", "Casey", "Dana", "Eli", "Frankie", "Gray", "Harper", "Indigo", "Jordan",
    "Kai", "Logan", "Morgan", "Noor", "Oakley", "Parker", "Quinn", "Riley", "Sage", "Taylor",
];

/// Build `count` participants with unique names.
///
/// Roughly 45% women, 45% men and 10% nonbinary (some of whom also mark a
/// binary category). Preferences lean towards the other binary gender, with
/// some bisexual, same-gender and nonbinary-only daters mixed in.
pub fn generate_roster(count: usize, rng: &mut impl Rng) -> Vec<ParticipantRecord> {
    (0..count)
        .map(|i| {
            let base = FIRST_NAMES[i % FIRST_NAMES.len()];
            let name = if i < FIRST_NAMES.len() {
                base.to_string()
            } else {
                format!("{base}{}", i / FIRST_NAMES.len() + 1)
            };

            let roll: f64 = rng.random();
            let (is_woman, is_man, is_nonbinary) = if roll < 0.45 {
                (true, false, false)
            } else if roll < 0.9 {
                (false, true, false)
            } else {
                let also_binary = rng.random_bool(0.3);
                (also_binary && rng.random_bool(0.5), false, true)
            };

            let pref: f64 = rng.random();
            let (dates_women, dates_men) = if pref < 0.65 {
                // Other binary gender; nonbinary participants get both.
                (!is_woman || is_nonbinary, !is_man || is_nonbinary)
            } else if pref < 0.85 {
                (true, true)
            } else if pref < 0.95 {
                (is_woman, is_man)
            } else {
                (false, false)
            };

            ParticipantRecord {
                name,
                is_woman,
                is_man,
                is_nonbinary,
                dates_women,
                dates_men,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};
    use speeddate_core::Roster;

    #[test]
    fn test_generated_names_are_unique() {
        let mut rng = SmallRng::seed_from_u64(7);
        let records = generate_roster(55, &mut rng);
        assert_eq!(records.len(), 55);
        assert!(Roster::new(&records).is_ok());
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = generate_roster(30, &mut SmallRng::seed_from_u64(42));
        let b = generate_roster(30, &mut SmallRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
