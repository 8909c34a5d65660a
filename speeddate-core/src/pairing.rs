/// Round-robin pair generation and compatibility filtering.
///
/// Generation works on roster positions only; who is compatible with whom is
/// decided afterwards by `filter_compatible`, which needs the participants.
use crate::participant::{seat_will_date, Participant, Seat};
use crate::types::Pair;

/// Generate every unordered pair of seats with the circle method.
///
/// An odd roster gets one `Seat::Bye` appended. With `n` padded seats there
/// are `n - 1` steps; each step pairs seat `i` with seat `n - 1 - i`, then
/// keeps seat 0 fixed and rotates the rest by one. Returns `n * (n - 1) / 2`
/// pairs in generation order, filler pairs included.
pub fn generate_round_robin_pairs(num_participants: usize) -> Vec<Pair> {
    if num_participants < 2 {
        return Vec::new();
    }

    let mut seats: Vec<Seat> = (0..num_participants).map(Seat::Person).collect();
    if seats.len() % 2 != 0 {
        seats.push(Seat::Bye);
    }
    let n = seats.len();

    let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
    for _ in 0..n - 1 {
        for i in 0..n / 2 {
            let index = pairs.len();
            pairs.push(Pair::new(seats[i], seats[n - 1 - i], index));
        }
        rotate(&mut seats);
    }
    pairs
}

/// `[s0, s1, ..., s(n-1)]` becomes `[s0, s(n-1), s1, ..., s(n-2)]`.
fn rotate(seats: &mut [Seat]) {
    if seats.len() > 2 {
        seats[1..].rotate_right(1);
    }
}

/// Mark pairs invalid unless both people would date each other.
///
/// Filler pairs always end up invalid. Pairs already invalid stay invalid, so
/// running this twice changes nothing.
pub fn filter_compatible(participants: &[Participant], pairs: &mut [Pair]) {
    for pair in pairs.iter_mut() {
        if !pair.valid {
            continue;
        }
        pair.valid = seat_will_date(participants, pair.first, pair.second)
            && seat_will_date(participants, pair.second, pair.first);
    }
}

/// Copies of the pairs that survived filtering, in generation order.
pub fn valid_pairs(pairs: &[Pair]) -> Vec<Pair> {
    pairs.iter().filter(|p| p.valid).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::{Gender, Interest};
    use std::collections::HashSet;

    fn everyone_dates_everyone(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| {
                Participant::new(
                    format!("p{i}"),
                    Gender { woman: true, man: false, nonbinary: false },
                    Interest { women: true, men: true },
                )
            })
            .collect()
    }

    #[test]
    fn test_round_robin_covers_every_pair_once() {
        for n in 2..=13 {
            let pairs = generate_round_robin_pairs(n);
            let padded = n + n % 2;
            assert_eq!(pairs.len(), padded * (padded - 1) / 2, "n = {n}");

            let real: Vec<(Seat, Seat)> = pairs.iter().filter(|p| !p.involves_bye()).map(Pair::key).collect();
            let unique: HashSet<(Seat, Seat)> = real.iter().copied().collect();
            assert_eq!(real.len(), n * (n - 1) / 2, "n = {n}");
            assert_eq!(unique.len(), real.len(), "duplicate pair for n = {n}");

            for p in &pairs {
                assert_ne!(p.first, p.second);
            }
        }
    }

    #[test]
    fn test_round_robin_four_people_order() {
        let pairs = generate_round_robin_pairs(4);
        let got: Vec<(usize, usize)> = pairs.iter().map(|p| p.people().unwrap()).collect();
        assert_eq!(got, vec![(0, 3), (1, 2), (0, 2), (3, 1), (0, 1), (2, 3)]);
        let indices: Vec<usize> = pairs.iter().map(|p| p.index).collect();
        assert_eq!(indices, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_round_robin_odd_roster_adds_one_bye_per_step() {
        let pairs = generate_round_robin_pairs(5);
        assert_eq!(pairs.len(), 15);
        assert_eq!(pairs.iter().filter(|p| p.involves_bye()).count(), 5);
    }

    #[test]
    fn test_round_robin_degenerate_rosters() {
        assert!(generate_round_robin_pairs(0).is_empty());
        assert!(generate_round_robin_pairs(1).is_empty());
        assert_eq!(generate_round_robin_pairs(2).len(), 1);
    }

    #[test]
    fn test_filter_drops_bye_pairs_only_when_all_compatible() {
        let people = everyone_dates_everyone(5);
        let mut pairs = generate_round_robin_pairs(5);
        filter_compatible(&people, &mut pairs);
        for p in &pairs {
            assert_eq!(p.valid, !p.involves_bye());
        }
        assert_eq!(valid_pairs(&pairs).len(), 10);
    }

    #[test]
    fn test_filter_needs_both_directions() {
        // 0 dates women only; 1 is a man who dates women.
        let people = vec![
            Participant::new("a", Gender { woman: false, man: true, nonbinary: false }, Interest { women: true, men: false }),
            Participant::new("b", Gender { woman: false, man: true, nonbinary: false }, Interest { women: true, men: false }),
        ];
        let mut pairs = generate_round_robin_pairs(2);
        filter_compatible(&people, &mut pairs);
        assert!(!pairs[0].valid);
    }

    #[test]
    fn test_filter_is_symmetric_in_pair_order() {
        let people = vec![
            Participant::new("w", Gender { woman: true, man: false, nonbinary: false }, Interest { women: false, men: true }),
            Participant::new("m", Gender { woman: false, man: true, nonbinary: false }, Interest { women: true, men: false }),
            Participant::new("n", Gender { woman: false, man: false, nonbinary: true }, Interest { women: false, men: false }),
        ];
        for a in 0..3 {
            for b in 0..3 {
                if a == b {
                    continue;
                }
                let mut forward = [Pair::new(Seat::Person(a), Seat::Person(b), 0)];
                let mut backward = [Pair::new(Seat::Person(b), Seat::Person(a), 0)];
                filter_compatible(&people, &mut forward);
                filter_compatible(&people, &mut backward);
                assert_eq!(forward[0].valid, backward[0].valid, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let people = vec![
            Participant::new("w", Gender { woman: true, man: false, nonbinary: false }, Interest { women: false, men: true }),
            Participant::new("m", Gender { woman: false, man: true, nonbinary: false }, Interest { women: true, men: false }),
            Participant::new("m2", Gender { woman: false, man: true, nonbinary: false }, Interest { women: true, men: false }),
        ];
        let mut pairs = generate_round_robin_pairs(3);
        filter_compatible(&people, &mut pairs);
        let once = pairs.clone();
        filter_compatible(&people, &mut pairs);
        assert_eq!(once, pairs);
    }
}
