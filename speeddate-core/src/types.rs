use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::participant::{Participant, ParticipantRecord, Seat};

/// A validated, ordered roster. Names are unique and non-empty.
///
/// Roster order is significant: it seeds the round-robin circle, and every
/// `Seat::Person(i)` in pairs and schedules indexes into it.
#[derive(Debug, Clone)]
pub struct Roster {
    participants: Vec<Participant>,
    name_to_idx: HashMap<String, usize>,
}

impl Roster {
    pub fn new(records: &[ParticipantRecord]) -> Result<Self> {
        let participants: Vec<Participant> = records.iter().map(Participant::from).collect();
        Self::from_participants(participants)
    }

    pub fn from_participants(participants: Vec<Participant>) -> Result<Self> {
        let mut name_to_idx = HashMap::with_capacity(participants.len());
        for (idx, p) in participants.iter().enumerate() {
            if p.name.is_empty() {
                return Err(Error::EmptyName { position: idx });
            }
            if name_to_idx.insert(p.name.clone(), idx).is_some() {
                return Err(Error::DuplicateName(p.name.clone()));
            }
        }
        Ok(Roster {
            participants,
            name_to_idx,
        })
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn get(&self, idx: usize) -> Option<&Participant> {
        self.participants.get(idx)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_idx.get(name).copied()
    }

    /// Display name for a seat. The filler has no name.
    pub fn name(&self, seat: Seat) -> Option<&str> {
        seat.person()
            .and_then(|idx| self.participants.get(idx))
            .map(|p| p.name.as_str())
    }
}

/// A candidate two-person match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pair {
    pub first: Seat,
    pub second: Seat,
    /// Position in round-robin output. Used as the tie-break order.
    pub index: usize,
    /// Cleared by the compatibility filter; never set back to true.
    pub valid: bool,
    /// Scheduling priority, set by a weighting pass.
    pub weight: usize,
}

impl Pair {
    pub fn new(first: Seat, second: Seat, index: usize) -> Self {
        debug_assert!(first != second, "a pair needs two distinct seats");
        Pair {
            first,
            second,
            index,
            valid: true,
            weight: 0,
        }
    }

    pub fn contains(&self, seat: Seat) -> bool {
        self.first == seat || self.second == seat
    }

    /// True if someone sits in both pairs.
    pub fn overlaps(&self, other: &Pair) -> bool {
        other.contains(self.first) || other.contains(self.second)
    }

    pub fn involves_bye(&self) -> bool {
        self.first == Seat::Bye || self.second == Seat::Bye
    }

    /// Both seats as roster indices, or `None` for a filler pair.
    pub fn people(&self) -> Option<(usize, usize)> {
        Some((self.first.person()?, self.second.person()?))
    }

    /// Order-independent key, smaller roster index first.
    pub fn key(&self) -> (Seat, Seat) {
        if self.first <= self.second {
            (self.first, self.second)
        } else {
            (self.second, self.first)
        }
    }
}

/// One time slot. Table `i` hosts `pairs[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round {
    pub pairs: Vec<Pair>,
}

impl Round {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// True if anyone seated in this round also sits in `pair`.
    pub fn clashes_with(&self, pair: &Pair) -> bool {
        self.pairs.iter().any(|seated| seated.overlaps(pair))
    }
}

/// Ordered rounds built for a fixed number of tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    pub tables: usize,
    pub rounds: Vec<Round>,
}

impl Schedule {
    pub fn empty(tables: usize) -> Self {
        Schedule {
            tables,
            rounds: Vec::new(),
        }
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn seated_pairs(&self) -> usize {
        self.rounds.iter().map(Round::len).sum()
    }

    /// Most pairs seated in any single round.
    pub fn busiest_round(&self) -> usize {
        self.rounds.iter().map(Round::len).max().unwrap_or(0)
    }

    /// Empty seats weighted by how early they occur.
    ///
    /// Round `i` of `L` contributes `(tables - seated) * (L - i)`, so an empty
    /// table in round one costs more than one in the final round.
    pub fn empty_table_penalty(&self) -> usize {
        let len = self.rounds.len();
        self.rounds
            .iter()
            .enumerate()
            .map(|(i, round)| self.tables.saturating_sub(round.len()) * (len - i))
            .sum()
    }

    /// Reorder rounds largest-first. Stable, so equally sized rounds keep
    /// their relative order.
    pub fn sort_rounds_by_size(&mut self) {
        self.rounds.sort_by(|a, b| b.len().cmp(&a.len()));
    }

    pub fn iter_pairs(&self) -> impl Iterator<Item = &Pair> {
        self.rounds.iter().flat_map(|r| r.pairs.iter())
    }
}

/// A single seating: 0-based round and table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub round: usize,
    pub table: usize,
    /// Roster index of the person sitting opposite.
    pub partner: usize,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Round {}: Table {}", self.round + 1, self.table + 1)
    }
}

/// One participant's seatings in round order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    pub participant: usize,
    pub assignments: Vec<Assignment>,
}
