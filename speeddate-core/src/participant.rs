/// Participant model and the directional compatibility predicate.
///
/// Pairs refer to participants through `Seat`, so the round-robin filler is a
/// separate variant and can never collide with a real name.
use std::fmt;

/// Gender categories a participant identifies with. Any combination is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gender {
    pub woman: bool,
    pub man: bool,
    pub nonbinary: bool,
}

impl Gender {
    /// Recorded as both binary categories, or as neither.
    pub fn is_outside_binary(&self) -> bool {
        self.woman == self.man
    }

}

/// Comma-separated list of the categories set, e.g. "woman, nonbinary".
impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if self.woman {
            parts.push("woman");
        }
        if self.man {
            parts.push("man");
        }
        if self.nonbinary {
            parts.push("nonbinary");
        }
        if parts.is_empty() {
            return f.write_str("unspecified");
        }
        f.write_str(&parts.join(", "))
    }
}

/// Who a participant wants to meet. Interest in nonbinary people is implied
/// for everyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interest {
    pub women: bool,
    pub men: bool,
}

impl Interest {
    pub fn has_binary_preference(&self) -> bool {
        self.women || self.men
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_binary_preference() {
            return f.write_str("nonbinary people only");
        }
        let mut parts = Vec::with_capacity(2);
        if self.women {
            parts.push("women");
        }
        if self.men {
            parts.push("men");
        }
        write!(f, "{} (incl. nonbinary)", parts.join(", "))
    }
}

/// Raw participant record as handed over by the roster parser. Every flag
/// is required; an all-false record would otherwise be open to everyone.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct ParticipantRecord {
    pub name: String,
    pub is_woman: bool,
    pub is_man: bool,
    pub is_nonbinary: bool,
    pub dates_women: bool,
    pub dates_men: bool,
}

/// One attendee. Immutable once the roster is built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub name: String,
    pub gender: Gender,
    pub interest: Interest,
}

impl Participant {
    pub fn new(name: impl Into<String>, gender: Gender, interest: Interest) -> Self {
        Participant {
            name: name.into(),
            gender,
            interest,
        }
    }

    /// Whether `self` would meet `other`. Directional: a pair needs both
    /// `a.will_date(b)` and `b.will_date(a)`.
    pub fn will_date(&self, other: &Participant) -> bool {
        if (self.interest.women && other.gender.woman) || (self.interest.men && other.gender.man) {
            return true;
        }
        // Both binary categories or neither: nonbinary, bigender, or a
        // roster entry with no category. All are open to everyone.
        if other.gender.is_outside_binary() {
            return true;
        }
        // Catches nonbinary people who also marked one binary category, for
        // participants who only date nonbinary people.
        other.gender.nonbinary && !self.interest.has_binary_preference()
    }
}

impl From<&ParticipantRecord> for Participant {
    fn from(record: &ParticipantRecord) -> Self {
        Participant {
            name: record.name.trim().to_string(),
            gender: Gender {
                woman: record.is_woman,
                man: record.is_man,
                nonbinary: record.is_nonbinary,
            },
            interest: Interest {
                women: record.dates_women,
                men: record.dates_men,
            },
        }
    }
}

/// A position in the round-robin circle: a roster index, or the filler used
/// to make an odd roster even.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Seat {
    Person(usize),
    Bye,
}

impl Seat {
    pub fn person(&self) -> Option<usize> {
        match self {
            Seat::Person(idx) => Some(*idx),
            Seat::Bye => None,
        }
    }
}

/// Directional compatibility between two seats. The filler is compatible
/// with nobody, and so is an index outside `participants`.
pub fn seat_will_date(participants: &[Participant], from: Seat, to: Seat) -> bool {
    let (Some(a), Some(b)) = (from.person(), to.person()) else {
        return false;
    };
    match (participants.get(a), participants.get(b)) {
        (Some(a), Some(b)) => a.will_date(b),
        _ => false,
    }
}
