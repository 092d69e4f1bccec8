//! Slot, Match, and Bracket: the rounds of a single-elimination bracket.

use crate::models::engine::BracketError;
use serde::{Deserialize, Serialize};

/// A position in a match: filled with an entrant name, or not (yet) filled.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum Slot {
    Filled(String),
    #[default]
    Empty,
}

impl Slot {
    pub fn filled(name: impl Into<String>) -> Self {
        Slot::Filled(name.into())
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Slot::Filled(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// Entrant name, if filled.
    pub fn name(&self) -> Option<&str> {
        match self {
            Slot::Filled(name) => Some(name),
            Slot::Empty => None,
        }
    }
}

impl From<Option<String>> for Slot {
    fn from(name: Option<String>) -> Self {
        name.map_or(Slot::Empty, Slot::Filled)
    }
}

/// Which row of a match: top (p1) or bottom (p2).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPosition {
    P1,
    P2,
}

impl SlotPosition {
    /// Slot a winner of `match_index` takes in the parent match (even → p1, odd → p2).
    pub fn for_parent_of(match_index: usize) -> Self {
        if match_index % 2 == 0 {
            SlotPosition::P1
        } else {
            SlotPosition::P2
        }
    }
}

/// Derived progress of a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Neither slot filled.
    Empty,
    /// At least one slot filled, no winner yet.
    Pending,
    /// Winner recorded.
    Decided,
}

/// A single match. `winner` is always Empty, equal to `p1`, or equal to `p2`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub p1: Slot,
    pub p2: Slot,
    pub winner: Slot,
}

impl Match {
    pub fn new(p1: Slot, p2: Slot) -> Self {
        Self {
            p1,
            p2,
            winner: Slot::Empty,
        }
    }

    pub fn slot(&self, position: SlotPosition) -> &Slot {
        match position {
            SlotPosition::P1 => &self.p1,
            SlotPosition::P2 => &self.p2,
        }
    }

    pub fn slot_mut(&mut self, position: SlotPosition) -> &mut Slot {
        match position {
            SlotPosition::P1 => &mut self.p1,
            SlotPosition::P2 => &mut self.p2,
        }
    }

    pub fn status(&self) -> MatchStatus {
        if self.winner.is_filled() {
            MatchStatus::Decided
        } else if self.p1.is_empty() && self.p2.is_empty() {
            MatchStatus::Empty
        } else {
            MatchStatus::Pending
        }
    }

    /// The lone occupant when exactly one slot is filled (a bye).
    pub fn bye_occupant(&self) -> Option<&str> {
        match (&self.p1, &self.p2) {
            (Slot::Filled(name), Slot::Empty) | (Slot::Empty, Slot::Filled(name)) => Some(name),
            _ => None,
        }
    }
}

/// One round of matches; index 0 is the first round.
pub type Round = Vec<Match>;

/// How round 0 places the empty slots when the entrant count is not a power of two.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByePlacement {
    /// Fill p1/p2 pairwise in entrant order; every position past the last entrant is empty.
    #[default]
    Trailing,
    /// Fill full matches first, then give each remaining match one entrant in p1.
    Spread,
}

/// All rounds, first round first, final (one match) last.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub rounds: Vec<Round>,
}

impl Bracket {
    /// Build the rounds for `entrants` with no results yet. Needs at least 2 entrants.
    pub fn seeded(entrants: &[String], placement: ByePlacement) -> Result<Self, BracketError> {
        if entrants.len() < 2 {
            return Err(BracketError::InsufficientEntrants);
        }
        let size = first_round_slots(entrants.len());
        let first_round = match placement {
            ByePlacement::Trailing => trailing_first_round(entrants, size),
            ByePlacement::Spread => spread_first_round(entrants, size),
        };

        let mut rounds = Vec::with_capacity(round_count(entrants.len()));
        rounds.push(first_round);
        for r in 1..round_count(entrants.len()) {
            let matches_in_round = size >> (r + 1);
            rounds.push(vec![Match::default(); matches_in_round]);
        }
        Ok(Self { rounds })
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_final_round(&self, round_index: usize) -> bool {
        round_index + 1 == self.rounds.len()
    }

    pub fn get_match(&self, round_index: usize, match_index: usize) -> Option<&Match> {
        self.rounds.get(round_index)?.get(match_index)
    }

    pub fn get_match_mut(&mut self, round_index: usize, match_index: usize) -> Option<&mut Match> {
        self.rounds.get_mut(round_index)?.get_mut(match_index)
    }

    /// Winner of the final round's single match.
    pub fn champion(&self) -> Option<&str> {
        self.rounds.last()?.first()?.winner.name()
    }
}

/// Smallest power of two ≥ `entrant_count` (at least 1).
pub fn first_round_slots(entrant_count: usize) -> usize {
    entrant_count.max(1).next_power_of_two()
}

/// Number of rounds: log2 of the first-round slot count.
pub fn round_count(entrant_count: usize) -> usize {
    first_round_slots(entrant_count).trailing_zeros() as usize
}

fn trailing_first_round(entrants: &[String], size: usize) -> Round {
    let mut names = entrants.iter().cloned();
    (0..size / 2)
        .map(|_| Match::new(names.next().into(), names.next().into()))
        .collect()
}

fn spread_first_round(entrants: &[String], size: usize) -> Round {
    let byes = size - entrants.len();
    let full_matches = size / 2 - byes;
    let mut names = entrants.iter().cloned();
    (0..size / 2)
        .map(|m| {
            let p1 = names.next().into();
            let p2 = if m < full_matches {
                names.next().into()
            } else {
                Slot::Empty
            };
            Match::new(p1, p2)
        })
        .collect()
}
