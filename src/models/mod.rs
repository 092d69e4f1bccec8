//! Data structures for the bracket manager: slots, matches, rounds, sessions, views.

mod bracket;
mod engine;
mod view;

pub use bracket::{
    first_round_slots, round_count, Bracket, ByePlacement, Match, MatchStatus, Round, Slot,
    SlotPosition,
};
pub use engine::{BracketEngine, BracketError, BracketId};
pub use view::{BracketView, MatchView, RoundView, RowOutcome, RowView, EMPTY_SLOT_LABEL};
