//! Single-elimination bracket manager: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    init_bracket, init_bracket_with, parse_entrants, randomise_entrants, select_winner, undo,
};
pub use models::{
    Bracket, BracketEngine, BracketError, BracketId, BracketView, ByePlacement, Match,
    MatchStatus, MatchView, Round, RoundView, RowOutcome, RowView, Slot, SlotPosition,
    EMPTY_SLOT_LABEL,
};
