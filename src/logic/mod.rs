//! Bracket business logic: setup, winner selection, undo.

mod advance;
mod setup;
mod undo;

pub use advance::select_winner;
pub use setup::{init_bracket, init_bracket_with, parse_entrants, randomise_entrants};
pub use undo::undo;
