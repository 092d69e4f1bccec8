//! Setup phase: parse entrant text and build a fresh bracket.

use crate::logic::advance::auto_advance_byes;
use crate::models::{Bracket, BracketEngine, BracketError, ByePlacement};
use rand::seq::SliceRandom;

/// Split raw text into entrant names: one per line, trimmed, blank lines dropped.
pub fn parse_entrants(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Shuffle the entrants in `raw` and return them one per line. Needs at least 2 names.
pub fn randomise_entrants(raw: &str) -> Result<String, BracketError> {
    let mut entrants = parse_entrants(raw);
    if entrants.len() < 2 {
        return Err(BracketError::InsufficientEntrants);
    }
    entrants.shuffle(&mut rand::thread_rng());
    Ok(entrants.join("\n"))
}

/// Start a new bracket with byes placed after the last entrant.
pub fn init_bracket(engine: &mut BracketEngine, entrants: &[String]) -> Result<(), BracketError> {
    init_bracket_with(engine, entrants, ByePlacement::Trailing)
}

/// Start a new bracket, discarding any bracket in progress and its undo history.
///
/// 1. Reject fewer than 2 entrants (engine untouched).
/// 2. Round 0 gets `size / 2` matches, `size` being the next power of two; later rounds are empty.
/// 3. Round-0 matches with exactly one entrant resolve immediately and propagate (not undoable).
pub fn init_bracket_with(
    engine: &mut BracketEngine,
    entrants: &[String],
    placement: ByePlacement,
) -> Result<(), BracketError> {
    engine.bracket = Bracket::seeded(entrants, placement)?;
    engine.history.clear();
    auto_advance_byes(&mut engine.bracket);

    log::debug!(
        "Bracket {} started: {} entrants, {} rounds, {:?} byes",
        engine.id,
        entrants.len(),
        engine.bracket.round_count(),
        placement
    );
    Ok(())
}
