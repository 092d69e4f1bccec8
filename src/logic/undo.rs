//! Undo: restore the bracket as it was before the latest winner selection.

use crate::models::{BracketEngine, BracketError};

/// Pop the newest snapshot and make it the live bracket. Byes from setup are never undone.
pub fn undo(engine: &mut BracketEngine) -> Result<(), BracketError> {
    let previous = engine.history.pop().ok_or(BracketError::EmptyUndo)?;
    engine.bracket = previous;
    log::debug!(
        "Bracket {}: undo ({} snapshots left)",
        engine.id,
        engine.history.len()
    );
    Ok(())
}
