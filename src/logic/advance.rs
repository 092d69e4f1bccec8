//! Winner selection: record a result, invalidate later rounds, move the winner up the tree.

use crate::models::{Bracket, BracketEngine, BracketError, Slot, SlotPosition};

/// Mark the entrant in `slot` of `rounds[round_index][match_index]` as the winner.
///
/// Re-selecting the current winner is a no-op. Otherwise the bracket is snapshotted for undo,
/// every winner in later rounds is cleared, and the winner fills its slot in the parent match.
pub fn select_winner(
    engine: &mut BracketEngine,
    round_index: usize,
    match_index: usize,
    slot: SlotPosition,
) -> Result<(), BracketError> {
    let invalid = BracketError::InvalidSelection {
        round: round_index,
        index: match_index,
    };
    let game = engine
        .bracket
        .get_match(round_index, match_index)
        .ok_or_else(|| invalid.clone())?;
    let winner = match game.slot(slot) {
        Slot::Filled(name) => name.clone(),
        Slot::Empty => return Err(invalid),
    };
    if game.winner.name() == Some(winner.as_str()) {
        return Ok(());
    }

    engine.push_history();
    if let Some(game) = engine.bracket.get_match_mut(round_index, match_index) {
        game.winner = Slot::Filled(winner.clone());
    }
    clear_downstream(&mut engine.bracket, round_index);
    propagate_winner(&mut engine.bracket, round_index, match_index, winner);

    log::debug!(
        "Bracket {}: round {} match {} decided ({} snapshots)",
        engine.id,
        round_index,
        match_index,
        engine.history.len()
    );
    Ok(())
}

/// Resolve every round-0 match holding a single entrant and propagate it. No history is kept.
pub(crate) fn auto_advance_byes(bracket: &mut Bracket) {
    let byes: Vec<(usize, String)> = match bracket.rounds.first() {
        Some(first_round) => first_round
            .iter()
            .enumerate()
            .filter_map(|(m, game)| game.bye_occupant().map(|name| (m, name.to_owned())))
            .collect(),
        None => return,
    };
    for (m, name) in byes {
        if let Some(game) = bracket.get_match_mut(0, m) {
            game.winner = Slot::Filled(name.clone());
        }
        propagate_winner(bracket, 0, m, name);
    }
}

/// Clear the winner of every match in rounds after `round_index`. Filled slots stay.
fn clear_downstream(bracket: &mut Bracket, round_index: usize) {
    for round in bracket.rounds.iter_mut().skip(round_index + 1) {
        for game in round.iter_mut() {
            game.winner = Slot::Empty;
        }
    }
}

/// Place `winner` into the parent match in the next round. The final round has no parent.
fn propagate_winner(bracket: &mut Bracket, round_index: usize, match_index: usize, winner: String) {
    if bracket.is_final_round(round_index) {
        return;
    }
    let position = SlotPosition::for_parent_of(match_index);
    if let Some(parent) = bracket.get_match_mut(round_index + 1, match_index / 2) {
        *parent.slot_mut(position) = Slot::Filled(winner);
        parent.winner = Slot::Empty;
    }
}
