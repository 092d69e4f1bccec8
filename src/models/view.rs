//! Render snapshot handed to the presentation layer after every operation.

use crate::models::bracket::{Match, MatchStatus, SlotPosition};
use crate::models::engine::BracketEngine;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Shown in place of a name for an unfilled slot.
pub const EMPTY_SLOT_LABEL: &str = "—";

/// How a row should be highlighted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOutcome {
    Winner,
    Loser,
    Undecided,
}

/// One row of a match box.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RowView {
    pub slot: SlotPosition,
    pub name: Option<String>,
    /// Name, or the placeholder for an empty slot.
    pub label: String,
    /// The "select as winner" control is enabled only for filled slots.
    pub selectable: bool,
    pub outcome: RowOutcome,
}

/// One match box.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchView {
    pub round: usize,
    pub index: usize,
    pub status: MatchStatus,
    pub empty: bool,
    pub resolved: bool,
    pub rows: [RowView; 2],
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RoundView {
    pub title: String,
    pub matches: Vec<MatchView>,
}

/// Everything the page needs to redraw the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BracketView {
    pub id: crate::models::BracketId,
    /// When the session was opened.
    pub created_at: DateTime<Utc>,
    pub rounds: Vec<RoundView>,
    pub champion: Option<String>,
    pub undo_available: bool,
}

impl BracketView {
    pub fn from_engine(engine: &BracketEngine) -> Self {
        let round_count = engine.bracket.round_count();
        let rounds = engine
            .bracket
            .rounds
            .iter()
            .enumerate()
            .map(|(r, round)| RoundView {
                title: round_title(r, round_count),
                matches: round
                    .iter()
                    .enumerate()
                    .map(|(m, game)| match_view(r, m, game))
                    .collect(),
            })
            .collect();
        Self {
            id: engine.id,
            created_at: engine.created_at,
            rounds,
            champion: engine.champion().map(str::to_owned),
            undo_available: engine.can_undo(),
        }
    }
}

impl BracketEngine {
    /// Current render snapshot.
    pub fn view(&self) -> BracketView {
        BracketView::from_engine(self)
    }
}

/// "Final" for the last round, "Semi-finals" for the one before, else "Round N".
fn round_title(round_index: usize, round_count: usize) -> String {
    if round_index + 1 == round_count {
        "Final".to_string()
    } else if round_index + 2 == round_count {
        "Semi-finals".to_string()
    } else {
        format!("Round {}", round_index + 1)
    }
}

fn match_view(round: usize, index: usize, game: &Match) -> MatchView {
    let status = game.status();
    MatchView {
        round,
        index,
        status,
        empty: game.p1.is_empty() && game.p2.is_empty(),
        resolved: status == MatchStatus::Decided,
        rows: [
            row_view(game, SlotPosition::P1),
            row_view(game, SlotPosition::P2),
        ],
    }
}

fn row_view(game: &Match, slot: SlotPosition) -> RowView {
    let occupant = game.slot(slot);
    let outcome = match (game.winner.name(), occupant.name()) {
        (Some(winner), Some(name)) if winner == name => RowOutcome::Winner,
        (Some(_), Some(_)) => RowOutcome::Loser,
        _ => RowOutcome::Undecided,
    };
    RowView {
        slot,
        name: occupant.name().map(str::to_owned),
        label: occupant.name().unwrap_or(EMPTY_SLOT_LABEL).to_string(),
        selectable: occupant.is_filled(),
        outcome,
    }
}
