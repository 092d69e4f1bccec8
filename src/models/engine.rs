//! BracketEngine and BracketError.

use crate::models::bracket::Bracket;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Errors that can occur during bracket operations. All are recoverable input problems.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Fewer than two entrants supplied.
    InsufficientEntrants,
    /// Match out of range, or the chosen slot has no entrant.
    InvalidSelection { round: usize, index: usize },
    /// Nothing to undo.
    EmptyUndo,
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::InsufficientEntrants => write!(f, "Please enter at least two names."),
            BracketError::InvalidSelection { round, index } => {
                write!(f, "No entrant to select in round {} match {}", round + 1, index + 1)
            }
            BracketError::EmptyUndo => write!(f, "Nothing to undo"),
        }
    }
}

impl std::error::Error for BracketError {}

/// Unique identifier for a bracket session.
pub type BracketId = Uuid;

/// One bracket session: the live bracket plus its undo history.
#[derive(Clone, Debug)]
pub struct BracketEngine {
    pub id: BracketId,
    pub created_at: DateTime<Utc>,
    /// Live bracket; no rounds until the first successful start.
    pub bracket: Bracket,
    /// Snapshots taken before each winner selection, newest last.
    pub history: Vec<Bracket>,
}

impl Default for BracketEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BracketEngine {
    /// Create a session with no bracket yet.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bracket: Bracket::default(),
            history: Vec::new(),
        }
    }

    pub fn champion(&self) -> Option<&str> {
        self.bracket.champion()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Deep-copy the live bracket onto the history stack.
    pub(crate) fn push_history(&mut self) {
        self.history.push(self.bracket.clone());
    }
}
