use serde::{Deserialize, Serialize};

/// What the player currently sees at a position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    /// Opened safe cell with its adjacent mine count.
    Revealed(u8),
    /// The mine that ended the game.
    Detonated,
}

/// One grid position: whether it hides a mine plus its visible state.
///
/// The mine bit is fixed at construction. Keeping the visible state as a single
/// enum means a cell can never be both revealed and flagged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    mine: bool,
    state: CellState,
}

impl Cell {
    pub const fn new(mine: bool) -> Self {
        Self {
            mine,
            state: CellState::Hidden,
        }
    }

    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn state(self) -> CellState {
        self.state
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.state, CellState::Revealed(_))
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self.state, CellState::Hidden)
    }

    pub const fn is_detonated(self) -> bool {
        matches!(self.state, CellState::Detonated)
    }

    /// Count shown on a revealed cell, `None` while it is still closed.
    pub const fn adjacent_mines(self) -> Option<u8> {
        match self.state {
            CellState::Revealed(count) => Some(count),
            _ => None,
        }
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        debug_assert!(
            !self.is_revealed() || matches!(state, CellState::Revealed(_)),
            "revealed cells never close again"
        );
        self.state = state;
    }
}
