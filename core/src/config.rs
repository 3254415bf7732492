use serde::{Deserialize, Serialize};

use crate::*;

/// Which events are allowed to end the game as a win.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinRule {
    /// Win is only checked after a flag toggle empties the flag budget, and holds when the
    /// flagged cells are exactly the mines.
    #[default]
    Flags,
    /// Like [`WinRule::Flags`], and revealing the last safe cell also wins.
    RevealOrFlags,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
    #[serde(default)]
    pub win_rule: WinRule,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord = 15;
    pub const DEFAULT_MINES: CellCount = 40;

    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            win_rule: WinRule::Flags,
        }
    }

    /// Clamps `size` to at least 1 and `mines` to what fits on the board.
    pub fn new(size: Coord, mines: CellCount) -> Self {
        let size = size.max(1);
        let mines = mines.min(square(size));
        Self::new_unchecked(size, mines)
    }

    /// Builds a config from loosely typed input, as read from a form field or a command line.
    ///
    /// Missing, non-numeric and non-positive values fall back to the defaults. A size larger than
    /// the biggest supported board is clamped.
    pub fn from_raw(size: Option<&str>, mines: Option<&str>) -> Self {
        let size = match parse_positive(size, "size") {
            Some(size) => Coord::try_from(size).unwrap_or_else(|_| {
                log::warn!("Size {} is too large, clamped to {}", size, Coord::MAX);
                Coord::MAX
            }),
            None => Self::DEFAULT_SIZE,
        };
        let mines = match parse_positive(mines, "mine count") {
            Some(mines) => CellCount::try_from(mines).unwrap_or(CellCount::MAX),
            None => Self::DEFAULT_MINES,
        };

        let config = Self::new(size, mines);
        if config.mines < mines {
            log::warn!(
                "Requested {} mines but a {}x{} board only fits {}",
                mines,
                config.size,
                config.size,
                config.mines
            );
        }
        config
    }

    pub const fn with_win_rule(mut self, win_rule: WinRule) -> Self {
        self.win_rule = win_rule;
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIZE, Self::DEFAULT_MINES)
    }
}

fn parse_positive(raw: Option<&str>, what: &str) -> Option<u64> {
    let raw = raw?.trim();
    match raw.parse::<u64>() {
        Ok(0) => {
            log::warn!("Ignoring {} of 0, using default", what);
            None
        }
        Ok(value) => Some(value),
        Err(_) if raw.is_empty() => None,
        Err(err) => {
            log::warn!("Ignoring {} {:?} ({}), using default", what, raw, err);
            None
        }
    }
}
