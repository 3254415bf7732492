use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    #[default]
    Active,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
    /// The flag emptied the budget and matched every mine.
    Won,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Continue,
    Loss,
    Win,
}

/// Everything a single reveal changed, so a view can redraw just those cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealReport {
    pub outcome: RevealOutcome,
    pub changed: Vec<Coord2>,
}

impl RevealReport {
    fn unchanged() -> Self {
        Self {
            outcome: RevealOutcome::Continue,
            changed: Vec::new(),
        }
    }

    pub fn has_update(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// Grid state of one game, mutated only through [`Board::reveal`] and [`Board::toggle_flag`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    flags_left: i32,
    revealed_count: CellCount,
    state: BoardState,
    win_rule: WinRule,
    triggered_mine: Option<Coord2>,
}

impl Board {
    pub fn new(layout: MineLayout) -> Self {
        let mine_count = layout.mine_count();
        Self {
            cells: layout.into_mask().mapv(Cell::new),
            mine_count,
            flags_left: mine_count.into(),
            revealed_count: 0,
            state: BoardState::Active,
            win_rule: WinRule::default(),
            triggered_mine: None,
        }
    }

    /// Generates a fresh random board for `config`.
    pub fn initialize(config: GameConfig, seed: u64) -> Self {
        let layout = RandomLayoutGenerator::new(seed).generate(config);
        Self::new(layout).with_win_rule(config.win_rule)
    }

    pub fn with_win_rule(mut self, win_rule: WinRule) -> Self {
        self.win_rule = win_rule;
        self
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn win_rule(&self) -> WinRule {
        self.win_rule
    }

    pub fn size(&self) -> Coord {
        // Board::new only accepts layouts whose side fits a Coord
        self.cells.dim().0 as Coord
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        square(self.size()) - self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Mines minus placed flags, negative when the player over-flags.
    pub fn flags_left(&self) -> i32 {
        self.flags_left
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_mine())
            .count() as u8
    }

    /// True when the flagged cells are exactly the mines.
    pub fn check_win(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_mine() == cell.is_flagged())
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_active()?;

        let cell = &mut self.cells[coords.to_nd_index()];
        match cell.state() {
            CellState::Hidden => {
                cell.set_state(CellState::Flagged);
                self.flags_left -= 1;
            }
            CellState::Flagged => {
                cell.set_state(CellState::Hidden);
                self.flags_left += 1;
            }
            CellState::Revealed(_) | CellState::Detonated => return Ok(MarkOutcome::NoChange),
        }
        log::debug!("Toggled flag at {:?}, flags left: {}", coords, self.flags_left);

        if self.flags_left == 0 && self.check_win() {
            self.end_game(true);
            Ok(MarkOutcome::Won)
        } else {
            Ok(MarkOutcome::Changed)
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        let coords = self.validate_coords(coords)?;
        self.check_active()?;

        let cell = self.cells[coords.to_nd_index()];
        if !cell.is_hidden() {
            return Ok(RevealReport::unchanged());
        }

        if cell.is_mine() {
            self.cells[coords.to_nd_index()].set_state(CellState::Detonated);
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return Ok(RevealReport {
                outcome: RevealOutcome::Loss,
                changed: alloc::vec![coords],
            });
        }

        let changed = self.flood_reveal(coords);

        let outcome = if self.win_rule == WinRule::RevealOrFlags
            && self.revealed_count == self.safe_cell_count()
        {
            self.end_game(true);
            RevealOutcome::Win
        } else {
            RevealOutcome::Continue
        };
        Ok(RevealReport { outcome, changed })
    }

    /// Opens `start` and spreads through zero-count cells. The revealed state doubles as the
    /// visited marker, so every cell is opened at most once.
    fn flood_reveal(&mut self, start: Coord2) -> Vec<Coord2> {
        let mut changed = Vec::new();
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let index = visit_coords.to_nd_index();
            // neighbors of a zero-count cell are never mines
            if !self.cells[index].is_hidden() {
                continue;
            }

            let adjacent_mines = self.adjacent_mine_count(visit_coords);
            self.cells[index].set_state(CellState::Revealed(adjacent_mines));
            self.revealed_count += 1;
            changed.push(visit_coords);
            log::trace!(
                "Revealed {:?}, adjacent mines: {}",
                visit_coords,
                adjacent_mines
            );

            if adjacent_mines == 0 {
                let hidden = self
                    .neighbors(visit_coords)
                    .filter(|&pos| self.cells[pos.to_nd_index()].is_hidden());
                to_visit.extend(hidden);
            }
        }

        log::debug!("Reveal at {:?} opened {} cells", start, changed.len());
        changed
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            BoardState::Won
        } else {
            BoardState::Lost
        };
        log::info!("Game over: {:?}", self.state);
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size())
    }
}
