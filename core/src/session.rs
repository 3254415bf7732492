use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::*;

/// Handle owning the single active [`Board`] of a play session.
///
/// Every board gets its own seed drawn from a stream seeded once per session, so a whole session
/// replays identically from the same starting seed.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    seeds: SmallRng,
    board: Board,
    games_started: u32,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut seeds = SmallRng::seed_from_u64(seed);
        let board = Board::initialize(config, seeds.next_u64());
        log::info!(
            "New game: {}x{} with {} mines",
            board.size(),
            board.size(),
            board.mine_count()
        );
        Self {
            config,
            seeds,
            board,
            games_started: 1,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    pub fn accepts_moves(&self) -> bool {
        !self.board.is_finished()
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        self.board.reveal(coords)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.board.toggle_flag(coords)
    }

    /// Throws the current board away and deals a new one from the current config.
    pub fn restart(&mut self) {
        self.board = Board::initialize(self.config, self.seeds.next_u64());
        self.games_started += 1;
        log::info!(
            "Restarted game #{}: {}x{} with {} mines",
            self.games_started,
            self.board.size(),
            self.board.size(),
            self.board.mine_count()
        );
    }

    pub fn reconfigure(&mut self, config: GameConfig) {
        self.config = config;
        self.restart();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_deals_fresh_board() {
        let mut session = Session::new(GameConfig::new(5, 3), 11);
        session.toggle_flag((0, 0)).unwrap();

        session.restart();

        assert_eq!(session.games_started(), 2);
        assert!(session.accepts_moves());
        assert_eq!(session.board().flags_left(), 3);
        assert_eq!(session.board().mine_count(), 3);
        assert!(session.board().iter_cells().all(|(_, cell)| cell.is_hidden()));
    }

    #[test]
    fn lost_session_stops_accepting_moves() {
        let mut session = Session::new(GameConfig::new(2, 4), 0);

        let report = session.reveal((1, 0)).unwrap();

        assert_eq!(report.outcome, RevealOutcome::Loss);
        assert!(!session.accepts_moves());
        assert_eq!(session.toggle_flag((0, 0)), Err(GameError::AlreadyEnded));

        session.restart();
        assert!(session.accepts_moves());
    }

    #[test]
    fn same_seed_replays_session() {
        let config = GameConfig::new(8, 10);
        let mut a = Session::new(config, 5);
        let mut b = Session::new(config, 5);
        assert_eq!(a.board(), b.board());

        a.restart();
        b.restart();
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn reconfigure_applies_new_config() {
        let mut session = Session::new(GameConfig::default(), 1);
        assert_eq!(session.board().size(), 15);

        session.reconfigure(GameConfig::new(4, 2).with_win_rule(WinRule::RevealOrFlags));

        assert_eq!(session.board().size(), 4);
        assert_eq!(session.board().mine_count(), 2);
        assert_eq!(session.board().win_rule(), WinRule::RevealOrFlags);
        assert_eq!(session.config().size, 4);
    }
}
