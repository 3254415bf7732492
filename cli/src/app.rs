use std::io::{self, BufRead, Write};
use std::str::FromStr;

use mineclear_core::{Coord, Coord2, GameError, MarkOutcome, RevealOutcome, Session};
use thiserror::Error;

use crate::render::render_board;

const HELP: &str = "\
commands:
  r X Y, reveal X Y   open the cell at column X, row Y
  f X Y, flag X Y     toggle a flag on a closed cell
  n, new              start a new game
  h, help             show this help
  q, quit             leave";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseMsgError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("expected two coordinates, as in `{0} 3 4`")]
    MissingCoords(&'static str),
    #[error("{0:?} is not a valid coordinate")]
    BadCoord(String),
}

impl FromStr for Msg {
    type Err = ParseMsgError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(ParseMsgError::Empty)?;
        let command = command.to_ascii_lowercase();

        let msg = match command.as_str() {
            "r" | "reveal" => Msg::Reveal(parse_coords(&mut words, "reveal")?),
            "f" | "flag" => Msg::Flag(parse_coords(&mut words, "flag")?),
            "n" | "new" => Msg::NewGame,
            "h" | "help" | "?" => Msg::Help,
            "q" | "quit" | "exit" => Msg::Quit,
            _ => return Err(ParseMsgError::Unknown(command)),
        };
        Ok(msg)
    }
}

fn parse_coords<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<Coord2, ParseMsgError> {
    let mut next = || -> Result<Coord, ParseMsgError> {
        let word = words.next().ok_or(ParseMsgError::MissingCoords(command))?;
        word.parse()
            .map_err(|_| ParseMsgError::BadCoord(word.to_string()))
    };
    let x = next()?;
    let y = next()?;
    Ok((x, y))
}

/// Terminal front end: turns typed commands into session calls and redraws the board.
pub struct App {
    session: Session,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        render_board(self.session.board(), &mut out)?;
        writeln!(out, "type `help` for commands")?;
        write!(out, "> ")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                write!(out, "> ")?;
                out.flush()?;
                continue;
            }

            let keep_going = match line.parse::<Msg>() {
                Ok(msg) => self.update(msg, &mut out)?,
                Err(err) => {
                    writeln!(out, "{}", err)?;
                    true
                }
            };
            if !keep_going {
                return Ok(());
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        Ok(())
    }

    /// Applies one command, returns `false` once the player quits.
    pub fn update(&mut self, msg: Msg, out: &mut impl Write) -> io::Result<bool> {
        use Msg::*;

        match msg {
            Reveal(coords) | Flag(coords) if !self.session.accepts_moves() => {
                log::debug!("Ignoring {:?} at {:?}, game is over", msg, coords);
                writeln!(out, "The game is over, type `new` to play again.")?;
            }
            Reveal(coords) => {
                log::debug!("reveal: {:?}", coords);
                match self.session.reveal(coords) {
                    Ok(report) => {
                        if report.has_update() {
                            render_board(self.session.board(), out)?;
                        }
                        match report.outcome {
                            RevealOutcome::Continue if !report.has_update() => {
                                writeln!(out, "Nothing to open there.")?;
                            }
                            RevealOutcome::Continue => {}
                            RevealOutcome::Loss => writeln!(out, "Game over! Type `new` to play again.")?,
                            RevealOutcome::Win => writeln!(out, "You win! Type `new` to play again.")?,
                        }
                    }
                    Err(err) => self.report_error(err, out)?,
                }
            }
            Flag(coords) => {
                log::debug!("flag: {:?}", coords);
                match self.session.toggle_flag(coords) {
                    Ok(MarkOutcome::NoChange) => writeln!(out, "Opened cells cannot be flagged.")?,
                    Ok(MarkOutcome::Changed) => render_board(self.session.board(), out)?,
                    Ok(MarkOutcome::Won) => {
                        render_board(self.session.board(), out)?;
                        writeln!(out, "You win! Type `new` to play again.")?;
                    }
                    Err(err) => self.report_error(err, out)?,
                }
            }
            NewGame => {
                self.session.restart();
                render_board(self.session.board(), out)?;
            }
            Help => writeln!(out, "{}", HELP)?,
            Quit => return Ok(false),
        }
        Ok(true)
    }

    fn report_error(&self, err: GameError, out: &mut impl Write) -> io::Result<()> {
        let size = self.session.board().size();
        log::warn!("Rejected move: {}", err);
        writeln!(out, "{} (the board is {}x{})", err, size, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mineclear_core::GameConfig;

    fn run(session: Session, input: &str) -> (App, String) {
        let mut app = App::new(session);
        let mut out = Vec::new();
        app.run(input.as_bytes(), &mut out).unwrap();
        (app, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_commands() {
        assert_eq!("r 3 4".parse::<Msg>(), Ok(Msg::Reveal((3, 4))));
        assert_eq!("FLAG 0 12".parse::<Msg>(), Ok(Msg::Flag((0, 12))));
        assert_eq!(" new ".parse::<Msg>(), Ok(Msg::NewGame));
        assert_eq!("q".parse::<Msg>(), Ok(Msg::Quit));
        assert_eq!("".parse::<Msg>(), Err(ParseMsgError::Empty));
        assert_eq!("r 3".parse::<Msg>(), Err(ParseMsgError::MissingCoords("reveal")));
        assert_eq!(
            "f a 1".parse::<Msg>(),
            Err(ParseMsgError::BadCoord("a".to_string()))
        );
        assert_eq!(
            "dig 1 1".parse::<Msg>(),
            Err(ParseMsgError::Unknown("dig".to_string()))
        );
    }

    #[test]
    fn loss_blocks_further_moves_until_restart() {
        let session = Session::new(GameConfig::new(2, 4), 7);

        let (app, out) = run(session, "r 0 0\nf 1 1\nr 1 0\nnew\nq\n");

        assert!(out.contains("Game over!"));
        assert_eq!(out.matches("The game is over").count(), 2);
        assert_eq!(app.session().games_started(), 2);
        assert!(app.session().accepts_moves());
    }

    #[test]
    fn flagging_every_mine_wins() {
        let session = Session::new(GameConfig::new(2, 4), 7);

        let (app, out) = run(session, "f 0 0\nf 1 0\nf 0 1\nf 1 1\n");

        assert!(out.contains("You win!"));
        assert!(!app.session().accepts_moves());
    }

    #[test]
    fn out_of_bounds_is_reported_and_loop_continues() {
        let session = Session::new(GameConfig::new(3, 1), 7);

        let (app, out) = run(session, "r 9 9\nbogus\nhelp\n");

        assert!(out.contains("Coordinates are outside the board (the board is 3x3)"));
        assert!(out.contains("unknown command \"bogus\""));
        assert!(out.contains("commands:"));
        assert!(app.session().accepts_moves());
    }

    #[test]
    fn quit_stops_reading() {
        let session = Session::new(GameConfig::new(3, 9), 7);

        let (_, out) = run(session, "q\nr 0 0\n");

        assert!(!out.contains("Game over!"));
    }
}
