use std::io::{self, Write};

use mineclear_core::{Board, BoardState, Cell, CellState};

pub fn format_for_counter(num: i32) -> String {
    match num {
        ..-99 => "-99".to_string(),
        -99..0 => format!("-{:02}", -num),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

pub fn glyph(cell: Cell) -> char {
    match cell.state() {
        CellState::Hidden => '#',
        CellState::Flagged => 'x',
        CellState::Revealed(0) => '.',
        CellState::Revealed(count) => char::from(b'0' + count),
        CellState::Detonated => '*',
    }
}

fn state_label(state: BoardState) -> &'static str {
    match state {
        BoardState::Active => "playing",
        BoardState::Won => "won",
        BoardState::Lost => "lost",
    }
}

/// Draws the counter line and the grid, columns are `x` and rows are `y`.
pub fn render_board(board: &Board, out: &mut impl Write) -> io::Result<()> {
    let size = board.size();
    let width = (size - 1).to_string().len();

    writeln!(
        out,
        "mines {}  [{}]",
        format_for_counter(board.flags_left()),
        state_label(board.state())
    )?;

    write!(out, "{:width$} ", "")?;
    for x in 0..size {
        write!(out, " {:>width$}", x)?;
    }
    writeln!(out)?;

    for y in 0..size {
        write!(out, "{:>width$} ", y)?;
        for x in 0..size {
            let cell = board.cell((x, y)).unwrap_or_default();
            write!(out, " {:>width$}", glyph(cell))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mineclear_core::MineLayout;

    fn render(board: &Board) -> String {
        let mut out = Vec::new();
        render_board(board, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn counter_is_clamped() {
        assert_eq!(format_for_counter(40), "040");
        assert_eq!(format_for_counter(0), "000");
        assert_eq!(format_for_counter(-3), "-03");
        assert_eq!(format_for_counter(-150), "-99");
        assert_eq!(format_for_counter(4000), "999");
    }

    #[test]
    fn renders_hidden_board() {
        let board = Board::new(MineLayout::from_mine_coords(2, &[(1, 1)]).unwrap());
        assert_eq!(render(&board), "mines 001  [playing]\n   0 1\n0  # #\n1  # #\n");
    }

    #[test]
    fn renders_counts_flags_and_detonation() {
        let mut board = Board::new(MineLayout::from_mine_coords(3, &[(2, 0), (2, 2)]).unwrap());
        board.reveal((0, 1)).unwrap();
        board.toggle_flag((2, 0)).unwrap();
        board.reveal((2, 2)).unwrap();

        let text = render(&board);
        let rows: Vec<_> = text.lines().collect();
        assert_eq!(rows[0], "mines 001  [lost]");
        assert_eq!(rows[2], "0  . 1 x");
        assert_eq!(rows[3], "1  . 2 #");
        assert_eq!(rows[4], "2  . 1 *");
    }
}
