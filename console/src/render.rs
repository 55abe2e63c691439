use std::io::{self, Write};
use common::games::tictactoe::{Board, Outcome, Position, WinningLine};

const CELL_SEPARATOR: &str = "-------";

pub fn cell_number(position: Position, size: usize) -> usize {
    position.row * size + position.col + 1
}

pub fn render_board(board: &Board, out: &mut impl Write) -> io::Result<()> {
    let size = board.size();
    let separator = CELL_SEPARATOR.repeat(size);

    writeln!(out)?;
    writeln!(out, "{}", separator)?;
    for (row, cells) in board.rows().enumerate() {
        for (col, mark) in cells.iter().enumerate() {
            let number = cell_number(Position::new(row, col), size);
            write!(out, "|{:^3} {} ", number, mark.symbol())?;
        }
        writeln!(out, "|")?;
        writeln!(out, "{}", separator)?;
    }
    Ok(())
}

pub fn render_outcome(
    board: &Board,
    outcome: Outcome,
    winning_line: Option<WinningLine>,
    out: &mut impl Write,
) -> io::Result<()> {
    render_board(board, out)?;
    let message = match outcome {
        Outcome::ComputerWin => "YOU LOSE!",
        Outcome::HumanWin => "YOU WIN!",
        Outcome::Draw => "DRAW!",
    };
    writeln!(out, "{}", message)?;
    if let Some(line) = winning_line {
        writeln!(
            out,
            "Winning line: {} from {} to {}",
            line.mark,
            cell_number(line.start, board.size()),
            cell_number(line.end, board.size())
        )?;
    }
    Ok(())
}
