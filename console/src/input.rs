use std::io::{self, BufRead, ErrorKind, Write};
use common::games::tictactoe::{Board, BoardError, HumanPlayer, Mark, Position};
use common::log;
use crate::render::{cell_number, render_board};

pub fn parse_cell_number(input: &str, size: usize) -> Result<Position, String> {
    let number: usize = input
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", input.trim()))?;
    if number == 0 || number > size * size {
        return Err(format!("cell must be between 1 and {}", size * size));
    }
    let index = number - 1;
    Ok(Position::new(index / size, index % size))
}

/// Human player reading cell numbers from a line-based reader.
pub struct ConsolePlayer<I, W> {
    input: I,
    output: W,
    human_mark: Mark,
}

impl<I: BufRead, W: Write> ConsolePlayer<I, W> {
    pub fn new(input: I, output: W, human_mark: Mark) -> Self {
        Self {
            input,
            output,
            human_mark,
        }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    fn prompt(
        &mut self,
        board: &Board,
        last_computer_move: Option<Position>,
    ) -> io::Result<Option<Position>> {
        let size = board.size();
        writeln!(self.output, "Human turn [{}]", self.human_mark)?;
        render_board(board, &mut self.output)?;
        if let Some(position) = last_computer_move {
            writeln!(self.output, "Computer chose: {}", cell_number(position, size))?;
        }

        loop {
            write!(self.output, "Use numpad (1..{}): ", size * size)?;
            self.output.flush()?;

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    writeln!(self.output, "Bye")?;
                    return Ok(None);
                }
                Ok(_) => {}
                // The offending line has been consumed; ask again.
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    writeln!(self.output, "Bad choice: input is not valid UTF-8")?;
                    continue;
                }
                Err(e) => return Err(e),
            }

            match parse_cell_number(&line, size) {
                Ok(position) => return Ok(Some(position)),
                Err(e) => writeln!(self.output, "Bad choice: {}", e)?,
            }
        }
    }
}

impl<I: BufRead, W: Write> HumanPlayer for ConsolePlayer<I, W> {
    fn choose_move(
        &mut self,
        board: &Board,
        last_computer_move: Option<Position>,
    ) -> Option<Position> {
        match self.prompt(board, last_computer_move) {
            Ok(choice) => choice,
            Err(e) => {
                log!("Console I/O failed: {}", e);
                eprintln!("Console error: {}", e);
                None
            }
        }
    }

    fn move_rejected(&mut self, _position: Position, error: &BoardError) {
        let _ = writeln!(self.output, "Bad move: {}", error);
    }
}
