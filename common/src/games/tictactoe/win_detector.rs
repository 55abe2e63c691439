use super::board::Board;
use super::types::{Mark, Position, WinningLine};

/// A run of `win_length` consecutive coordinates that wins when uniformly marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    cells: Vec<Position>,
}

impl Line {
    fn new(cells: Vec<Position>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn start(&self) -> Position {
        self.cells[0]
    }

    pub fn end(&self) -> Position {
        self.cells[self.cells.len() - 1]
    }
}

pub fn line_count(size: usize, win_length: usize) -> usize {
    (size + 1)
        .checked_sub(win_length)
        .map_or(0, |span| (2 * size + 2) * span)
}

#[derive(Clone, Copy)]
enum Direction {
    Right,
    Down,
    DownRight,
    DownLeft,
}

/// A window described by its first cell and direction; cells are computed on demand.
#[derive(Clone, Copy)]
struct Window {
    start: Position,
    direction: Direction,
}

impl Window {
    fn new(row: usize, col: usize, direction: Direction) -> Self {
        Self {
            start: Position::new(row, col),
            direction,
        }
    }

    fn cell(&self, offset: usize) -> Position {
        let Position { row, col } = self.start;
        match self.direction {
            Direction::Right => Position::new(row, col + offset),
            Direction::Down => Position::new(row + offset, col),
            Direction::DownRight => Position::new(row + offset, col + offset),
            // Out-of-range columns wrap and are rejected by `Board::get`.
            Direction::DownLeft => Position::new(row + offset, col.wrapping_sub(offset)),
        }
    }

    fn is_filled_with(&self, board: &Board, mark: Mark) -> bool {
        (0..board.win_length()).all(|offset| board.get(self.cell(offset)) == Ok(mark))
    }
}

/// Windows in scan order: rows, columns, main diagonal, anti-diagonal.
fn windows(size: usize, win_length: usize) -> impl Iterator<Item = Window> {
    let span = (size + 1).saturating_sub(win_length);
    let rows = (0..size)
        .flat_map(move |row| (0..span).map(move |col| Window::new(row, col, Direction::Right)));
    let cols = (0..size)
        .flat_map(move |col| (0..span).map(move |row| Window::new(row, col, Direction::Down)));
    let main_diagonal = (0..span).map(|i| Window::new(i, i, Direction::DownRight));
    let anti_diagonal = (0..span).map(move |i| Window::new(i, size - 1 - i, Direction::DownLeft));
    rows.chain(cols).chain(main_diagonal).chain(anti_diagonal)
}

/// Every row and column window, plus windows along the main diagonal and the
/// anti-diagonal. Shorter diagonals parallel to those two are not scanned.
pub fn lines_for(board: &Board) -> Vec<Line> {
    let win_length = board.win_length();
    windows(board.size(), win_length)
        .map(|window| Line::new((0..win_length).map(|i| window.cell(i)).collect()))
        .collect()
}

pub fn has_win(board: &Board, mark: Mark) -> bool {
    if mark == Mark::Empty {
        return false;
    }
    windows(board.size(), board.win_length()).any(|window| window.is_filled_with(board, mark))
}

/// Whether `mark` at `position` is part of a completed window. Only windows
/// through `position` are checked, so on a board without a winner this tells
/// whether the mark just placed there won the game.
pub fn wins_through(board: &Board, position: Position, mark: Mark) -> bool {
    if mark == Mark::Empty || board.get(position) != Ok(mark) {
        return false;
    }

    let size = board.size();
    let win_length = board.win_length();
    let starts = |along: usize| along.saturating_sub(win_length - 1)..=along.min(size - win_length);
    let filled = |window: Window| window.is_filled_with(board, mark);
    let Position { row, col } = position;

    starts(col).any(|c| filled(Window::new(row, c, Direction::Right)))
        || starts(row).any(|r| filled(Window::new(r, col, Direction::Down)))
        || (row == col && starts(row).any(|i| filled(Window::new(i, i, Direction::DownRight))))
        || (row + col == size - 1
            && starts(row).any(|i| filled(Window::new(i, size - 1 - i, Direction::DownLeft))))
}

pub fn is_terminal(board: &Board) -> bool {
    has_win(board, Mark::X) || has_win(board, Mark::O) || board.is_full()
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    let win_length = board.win_length();
    for window in windows(board.size(), win_length) {
        let mark = match board.get(window.start) {
            Ok(Mark::Empty) | Err(_) => continue,
            Ok(mark) => mark,
        };
        if window.is_filled_with(board, mark) {
            return Some(WinningLine::new(mark, window.start, window.cell(win_length - 1)));
        }
    }
    None
}
