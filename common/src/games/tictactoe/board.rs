use super::error::BoardError;
use super::types::{Mark, Position};

/// Square playing field together with the run length needed to win on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Mark>,
    size: usize,
    win_length: usize,
}

impl Board {
    pub fn new(size: usize, win_length: usize) -> Result<Self, BoardError> {
        if size == 0 || win_length == 0 || size < win_length {
            return Err(BoardError::InvalidSize { size, win_length });
        }

        Ok(Self {
            cells: vec![Mark::Empty; size * size],
            size,
            win_length,
        })
    }

    /// Builds a board from one string per row: `X`, `O`, anything else is empty.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str], win_length: usize) -> Self {
        let size = rows.len();
        let mut board = Self::new(size, win_length).unwrap();
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.chars().count(), size, "row {} has wrong length", row);
            for (col, ch) in line.chars().enumerate() {
                let mark = match ch {
                    'X' => Mark::X,
                    'O' => Mark::O,
                    _ => continue,
                };
                board.set(Position::new(row, col), mark).unwrap();
            }
        }
        board
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    fn index(&self, pos: Position) -> Result<usize, BoardError> {
        if !self.contains(pos) {
            return Err(BoardError::OutOfBounds {
                position: pos,
                size: self.size,
            });
        }
        Ok(pos.row * self.size + pos.col)
    }

    pub fn get(&self, pos: Position) -> Result<Mark, BoardError> {
        let index = self.index(pos)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, pos: Position, mark: Mark) -> Result<(), BoardError> {
        if mark == Mark::Empty {
            return Err(BoardError::EmptyMark);
        }

        let index = self.index(pos)?;
        if self.cells[index] != Mark::Empty {
            return Err(BoardError::CellOccupied(pos));
        }

        self.cells[index] = mark;
        Ok(())
    }

    /// Undoes a placement made by the caller. Out-of-range positions are ignored.
    pub fn clear(&mut self, pos: Position) {
        if let Ok(index) = self.index(pos) {
            self.cells[index] = Mark::Empty;
        }
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Mark::Empty)
            .map(move |(i, _)| Position::new(i / size, i % size))
    }

    pub fn empty_count(&self) -> usize {
        self.empty_cells().count()
    }

    pub fn is_full(&self) -> bool {
        self.empty_cells().next().is_none()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Mark]> {
        self.cells.chunks(self.size)
    }
}
