use super::board::Board;
use super::error::BoardError;
use super::evaluator::{DRAW_SCORE, LOSS_SCORE, Score, WIN_SCORE, terminal_score};
use super::types::{Mark, Position};
use super::win_detector::wins_through;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the search bottomed out without trying a move.
    pub position: Option<Position>,
    pub score: Score,
}

impl SearchResult {
    fn leaf(score: Score) -> Self {
        Self {
            position: None,
            score,
        }
    }
}

/// A mark placed for exploration only; the cell is emptied again on drop.
struct Speculation<'a> {
    board: &'a mut Board,
    position: Position,
}

impl<'a> Speculation<'a> {
    fn place(board: &'a mut Board, position: Position, mark: Mark) -> Result<Self, BoardError> {
        board.set(position, mark)?;
        Ok(Self { board, position })
    }

    fn board(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        self.board.clear(self.position);
    }
}

/// Plain minimax over every empty cell, `remaining_depth` plies deep.
///
/// Cells are tried in row-major order and a candidate only replaces the
/// current best on a strict improvement, so ties go to the first cell seen.
/// The board is returned exactly as it was received.
pub fn search(
    board: &mut Board,
    remaining_depth: usize,
    to_move: Mark,
    maximizer: Mark,
) -> SearchResult {
    if let Some(score) = terminal_score(board, maximizer) {
        return SearchResult::leaf(score);
    }
    if remaining_depth == 0 || maximizer.opponent().is_none() {
        return SearchResult::leaf(DRAW_SCORE);
    }
    expand(board, remaining_depth, to_move, maximizer)
}

/// Searches a position known to have no winner and at least one empty cell.
/// A child can only be decided by the mark just placed, so only the lines
/// through that cell are checked.
fn expand(
    board: &mut Board,
    remaining_depth: usize,
    to_move: Mark,
    maximizer: Mark,
) -> SearchResult {
    let Some(opponent) = to_move.opponent() else {
        return SearchResult::leaf(DRAW_SCORE);
    };
    let maximizing = to_move == maximizer;
    let won = if maximizing { WIN_SCORE } else { LOSS_SCORE };

    let candidates: Vec<Position> = board.empty_cells().collect();
    let mut best: Option<(Position, Score)> = None;

    for position in candidates {
        let score = {
            let Ok(mut speculation) = Speculation::place(board, position, to_move) else {
                continue;
            };
            let child = speculation.board();
            if wins_through(child, position, to_move) {
                won
            } else if remaining_depth == 1 || child.is_full() {
                DRAW_SCORE
            } else {
                expand(child, remaining_depth - 1, opponent, maximizer).score
            }
        };

        let improves = match best {
            None => true,
            Some((_, best_score)) if maximizing => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if improves {
            best = Some((position, score));
        }
    }

    match best {
        Some((position, score)) => SearchResult {
            position: Some(position),
            score,
        },
        None => SearchResult::leaf(DRAW_SCORE),
    }
}
