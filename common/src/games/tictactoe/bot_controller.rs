use crate::games::RandomSource;
use super::board::Board;
use super::evaluator::Score;
use super::minimax::search;
use super::types::{Mark, Position};
use super::win_detector::is_terminal;

/// Largest number of empty cells for which the full game tree is searched.
pub const EXHAUSTIVE_SEARCH_LIMIT: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovePolicy {
    Exhaustive,
    Fallback,
}

impl MovePolicy {
    pub fn for_empty_count(empty_count: usize) -> Self {
        if empty_count > EXHAUSTIVE_SEARCH_LIMIT {
            MovePolicy::Fallback
        } else {
            MovePolicy::Exhaustive
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BotMove {
    pub position: Position,
    pub policy: MovePolicy,
    /// Minimax value of the move; random moves carry none.
    pub score: Option<Score>,
}

pub fn random_move<R>(board: &Board, rng: &mut R) -> Option<Position>
where
    R: RandomSource + ?Sized,
{
    let available_moves: Vec<Position> = board.empty_cells().collect();
    if available_moves.is_empty() {
        return None;
    }
    let idx = rng.random_index(available_moves.len());
    Some(available_moves[idx])
}

pub fn calculate_minimax_move(board: &mut Board, computer: Mark) -> Option<(Position, Score)> {
    let depth = board.empty_count();
    let result = search(board, depth, computer, computer);
    result.position.map(|position| (position, result.score))
}

/// Picks the computer's next cell, or `None` if the game is already decided.
pub fn calculate_move<R>(board: &mut Board, computer: Mark, rng: &mut R) -> Option<BotMove>
where
    R: RandomSource + ?Sized,
{
    if is_terminal(board) {
        return None;
    }

    match MovePolicy::for_empty_count(board.empty_count()) {
        MovePolicy::Fallback => random_move(board, rng).map(|position| BotMove {
            position,
            policy: MovePolicy::Fallback,
            score: None,
        }),
        MovePolicy::Exhaustive => {
            calculate_minimax_move(board, computer).map(|(position, score)| BotMove {
                position,
                policy: MovePolicy::Exhaustive,
                score: Some(score),
            })
        }
    }
}
