use super::board::Board;
use super::types::Mark;
use super::win_detector::has_win;

pub type Score = i32;

pub const WIN_SCORE: Score = 1;
pub const LOSS_SCORE: Score = -1;
pub const DRAW_SCORE: Score = 0;

/// Scores a finished (or depth-exhausted) position from the maximizer's side.
/// There is no partial credit for unfinished runs.
pub fn evaluate(board: &Board, maximizer: Mark) -> Score {
    if has_win(board, maximizer) {
        return WIN_SCORE;
    }
    match maximizer.opponent() {
        Some(minimizer) if has_win(board, minimizer) => LOSS_SCORE,
        _ => DRAW_SCORE,
    }
}

/// Score of a decided position, or `None` while play can continue. Each
/// player's lines are scanned once.
pub fn terminal_score(board: &Board, maximizer: Mark) -> Option<Score> {
    match evaluate(board, maximizer) {
        DRAW_SCORE if !board.is_full() => None,
        score => Some(score),
    }
}
