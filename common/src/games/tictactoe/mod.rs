mod board;
mod bot_controller;
mod error;
mod evaluator;
mod minimax;
mod settings;
mod turn_controller;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{
    BotMove, EXHAUSTIVE_SEARCH_LIMIT, MovePolicy, calculate_minimax_move, calculate_move,
    random_move,
};
pub use error::{BoardError, GameError};
pub use evaluator::{DRAW_SCORE, LOSS_SCORE, Score, WIN_SCORE, evaluate, terminal_score};
pub use minimax::{SearchResult, search};
pub use settings::{GameSettings, MAX_BOARD_SIZE, SETTINGS_FILE_NAME, get_settings_manager};
pub use turn_controller::{HumanPlayer, TurnController};
pub use types::{FirstPlayerMode, Mark, Outcome, Position, TurnState, WinningLine};
pub use win_detector::{
    Line, check_win, check_win_with_line, has_win, is_terminal, line_count, lines_for,
    wins_through,
};
