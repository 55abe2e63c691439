use super::types::Position;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("position {position} is outside a {size}x{size} board")]
    OutOfBounds { position: Position, size: usize },

    #[error("cell {0} is already marked")]
    CellOccupied(Position),

    #[error("board size {size} cannot hold a winning run of {win_length}")]
    InvalidSize { size: usize, win_length: usize },

    #[error("cannot place an empty mark")]
    EmptyMark,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("it is not the computer's turn")]
    NotComputerTurn,

    #[error("it is not the human's turn")]
    NotHumanTurn,

    #[error("game is already over")]
    GameAlreadyOver,

    #[error("human player left the game")]
    Abandoned,
}
