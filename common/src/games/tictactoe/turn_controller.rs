use crate::games::{RandomSource, SessionRng};
use crate::log;
use super::board::Board;
use super::bot_controller::{BotMove, calculate_move};
use super::error::{BoardError, GameError};
use super::settings::GameSettings;
use super::types::{FirstPlayerMode, Mark, Outcome, Position, TurnState, WinningLine};
use super::win_detector::{check_win_with_line, has_win, is_terminal};

/// Supplies the human's moves to [`TurnController::run`].
pub trait HumanPlayer {
    /// Cell the human wants to mark next, or `None` to leave the game.
    fn choose_move(
        &mut self,
        board: &Board,
        last_computer_move: Option<Position>,
    ) -> Option<Position>;

    /// Called when the chosen cell was refused; the human is asked again afterwards.
    fn move_rejected(&mut self, _position: Position, _error: &BoardError) {}
}

/// Owns the board for one game and alternates computer and human plies.
pub struct TurnController<R: RandomSource = SessionRng> {
    board: Board,
    computer_mark: Mark,
    human_mark: Mark,
    turn: TurnState,
    last_computer_move: Option<BotMove>,
    rng: R,
}

impl<R: RandomSource> TurnController<R> {
    pub fn new(settings: &GameSettings, rng: R) -> Result<Self, GameError> {
        let board = Board::new(settings.board_size, settings.win_count)?;
        Self::from_board(board, settings.human_mark, settings.first_player, rng)
    }

    /// Resumes play on an existing position. A finished position starts in `GameOver`.
    pub fn from_board(
        board: Board,
        human_mark: Mark,
        to_move: FirstPlayerMode,
        mut rng: R,
    ) -> Result<Self, GameError> {
        let computer_mark = human_mark.opponent().ok_or(BoardError::EmptyMark)?;

        let turn = match to_move {
            FirstPlayerMode::Computer => TurnState::ComputerTurn,
            FirstPlayerMode::Human => TurnState::HumanTurn,
            FirstPlayerMode::Random => {
                if rng.random_index(2) == 0 {
                    TurnState::HumanTurn
                } else {
                    TurnState::ComputerTurn
                }
            }
        };

        let mut controller = Self {
            board,
            computer_mark,
            human_mark,
            turn,
            last_computer_move: None,
            rng,
        };
        controller.advance(turn);
        Ok(controller)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn computer_mark(&self) -> Mark {
        self.computer_mark
    }

    pub fn human_mark(&self) -> Mark {
        self.human_mark
    }

    pub fn last_computer_move(&self) -> Option<BotMove> {
        self.last_computer_move
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.turn {
            TurnState::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        check_win_with_line(&self.board)
    }

    pub fn play_computer_turn(&mut self) -> Result<BotMove, GameError> {
        match self.turn {
            TurnState::GameOver(_) => return Err(GameError::GameAlreadyOver),
            TurnState::HumanTurn => return Err(GameError::NotComputerTurn),
            TurnState::ComputerTurn => {}
        }

        let computer = self.computer_mark;
        let Some(bot_move) = calculate_move(&mut self.board, computer, &mut self.rng) else {
            self.finish();
            return Err(GameError::GameAlreadyOver);
        };

        self.board.set(bot_move.position, self.computer_mark)?;
        log!(
            "Computer ({}) marked {} using {:?} policy",
            self.computer_mark,
            bot_move.position,
            bot_move.policy
        );

        self.last_computer_move = Some(bot_move);
        self.advance(TurnState::HumanTurn);
        Ok(bot_move)
    }

    pub fn play_human_turn(&mut self, position: Position) -> Result<(), GameError> {
        match self.turn {
            TurnState::GameOver(_) => return Err(GameError::GameAlreadyOver),
            TurnState::ComputerTurn => return Err(GameError::NotHumanTurn),
            TurnState::HumanTurn => {}
        }

        self.board.set(position, self.human_mark)?;
        self.advance(TurnState::ComputerTurn);
        Ok(())
    }

    /// Plays until the game ends and returns its outcome.
    pub fn run<H>(&mut self, human: &mut H) -> Result<Outcome, GameError>
    where
        H: HumanPlayer + ?Sized,
    {
        loop {
            match self.turn {
                TurnState::GameOver(outcome) => return Ok(outcome),
                TurnState::ComputerTurn => {
                    self.play_computer_turn()?;
                }
                TurnState::HumanTurn => {
                    let last_move = self.last_computer_move.map(|m| m.position);
                    let Some(position) = human.choose_move(&self.board, last_move) else {
                        log!("Human ({}) left the game", self.human_mark);
                        return Err(GameError::Abandoned);
                    };

                    match self.play_human_turn(position) {
                        Ok(()) => {}
                        Err(GameError::Board(error)) => human.move_rejected(position, &error),
                        Err(error) => return Err(error),
                    }
                }
            }
        }
    }

    fn advance(&mut self, next: TurnState) {
        if is_terminal(&self.board) {
            self.finish();
        } else {
            self.turn = next;
        }
    }

    fn finish(&mut self) {
        let outcome = self.classify();
        log!("Game over: {:?}", outcome);
        self.turn = TurnState::GameOver(outcome);
    }

    fn classify(&self) -> Outcome {
        if has_win(&self.board, self.computer_mark) {
            Outcome::ComputerWin
        } else if has_win(&self.board, self.human_mark) {
            Outcome::HumanWin
        } else {
            Outcome::Draw
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ScriptedRng;
    use crate::games::tictactoe::bot_controller::MovePolicy;

    struct ScriptedHuman {
        moves: Vec<Position>,
        rejected: Vec<Position>,
    }

    impl ScriptedHuman {
        fn new(moves: Vec<Position>) -> Self {
            Self {
                moves,
                rejected: Vec::new(),
            }
        }
    }

    impl HumanPlayer for ScriptedHuman {
        fn choose_move(&mut self, _board: &Board, _last: Option<Position>) -> Option<Position> {
            if self.moves.is_empty() {
                None
            } else {
                Some(self.moves.remove(0))
            }
        }

        fn move_rejected(&mut self, position: Position, _error: &BoardError) {
            self.rejected.push(position);
        }
    }

    /// Always takes the first empty cell.
    struct FirstEmptyHuman;

    impl HumanPlayer for FirstEmptyHuman {
        fn choose_move(&mut self, board: &Board, _last: Option<Position>) -> Option<Position> {
            board.empty_cells().next()
        }
    }

    fn settings(size: usize, win_count: usize, first_player: FirstPlayerMode) -> GameSettings {
        GameSettings {
            board_size: size,
            win_count,
            first_player,
            human_mark: Mark::X,
        }
    }

    fn new_game(
        size: usize,
        win_count: usize,
        first_player: FirstPlayerMode,
        seed: u64,
    ) -> TurnController {
        let settings = settings(size, win_count, first_player);
        TurnController::new(&settings, SessionRng::new(seed)).unwrap()
    }

    #[test]
    fn test_new_game_starts_with_configured_player() {
        let human_first = new_game(3, 3, FirstPlayerMode::Human, 1);
        assert_eq!(human_first.turn(), TurnState::HumanTurn);
        assert_eq!(human_first.computer_mark(), Mark::O);
        assert_eq!(human_first.human_mark(), Mark::X);

        let computer_first = new_game(3, 3, FirstPlayerMode::Computer, 1);
        assert_eq!(computer_first.turn(), TurnState::ComputerTurn);
    }

    #[test]
    fn test_random_first_player_uses_rng() {
        let human = TurnController::new(
            &settings(3, 3, FirstPlayerMode::Random),
            ScriptedRng::new(vec![0]),
        )
        .unwrap();
        assert_eq!(human.turn(), TurnState::HumanTurn);

        let computer = TurnController::new(
            &settings(3, 3, FirstPlayerMode::Random),
            ScriptedRng::new(vec![1]),
        )
        .unwrap();
        assert_eq!(computer.turn(), TurnState::ComputerTurn);
    }

    #[test]
    fn test_new_rejects_invalid_size() {
        let result =
            TurnController::new(&settings(2, 3, FirstPlayerMode::Human), SessionRng::new(1));
        assert!(matches!(
            result,
            Err(GameError::Board(BoardError::InvalidSize { size: 2, win_length: 3 }))
        ));
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = new_game(3, 3, FirstPlayerMode::Human, 1);

        assert_eq!(game.play_computer_turn(), Err(GameError::NotComputerTurn));
        game.play_human_turn(Position::new(1, 1)).unwrap();
        assert_eq!(game.turn(), TurnState::ComputerTurn);
        assert_eq!(
            game.play_human_turn(Position::new(0, 0)),
            Err(GameError::NotHumanTurn)
        );

        let bot_move = game.play_computer_turn().unwrap();
        assert_eq!(bot_move.policy, MovePolicy::Exhaustive);
        assert_eq!(game.board().get(bot_move.position), Ok(Mark::O));
        assert_eq!(game.last_computer_move(), Some(bot_move));
        assert_eq!(game.turn(), TurnState::HumanTurn);
    }

    #[test]
    fn test_rejected_human_move_keeps_state() {
        let mut game = new_game(3, 3, FirstPlayerMode::Human, 1);
        game.play_human_turn(Position::new(0, 0)).unwrap();
        game.play_computer_turn().unwrap();
        let board_before = game.board().clone();

        let occupied = game.last_computer_move().unwrap().position;
        assert_eq!(
            game.play_human_turn(occupied),
            Err(GameError::Board(BoardError::CellOccupied(occupied)))
        );
        assert!(matches!(
            game.play_human_turn(Position::new(3, 0)),
            Err(GameError::Board(BoardError::OutOfBounds { .. }))
        ));
        assert_eq!(game.board(), &board_before);
        assert_eq!(game.turn(), TurnState::HumanTurn);
    }

    #[test]
    fn test_computer_completes_win_with_last_cell() {
        let board = Board::from_rows(&["XOO", "OXX", "XO."], 3);
        let mut game = TurnController::from_board(
            board,
            Mark::O,
            FirstPlayerMode::Computer,
            SessionRng::new(3),
        )
        .unwrap();

        let bot_move = game.play_computer_turn().unwrap();
        assert_eq!(bot_move.position, Position::new(2, 2));
        assert_eq!(game.outcome(), Some(Outcome::ComputerWin));
        let line = game.winning_line().unwrap();
        assert_eq!(line.mark, Mark::X);
        assert_eq!(game.play_computer_turn(), Err(GameError::GameAlreadyOver));
        assert_eq!(
            game.play_human_turn(Position::new(0, 0)),
            Err(GameError::GameAlreadyOver)
        );
    }

    #[test]
    fn test_ten_empty_cells_use_fallback() {
        let board = Board::from_rows(&["XO..", "..OX", "X...", ".O.."], 3);
        assert_eq!(board.empty_count(), 10);
        let before = board.clone();
        let mut game = TurnController::from_board(
            board,
            Mark::O,
            FirstPlayerMode::Computer,
            ScriptedRng::new(vec![6]),
        )
        .unwrap();

        let bot_move = game.play_computer_turn().unwrap();
        assert_eq!(bot_move.policy, MovePolicy::Fallback);
        assert!(before.contains(bot_move.position));
        assert_eq!(before.get(bot_move.position), Ok(Mark::Empty));
        assert_eq!(bot_move.position, Position::new(2, 3));
        assert_eq!(game.board().get(bot_move.position), Ok(Mark::X));
    }

    #[test]
    fn test_nine_empty_cells_use_search() {
        let board = Board::from_rows(&["XO..", "..OX", "X...", "OO.."], 3);
        assert_eq!(board.empty_count(), 9);
        let mut game = TurnController::from_board(
            board,
            Mark::X,
            FirstPlayerMode::Computer,
            SessionRng::new(5),
        )
        .unwrap();
        let bot_move = game.play_computer_turn().unwrap();
        assert_eq!(bot_move.policy, MovePolicy::Exhaustive);
        assert!(bot_move.score.is_some());
    }

    #[test]
    fn test_full_board_without_winner_is_draw() {
        let board = Board::from_rows(&["XOX", "XOO", "OXX"], 3);
        let game = TurnController::from_board(
            board,
            Mark::X,
            FirstPlayerMode::Computer,
            SessionRng::new(0),
        )
        .unwrap();
        assert_eq!(game.turn(), TurnState::GameOver(Outcome::Draw));
        assert_eq!(game.outcome(), Some(Outcome::Draw));
        assert_eq!(game.winning_line(), None);
    }

    #[test]
    fn test_computer_turn_on_decided_board_ends_game() {
        let mut game = TurnController {
            board: Board::from_rows(&["OOO", "XX.", "..."], 3),
            computer_mark: Mark::O,
            human_mark: Mark::X,
            turn: TurnState::ComputerTurn,
            last_computer_move: None,
            rng: SessionRng::new(0),
        };
        assert_eq!(game.play_computer_turn(), Err(GameError::GameAlreadyOver));
        assert_eq!(game.turn(), TurnState::GameOver(Outcome::ComputerWin));
        assert_eq!(game.last_computer_move(), None);
    }

    #[test]
    fn test_human_win_is_reported() {
        let board = Board::from_rows(&["XX.", "OO.", "..."], 3);
        let mut game = TurnController::from_board(
            board,
            Mark::X,
            FirstPlayerMode::Human,
            SessionRng::new(0),
        )
        .unwrap();
        game.play_human_turn(Position::new(0, 2)).unwrap();
        assert_eq!(game.outcome(), Some(Outcome::HumanWin));
    }

    #[test]
    fn test_run_retries_rejected_moves() {
        let mut game = new_game(3, 3, FirstPlayerMode::Human, 1);
        let mut human = ScriptedHuman::new(vec![
            Position::new(1, 1),
            Position::new(1, 1),
            Position::new(9, 9),
        ]);

        let result = game.run(&mut human);
        assert_eq!(result, Err(GameError::Abandoned));
        assert_eq!(human.rejected, vec![Position::new(1, 1), Position::new(9, 9)]);
        assert_eq!(game.board().get(Position::new(1, 1)), Ok(Mark::X));
        assert_eq!(game.board().empty_count(), 7);
    }

    #[test]
    fn test_computer_never_loses_on_small_board() {
        let mut game = new_game(3, 3, FirstPlayerMode::Human, 11);
        let outcome = game.run(&mut FirstEmptyHuman).unwrap();
        assert_ne!(outcome, Outcome::HumanWin);
        assert_eq!(game.outcome(), Some(outcome));
    }

    #[test]
    fn test_fallback_game_runs_to_completion() {
        let mut game = new_game(4, 4, FirstPlayerMode::Computer, 8);
        let outcome = game.run(&mut FirstEmptyHuman).unwrap();
        assert!(game.board().is_full() || outcome != Outcome::Draw);
        assert!(matches!(game.turn(), TurnState::GameOver(_)));
    }
}
