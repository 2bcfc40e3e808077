use super::options::EngineOptions;
use crate::engine::{Search, SearchLimits, SearchResult, run_parallel};
use crate::game::{BoardMove, Color, FenError, Game, Outcome, STARTING_FEN};
use crate::utils::{BoardSquare, BoardSquareExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResultType {
    Success,         // successful move
    InvalidNotation, // wrong algebraic notation
    InvalidMove,     // not one of the legal moves
    NoHistory,       // nothing to undo
}

pub struct GameController {
    pub game: Game,
    pub options: EngineOptions,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl GameController {
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            game: Game::new(),
            options,
        }
    }

    pub fn new_game(&mut self) {
        self.game = Game::new();
    }

    /// Replaces the current game; on error the current game is kept.
    pub fn new_game_from_fen(&mut self, fen: &str) -> Result<(), FenError> {
        self.game = Game::from_fen(fen, self.options.honor_fen_state)?;
        Ok(())
    }

    /// Plays moves in order, stopping at the first one that fails.
    pub fn play_moves(&mut self, moves: &[String]) -> MoveResultType {
        for notation in moves {
            let result = self.try_move_piece(notation);

            if result != MoveResultType::Success {
                log::warn!("Could not play {}: {:?}", notation, result);
                return result;
            }
        }

        MoveResultType::Success
    }

    pub fn try_move_piece(&mut self, long_algebraic_notation: &str) -> MoveResultType {
        match BoardMove::parse(long_algebraic_notation) {
            Some(board_move) => {
                if self.game.is_legal(board_move.from, board_move.to, board_move.promotion) {
                    self.game.make_move(board_move);
                    self.log_outcome();
                    MoveResultType::Success
                } else {
                    MoveResultType::InvalidMove
                }
            }
            None => MoveResultType::InvalidNotation,
        }
    }

    pub fn try_unmove_piece(&mut self) -> MoveResultType {
        match self.game.history.len() {
            0 => MoveResultType::NoHistory,
            _ => {
                self.game.unmake_move();
                MoveResultType::Success
            }
        }
    }

    /// Leaf counts at `depth` for every legal move of the current position.
    pub fn perft(&mut self, depth: usize) -> Vec<(BoardMove, usize)> {
        if depth == 0 {
            return vec![];
        }

        let moves = self.game.get_moves();

        moves
            .into_iter()
            .map(|board_move| {
                self.game.make_move(board_move);
                let count = count_leaves(&mut self.game, depth - 1);
                self.game.unmake_move();

                (board_move, count)
            })
            .collect()
    }

    pub fn search(&mut self) -> SearchResult {
        self.search_with(SearchLimits::new(self.options.depth))
    }

    pub fn search_with(&mut self, limits: SearchLimits) -> SearchResult {
        match self.options.threads {
            0 | 1 => Search::new(&mut self.game, limits).run(),
            threads => run_parallel(&self.game, limits, threads),
        }
    }

    /// Searches the current position and plays the chosen move.
    pub fn engine_move(&mut self) -> Option<BoardMove> {
        let best_move = self.search().best_move?;

        self.game.make_move(best_move);
        self.log_outcome();

        Some(best_move)
    }

    fn log_outcome(&mut self) {
        match self.game.outcome() {
            Outcome::Ongoing => {}
            Outcome::Checkmate { winner } => log::info!("Checkmate, {:?} wins", winner),
            Outcome::Stalemate => log::info!("Stalemate"),
        }
    }

    pub fn print_with_moves(&self, possible_moves: &[BoardSquare]) {
        const RESET: &str = "\x1b[0m";
        const LIGHT_SQUARE_BG: &str = "\x1b[48;5;172m";
        const DARK_SQUARE_BG: &str = "\x1b[48;5;130m";
        const WHITE_PIECE: &str = "\x1b[1;97m";
        const BLACK_PIECE: &str = "\x1b[1;30m";
        const MOVE_HIGHLIGHT: &str = "\x1b[1;34m";
        const HEADING_BG: &str = "\x1b[48;5;240m";

        let (heading_text, heading_color) = match self.game.side {
            Color::White => ("White to move", WHITE_PIECE),
            Color::Black => ("Black to move", BLACK_PIECE),
        };

        // Board width is 8 squares * 3 chars each = 24 chars
        let total_padding = 24 - heading_text.len();
        let padding = total_padding / 2;

        println!(
            "{}{}{}{}{}{}",
            HEADING_BG,
            " ".repeat(padding),
            heading_color,
            heading_text,
            " ".repeat(total_padding - padding),
            RESET
        );

        for y in (0..8u8).rev() {
            let mut line = String::new();
            for x in 0..8u8 {
                let square = BoardSquare::from_position(x, y);

                line.push_str(if (x + y) % 2 == 1 {
                    LIGHT_SQUARE_BG
                } else {
                    DARK_SQUARE_BG
                });

                match self.game.piece_at(square) {
                    Some((piece, color)) => {
                        let piece_color = match color {
                            Color::White => WHITE_PIECE,
                            Color::Black => BLACK_PIECE,
                        };
                        line.push_str(&format!("{} {} {}", piece_color, piece.to_emoji(), RESET));
                    }
                    None if possible_moves.contains(&square) => {
                        line.push_str(&format!("{} ● {}", MOVE_HIGHLIGHT, RESET));
                    }
                    None => line.push_str("   "),
                }

                line.push_str(RESET);
            }
            println!("{}", line);
        }
    }

    pub fn print(&self) {
        self.print_with_moves(&[]);
        println!("{}", self.game.get_fen());
    }

    pub fn is_at_start(&self) -> bool {
        self.game.get_fen() == STARTING_FEN
    }
}

/// Number of leaf positions `depth` plies below the current one.
pub fn count_leaves(game: &mut Game, depth: usize) -> usize {
    if depth == 0 {
        return 1;
    }

    let moves = game.get_moves();

    // Bulk counting
    if depth == 1 {
        return moves.len();
    }

    moves
        .into_iter()
        .map(|board_move| {
            game.make_move(board_move);
            let count = count_leaves(game, depth - 1);
            game.unmake_move();

            count
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_are_validated() {
        let mut controller = GameController::new();

        assert_eq!(controller.try_move_piece("e2e5"), MoveResultType::InvalidMove);
        assert_eq!(controller.try_move_piece("e2"), MoveResultType::InvalidNotation);
        assert_eq!(controller.try_move_piece("e7e5"), MoveResultType::InvalidMove);
        assert!(controller.is_at_start());

        assert_eq!(controller.try_move_piece("e2e4"), MoveResultType::Success);
        assert_eq!(controller.game.side, Color::Black);
    }

    #[test]
    fn undo_restores_the_position() {
        let mut controller = GameController::new();

        assert_eq!(controller.try_unmove_piece(), MoveResultType::NoHistory);

        let moves = ["e2e4", "d7d5", "e4d5"].map(String::from);
        assert_eq!(controller.play_moves(&moves), MoveResultType::Success);

        for _ in 0..3 {
            assert_eq!(controller.try_unmove_piece(), MoveResultType::Success);
        }
        assert!(controller.is_at_start());
    }

    #[test]
    fn play_moves_stops_at_the_first_failure() {
        let mut controller = GameController::new();
        let moves = ["e2e4", "e2e4", "d7d5"].map(String::from);

        assert_eq!(controller.play_moves(&moves), MoveResultType::InvalidMove);
        assert_eq!(controller.game.history.len(), 1);
    }

    #[test]
    fn bad_notation_keeps_the_current_game() {
        let mut controller = GameController::new();
        controller.try_move_piece("e2e4");
        let before = controller.game.clone();

        assert!(controller.new_game_from_fen("not a position").is_err());
        assert_eq!(controller.game, before);
    }

    #[test]
    fn perft_divide_from_the_start() {
        let mut controller = GameController::new();
        let divide = controller.perft(2);

        assert_eq!(divide.len(), 20);
        assert!(divide.iter().all(|&(_, count)| count == 20));
        assert_eq!(controller.perft(0), vec![]);
        assert!(controller.is_at_start());
    }

    #[test]
    fn engine_plays_its_move() {
        let mut controller = GameController::new();
        controller
            .new_game_from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1")
            .unwrap();

        assert_eq!(controller.engine_move(), BoardMove::parse("a1a8"));
        assert_eq!(controller.game.outcome(), Outcome::Checkmate { winner: Color::White });
        assert_eq!(controller.engine_move(), None);
    }
}
