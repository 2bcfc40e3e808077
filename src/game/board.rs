use super::error::FenError;
use super::movegen::PROMOTION_PIECES;
use super::pieces::{Color, Piece, PieceCode};
use crate::utils::{Bitboard, BitboardExt, BoardSquare, BoardSquareExt};
use std::fmt::{Display, Formatter};
use strum::{EnumCount, IntoEnumIterator};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// castling_flags layout: 0b0000QKqk, where kq/KQ is one if black/white can castle king/queen side
pub const BLACK_KINGSIDE: u8 = 0b0001;
pub const BLACK_QUEENSIDE: u8 = 0b0010;
pub const WHITE_KINGSIDE: u8 = 0b0100;
pub const WHITE_QUEENSIDE: u8 = 0b1000;
pub const ALL_CASTLING: u8 = 0b1111;

pub fn kingside_flag(color: Color) -> u8 {
    match color {
        Color::White => WHITE_KINGSIDE,
        Color::Black => BLACK_KINGSIDE,
    }
}

pub fn queenside_flag(color: Color) -> u8 {
    match color {
        Color::White => WHITE_QUEENSIDE,
        Color::Black => BLACK_QUEENSIDE,
    }
}

/// The castling right tied to a rook's home corner, if the square is one.
fn corner_flag(square: BoardSquare) -> u8 {
    match square {
        0 => WHITE_QUEENSIDE, // a1
        7 => WHITE_KINGSIDE,  // h1
        56 => BLACK_QUEENSIDE, // a8
        63 => BLACK_KINGSIDE, // h8
        _ => 0,
    }
}

/// Where the rook starts and lands for a two-square king shift.
pub fn castling_rook_squares(
    king_from: BoardSquare,
    king_to: BoardSquare,
) -> (BoardSquare, BoardSquare) {
    if king_to > king_from {
        (king_from + 3, king_to - 1)
    } else {
        (king_from - 4, king_to + 1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardMove {
    pub from: BoardSquare,
    pub to: BoardSquare,
    pub promotion: Option<Piece>,
}

impl BoardMove {
    pub fn new(from: BoardSquare, to: BoardSquare) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: BoardSquare, to: BoardSquare, promotion: Piece) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Parses long algebraic notation, e.g. `e2e4` or `e7e8q`.
    pub fn parse(string: &str) -> Option<BoardMove> {
        if !string.is_ascii() {
            return None;
        }

        let promotion = match string.len() {
            4 => None,
            5 => match Piece::from_char(string[4..].chars().next()?)? {
                Piece::Pawn | Piece::King => return None,
                piece => Some(piece),
            },
            _ => return None,
        };

        Some(BoardMove {
            from: BoardSquare::parse(&string[0..2])?,
            to: BoardSquare::parse(&string[2..4])?,
            promotion,
        })
    }

    pub fn unparse(&self) -> String {
        format!(
            "{}{}{}",
            self.from.unparse(),
            self.to.unparse(),
            self.promotion
                .map(|p| p.to_char().to_string())
                .unwrap_or_default()
        )
    }
}

impl Display for BoardMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.unparse())
    }
}

/// Everything needed to undo exactly one move.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub board_move: BoardMove,
    pub moved: PieceCode,
    pub captured: PieceCode,
    pub captured_square: BoardSquare,
    pub castling_flags: u8,
    pub en_passant: Option<BoardSquare>,
    pub king_squares: [BoardSquare; Color::COUNT],
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    pub side: Color,

    pub pieces: [PieceCode; 64],

    pub piece_bitboards: [[Bitboard; Piece::COUNT]; Color::COUNT],
    pub color_bitboards: [Bitboard; Color::COUNT],
    pub occupied: Bitboard,

    pub castling_flags: u8,
    pub en_passant: Option<BoardSquare>, // the square a pawn skipped over on the previous move
    pub king_squares: [BoardSquare; Color::COUNT],

    // how many halfmoves have been played since the last capture or pawn advance
    pub halfmove_clock: u32,
    pub fullmove_number: u32, // incremented after black's move

    pub history: Vec<Snapshot>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Game {
        Game::from_fen(STARTING_FEN, false).expect("the starting position is valid")
    }

    fn empty() -> Game {
        Game {
            side: Color::White,
            pieces: [PieceCode::EMPTY; 64],
            piece_bitboards: [[0; Piece::COUNT]; Color::COUNT],
            color_bitboards: [0; Color::COUNT],
            occupied: 0,
            castling_flags: ALL_CASTLING,
            en_passant: None,
            king_squares: [0; Color::COUNT],
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    /// Loads a position from its six-field notation.
    ///
    /// Only the piece placement is applied unless `honor_state` is set: the
    /// game then starts with white to move, every castling right granted and
    /// no en passant target. With `honor_state` the remaining fields are
    /// validated and applied as well.
    pub fn from_fen(fen: &str, honor_state: bool) -> Result<Game, FenError> {
        let fields = fen.split_whitespace().collect::<Vec<_>>();

        if fields.len() < 6 {
            return Err(FenError::MissingFields {
                found: fields.len(),
            });
        }

        let mut game = Game::empty();

        let ranks = fields[0].split('/').collect::<Vec<_>>();
        if ranks.len() != 8 {
            return Err(FenError::RankCount { found: ranks.len() });
        }

        for (i, rank) in ranks.iter().enumerate() {
            let y = 7 - i as u8;
            let mut x = 0u8;

            for char in rank.chars() {
                // Numbers encode empty spaces
                if let Some(skip) = char.to_digit(10) {
                    x += skip as u8;
                } else {
                    let code = PieceCode::from_char(char)
                        .ok_or(FenError::UnknownPiece { character: char })?;

                    if x >= 8 {
                        return Err(FenError::RankLength {
                            rank: rank.to_string(),
                        });
                    }

                    game.put_piece(BoardSquare::from_position(x, y), code);
                    x += 1;
                }

                if x > 8 {
                    return Err(FenError::RankLength {
                        rank: rank.to_string(),
                    });
                }
            }

            if x != 8 {
                return Err(FenError::RankLength {
                    rank: rank.to_string(),
                });
            }
        }

        for color in Color::iter() {
            let kings = game.piece_bitboards[color as usize][Piece::King as usize];

            if kings.count_ones() != 1 {
                return Err(FenError::KingCount {
                    color,
                    count: kings.count_ones(),
                });
            }

            game.king_squares[color as usize] = kings.next_index();
        }

        if honor_state {
            game.apply_fen_state(&fields[1..6])?;
        }

        game.update_occupancy();

        log::debug!("Loaded position {}", fen);
        game.color_bitboards[Color::White as usize].print(Some("White Bitboard"), None);
        game.color_bitboards[Color::Black as usize].print(Some("Black Bitboard"), None);

        Ok(game)
    }

    fn apply_fen_state(&mut self, fields: &[&str]) -> Result<(), FenError> {
        self.side = match fields[0] {
            "w" => Color::White,
            "b" => Color::Black,
            value => {
                return Err(FenError::InvalidSide {
                    value: value.to_string(),
                });
            }
        };

        self.castling_flags = 0;
        if fields[1] != "-" {
            for c in fields[1].chars() {
                self.castling_flags |= match c {
                    'k' => BLACK_KINGSIDE,
                    'q' => BLACK_QUEENSIDE,
                    'K' => WHITE_KINGSIDE,
                    'Q' => WHITE_QUEENSIDE,
                    _ => {
                        return Err(FenError::InvalidCastling {
                            value: fields[1].to_string(),
                        });
                    }
                };
            }
        }

        // the target lies behind an enemy pawn that has just made a double step
        let (target_rank, pawn_offset): (u8, i8) = match self.side {
            Color::White => (5, -8),
            Color::Black => (2, 8),
        };

        self.en_passant = match fields[2] {
            "-" => None,
            value => match BoardSquare::parse(value) {
                Some(square)
                    if square.get_y() == target_rank
                        && self.pieces[(square as i8 + pawn_offset) as usize]
                            .is(Piece::Pawn, !self.side) =>
                {
                    Some(square)
                }
                _ => {
                    return Err(FenError::InvalidEnPassant {
                        value: value.to_string(),
                    });
                }
            },
        };

        let parse_clock = |value: &str| {
            value.parse::<u32>().map_err(|_| FenError::InvalidClock {
                value: value.to_string(),
            })
        };

        self.halfmove_clock = parse_clock(fields[3])?;
        self.fullmove_number = parse_clock(fields[4])?;

        Ok(())
    }

    pub fn piece_at(&self, square: BoardSquare) -> Option<(Piece, Color)> {
        self.pieces[square as usize].decode()
    }

    fn put_piece(&mut self, square: BoardSquare, code: PieceCode) {
        self.pieces[square as usize] = code;

        if let Some((piece, color)) = code.decode() {
            self.piece_bitboards[color as usize][piece as usize] |= square.to_mask();
        }
    }

    fn remove_piece(&mut self, square: BoardSquare) -> PieceCode {
        let code = self.pieces[square as usize];

        if let Some((piece, color)) = code.decode() {
            self.piece_bitboards[color as usize][piece as usize] &= !square.to_mask();
        }

        self.pieces[square as usize] = PieceCode::EMPTY;
        code
    }

    fn update_occupancy(&mut self) {
        for color in Color::iter() {
            self.color_bitboards[color as usize] = self.piece_bitboards[color as usize]
                .iter()
                .fold(0, |acc, bitboard| acc | bitboard);
        }

        self.occupied = self.color_bitboards[Color::White as usize]
            | self.color_bitboards[Color::Black as usize];
    }

    /// Applies a move and pushes the snapshot that undoes it.
    ///
    /// The move is not checked for legality; the source square must hold a piece.
    pub fn make_move(&mut self, board_move: BoardMove) {
        let BoardMove {
            from,
            to,
            promotion,
        } = board_move;

        let moved = self.pieces[from as usize];
        let Some((piece, color)) = moved.decode() else {
            panic!("make_move called with an empty source square {}", from.unparse());
        };

        // en passant captures the pawn one rank behind the target
        let captured_square = if piece == Piece::Pawn
            && self.en_passant == Some(to)
            && from.get_x() != to.get_x()
        {
            match color {
                Color::White => to - 8,
                Color::Black => to + 8,
            }
        } else {
            to
        };

        self.history.push(Snapshot {
            board_move,
            moved,
            captured: self.pieces[captured_square as usize],
            captured_square,
            castling_flags: self.castling_flags,
            en_passant: self.en_passant,
            king_squares: self.king_squares,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        });

        let captured = self.remove_piece(captured_square);
        self.remove_piece(from);

        let placed = match promotion {
            Some(promoted) if piece == Piece::Pawn && PROMOTION_PIECES.contains(&promoted) => {
                PieceCode::new(promoted, color)
            }
            _ => moved,
        };
        self.put_piece(to, placed);

        self.en_passant = match piece {
            Piece::Pawn if from.get_y().abs_diff(to.get_y()) == 2 => Some((from + to) / 2),
            _ => None,
        };

        match piece {
            Piece::King => {
                self.castling_flags &= !(kingside_flag(color) | queenside_flag(color));
                self.king_squares[color as usize] = to;

                if from.abs_diff(to) == 2 {
                    let (rook_from, rook_to) = castling_rook_squares(from, to);
                    let rook = self.remove_piece(rook_from);
                    self.put_piece(rook_to, rook);
                }
            }
            Piece::Rook => self.castling_flags &= !corner_flag(from),
            _ => {}
        }

        if captured.piece() == Some(Piece::Rook) {
            self.castling_flags &= !corner_flag(captured_square);
        }

        if piece == Piece::Pawn || !captured.is_empty() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if color == Color::Black {
            self.fullmove_number += 1;
        }

        self.update_occupancy();
        self.side = !self.side;
    }

    /// Restores the position from before the most recent `make_move`.
    ///
    /// # Panics
    /// When there is no move to undo.
    pub fn unmake_move(&mut self) {
        let snapshot = self
            .history
            .pop()
            .expect("unmake_move called without a matching make_move");

        let BoardMove { from, to, .. } = snapshot.board_move;

        if snapshot.moved.piece() == Some(Piece::King) && from.abs_diff(to) == 2 {
            let (rook_from, rook_to) = castling_rook_squares(from, to);
            let rook = self.remove_piece(rook_to);
            self.put_piece(rook_from, rook);
        }

        self.remove_piece(to);
        self.put_piece(from, snapshot.moved);
        self.put_piece(snapshot.captured_square, snapshot.captured);

        self.castling_flags = snapshot.castling_flags;
        self.en_passant = snapshot.en_passant;
        self.king_squares = snapshot.king_squares;
        self.halfmove_clock = snapshot.halfmove_clock;
        self.fullmove_number = snapshot.fullmove_number;

        self.update_occupancy();
        self.side = !self.side;
    }

    /// Whether the square array, the bitboards and the king cache all agree.
    pub fn is_consistent(&self) -> bool {
        for square in 0..64u8 {
            let mut owners = vec![];

            for color in Color::iter() {
                for piece in Piece::iter() {
                    if self.piece_bitboards[color as usize][piece as usize].is_set(square) {
                        owners.push((piece, color));
                    }
                }
            }

            let expected = self.piece_at(square).into_iter().collect::<Vec<_>>();
            if owners != expected {
                return false;
            }
        }

        for color in Color::iter() {
            let union = self.piece_bitboards[color as usize]
                .iter()
                .fold(0, |acc, bitboard| acc | bitboard);

            if union != self.color_bitboards[color as usize] {
                return false;
            }

            let kings = self.piece_bitboards[color as usize][Piece::King as usize];
            if kings != self.king_squares[color as usize].to_mask() {
                return false;
            }
        }

        self.occupied
            == self.color_bitboards[Color::White as usize]
                | self.color_bitboards[Color::Black as usize]
    }

    pub fn get_fen(&self) -> String {
        let mut placement = String::new();

        for y in (0..8u8).rev() {
            let mut empty = 0;

            for x in 0..8u8 {
                match self.pieces[BoardSquare::from_position(x, y) as usize].to_char() {
                    Some(c) => {
                        if empty != 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(c);
                    }
                    None => empty += 1,
                }
            }

            if empty != 0 {
                placement.push_str(&empty.to_string());
            }

            if y != 0 {
                placement.push('/');
            }
        }

        let side = match self.side {
            Color::White => "w",
            Color::Black => "b",
        };

        let mut castling = String::new();
        for (flag, c) in [
            (WHITE_KINGSIDE, 'K'),
            (WHITE_QUEENSIDE, 'Q'),
            (BLACK_KINGSIDE, 'k'),
            (BLACK_QUEENSIDE, 'q'),
        ] {
            if self.castling_flags & flag != 0 {
                castling.push(c);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .en_passant
            .map(|square| square.unparse())
            .unwrap_or("-".to_string());

        format!(
            "{} {} {} {} {} {}",
            placement, side, castling, en_passant, self.halfmove_clock, self.fullmove_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut Game, moves: &[&str]) {
        for notation in moves {
            let board_move = BoardMove::parse(notation).unwrap();
            game.make_move(board_move);
            assert!(game.is_consistent(), "inconsistent after {}", notation);
        }
    }

    fn square(notation: &str) -> BoardSquare {
        BoardSquare::parse(notation).unwrap()
    }

    #[test]
    fn starting_position() {
        let game = Game::new();

        assert!(game.is_consistent());
        assert_eq!(game.side, Color::White);
        assert_eq!(game.castling_flags, ALL_CASTLING);
        assert_eq!(game.en_passant, None);
        assert_eq!(game.king_squares, [square("e1"), square("e8")]);
        assert_eq!(game.occupied.count_ones(), 32);
        assert_eq!(game.get_fen(), STARTING_FEN);
    }

    #[test]
    fn move_notation() {
        assert_eq!(BoardMove::parse("e2e4"), Some(BoardMove::new(12, 28)));
        assert_eq!(
            BoardMove::parse("e7e8q"),
            Some(BoardMove::with_promotion(52, 60, Piece::Queen))
        );
        assert_eq!(BoardMove::parse("e7e8k"), None);
        assert_eq!(BoardMove::parse("e2e"), None);
        assert_eq!(BoardMove::parse("z2e4"), None);
        assert_eq!(BoardMove::with_promotion(52, 60, Piece::Knight).unparse(), "e7e8n");
    }

    #[test]
    fn too_few_fields_is_an_error() {
        assert_eq!(
            Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -", false),
            Err(FenError::MissingFields { found: 4 })
        );
    }

    #[test]
    fn malformed_placement_is_an_error() {
        assert_eq!(
            Game::from_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", false),
            Err(FenError::RankCount { found: 7 })
        );
        assert!(matches!(
            Game::from_fen("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", false),
            Err(FenError::RankLength { .. })
        ));
        assert!(matches!(
            Game::from_fen("rnbqkbnr/pppppppp/7/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", false),
            Err(FenError::RankLength { .. })
        ));
        assert_eq!(
            Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1", false),
            Err(FenError::UnknownPiece { character: 'X' })
        );
        assert_eq!(
            Game::from_fen("rnbq1bnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", false),
            Err(FenError::KingCount {
                color: Color::Black,
                count: 0
            })
        );
    }

    #[test]
    fn notation_state_is_ignored_by_default() {
        let fen = "r3k2r/8/8/3pP3/8/8/8/R3K2R b - d6 12 40";
        let game = Game::from_fen(fen, false).unwrap();

        assert_eq!(game.side, Color::White);
        assert_eq!(game.castling_flags, ALL_CASTLING);
        assert_eq!(game.en_passant, None);
        assert_eq!(game.halfmove_clock, 0);
        assert_eq!(game.fullmove_number, 1);
    }

    #[test]
    fn notation_state_can_be_honored() {
        let fen = "r3k2r/8/8/3pP3/8/8/8/R3K2R w Kq d6 12 40";
        let game = Game::from_fen(fen, true).unwrap();

        assert_eq!(game.castling_flags, WHITE_KINGSIDE | BLACK_QUEENSIDE);
        assert_eq!(game.en_passant, Some(square("d6")));
        assert_eq!(game.get_fen(), fen);

        assert_eq!(
            Game::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1", true),
            Err(FenError::InvalidSide {
                value: "x".to_string()
            })
        );
        assert!(matches!(
            Game::from_fen("4k3/8/8/8/8/8/8/4K3 w KX - 0 1", true),
            Err(FenError::InvalidCastling { .. })
        ));
        assert!(matches!(
            Game::from_fen("4k3/8/8/8/8/8/8/4K3 w - e4 0 1", true),
            Err(FenError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            Game::from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1", true),
            Err(FenError::InvalidClock { .. })
        ));
    }

    #[test]
    fn en_passant_target_must_follow_an_enemy_double_step() {
        // rank 3 target with white to move would let d2 take its own pawn on e2
        assert_eq!(
            Game::from_fen("4k3/8/8/8/8/8/3PP3/4K3 w - e3 0 1", true),
            Err(FenError::InvalidEnPassant {
                value: "e3".to_string()
            })
        );

        // right rank, but no black pawn on d5
        assert!(matches!(
            Game::from_fen("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1", true),
            Err(FenError::InvalidEnPassant { .. })
        ));

        let game = Game::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1", true).unwrap();
        assert_eq!(game.en_passant, Some(square("e3")));
    }

    #[test]
    fn only_real_promotion_pieces_are_placed() {
        let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", true).unwrap();

        game.make_move(BoardMove::with_promotion(square("a7"), square("a8"), Piece::King));
        assert_eq!(game.piece_at(square("a8")), Some((Piece::Pawn, Color::White)));
        assert!(game.is_consistent());
        game.unmake_move();

        game.make_move(BoardMove::with_promotion(square("a7"), square("a8"), Piece::Rook));
        assert_eq!(game.piece_at(square("a8")), Some((Piece::Rook, Color::White)));
        assert!(game.is_consistent());
    }

    #[test]
    fn en_passant_lifecycle() {
        let mut game = Game::new();

        play(&mut game, &["e2e4"]);
        assert_eq!(game.en_passant, Some(square("e3")));

        play(&mut game, &["g8f6"]);
        assert_eq!(game.en_passant, None);

        play(&mut game, &["e4e5", "d7d5"]);
        assert_eq!(game.en_passant, Some(square("d6")));

        let before = game.clone();
        play(&mut game, &["e5d6"]);

        assert_eq!(game.piece_at(square("d6")), Some((Piece::Pawn, Color::White)));
        assert_eq!(game.piece_at(square("d5")), None);
        assert_eq!(game.piece_at(square("e5")), None);
        assert_eq!(game.en_passant, None);
        assert_eq!(game.halfmove_clock, 0);

        game.unmake_move();
        assert_eq!(game, before);
        assert_eq!(game.piece_at(square("d5")), Some((Piece::Pawn, Color::Black)));
    }

    #[test]
    fn castling_moves_the_rook() {
        let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", true).unwrap();
        let before = game.clone();

        play(&mut game, &["e1g1"]);
        assert_eq!(game.piece_at(square("f1")), Some((Piece::Rook, Color::White)));
        assert_eq!(game.piece_at(square("h1")), None);
        assert_eq!(game.king_squares[Color::White as usize], square("g1"));
        assert_eq!(game.castling_flags, BLACK_KINGSIDE | BLACK_QUEENSIDE);

        play(&mut game, &["e8c8"]);
        assert_eq!(game.piece_at(square("d8")), Some((Piece::Rook, Color::Black)));
        assert_eq!(game.piece_at(square("a8")), None);
        assert_eq!(game.castling_flags, 0);

        game.unmake_move();
        game.unmake_move();
        assert_eq!(game, before);
    }

    #[test]
    fn rook_moves_and_captures_clear_single_rights() {
        let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", true).unwrap();

        play(&mut game, &["a1a2"]);
        assert_eq!(game.castling_flags, WHITE_KINGSIDE | BLACK_KINGSIDE | BLACK_QUEENSIDE);

        play(&mut game, &["h8h1"]);
        assert_eq!(game.castling_flags, BLACK_QUEENSIDE);

        // moving back home never restores a right
        play(&mut game, &["a2a1", "h1h8"]);
        assert_eq!(game.castling_flags, BLACK_QUEENSIDE);
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let mut game = Game::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1", false).unwrap();
        let before = game.clone();

        play(&mut game, &["a7b8n"]);
        assert_eq!(game.piece_at(square("b8")), Some((Piece::Knight, Color::White)));
        assert_eq!(game.piece_bitboards[Color::White as usize][Piece::Pawn as usize], 0);
        assert_eq!(game.piece_bitboards[Color::Black as usize][Piece::Rook as usize], 0);

        game.unmake_move();
        assert_eq!(game, before);
    }

    #[test]
    fn clocks_are_tracked() {
        let mut game = Game::new();

        play(&mut game, &["g1f3", "g8f6", "f3g1"]);
        assert_eq!(game.halfmove_clock, 3);
        assert_eq!(game.fullmove_number, 2);

        play(&mut game, &["e7e5"]);
        assert_eq!(game.halfmove_clock, 0);
        assert_eq!(game.fullmove_number, 3);
    }

    #[test]
    #[should_panic(expected = "without a matching make_move")]
    fn unmake_without_history_panics() {
        Game::new().unmake_move();
    }
}
