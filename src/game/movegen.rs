use super::board::{BoardMove, Game, kingside_flag, queenside_flag};
use super::pieces::{Color, Piece};
use crate::utils::{
    Bitboard, BitboardExt, BoardSquare, BoardSquareExt, DIRECTION_OFFSETS, KING_TARGETS,
    KNIGHT_TARGETS, NUM_SQUARES_TO_EDGE, PAWN_ATTACKS,
};
use std::ops::Range;

pub const PROMOTION_PIECES: [Piece; 4] =
    [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

const ROOK_DIRECTIONS: Range<usize> = 0..4;
const BISHOP_DIRECTIONS: Range<usize> = 4..8;
const QUEEN_DIRECTIONS: Range<usize> = 0..8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

impl Game {
    /// Moves that follow the piece movement rules, without checking whether
    /// they leave the mover's king attacked. No particular order is promised.
    pub fn pseudo_legal_moves(&self, color: Color, include_castling: bool) -> Vec<BoardMove> {
        let mut moves = Vec::with_capacity(64);
        let own = self.color_bitboards[color as usize];
        let pieces = &self.piece_bitboards[color as usize];

        self.add_pawn_moves(color, &mut moves);

        for from in pieces[Piece::Knight as usize].iter_positions() {
            add_targets(from, KNIGHT_TARGETS[from as usize] & !own, &mut moves);
        }

        for from in pieces[Piece::Bishop as usize].iter_positions() {
            self.add_sliding_moves(from, color, BISHOP_DIRECTIONS, &mut moves);
        }

        for from in pieces[Piece::Rook as usize].iter_positions() {
            self.add_sliding_moves(from, color, ROOK_DIRECTIONS, &mut moves);
        }

        for from in pieces[Piece::Queen as usize].iter_positions() {
            self.add_sliding_moves(from, color, QUEEN_DIRECTIONS, &mut moves);
        }

        for from in pieces[Piece::King as usize].iter_positions() {
            add_targets(from, KING_TARGETS[from as usize] & !own, &mut moves);
        }

        if include_castling {
            self.add_castling_moves(color, &mut moves);
        }

        moves
    }

    fn add_pawn_moves(&self, color: Color, moves: &mut Vec<BoardMove>) {
        let (forward, start_rank): (i8, u8) = match color {
            Color::White => (8, 1),
            Color::Black => (-8, 6),
        };

        let enemies = self.color_bitboards[!color as usize];

        for from in self.piece_bitboards[color as usize][Piece::Pawn as usize].iter_positions() {
            let single = from as i8 + forward;

            // a pawn on its last rank has nowhere to go
            if !(0..64).contains(&single) {
                continue;
            }

            let single = single as BoardSquare;
            if !self.occupied.is_set(single) {
                add_pawn_move(from, single, moves);

                let double = (single as i8 + forward) as BoardSquare;
                if from.get_y() == start_rank && !self.occupied.is_set(double) {
                    moves.push(BoardMove::new(from, double));
                }
            }

            for to in PAWN_ATTACKS[color as usize][from as usize].iter_positions() {
                if enemies.is_set(to) || self.en_passant == Some(to) {
                    add_pawn_move(from, to, moves);
                }
            }
        }
    }

    fn add_sliding_moves(
        &self,
        from: BoardSquare,
        color: Color,
        directions: Range<usize>,
        moves: &mut Vec<BoardMove>,
    ) {
        let own = self.color_bitboards[color as usize];
        let enemies = self.color_bitboards[!color as usize];

        for direction in directions {
            let offset = DIRECTION_OFFSETS[direction];
            let mut to = from as i8;

            for _ in 0..NUM_SQUARES_TO_EDGE[from as usize][direction] {
                to += offset;
                let square = to as BoardSquare;

                if own.is_set(square) {
                    break;
                }

                moves.push(BoardMove::new(from, square));

                if enemies.is_set(square) {
                    break;
                }
            }
        }
    }

    fn add_castling_moves(&self, color: Color, moves: &mut Vec<BoardMove>) {
        let home = match color {
            Color::White => BoardSquare::E1,
            Color::Black => BoardSquare::E8,
        };

        if self.king_squares[color as usize] != home {
            return;
        }

        let can_castle_kingside = self.castling_flags & kingside_flag(color) != 0
            && self.pieces[home as usize + 3].is(Piece::Rook, color);
        let can_castle_queenside = self.castling_flags & queenside_flag(color) != 0
            && self.pieces[home as usize - 4].is(Piece::Rook, color);

        if !can_castle_kingside && !can_castle_queenside {
            return;
        }

        let attacked = self.attacked_squares(!color);
        let mask = |squares: &[BoardSquare]| -> Bitboard {
            squares.iter().fold(0, |acc, square| acc | square.to_mask())
        };

        if can_castle_kingside
            && self.occupied & mask(&[home + 1, home + 2]) == 0
            && attacked & mask(&[home, home + 1, home + 2]) == 0
        {
            moves.push(BoardMove::new(home, home + 2));
        }

        if can_castle_queenside
            && self.occupied & mask(&[home - 1, home - 2, home - 3]) == 0
            && attacked & mask(&[home, home - 1, home - 2]) == 0
        {
            moves.push(BoardMove::new(home, home - 2));
        }
    }

    /// Every square a pseudo-legal move of `color` lands on, castling excluded.
    pub fn targets(&self, color: Color) -> Bitboard {
        self.pseudo_legal_moves(color, false)
            .iter()
            .fold(0, |acc, board_move| acc | board_move.to.to_mask())
    }

    /// Squares `color` currently attacks: the targets of its pieces, with pawns
    /// counted on their diagonals whether or not something stands there.
    pub fn attacked_squares(&self, color: Color) -> Bitboard {
        let pawns = self.piece_bitboards[color as usize][Piece::Pawn as usize];

        let pawn_attacks = pawns
            .iter_positions()
            .fold(0, |acc, square| acc | PAWN_ATTACKS[color as usize][square as usize]);

        self.pseudo_legal_moves(color, false)
            .iter()
            .filter(|board_move| !pawns.is_set(board_move.from))
            .fold(pawn_attacks, |acc, board_move| acc | board_move.to.to_mask())
    }

    pub fn is_king_in_check(&self, color: Color) -> bool {
        self.targets(!color)
            .is_set(self.king_squares[color as usize])
    }

    /// Legal moves for the side to move.
    pub fn get_moves(&mut self) -> Vec<BoardMove> {
        let color = self.side;

        self.pseudo_legal_moves(color, true)
            .into_iter()
            .filter(|&board_move| {
                self.make_move(board_move);
                let is_safe = !self.is_king_in_check(color);
                self.unmake_move();

                is_safe
            })
            .collect()
    }

    pub fn is_legal(
        &mut self,
        from: BoardSquare,
        to: BoardSquare,
        promotion: Option<Piece>,
    ) -> bool {
        self.get_moves().contains(&BoardMove {
            from,
            to,
            promotion,
        })
    }

    pub fn outcome(&mut self) -> Outcome {
        if !self.get_moves().is_empty() {
            return Outcome::Ongoing;
        }

        if self.is_king_in_check(self.side) {
            Outcome::Checkmate { winner: !self.side }
        } else {
            Outcome::Stalemate
        }
    }
}

fn add_targets(from: BoardSquare, targets: Bitboard, moves: &mut Vec<BoardMove>) {
    for to in targets.iter_positions() {
        moves.push(BoardMove::new(from, to));
    }
}

fn add_pawn_move(from: BoardSquare, to: BoardSquare, moves: &mut Vec<BoardMove>) {
    if to.get_y() == 0 || to.get_y() == 7 {
        for piece in PROMOTION_PIECES {
            moves.push(BoardMove::with_promotion(from, to, piece));
        }
    } else {
        moves.push(BoardMove::new(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(fen: &str) -> Game {
        Game::from_fen(fen, true).unwrap()
    }

    fn notations(moves: &[BoardMove]) -> Vec<String> {
        let mut notations = moves.iter().map(|m| m.unparse()).collect::<Vec<_>>();
        notations.sort();
        notations
    }

    #[test]
    fn twenty_moves_from_the_start() {
        let mut game = Game::new();
        let before = game.clone();

        assert_eq!(game.get_moves().len(), 20);
        assert_eq!(game, before);
    }

    #[test]
    fn all_four_promotions_are_generated() {
        let mut game = game("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let moves = notations(&game.get_moves());

        for notation in ["b7b8q", "b7b8r", "b7b8b", "b7b8n"] {
            assert!(moves.contains(&notation.to_string()), "missing {}", notation);
        }
        assert!(!moves.contains(&"b7b8".to_string()));
    }

    #[test]
    fn pawn_captures_do_not_wrap() {
        // the black pawn on h5 sits one index after a5 but is not adjacent to it
        let mut game = game("4k3/8/8/P6p/8/8/8/4K3 w - - 0 1");
        let moves = notations(&game.get_moves());

        assert!(moves.contains(&"a5a6".to_string()));
        assert!(!moves.iter().any(|m| m.starts_with("a5") && m != "a5a6"));
    }

    #[test]
    fn blocked_double_push() {
        let mut game = game("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        let moves = notations(&game.get_moves());

        assert!(!moves.iter().any(|m| m.starts_with("e2")));
    }

    #[test]
    fn en_passant_capture_is_generated() {
        let mut game = game("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");

        assert!(game.is_legal(
            BoardSquare::parse("e5").unwrap(),
            BoardSquare::parse("d6").unwrap(),
            None
        ));
    }

    #[test]
    fn castling_is_generated_when_free() {
        let mut game = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let moves = notations(&game.get_moves());

        assert!(moves.contains(&"e1g1".to_string()));
        assert!(moves.contains(&"e1c1".to_string()));
    }

    #[test]
    fn castling_through_attacked_squares_is_rejected() {
        // the black rook on f8 covers f1
        let mut rook_covered = game("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let moves = notations(&rook_covered.get_moves());

        assert!(!moves.contains(&"e1g1".to_string()));
        assert!(moves.contains(&"e1c1".to_string()));

        // a pawn attacks b1 and d1 even though nothing stands there
        let mut pawn_covered = game("4k3/8/8/8/8/8/2p5/R3K2R w KQ - 0 1");
        let moves = notations(&pawn_covered.get_moves());

        assert!(!moves.contains(&"e1c1".to_string()));
        assert!(moves.contains(&"e1g1".to_string()));
    }

    #[test]
    fn castling_needs_rights_and_empty_squares() {
        let mut game = game("r3k2r/8/8/8/8/8/8/RN2K1NR w kq - 0 1");
        let moves = notations(&game.get_moves());

        assert!(!moves.iter().any(|m| m == "e1g1" || m == "e1c1"));
    }

    #[test]
    fn moves_leaving_the_king_attacked_are_filtered() {
        // the knight on e2 is pinned by the rook on e8
        let mut game = game("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");

        assert!(!game.get_moves().iter().any(|m| m.from == BoardSquare::parse("e2").unwrap()));
    }

    #[test]
    fn checkmate_and_stalemate_are_distinguished() {
        let mut mate = game("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(mate.is_king_in_check(Color::Black));
        assert_eq!(mate.outcome(), Outcome::Checkmate { winner: Color::White });

        let mut stalemate = game("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!stalemate.is_king_in_check(Color::Black));
        assert_eq!(stalemate.outcome(), Outcome::Stalemate);

        assert_eq!(Game::new().outcome(), Outcome::Ongoing);
    }
}
