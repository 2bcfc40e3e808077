use crate::game::board::Game;
use crate::game::pieces::{Color, Piece};
use strum::IntoEnumIterator;

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 300;
pub const BISHOP_VALUE: i32 = 320;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 0;

pub fn get_piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => KING_VALUE,
    }
}

/// Material balance in centipawns, positive when white is ahead.
pub fn evaluate(game: &Game) -> i32 {
    Piece::iter()
        .map(|piece| {
            let white = game.piece_bitboards[Color::White as usize][piece as usize].count_ones();
            let black = game.piece_bitboards[Color::Black as usize][piece as usize].count_ones();

            (white as i32 - black as i32) * get_piece_value(piece)
        })
        .sum()
}
