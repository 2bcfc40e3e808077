use std::ops::{Mul, Not};
use strum_macros::{EnumCount, EnumIter, FromRepr};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount, FromRepr)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount, FromRepr)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

// scores are white-positive, so multiplying by the side to move flips them for black
impl Mul<Color> for i32 {
    type Output = i32;

    fn mul(self, color: Color) -> Self::Output {
        match color {
            Color::White => self,
            Color::Black => -self,
        }
    }
}

impl Piece {
    pub fn from_char(c: char) -> Option<Piece> {
        match c {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Piece::Pawn   => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook   => 'r',
            Piece::Queen  => 'q',
            Piece::King   => 'k',
        }
    }

    pub fn to_emoji(&self) -> char {
        // We change the color via Ansi codes
        match self {
            Piece::Pawn => '♟',
            Piece::Knight => '♞',
            Piece::Bishop => '♝',
            Piece::Rook => '♜',
            Piece::Queen => '♛',
            Piece::King => '♚',
        }
    }
}

/// A square occupant packed into one byte: the low three bits hold the piece
/// type (`0` means empty), bit three holds the color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PieceCode(u8);

impl PieceCode {
    pub const EMPTY: PieceCode = PieceCode(0);

    pub const TYPE_MASK: u8 = 0b0111;
    pub const COLOR_MASK: u8 = 0b1000;

    pub const fn new(piece: Piece, color: Color) -> Self {
        PieceCode((piece as u8 + 1) | ((color as u8) << 3))
    }

    pub const fn is_empty(self) -> bool {
        self.0 & Self::TYPE_MASK == 0
    }

    pub fn piece(self) -> Option<Piece> {
        match self.0 & Self::TYPE_MASK {
            0 => None,
            t => Piece::from_repr(t as usize - 1),
        }
    }

    pub fn color(self) -> Option<Color> {
        if self.is_empty() {
            return None;
        }

        Some(if self.0 & Self::COLOR_MASK == 0 {
            Color::White
        } else {
            Color::Black
        })
    }

    pub fn decode(self) -> Option<(Piece, Color)> {
        Some((self.piece()?, self.color()?))
    }

    pub fn is(self, piece: Piece, color: Color) -> bool {
        self == PieceCode::new(piece, color)
    }

    pub fn from_char(c: char) -> Option<PieceCode> {
        let piece = Piece::from_char(c.to_ascii_lowercase())?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        Some(PieceCode::new(piece, color))
    }

    pub fn to_char(self) -> Option<char> {
        let (piece, color) = self.decode()?;

        Some(match color {
            Color::White => piece.to_char().to_ascii_uppercase(),
            Color::Black => piece.to_char(),
        })
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}
