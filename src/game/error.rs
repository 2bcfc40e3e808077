use super::pieces::Color;
use thiserror::Error;

/// Errors produced while loading a position from its notation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("Position notation needs 6 fields, found {found}")]
    MissingFields { found: usize },

    #[error("Piece placement needs 8 ranks, found {found}")]
    RankCount { found: usize },

    #[error("Rank '{rank}' does not describe exactly 8 files")]
    RankLength { rank: String },

    #[error("Unknown piece character '{character}'")]
    UnknownPiece { character: char },

    #[error("{color:?} must have exactly one king, found {count}")]
    KingCount { color: Color, count: u32 },

    #[error("Invalid side to move '{value}'")]
    InvalidSide { value: String },

    #[error("Invalid castling availability '{value}'")]
    InvalidCastling { value: String },

    #[error("Invalid en passant target '{value}'")]
    InvalidEnPassant { value: String },

    #[error("Invalid move clock '{value}'")]
    InvalidClock { value: String },
}
