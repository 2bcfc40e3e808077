pub mod board;
pub mod error;
pub mod evaluate;
pub mod movegen;
pub mod pieces;

pub use board::*;
pub use error::*;
pub use evaluate::*;
pub use movegen::*;
pub use pieces::*;
