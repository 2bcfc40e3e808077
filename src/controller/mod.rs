pub mod game_controller;
pub mod options;

pub use game_controller::*;
pub use options::*;
