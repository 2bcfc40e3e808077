use crate::game::BoardMove;
use std::fmt::{Display, Formatter, Result};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<BoardMove>,
    pub score: i32, // from the point of view of the side to move
    pub depth: usize,
    pub nodes: u64,
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.best_move {
            Some(best_move) => write!(f, "{} ({})", best_move, self.score),
            None => write!(f, "none ({})", self.score),
        }
    }
}

pub struct SearchStats {
    pub nodes: u64,
    pub start_time: Instant,
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStats {
    pub fn new() -> Self {
        Self {
            nodes: 0,
            start_time: Instant::now(),
        }
    }

    pub fn increment_nodes(&mut self) {
        self.nodes += 1;
    }

    pub fn get_elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    pub fn get_nps(&self) -> u64 {
        let elapsed_secs = self.start_time.elapsed().as_secs_f64();
        if elapsed_secs > 0.0 {
            (self.nodes as f64 / elapsed_secs) as u64
        } else {
            0
        }
    }
}
