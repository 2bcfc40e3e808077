use crate::engine::{DEFAULT_DEPTH, MAX_DEPTH};

pub const MAX_THREADS: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub depth: usize,
    pub threads: usize,
    pub honor_fen_state: bool, // apply side, castling, en passant and clocks from loaded positions
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            threads: 1,
            honor_fen_state: false,
        }
    }
}

impl EngineOptions {
    /// Updates an option by its protocol name; invalid values are rejected
    /// with a warning and leave the option unchanged.
    pub fn set_option(&mut self, name: &str, value: &str) -> bool {
        match name.to_lowercase().replace(' ', "").as_str() {
            "depth" => match value.parse::<usize>() {
                Ok(depth) if (1..=MAX_DEPTH).contains(&depth) => self.depth = depth,
                _ => {
                    log::warn!(
                        "Invalid value for Depth option: {}. Expected value between 1 and {}",
                        value,
                        MAX_DEPTH
                    );
                    return false;
                }
            },
            "threads" => match value.parse::<usize>() {
                Ok(threads) if (1..=MAX_THREADS).contains(&threads) => self.threads = threads,
                _ => {
                    log::warn!(
                        "Invalid value for Threads option: {}. Expected value between 1 and {}",
                        value,
                        MAX_THREADS
                    );
                    return false;
                }
            },
            "honorfenstate" => match value.to_lowercase().as_str() {
                "true" => self.honor_fen_state = true,
                "false" => self.honor_fen_state = false,
                _ => {
                    log::warn!(
                        "Invalid value for HonorFenState option: {}. Expected 'true' or 'false'",
                        value
                    );
                    return false;
                }
            },
            _ => {
                log::warn!("Unknown option: {}", name);
                return false;
            }
        }

        true
    }

    /// The `option` lines announced after `uci`.
    pub fn describe() -> Vec<String> {
        let defaults = EngineOptions::default();

        vec![
            format!(
                "option name Depth type spin default {} min 1 max {}",
                defaults.depth, MAX_DEPTH
            ),
            format!(
                "option name Threads type spin default {} min 1 max {}",
                defaults.threads, MAX_THREADS
            ),
            format!(
                "option name HonorFenState type check default {}",
                defaults.honor_fen_state
            ),
        ]
    }
}
