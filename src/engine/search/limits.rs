pub const DEFAULT_DEPTH: usize = 3;
pub const MAX_DEPTH: usize = 12;

/// How far a search looks ahead; there is no time or node limit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    pub depth: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }
}

impl SearchLimits {
    pub fn new(depth: usize) -> Self {
        // the root always looks at least one move ahead
        Self {
            depth: depth.clamp(1, MAX_DEPTH),
        }
    }

    /// Parses the parameters of a `go` command, falling back to `default_depth`.
    pub fn parse(params: &[String], default_depth: usize) -> Self {
        let mut depth = default_depth;
        let mut iter = params.iter();

        while let Some(param) = iter.next() {
            match param.as_str() {
                "depth" => match iter.next().map(|value| value.parse::<usize>()) {
                    Some(Ok(value)) if value > MAX_DEPTH => {
                        log::warn!("Depth {} exceeds the maximum, using {}", value, MAX_DEPTH);
                        depth = MAX_DEPTH;
                    }
                    Some(Ok(value)) => depth = value,
                    _ => log::warn!("Invalid depth for go, using {}", depth),
                },
                _ => log::warn!("Unknown go parameter: {}", param),
            }
        }

        Self::new(depth)
    }
}
