use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::game::Game;

use super::limits::SearchLimits;
use super::results::{SearchResult, SearchStats};
use super::searcher::{Search, pick_best};

/// Scores the root moves on a pool of `threads` workers, each searching its
/// own copy of the game. Picks the same move as the sequential search.
pub fn run_parallel(game: &Game, limits: SearchLimits, threads: usize) -> SearchResult {
    let mut root = game.clone();

    let pool = match ThreadPoolBuilder::new().num_threads(threads.max(1)).build() {
        Ok(pool) => pool,
        Err(error) => {
            log::warn!("Could not build a {} thread pool ({}), searching on one", threads, error);
            return Search::new(&mut root, limits).run();
        }
    };

    let stats = SearchStats::new();
    let depth = limits.depth.max(1);
    let moves = root.get_moves();

    let scored = pool.install(|| {
        moves
            .par_iter()
            .map(|&board_move| {
                let mut worker = game.clone();
                let mut search = Search::new(&mut worker, limits);
                let score = search.score_root_move(board_move, depth);

                (score, search.stats.nodes)
            })
            .collect::<Vec<_>>()
    });

    let scores = scored.iter().map(|&(score, _)| score).collect::<Vec<_>>();
    let nodes = scored.iter().map(|&(_, nodes)| nodes).sum();

    let result = pick_best(&moves, &scores, depth, nodes);

    log::info!(
        "Searched depth {} on {} threads in {} ms: best {}, {} nodes",
        depth,
        threads,
        stats.get_elapsed_ms(),
        result,
        nodes
    );

    result
}
