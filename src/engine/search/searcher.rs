use crate::game::evaluate::evaluate;
use crate::game::{BoardMove, Game};

use super::limits::SearchLimits;
use super::results::{SearchResult, SearchStats};

pub const INFINITY: i32 = 1_000_000_000;
pub const MATE_SCORE: i32 = 1_000_000;

/// Fixed-depth negamax search over a borrowed game.
///
/// Every move the search makes is unmade before it returns, so the game is
/// left exactly as it was handed in.
pub struct Search<'a> {
    pub game: &'a mut Game,
    pub stats: SearchStats,
    pub limits: SearchLimits,
}

impl<'a> Search<'a> {
    pub fn new(game: &'a mut Game, limits: SearchLimits) -> Self {
        Self {
            game,
            stats: SearchStats::new(),
            limits,
        }
    }

    /// Searches every legal move of the current position.
    pub fn run(&mut self) -> SearchResult {
        let moves = self.game.get_moves();
        self.choose_move(&moves)
    }

    /// Picks the move from `moves` with the highest score; on ties the
    /// earlier move wins. An empty slice yields no move.
    pub fn choose_move(&mut self, moves: &[BoardMove]) -> SearchResult {
        let depth = self.limits.depth.max(1);

        let scores = moves
            .iter()
            .map(|&board_move| self.score_root_move(board_move, depth))
            .collect::<Vec<_>>();

        let result = pick_best(moves, &scores, depth, self.stats.nodes);

        log::info!(
            "Searched depth {} in {} ms: best {}, {} nodes ({} nps)",
            depth,
            self.stats.get_elapsed_ms(),
            result,
            self.stats.nodes,
            self.stats.get_nps()
        );

        result
    }

    /// Scores a single root move with a full window.
    pub fn score_root_move(&mut self, board_move: BoardMove, depth: usize) -> i32 {
        self.game.make_move(board_move);
        let score = -self.alpha_beta(depth - 1, 1, -INFINITY, INFINITY);
        self.game.unmake_move();

        score
    }

    fn alpha_beta(&mut self, depth: usize, ply: usize, mut alpha: i32, beta: i32) -> i32 {
        self.stats.increment_nodes();

        if depth == 0 {
            return evaluate(self.game) * self.game.side;
        }

        let moves = self.game.get_moves();

        // no moves means mate (or stalemate); nearer ones score further from zero
        if moves.is_empty() {
            return -MATE_SCORE + ply as i32;
        }

        let mut best_evaluation = -INFINITY;

        for board_move in moves {
            self.game.make_move(board_move);
            let evaluation = -self.alpha_beta(depth - 1, ply + 1, -beta, -alpha);
            self.game.unmake_move();

            if evaluation >= beta {
                return beta;
            }

            best_evaluation = best_evaluation.max(evaluation);
            alpha = alpha.max(evaluation);
        }

        best_evaluation
    }
}

/// The first move with the strictly highest score.
pub fn pick_best(moves: &[BoardMove], scores: &[i32], depth: usize, nodes: u64) -> SearchResult {
    let mut best: Option<(BoardMove, i32)> = None;

    for (&board_move, &score) in moves.iter().zip(scores) {
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((board_move, score));
        }
    }

    SearchResult {
        best_move: best.map(|(board_move, _)| board_move),
        score: best.map_or(-MATE_SCORE, |(_, score)| score),
        depth,
        nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ROOK_VALUE;

    fn search(fen: &str, depth: usize) -> (SearchResult, Game, Game) {
        let mut game = Game::from_fen(fen, true).unwrap();
        let before = game.clone();
        let result = Search::new(&mut game, SearchLimits::new(depth)).run();

        (result, game, before)
    }

    #[test]
    fn finds_mate_in_one() {
        let (result, _, _) = search("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 2);

        assert_eq!(result.best_move, BoardMove::parse("a1a8"));
        assert_eq!(result.score, MATE_SCORE - 1);
    }

    #[test]
    fn takes_a_hanging_queen() {
        let (result, _, _) = search("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", 1);

        // down a queen for a rook before the capture, up a rook after it
        assert_eq!(result.best_move, BoardMove::parse("d1d5"));
        assert_eq!(result.score, ROOK_VALUE);
    }

    #[test]
    fn black_scores_from_its_own_side() {
        let (result, _, _) = search("3rk3/8/8/3Q4/8/8/8/4K3 b - - 0 1", 1);

        assert_eq!(result.best_move, BoardMove::parse("d8d5"));
        assert_eq!(result.score, ROOK_VALUE);
    }

    #[test]
    fn search_leaves_the_game_untouched() {
        let (_, after, before) = search(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            2,
        );

        assert_eq!(after, before);
    }

    #[test]
    fn search_is_deterministic() {
        let fen = "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2";
        let (first, _, _) = search(fen, 3);

        for _ in 0..3 {
            let (again, _, _) = search(fen, 3);
            assert_eq!(again.best_move, first.best_move);
            assert_eq!(again.score, first.score);
        }
    }

    #[test]
    fn ties_keep_the_first_move() {
        let moves = [BoardMove::new(8, 16), BoardMove::new(9, 17), BoardMove::new(10, 18)];
        let result = pick_best(&moves, &[5, 7, 7], 1, 0);

        assert_eq!(result.best_move, Some(moves[1]));
        assert_eq!(result.score, 7);
    }

    #[test]
    fn no_moves_gives_no_move() {
        let mut game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", true).unwrap();
        let result = Search::new(&mut game, SearchLimits::new(3)).run();

        assert_eq!(result.best_move, None);
    }
}
