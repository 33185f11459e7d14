//! Iterative deepening driver with aspiration windows.
//!
//! Each depth runs a full root search. A depth interrupted by the stop
//! signal is discarded; the previously completed depth's move is returned.
//! Root ordering starts from the previous iteration's best move through
//! the transposition table.

use crate::board::{Move, MoveList, MAX_PLY};
use crate::tt::Bound;

use super::constants::{
    ASPIRATION_MAX_FAILS, ASPIRATION_WINDOW, DRAW_SCORE, INFINITY, MATE,
};
use super::{IterationCallback, IterationReport, SearchContext, SearchResult, SearchStats};

impl SearchContext<'_> {
    pub(crate) fn iterative_deepening(
        mut self,
        max_depth: Option<u32>,
        on_iteration: IterationCallback<'_>,
    ) -> SearchResult {
        let legal = self.board.generate_legal();

        // Checkmate or stalemate at the root: nothing to search
        if legal.is_empty() {
            let score = if self.board.is_in_check(self.board.side_to_move()) {
                -MATE
            } else {
                DRAW_SCORE
            };
            return self.finish(None, score, Vec::new());
        }

        // The game is already drawn by repetition or the fifty-move rule;
        // any legal move keeps the score at zero.
        if self.board.is_draw() {
            return self.finish(legal.first(), DRAW_SCORE, Vec::new());
        }

        let depth_limit = max_depth.unwrap_or(MAX_PLY as u32).min(MAX_PLY as u32 - 1);

        let mut best_move: Option<Move> = None;
        let mut best_score = DRAW_SCORE;
        let mut best_pv: Vec<Move> = Vec::new();
        // Best move of the iteration in flight, in case nothing completes
        let mut partial_best: Option<Move> = None;

        for depth in 1..=depth_limit {
            if self.should_stop() {
                break;
            }
            if depth > 1 && !self.should_start_iteration() {
                break;
            }

            let (score, mv) = self.aspiration_search(depth as i32, best_score, &legal);
            if let Some(mv) = mv {
                partial_best = Some(mv);
            }

            if self.is_stopped() {
                // Partial depth: discard its results entirely
                break;
            }

            best_score = score;
            if let Some(mv) = mv {
                best_move = Some(mv);
            }
            best_pv = self.extract_pv(best_move, depth as usize);
            self.stats.depth = depth;

            log::debug!(
                "depth {depth} score {score} nodes {} pv {}",
                self.stats.nodes,
                format_pv(&best_pv),
            );
            on_iteration(&IterationReport {
                depth,
                seldepth: self.stats.seldepth,
                score,
                nodes: self.stats.nodes + self.stats.qnodes,
                time_ms: self.elapsed_ms(),
                pv: best_pv.clone(),
                hashfull: self.state.tt.hashfull_per_mille(),
            });
        }

        // Never return a null move while a legal one exists
        let chosen = best_move.or(partial_best).or_else(|| legal.first());
        self.finish(chosen, best_score, best_pv)
    }

    /// One depth with an aspiration window around the previous score.
    /// Failures double the window on the failing side; after a few the
    /// search falls back to the full width.
    fn aspiration_search(
        &mut self,
        depth: i32,
        previous_score: i32,
        legal: &MoveList,
    ) -> (i32, Option<Move>) {
        let mut window = ASPIRATION_WINDOW;
        let (mut alpha, mut beta) = if depth >= 2 {
            (previous_score - window, previous_score + window)
        } else {
            (-INFINITY, INFINITY)
        };
        let mut fails = 0;

        loop {
            let (score, mv) = self.search_root(depth, alpha, beta, legal);
            if self.is_stopped() {
                return (score, mv);
            }

            if score <= alpha && alpha > -INFINITY {
                fails += 1;
                window *= 2;
                alpha = score - window;
            } else if score >= beta && beta < INFINITY {
                fails += 1;
                window *= 2;
                beta = score + window;
            } else {
                return (score, mv);
            }

            if fails >= ASPIRATION_MAX_FAILS {
                alpha = -INFINITY;
                beta = INFINITY;
            }
        }
    }

    /// Root node: like an interior node, but tracks which move produced
    /// the best score. `legal` was computed once by the caller.
    fn search_root(
        &mut self,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        legal: &MoveList,
    ) -> (i32, Option<Move>) {
        self.stats.nodes += 1;
        self.stats.tt_probes += 1;
        let tt_move = self
            .state
            .tt
            .probe(self.board.hash(), 0)
            .and_then(|hit| hit.best_move);

        let mut ordered = self.order_moves(legal, tt_move, 0);
        let original_alpha = alpha;
        let mut best_move = None;
        let mut tried = 0usize;
        let mut idx = 0usize;

        while let Some(scored) = ordered.pick_best(idx) {
            idx += 1;
            let m = scored.mv;
            tried += 1;

            let info = self.board.make_move(m);
            let score = if tried == 1 {
                -self.alphabeta(depth - 1, -beta, -alpha, 1, true)
            } else {
                let mut score = -self.alphabeta(depth - 1, -alpha - 1, -alpha, 1, true);
                if score > alpha && !self.should_stop() {
                    score = -self.alphabeta(depth - 1, -beta, -alpha, 1, true);
                }
                score
            };
            self.board.unmake_move(m, info);

            if self.should_stop() {
                return (alpha, best_move);
            }

            if score > alpha {
                best_move = Some(m);
                if score >= beta {
                    self.stats.beta_cutoffs += 1;
                    if tried == 1 {
                        self.stats.first_move_cutoffs += 1;
                    }
                    self.store_tt(depth, beta, Bound::Lower, Some(m), 0);
                    return (beta, best_move);
                }
                alpha = score;
            }
        }

        let bound = if alpha > original_alpha {
            Bound::Exact
        } else {
            Bound::Upper
        };
        self.store_tt(depth, alpha, bound, best_move, 0);
        (alpha, best_move)
    }

    /// Walk transposition-table best moves from the root to recover the
    /// principal variation. Guards against collisions and cycles.
    fn extract_pv(&mut self, first_move: Option<Move>, max_len: usize) -> Vec<Move> {
        let mut pv = Vec::with_capacity(max_len);
        let mut unwound = Vec::with_capacity(max_len);
        let mut seen = Vec::with_capacity(max_len);

        for step in 0..max_len {
            let hash = self.board.hash();
            if seen.contains(&hash) {
                break;
            }
            seen.push(hash);

            let mv = if step == 0 && first_move.is_some() {
                first_move
            } else {
                self.state
                    .tt
                    .probe(hash, 0)
                    .and_then(|hit| hit.best_move)
            };
            let Some(mv) = mv else { break };

            if !self.board.is_legal_move(mv) {
                break;
            }

            pv.push(mv);
            let info = self.board.make_move(mv);
            unwound.push((mv, info));
        }

        for (mv, info) in unwound.into_iter().rev() {
            self.board.unmake_move(mv, info);
        }

        pv
    }

    fn finish(mut self, best_move: Option<Move>, score: i32, pv: Vec<Move>) -> SearchResult {
        self.stats.time_ms = self.elapsed_ms();
        let stats: SearchStats = self.stats;
        SearchResult {
            best_move,
            score,
            pv,
            stats,
        }
    }
}

/// Space-separated long-algebraic rendering of a line.
pub(crate) fn format_pv(pv: &[Move]) -> String {
    pv.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
