//! Negamax with alpha-beta pruning, null-move pruning, late move
//! reductions and principal-variation search.

use crate::board::{Move, MAX_PLY};
use crate::tt::Bound;

use super::constants::{
    DRAW_SCORE, HISTORY_LMR_HIGH, HISTORY_LMR_LOW, INFINITY, LMR_DIVISOR, LMR_FULL_MOVES,
    LMR_MIN_DEPTH, MATE, MATE_BOUND, NULL_MOVE_DEEP_DEPTH, NULL_MOVE_MIN_DEPTH,
};
use super::SearchContext;

impl SearchContext<'_> {
    /// Negamax over `[alpha, beta]` from the side to move's perspective.
    /// Returns a score within the window; exactly `alpha` on fail-low and
    /// exactly `beta` on fail-high.
    pub(crate) fn alphabeta(
        &mut self,
        mut depth: i32,
        mut alpha: i32,
        mut beta: i32,
        ply: usize,
        allow_null: bool,
    ) -> i32 {
        debug_assert!(alpha < beta);

        if self.should_stop() {
            return DRAW_SCORE;
        }

        // Draws by repetition and the fifty-move rule end the line here.
        // Earlier occurrences since the last irreversible move count.
        if ply > 0 && (self.board.halfmove_clock() >= 100 || self.board.is_repetition()) {
            return DRAW_SCORE;
        }

        if ply >= MAX_PLY {
            return self.board.evaluate();
        }

        // Transposition table: sufficient depth gives a cutoff or tightens
        // the window; any hit seeds move ordering.
        self.stats.tt_probes += 1;
        let mut tt_move = None;
        if let Some(hit) = self.state.tt.probe(self.board.hash(), ply) {
            tt_move = hit.best_move;
            if ply > 0 && hit.depth >= depth.max(0) as u32 {
                match hit.bound {
                    Bound::Exact => {
                        self.stats.tt_hits += 1;
                        return hit.score;
                    }
                    Bound::Lower => {
                        if hit.score >= beta {
                            self.stats.tt_hits += 1;
                            return hit.score;
                        }
                        alpha = alpha.max(hit.score);
                    }
                    Bound::Upper => {
                        if hit.score <= alpha {
                            self.stats.tt_hits += 1;
                            return hit.score;
                        }
                        beta = beta.min(hit.score);
                    }
                }
                if alpha >= beta {
                    self.stats.tt_hits += 1;
                    return alpha;
                }
            }
        }

        // Check extension: the side to move must resolve the check, so the
        // line is searched one ply deeper. MAX_PLY bounds the growth.
        let in_check = self.board.is_in_check(self.board.side_to_move());
        if in_check {
            depth += 1;
        }

        if depth <= 0 {
            return self.quiescence(alpha, beta, ply);
        }

        self.stats.nodes += 1;
        if ply as u32 + 1 > self.stats.seldepth {
            self.stats.seldepth = ply as u32 + 1;
        }

        let static_eval = if in_check {
            -INFINITY
        } else {
            self.board.evaluate()
        };

        // Null move: hand the opponent a free move. If the reduced search
        // still clears beta the real position surely does. Unsound in
        // zugzwang, so it needs a non-pawn piece on the board.
        if allow_null
            && ply > 0
            && depth >= NULL_MOVE_MIN_DEPTH
            && !in_check
            && static_eval >= beta
            && beta.abs() < MATE_BOUND
            && self.board.non_pawn_material(self.board.side_to_move()) > 0
        {
            let r = if depth >= NULL_MOVE_DEEP_DEPTH { 3 } else { 2 };
            let info = self.board.make_null_move();
            let score = -self.alphabeta(depth - 1 - r, -beta, -beta + 1, ply + 1, false);
            self.board.unmake_null_move(info);

            if self.should_stop() {
                return DRAW_SCORE;
            }
            if score >= beta && score < MATE_BOUND {
                self.stats.null_cutoffs += 1;
                return beta;
            }
        }

        let pseudo = self.board.generate_pseudo_legal();
        let mut ordered = self.order_moves(&pseudo, tt_move, ply);

        let original_alpha = alpha;
        let mut best_move = None;
        let mut legal_moves = 0usize;
        let mut idx = 0usize;

        while let Some(scored) = ordered.pick_best(idx) {
            idx += 1;
            let m = scored.mv;

            // LMR exemptions depend on the pre-move position
            let gives_check = self.board.move_gives_check(m);
            let is_killer = self.state.killers.is_killer(ply, m);

            // Legality filter: make the move, then ask whether the side
            // that just moved left its king attacked by the side now on
            // move.
            let mover = self.board.side_to_move();
            let info = self.board.make_move(m);
            if self.board.is_in_check(mover) {
                self.board.unmake_move(m, info);
                continue;
            }
            legal_moves += 1;

            let reduction = if legal_moves > 1 {
                self.lmr_reduction(depth, idx, m, in_check, gives_check, is_killer)
            } else {
                0
            };

            let score = if legal_moves == 1 {
                // Principal variation: full window, full depth
                -self.alphabeta(depth - 1, -beta, -alpha, ply + 1, true)
            } else {
                // Null-window scout at reduced depth; anything above alpha
                // earns a full-window, full-depth re-search
                let mut score =
                    -self.alphabeta(depth - 1 - reduction, -alpha - 1, -alpha, ply + 1, true);
                if score > alpha && !self.should_stop() {
                    if reduction > 0 {
                        self.stats.lmr_researches += 1;
                    }
                    score = -self.alphabeta(depth - 1, -beta, -alpha, ply + 1, true);
                }
                score
            };

            self.board.unmake_move(m, info);

            if self.should_stop() {
                return DRAW_SCORE;
            }

            if score > alpha {
                best_move = Some(m);

                if score >= beta {
                    self.stats.beta_cutoffs += 1;
                    if legal_moves == 1 {
                        self.stats.first_move_cutoffs += 1;
                    }
                    if m.is_quiet() {
                        self.state.killers.update(ply, m);
                        self.state.history.update(m, depth);
                    }
                    self.store_tt(depth, beta, Bound::Lower, Some(m), ply);
                    return beta;
                }
                alpha = score;
            }
        }

        if legal_moves == 0 {
            // No legal move: mate if in check, stalemate otherwise. The
            // ply offset prefers the shortest mate.
            return if in_check { -MATE + ply as i32 } else { DRAW_SCORE };
        }

        let bound = if alpha > original_alpha {
            Bound::Exact
        } else {
            Bound::Upper
        };
        self.store_tt(depth, alpha, bound, best_move, ply);
        alpha
    }

    /// Late move reduction in plies for the move at ordering index `idx`.
    ///
    /// `r = ln(depth) * ln(idx) / 1.8`, nudged by the history score and
    /// clamped to `[0, depth - 1]`. Tactical moves, killers, checks and
    /// check evasions are never reduced.
    fn lmr_reduction(
        &mut self,
        depth: i32,
        idx: usize,
        m: Move,
        in_check: bool,
        gives_check: bool,
        is_killer: bool,
    ) -> i32 {
        if depth < LMR_MIN_DEPTH
            || idx <= LMR_FULL_MOVES
            || !m.is_quiet()
            || is_killer
            || in_check
            || gives_check
        {
            return 0;
        }

        let base = ((depth as f64).ln() * (idx as f64).ln() / LMR_DIVISOR).round() as i32;

        let history = self.state.history.score(m);
        let adjusted = if history >= HISTORY_LMR_HIGH {
            base - 1
        } else if history <= HISTORY_LMR_LOW {
            base + 1
        } else {
            base
        };

        let clamped = adjusted.clamp(0, depth - 1);
        if clamped > 0 {
            self.stats.lmr_reductions += 1;
        }
        clamped
    }

    /// Store a TT entry unless the search is being aborted (partial
    /// results must not poison the table).
    pub(crate) fn store_tt(
        &mut self,
        depth: i32,
        score: i32,
        bound: Bound,
        best_move: Option<Move>,
        ply: usize,
    ) {
        if self.is_stopped() {
            return;
        }
        self.stats.tt_stores += 1;
        self.state
            .tt
            .store(self.board.hash(), depth.max(0) as u32, score, bound, best_move, ply);
    }
}
