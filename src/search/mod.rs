//! Search: iterative-deepening negamax with alpha-beta.
//!
//! Features:
//! - Iterative deepening with aspiration windows
//! - Principal-variation search with null-move pruning and LMR
//! - Quiescence search with SEE and delta pruning
//! - Move ordering (TT move, SEE-ranked captures, killers, history)
//! - Transposition table with two-bucket replacement

mod alphabeta;
mod constants;
mod iterative;
mod ordering;
mod quiescence;
mod tables;

pub use constants::{DRAW_SCORE, INFINITY, MATE, MATE_BOUND};
pub use tables::{HistoryTable, KillerTable};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::board::{Board, Move};
use crate::tt::TranspositionTable;

use constants::STOP_CHECK_INTERVAL;

/// Limits for one search: fixed depth, wall clock, and the cooperative
/// stop signal set by the UCI thread.
#[derive(Clone)]
pub struct SearchLimits {
    pub max_depth: Option<u32>,
    pub max_time: Option<Duration>,
    pub stop: Arc<AtomicBool>,
}

impl SearchLimits {
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchLimits {
            max_depth: Some(max_depth),
            max_time: None,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn time(max_time: Duration) -> Self {
        SearchLimits {
            max_depth: None,
            max_time: Some(max_time),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn infinite(stop: Arc<AtomicBool>) -> Self {
        SearchLimits {
            max_depth: None,
            max_time: None,
            stop,
        }
    }
}

/// Counters collected during a search and returned with its result.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub qnodes: u64,
    pub depth: u32,
    pub seldepth: u32,
    pub time_ms: u64,
    pub tt_probes: u64,
    pub tt_hits: u64,
    pub tt_stores: u64,
    pub beta_cutoffs: u64,
    pub first_move_cutoffs: u64,
    pub lmr_reductions: u64,
    pub lmr_researches: u64,
    pub null_cutoffs: u64,
}

impl SearchStats {
    /// Fraction of beta cutoffs produced by the first move tried; the
    /// standard measure of move-ordering quality.
    #[must_use]
    pub fn first_move_cutoff_rate(&self) -> f64 {
        if self.beta_cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.beta_cutoffs as f64
        }
    }
}

/// The outcome of a search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Best move found, None only when the root has no legal move
    pub best_move: Option<Move>,
    /// Score in centipawns from the root side to move
    pub score: i32,
    /// Principal variation, best line first
    pub pv: Vec<Move>,
    pub stats: SearchStats,
}

/// Per-iteration report consumed by the UCI layer for `info` lines.
#[derive(Clone, Debug)]
pub struct IterationReport {
    pub depth: u32,
    pub seldepth: u32,
    pub score: i32,
    pub nodes: u64,
    pub time_ms: u64,
    pub pv: Vec<Move>,
    pub hashfull: u32,
}

pub type IterationCallback<'a> = &'a mut dyn FnMut(&IterationReport);

/// State persisted across searches: the transposition table plus the
/// killer and history heuristics. Owned by the engine, never shared.
pub struct SearchState {
    pub(crate) tt: TranspositionTable,
    pub(crate) killers: KillerTable,
    pub(crate) history: HistoryTable,
}

impl SearchState {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        SearchState {
            tt: TranspositionTable::new(tt_mb),
            killers: KillerTable::new(),
            history: HistoryTable::new(),
        }
    }

    /// UCI `ucinewgame`: wipe everything learned from the previous game.
    pub fn new_game(&mut self) {
        self.tt.clear();
        self.killers.clear();
        self.history.clear();
    }

    /// Reallocate the transposition table (UCI `Hash` option).
    pub fn resize_tt(&mut self, mb: usize) {
        log::info!("resizing transposition table to {mb} MB");
        self.tt = TranspositionTable::new(mb);
    }

    /// Prepare for a fresh search from a new root.
    fn new_search(&mut self) {
        self.tt.increment_age();
        self.killers.clear();
        self.history.decay();
    }

    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        self.tt.hashfull_per_mille()
    }
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::new(TranspositionTable::DEFAULT_MB)
    }
}

/// Everything one search invocation needs, bundled so the recursion only
/// carries (depth, alpha, beta, ply).
pub(crate) struct SearchContext<'a> {
    pub(crate) board: &'a mut Board,
    pub(crate) state: &'a mut SearchState,
    pub(crate) stats: SearchStats,
    stop: &'a AtomicBool,
    start_time: Instant,
    deadline: Option<Instant>,
    stopped: bool,
}

impl<'a> SearchContext<'a> {
    fn new(board: &'a mut Board, state: &'a mut SearchState, limits: &'a SearchLimits) -> Self {
        let start_time = Instant::now();
        SearchContext {
            board,
            state,
            stats: SearchStats::default(),
            stop: limits.stop.as_ref(),
            start_time,
            deadline: limits.max_time.map(|t| start_time + t),
            stopped: false,
        }
    }

    /// Cooperative stop check: the atomic flag on every call, the wall
    /// clock only every few thousand nodes.
    #[inline]
    pub(crate) fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if self.stop.load(Ordering::Relaxed) {
            self.stopped = true;
            return true;
        }
        if (self.stats.nodes + self.stats.qnodes) % STOP_CHECK_INTERVAL == 0 {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    self.stopped = true;
                    return true;
                }
            }
        }
        false
    }

    /// True once the stop signal or deadline has been observed.
    #[inline]
    pub(crate) fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub(crate) fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    /// Half the budget gone means a new iteration will very likely not
    /// finish; spend the rest confirming the current one instead.
    pub(crate) fn should_start_iteration(&self) -> bool {
        match self.deadline {
            Some(deadline) => {
                let budget = deadline - self.start_time;
                self.start_time.elapsed() < budget / 2
            }
            None => true,
        }
    }
}

/// Run a full search and return the best move, score, principal variation
/// and statistics. The main entry point for the UCI layer and tests.
pub fn find_best_move(
    board: &mut Board,
    state: &mut SearchState,
    limits: &SearchLimits,
) -> SearchResult {
    search_with_callback(board, state, limits, &mut |_| {})
}

/// As `find_best_move`, invoking `on_iteration` after every completed
/// iterative-deepening iteration.
pub fn search_with_callback(
    board: &mut Board,
    state: &mut SearchState,
    limits: &SearchLimits,
    on_iteration: IterationCallback<'_>,
) -> SearchResult {
    state.new_search();
    let ctx = SearchContext::new(board, state, limits);
    ctx.iterative_deepening(limits.max_depth, on_iteration)
}
