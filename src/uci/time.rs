//! Time allocation for clock-based `go` commands.

use std::time::Duration;

use crate::board::Color;

use super::command::GoParams;

/// Assume this many moves remain when the GUI does not say.
const DEFAULT_MOVES_TO_GO: u32 = 30;

/// Translate `go` parameters into a wall-clock budget for this move.
/// Returns `None` for depth-limited and infinite searches.
#[must_use]
pub fn allocate_time(params: &GoParams, side: Color, overhead_ms: u64) -> Option<Duration> {
    if params.infinite {
        return None;
    }
    if let Some(movetime) = params.movetime {
        let budget = movetime.saturating_sub(Duration::from_millis(overhead_ms));
        return Some(budget.max(Duration::from_millis(1)));
    }

    let (remaining, increment) = match side {
        Color::White => (params.wtime?, params.winc.unwrap_or(Duration::ZERO)),
        Color::Black => (params.btime?, params.binc.unwrap_or(Duration::ZERO)),
    };

    let movestogo = params.movestogo.unwrap_or(DEFAULT_MOVES_TO_GO).max(1);
    let mut budget = remaining / movestogo + increment / 2;
    budget = budget.saturating_sub(Duration::from_millis(overhead_ms));

    // Never allocate zero, and never more than the clock itself
    let floor = Duration::from_millis(1);
    let ceiling = remaining
        .saturating_sub(Duration::from_millis(overhead_ms))
        .max(floor);
    Some(budget.clamp(floor, ceiling))
}
