//! Chess board representation and game logic.
//!
//! Bitboard-based position with a redundant mailbox, pseudo-legal move
//! generation, incremental Zobrist hashing, static evaluation and SEE.
//!
//! # Example
//! ```
//! use cobalt::board::Board;
//!
//! let mut board = Board::new();
//! let moves = board.generate_legal();
//! assert_eq!(moves.len(), 20);
//! ```

mod attack_tables;
mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod pst;
mod see;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use error::{FenError, MoveParseError, SquareError};
pub use fen::START_FEN;
pub use state::{Board, NullUnmakeInfo, UnmakeInfo};
pub use types::{Bitboard, Color, Move, MoveList, Piece, ScoredMove, ScoredMoveList, Square};

// Internal utilities shared with the search
pub(crate) use see::see_value;
pub(crate) use types::{EMPTY_MOVE, MAX_PLY};
