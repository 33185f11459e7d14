//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position hashes for the
//! transposition table and repetition detection. Keys are generated from a
//! fixed seed so identical positions hash identically across runs.

use once_cell::sync::Lazy;
use rand::prelude::*;

pub(crate) struct ZobristKeys {
    /// piece_keys[color][piece_type][square_index]
    pub(crate) piece_keys: [[[u64; 64]; 6]; 2],
    /// XORed in when Black is to move
    pub(crate) side_key: u64,
    /// Indexed directly by the castling-rights bitmask; entry `m` is the XOR
    /// of the per-flag keys for every flag set in `m`, so flipping one flag
    /// is `hash ^= castling_keys[old] ^ castling_keys[new]`.
    pub(crate) castling_keys: [u64; 16],
    /// en_passant_keys[file_index] - only the file matters for the EP target
    pub(crate) en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        // Fixed seed for reproducibility
        let mut rng = StdRng::seed_from_u64(0x70AB_11C5_D21E_F00D);

        let mut piece_keys = [[[0u64; 64]; 6]; 2];
        for color in &mut piece_keys {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let side_key = rng.gen();

        let flag_keys: [u64; 4] = [rng.gen(), rng.gen(), rng.gen(), rng.gen()];
        let mut castling_keys = [0u64; 16];
        for (mask, slot) in castling_keys.iter_mut().enumerate() {
            for (bit, key) in flag_keys.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    *slot ^= key;
                }
            }
        }

        let mut en_passant_keys = [0u64; 8];
        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            side_key,
            castling_keys,
            en_passant_keys,
        }
    }
}

/// Process-wide key tables, computed once and read-only afterwards.
pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
