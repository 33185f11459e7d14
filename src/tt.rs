//! Transposition table.
//!
//! A bounded array of packed 16-byte entries keyed by Zobrist hashes.
//! Collisions resolve through a two-bucket policy: every hash probes its
//! primary slot and a secondary slot offset by half the table, preferring
//! key matches, then empty slots, then whichever of the two is weaker.
//!
//! The table is owned by a single search thread. A parallel search would
//! need atomic packed stores with key verification filtering torn reads;
//! the layout below (entry + verification key in 16 bytes) is chosen so
//! that upgrade stays mechanical.

use crate::board::Move;
use crate::search::MATE_BOUND;

/// How a stored score bounds the true value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// Score is the exact value
    Exact,
    /// Score is at least this value (the node failed high)
    Lower,
    /// Score is at most this value (the node failed low)
    Upper,
}

/// Packed table entry: verification key, best move, score, depth searched,
/// and bound+age folded into one byte.
#[derive(Clone, Copy)]
struct TTEntry {
    key: u64,
    mv: u32,
    score: i16,
    depth: u8,
    /// bits 0-1: bound, bits 2-7: age
    flags: u8,
}

const EMPTY_KEY: u64 = 0;

impl TTEntry {
    const EMPTY: TTEntry = TTEntry {
        key: EMPTY_KEY,
        mv: 0,
        score: 0,
        depth: 0,
        flags: 0,
    };

    #[inline]
    fn is_empty(&self) -> bool {
        self.key == EMPTY_KEY
    }

    #[inline]
    fn bound(&self) -> Bound {
        match self.flags & 0b11 {
            0 => Bound::Exact,
            1 => Bound::Lower,
            _ => Bound::Upper,
        }
    }

    #[inline]
    fn age(&self) -> u8 {
        self.flags >> 2
    }

    #[inline]
    fn pack_flags(bound: Bound, age: u8) -> u8 {
        let b = match bound {
            Bound::Exact => 0,
            Bound::Lower => 1,
            Bound::Upper => 2,
        };
        (age << 2) | b
    }
}

/// A probe hit, with the mate-score adjustment already applied.
#[derive(Clone, Copy, Debug)]
pub struct TTHit {
    pub depth: u32,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

pub struct TranspositionTable {
    table: Vec<TTEntry>,
    mask: usize,
    age: u8,
    occupied: usize,
    collisions: u64,
}

impl TranspositionTable {
    /// Default table size in megabytes.
    pub const DEFAULT_MB: usize = 64;

    /// Create a table of approximately `size_mb` megabytes, rounded down to
    /// a power-of-two entry count so indexing is a single mask.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<TTEntry>();
        let mut num_entries = (size_mb.max(1) * 1024 * 1024) / entry_size;
        num_entries = num_entries.next_power_of_two();
        if num_entries * entry_size > size_mb.max(1) * 1024 * 1024 {
            num_entries /= 2;
        }
        if num_entries < 2 {
            num_entries = 2;
        }

        TranspositionTable {
            table: vec![TTEntry::EMPTY; num_entries],
            mask: num_entries - 1,
            age: 0,
            occupied: 0,
            collisions: 0,
        }
    }

    #[inline]
    fn primary_index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// The secondary slot sits half a table away from the primary one.
    #[inline]
    fn secondary_index(&self, hash: u64) -> usize {
        self.primary_index(hash) ^ (self.table.len() >> 1)
    }

    /// Look up `hash`, returning the matching entry with its mate score
    /// rebased to `ply` plies from the root.
    #[must_use]
    pub fn probe(&self, hash: u64, ply: usize) -> Option<TTHit> {
        for idx in [self.primary_index(hash), self.secondary_index(hash)] {
            let entry = &self.table[idx];
            if !entry.is_empty() && entry.key == hash {
                let mv = Move::from_u32(entry.mv);
                return Some(TTHit {
                    depth: entry.depth as u32,
                    score: score_from_tt(entry.score as i32, ply),
                    bound: entry.bound(),
                    best_move: if mv.is_null() { None } else { Some(mv) },
                });
            }
        }
        None
    }

    /// Store an entry for `hash`. Mate scores are stored relative to the
    /// current node so they stay comparable across plies.
    pub fn store(
        &mut self,
        hash: u64,
        depth: u32,
        score: i32,
        bound: Bound,
        best_move: Option<Move>,
        ply: usize,
    ) {
        let adjusted = score_to_tt(score, ply).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        let entry = TTEntry {
            key: hash,
            mv: best_move.unwrap_or(Move::null()).as_u32(),
            score: adjusted,
            depth: depth.min(255) as u8,
            flags: TTEntry::pack_flags(bound, self.age),
        };

        let primary = self.primary_index(hash);
        let secondary = self.secondary_index(hash);

        // A slot already holding this position is always refreshed
        for idx in [primary, secondary] {
            if self.table[idx].key == hash {
                self.table[idx] = entry;
                return;
            }
        }

        // Then any empty slot
        for idx in [primary, secondary] {
            if self.table[idx].is_empty() {
                self.table[idx] = entry;
                self.occupied += 1;
                return;
            }
        }

        // Both full: evict the weaker occupant, but only when the incoming
        // entry is at least as deep or the victim is from an older search
        let weaker = if self.entry_priority(primary) <= self.entry_priority(secondary) {
            primary
        } else {
            secondary
        };
        let victim = &self.table[weaker];
        if depth >= victim.depth as u32 || victim.age() != self.age {
            self.table[weaker] = entry;
        }
        self.collisions += 1;
    }

    /// Replacement priority: deeper and newer entries survive.
    fn entry_priority(&self, idx: usize) -> i32 {
        let entry = &self.table[idx];
        let staleness = (self.age.wrapping_sub(entry.age()) & 0x3F) as i32;
        entry.depth as i32 * 2 - staleness
    }

    /// Called at the start of every new search so current-search entries
    /// win replacement fights against leftovers.
    pub fn increment_age(&mut self) {
        self.age = (self.age + 1) & 0x3F;
    }

    /// Wipe every slot (UCI `ucinewgame`).
    pub fn clear(&mut self) {
        self.table.fill(TTEntry::EMPTY);
        self.age = 0;
        self.occupied = 0;
        self.collisions = 0;
    }

    /// Fraction of slots in use, in permille, for `info hashfull`.
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        ((self.occupied as u64 * 1000) / self.table.len() as u64) as u32
    }

    /// Number of stores that found both buckets occupied by other positions.
    #[must_use]
    pub fn collision_count(&self) -> u64 {
        self.collisions
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MB)
    }
}

/// Rebase a mate score from root-relative to node-relative before storing.
#[inline]
fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_BOUND {
        score + ply as i32
    } else if score <= -MATE_BOUND {
        score - ply as i32
    } else {
        score
    }
}

/// Rebase a stored node-relative mate score back to root-relative.
#[inline]
fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_BOUND {
        score - ply as i32
    } else if score <= -MATE_BOUND {
        score + ply as i32
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Move, Piece, Square};
    use crate::search::MATE;

    fn any_move() -> Move {
        Move::quiet(Square::new(1, 4), Square::new(3, 4), Piece::Pawn)
    }

    #[test]
    fn test_store_then_probe() {
        let mut tt = TranspositionTable::new(1);
        let hash = Board::new().hash();

        tt.store(hash, 8, 42, Bound::Exact, Some(any_move()), 0);
        let hit = tt.probe(hash, 0).expect("entry lost");
        assert_eq!(hit.depth, 8);
        assert_eq!(hit.score, 42);
        assert_eq!(hit.bound, Bound::Exact);
        assert_eq!(hit.best_move, Some(any_move()));
    }

    #[test]
    fn test_probe_never_returns_mismatched_key() {
        let mut tt = TranspositionTable::new(1);
        tt.store(0xDEAD_BEEF, 5, 1, Bound::Lower, None, 0);
        assert!(tt.probe(0xBEEF_DEAD, 0).is_none());
    }

    #[test]
    fn test_second_bucket_used_on_collision() {
        let mut tt = TranspositionTable::new(1);
        let mask = tt.mask as u64;
        // Two hashes with the same primary slot
        let a = 0x1111_0000_0000_0000 | 7;
        let b = 0x2222_0000_0000_0000 | (7 + (mask + 1));
        assert_eq!(tt.primary_index(a), tt.primary_index(b));

        tt.store(a, 6, 10, Bound::Exact, None, 0);
        tt.store(b, 6, 20, Bound::Exact, None, 0);
        assert_eq!(tt.probe(a, 0).unwrap().score, 10);
        assert_eq!(tt.probe(b, 0).unwrap().score, 20);
    }

    #[test]
    fn test_shallower_store_does_not_evict_deeper() {
        let mut tt = TranspositionTable::new(1);
        let len = tt.table.len() as u64;
        // Three distinct positions that all map onto the same two slots
        let a = 0x0100_0000_0000_0003;
        let b = a + len;
        let c = a + 2 * len;

        tt.store(a, 10, 1, Bound::Exact, None, 0);
        tt.store(b, 9, 2, Bound::Exact, None, 0);
        // Shallower than both occupants within the same search: rejected
        tt.store(c, 3, 3, Bound::Exact, None, 0);
        assert!(tt.probe(c, 0).is_none());
        assert!(tt.probe(a, 0).is_some());
        assert!(tt.probe(b, 0).is_some());
        assert!(tt.collision_count() > 0);

        // After aging, the same shallow store evicts a stale entry
        tt.increment_age();
        tt.store(c, 3, 3, Bound::Exact, None, 0);
        assert!(tt.probe(c, 0).is_some());
    }

    #[test]
    fn test_mate_score_ply_adjustment() {
        let mut tt = TranspositionTable::new(1);
        let hash = 0xABCD_EF01_2345_6789;
        // A mate found 5 plies into the search, stored from ply 5
        let score_at_ply5 = MATE - 8;
        tt.store(hash, 4, score_at_ply5, Bound::Exact, None, 5);

        // Probed from a different ply, the distance rebases accordingly
        let hit = tt.probe(hash, 3).unwrap();
        assert_eq!(hit.score, MATE - 6);
        let hit = tt.probe(hash, 5).unwrap();
        assert_eq!(hit.score, score_at_ply5);
    }

    #[test]
    fn test_clear_wipes_entries() {
        let mut tt = TranspositionTable::new(1);
        tt.store(12345, 5, 7, Bound::Upper, None, 0);
        tt.clear();
        assert!(tt.probe(12345, 0).is_none());
        assert_eq!(tt.hashfull_per_mille(), 0);
    }

    #[test]
    fn test_entry_fits_sixteen_bytes() {
        assert!(std::mem::size_of::<TTEntry>() <= 16);
    }
}
