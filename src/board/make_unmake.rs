//! Applying and reverting moves.
//!
//! `make_move` keeps the bitboards, mailbox, game state and Zobrist hash
//! consistent by XOR deltas; `unmake_move` restores the exact prior state
//! from the undo record. The incremental hash is asserted against a
//! from-scratch recomputation in debug builds.

use crate::zobrist::ZOBRIST;

use super::attack_tables::PAWN_ATTACKS;
use super::state::{NullUnmakeInfo, UnmakeInfo};
use super::types::{Color, Move, Piece, Square, CASTLING_RIGHTS_MASK};
use super::Board;

impl Board {
    /// Compute the position hash from scratch. The incremental hash must
    /// equal this value at all times; tests and debug assertions rely on it.
    #[must_use]
    pub fn calculate_hash(&self) -> u64 {
        let mut hash = 0u64;

        for color in [Color::White, Color::Black] {
            for piece in super::types::ALL_PIECES {
                for sq in self.pieces_of(color, piece).iter() {
                    hash ^= ZOBRIST.piece_keys[color.index()][piece.index()][sq.as_index()];
                }
            }
        }

        if !self.white_to_move {
            hash ^= ZOBRIST.side_key;
        }

        hash ^= ZOBRIST.castling_keys[self.castling_rights as usize];
        hash ^= self.en_passant_hash();

        hash
    }

    /// Hash contribution of the en-passant target.
    ///
    /// The file key is folded in only when a pawn of the side to move can
    /// actually play the capture; targets nobody can take would otherwise
    /// make transpositions hash apart.
    pub(crate) fn en_passant_hash(&self) -> u64 {
        let Some(ep) = self.en_passant_target else {
            return 0;
        };
        let us = self.side_to_move();
        // Reverse lookup: pawns that attack `ep` sit on the opponent-direction
        // attack mask of the target square.
        let capturers =
            PAWN_ATTACKS[us.opponent().index()][ep.as_index()] & self.pieces_of(us, Piece::Pawn).0;
        if capturers != 0 {
            ZOBRIST.en_passant_keys[ep.file()]
        } else {
            0
        }
    }

    #[inline]
    fn piece_key(color: Color, piece: Piece, sq: Square) -> u64 {
        ZOBRIST.piece_keys[color.index()][piece.index()][sq.as_index()]
    }

    /// Square of the pawn removed by an en-passant capture landing on `to`.
    #[inline]
    fn en_passant_victim_square(to: Square, mover_is_white: bool) -> Square {
        if mover_is_white {
            Square::new(to.rank() - 1, to.file())
        } else {
            Square::new(to.rank() + 1, to.file())
        }
    }

    /// Rook from/to files for a castling move ending on `king_to`.
    #[inline]
    fn castling_rook_files(king_to: Square) -> (usize, usize) {
        if king_to.file() == 6 {
            (7, 5)
        } else {
            (0, 3)
        }
    }

    /// Apply `m`, returning the record needed to revert it.
    pub fn make_move(&mut self, m: Move) -> UnmakeInfo {
        let info = UnmakeInfo {
            previous_en_passant_target: self.en_passant_target,
            previous_castling_rights: self.castling_rights,
            previous_halfmove_clock: self.halfmove_clock,
            previous_hash: self.hash,
        };

        let us = self.side_to_move();
        let is_white = us == Color::White;
        let piece = m.piece();
        let (from, to) = (m.from(), m.to());

        let mut hash = self.hash;
        // Out with the state-dependent components of the old position
        hash ^= self.en_passant_hash();
        hash ^= ZOBRIST.castling_keys[self.castling_rights as usize];

        // Remove any captured piece
        if let Some(victim) = m.captured() {
            let victim_sq = if m.is_en_passant() {
                Self::en_passant_victim_square(to, is_white)
            } else {
                to
            };
            self.remove_piece(victim_sq, us.opponent(), victim);
            hash ^= Self::piece_key(us.opponent(), victim, victim_sq);
        }

        // Move the piece, promoting on arrival if requested
        self.remove_piece(from, us, piece);
        hash ^= Self::piece_key(us, piece, from);
        let placed = m.promotion_piece().unwrap_or(piece);
        self.set_piece(to, us, placed);
        hash ^= Self::piece_key(us, placed, to);

        // Castling also moves the rook
        if m.is_castling() {
            let (rook_from_file, rook_to_file) = Self::castling_rook_files(to);
            let rook_from = Square::new(to.rank(), rook_from_file);
            let rook_to = Square::new(to.rank(), rook_to_file);
            self.remove_piece(rook_from, us, Piece::Rook);
            self.set_piece(rook_to, us, Piece::Rook);
            hash ^= Self::piece_key(us, Piece::Rook, rook_from);
            hash ^= Self::piece_key(us, Piece::Rook, rook_to);
        }

        // Rights die when a king or rook leaves home, or a rook is captured there
        self.castling_rights &=
            CASTLING_RIGHTS_MASK[from.as_index()] & CASTLING_RIGHTS_MASK[to.as_index()];

        self.en_passant_target = if m.is_double_pawn_push() {
            Some(Square::new(usize::midpoint(from.rank(), to.rank()), from.file()))
        } else {
            None
        };

        if piece == Piece::Pawn || m.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if !is_white {
            self.fullmove_number += 1;
        }

        // In with the new state-dependent components
        hash ^= ZOBRIST.castling_keys[self.castling_rights as usize];
        hash ^= ZOBRIST.side_key;
        self.white_to_move = !self.white_to_move;
        hash ^= self.en_passant_hash();

        self.hash = hash;
        self.repetitions.push(hash);

        debug_assert_eq!(self.occupied[0].0 | self.occupied[1].0, self.all_occupied.0);
        debug_assert_eq!(self.occupied[0].0 & self.occupied[1].0, 0);

        info
    }

    /// Revert `m`, restoring the exact prior state.
    pub fn unmake_move(&mut self, m: Move, info: UnmakeInfo) {
        self.repetitions.pop();

        self.white_to_move = !self.white_to_move;
        self.en_passant_target = info.previous_en_passant_target;
        self.castling_rights = info.previous_castling_rights;
        self.halfmove_clock = info.previous_halfmove_clock;
        self.hash = info.previous_hash;

        let us = self.side_to_move();
        let is_white = us == Color::White;
        if !is_white {
            self.fullmove_number -= 1;
        }

        let (from, to) = (m.from(), m.to());
        let placed = m.promotion_piece().unwrap_or(m.piece());
        self.remove_piece(to, us, placed);
        self.set_piece(from, us, m.piece());

        if m.is_castling() {
            let (rook_from_file, rook_to_file) = Self::castling_rook_files(to);
            self.remove_piece(Square::new(to.rank(), rook_to_file), us, Piece::Rook);
            self.set_piece(Square::new(to.rank(), rook_from_file), us, Piece::Rook);
        }

        if let Some(victim) = m.captured() {
            let victim_sq = if m.is_en_passant() {
                Self::en_passant_victim_square(to, is_white)
            } else {
                to
            };
            self.set_piece(victim_sq, us.opponent(), victim);
        }

        debug_assert_eq!(self.occupied[0].0 | self.occupied[1].0, self.all_occupied.0);
        debug_assert_eq!(self.occupied[0].0 & self.occupied[1].0, 0);
    }

    /// Flip the side to move without moving a piece. Used by null-move
    /// pruning; the en-passant target is cleared because the "free move"
    /// forfeits the capture.
    pub fn make_null_move(&mut self) -> NullUnmakeInfo {
        let info = NullUnmakeInfo {
            previous_en_passant_target: self.en_passant_target,
            previous_hash: self.hash,
        };

        let mut hash = self.hash;
        hash ^= self.en_passant_hash();
        self.en_passant_target = None;
        hash ^= ZOBRIST.side_key;
        self.white_to_move = !self.white_to_move;

        self.hash = hash;
        self.repetitions.push(hash);
        info
    }

    pub fn unmake_null_move(&mut self, info: NullUnmakeInfo) {
        self.repetitions.pop();
        self.white_to_move = !self.white_to_move;
        self.en_passant_target = info.previous_en_passant_target;
        self.hash = info.previous_hash;
    }
}
