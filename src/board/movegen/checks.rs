//! Attack queries: square attacks, check detection, and the
//! does-this-move-give-check predicate used by the search.

use super::super::attack_tables::{
    bishop_attacks, queen_attacks, rook_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS,
};
use super::super::types::{Color, Move, Piece, Square};
use super::super::Board;

impl Board {
    /// True iff any piece of `attacker` attacks `sq` in the current position.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, attacker: Color) -> bool {
        let target = sq.as_index();
        let a = attacker.index();

        // A pawn of `attacker` attacks `sq` iff it stands on the reverse
        // attack mask of the target square.
        let pawn_sources = PAWN_ATTACKS[attacker.opponent().index()][target];
        if self.pieces[a][Piece::Pawn.index()].0 & pawn_sources != 0 {
            return true;
        }

        if self.pieces[a][Piece::Knight.index()].0 & KNIGHT_ATTACKS[target] != 0 {
            return true;
        }

        if self.pieces[a][Piece::King.index()].0 & KING_ATTACKS[target] != 0 {
            return true;
        }

        let occ = self.all_occupied.0;
        let rook_like =
            self.pieces[a][Piece::Rook.index()].0 | self.pieces[a][Piece::Queen.index()].0;
        if rook_attacks(target, occ) & rook_like != 0 {
            return true;
        }

        let bishop_like =
            self.pieces[a][Piece::Bishop.index()].0 | self.pieces[a][Piece::Queen.index()].0;
        bishop_attacks(target, occ) & bishop_like != 0
    }

    /// Is `color`'s king attacked by the other side?
    #[inline]
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opponent())
    }

    /// Does `mv` (pseudo-legal for the side to move) deliver check, without
    /// making the move? Covers direct checks, discovered checks through the
    /// vacated square, the castling rook, and the en-passant victim removal.
    #[must_use]
    pub fn move_gives_check(&self, mv: Move) -> bool {
        let us = self.side_to_move();
        let them = us.opponent();
        let king = self.king_square(them);
        let king_bb = 1u64 << king.as_index();

        let from_bb = 1u64 << mv.from().as_index();
        let to_bb = 1u64 << mv.to().as_index();
        let to = mv.to().as_index();

        // Occupancy after the move: mover relocated, victim gone. A normal
        // capture leaves the destination occupied either way.
        let mut occ = (self.all_occupied.0 & !from_bb) | to_bb;
        if mv.is_en_passant() {
            let victim_rank = if us == Color::White {
                mv.to().rank() - 1
            } else {
                mv.to().rank() + 1
            };
            occ &= !(1u64 << Square::new(victim_rank, mv.to().file()).as_index());
        }

        // Direct check from the piece on its new square
        let placed = mv.promotion_piece().unwrap_or(mv.piece());
        let direct = match placed {
            Piece::Pawn => PAWN_ATTACKS[us.index()][to] & king_bb != 0,
            Piece::Knight => KNIGHT_ATTACKS[to] & king_bb != 0,
            Piece::Bishop => bishop_attacks(to, occ) & king_bb != 0,
            Piece::Rook => rook_attacks(to, occ) & king_bb != 0,
            Piece::Queen => queen_attacks(to, occ) & king_bb != 0,
            Piece::King => false,
        };
        if direct {
            return true;
        }

        if mv.is_castling() {
            // The rook lands beside the king and may check along rank or file.
            let (rook_from_file, rook_to_file) = if mv.to().file() == 6 { (7, 5) } else { (0, 3) };
            let rook_from = Square::new(mv.to().rank(), rook_from_file);
            let rook_to = Square::new(mv.to().rank(), rook_to_file);
            let occ_castled = (occ & !(1u64 << rook_from.as_index())) | (1u64 << rook_to.as_index());
            return rook_attacks(rook_to.as_index(), occ_castled) & king_bb != 0;
        }

        // Discovered check: a slider that was masked by the vacated square
        // (or by the en-passant victim) now sees the enemy king. The mover
        // itself is excluded; its checks are direct and handled above.
        let stationary = !from_bb;
        let diag_sliders = (self.pieces_of(us, Piece::Bishop).0
            | self.pieces_of(us, Piece::Queen).0)
            & stationary;
        if bishop_attacks(king.as_index(), occ) & diag_sliders != 0 {
            return true;
        }
        let line_sliders = (self.pieces_of(us, Piece::Rook).0
            | self.pieces_of(us, Piece::Queen).0)
            & stationary;
        rook_attacks(king.as_index(), occ) & line_sliders != 0
    }
}
