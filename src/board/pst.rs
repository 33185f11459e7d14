//! Material values and piece-square tables.
//!
//! Tables are written from White's perspective with rank 1 at the top of
//! the literal (index 0 = a1); Black positions mirror with `sq ^ 56`.
//! The king gets two tables: the middlegame table keeps the king on the
//! back rank behind its pawns, the endgame table pulls it to the centre.

/// Material in centipawns, indexed by piece kind. The king carries no
/// material weight; its worth is positional.
pub(crate) const MATERIAL: [i32; 6] = [100, 320, 330, 500, 900, 0];

/// Game-phase contribution per piece kind (pawns and kings contribute none).
pub(crate) const PHASE_WEIGHTS: [i32; 6] = [0, 1, 1, 2, 4, 0];

/// Sum of all phase weights in the starting position.
pub(crate) const PHASE_TOTAL: i32 = 24;

/// Enemy non-pawn material at or below this means "endgame" for the
/// purposes of king placement.
pub(crate) const KING_ENDGAME_THRESHOLD: i32 = 1300;

#[rustfmt::skip]
pub(crate) const PAWN_PST: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10,-20,-20, 10, 10,  5,
     5, -5,-10,  0,  0,-10, -5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5,  5, 10, 25, 25, 10,  5,  5,
    10, 10, 20, 30, 30, 20, 10, 10,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
pub(crate) const KNIGHT_PST: [i32; 64] = [
   -50,-40,-30,-30,-30,-30,-40,-50,
   -40,-20,  0,  5,  5,  0,-20,-40,
   -30,  5, 10, 15, 15, 10,  5,-30,
   -30,  0, 15, 20, 20, 15,  0,-30,
   -30,  5, 15, 20, 20, 15,  5,-30,
   -30,  0, 10, 15, 15, 10,  0,-30,
   -40,-20,  0,  0,  0,  0,-20,-40,
   -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
pub(crate) const BISHOP_PST: [i32; 64] = [
   -20,-10,-10,-10,-10,-10,-10,-20,
   -10,  5,  0,  0,  0,  0,  5,-10,
   -10, 10, 10, 10, 10, 10, 10,-10,
   -10,  0, 10, 10, 10, 10,  0,-10,
   -10,  5,  5, 10, 10,  5,  5,-10,
   -10,  0,  5, 10, 10,  5,  0,-10,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
pub(crate) const ROOK_PST: [i32; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
pub(crate) const QUEEN_PST: [i32; 64] = [
   -20,-10,-10, -5, -5,-10,-10,-20,
   -10,  0,  5,  0,  0,  0,  0,-10,
   -10,  5,  5,  5,  5,  5,  0,-10,
     0,  0,  5,  5,  5,  5,  0, -5,
    -5,  0,  5,  5,  5,  5,  0, -5,
   -10,  0,  5,  5,  5,  5,  0,-10,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -20,-10,-10, -5, -5,-10,-10,-20,
];

/// Strongly asymmetric: stay behind the pawn shield while queens are on.
#[rustfmt::skip]
pub(crate) const KING_MG_PST: [i32; 64] = [
    20, 30, 10,  0,  0, 10, 30, 20,
    20, 20,  0,  0,  0,  0, 20, 20,
   -10,-20,-20,-20,-20,-20,-20,-10,
   -20,-30,-30,-40,-40,-30,-30,-20,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
];

/// Symmetric: centralise once the heavy pieces are gone.
#[rustfmt::skip]
pub(crate) const KING_EG_PST: [i32; 64] = [
   -50,-30,-30,-30,-30,-30,-30,-50,
   -30,-30,  0,  0,  0,  0,-30,-30,
   -30,-10, 20, 30, 30, 20,-10,-30,
   -30,-10, 30, 40, 40, 30,-10,-30,
   -30,-10, 30, 40, 40, 30,-10,-30,
   -30,-10, 20, 30, 30, 20,-10,-30,
   -30,-20,-10,  0,  0,-10,-20,-30,
   -50,-40,-30,-20,-20,-30,-40,-50,
];

/// Passed-pawn bonus by relative rank (rank 0 and 7 never hold pawns).
pub(crate) const PASSED_PAWN_BONUS: [i32; 8] = [0, 5, 10, 20, 35, 60, 100, 0];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pawn_pst_empty_edges() {
        // No pawn ever stands on rank 1 or rank 8
        for file in 0..8 {
            assert_eq!(PAWN_PST[file], 0);
            assert_eq!(PAWN_PST[56 + file], 0);
        }
    }

    #[test]
    fn test_king_tables_shapes() {
        // Middlegame: corner shelter beats the centre
        assert!(KING_MG_PST[6] > KING_MG_PST[28]);
        // Endgame: centre beats the corner
        assert!(KING_EG_PST[28] > KING_EG_PST[0]);
        // Endgame table is left-right symmetric
        for rank in 0..8 {
            for file in 0..4 {
                assert_eq!(
                    KING_EG_PST[rank * 8 + file],
                    KING_EG_PST[rank * 8 + (7 - file)]
                );
            }
        }
    }

    #[test]
    fn test_passed_pawn_bonus_monotonic() {
        for rank in 1..6 {
            assert!(PASSED_PAWN_BONUS[rank + 1] > PASSED_PAWN_BONUS[rank]);
        }
    }
}
