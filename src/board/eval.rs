//! Static evaluation.
//!
//! A deliberately modest evaluator: material, piece-square tables, pawn
//! structure, file control, the bishop pair and king placement. The score
//! is returned from the side to move's perspective (negamax convention).

use super::pst::{
    BISHOP_PST, KING_EG_PST, KING_ENDGAME_THRESHOLD, KING_MG_PST, KNIGHT_PST, MATERIAL, PASSED_PAWN_BONUS,
    PAWN_PST, QUEEN_PST, ROOK_PST,
};
use super::types::{Bitboard, Color, Piece};
use super::Board;

/// Bishop pair bonus in centipawns
const BISHOP_PAIR_BONUS: i32 = 30;

/// Side-to-move bonus
const TEMPO_BONUS: i32 = 10;

const ISOLATED_PAWN_PENALTY: i32 = 15;
const DOUBLED_PAWN_PENALTY: i32 = 10;

const ROOK_OPEN_FILE_BONUS: i32 = 25;
const ROOK_SEMI_OPEN_FILE_BONUS: i32 = 12;
const QUEEN_OPEN_FILE_BONUS: i32 = 10;
const QUEEN_SEMI_OPEN_FILE_BONUS: i32 = 5;

impl Board {
    /// Evaluate the position in centipawns, positive when the side to move
    /// stands better.
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        if self.is_insufficient_material() {
            return 0;
        }

        let score = self.eval_for(Color::White) - self.eval_for(Color::Black);

        let signed = if self.white_to_move { score } else { -score };
        signed + TEMPO_BONUS
    }

    /// Total non-pawn, non-king material for `color`. Also the search's
    /// zugzwang guard for null-move pruning.
    #[must_use]
    pub(crate) fn non_pawn_material(&self, color: Color) -> i32 {
        [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
            .into_iter()
            .map(|p| MATERIAL[p.index()] * self.pieces_of(color, p).popcount() as i32)
            .sum()
    }

    /// One side's material, placement, pawn structure and file control,
    /// from White's point of view after the white-minus-black subtraction.
    fn eval_for(&self, us: Color) -> i32 {
        let is_white = us == Color::White;
        let mut score = 0;

        for piece in [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
            let table = match piece {
                Piece::Pawn => &PAWN_PST,
                Piece::Knight => &KNIGHT_PST,
                Piece::Bishop => &BISHOP_PST,
                Piece::Rook => &ROOK_PST,
                _ => &QUEEN_PST,
            };
            for sq in self.pieces_of(us, piece).iter() {
                let pst_sq = if is_white { sq.as_index() } else { sq.as_index() ^ 56 };
                score += MATERIAL[piece.index()] + table[pst_sq];
            }
        }

        score += self.eval_pawn_structure(us);
        score += self.eval_files(us);

        if self.pieces_of(us, Piece::Bishop).popcount() >= 2 {
            score += BISHOP_PAIR_BONUS;
        }

        score += self.eval_king(us);
        score
    }

    fn eval_pawn_structure(&self, us: Color) -> i32 {
        let is_white = us == Color::White;
        let our_pawns = self.pieces_of(us, Piece::Pawn);
        let their_pawns = self.pieces_of(us.opponent(), Piece::Pawn);
        let mut score = 0;

        for file in 0..8 {
            let on_file = Bitboard(our_pawns.0 & Bitboard::file_mask(file).0).popcount() as i32;
            if on_file > 1 {
                score -= DOUBLED_PAWN_PENALTY * (on_file - 1);
            }
        }

        for sq in our_pawns.iter() {
            let file = sq.file();

            let mut adjacent = Bitboard::EMPTY.0;
            if file > 0 {
                adjacent |= Bitboard::file_mask(file - 1).0;
            }
            if file < 7 {
                adjacent |= Bitboard::file_mask(file + 1).0;
            }
            if our_pawns.0 & adjacent == 0 {
                score -= ISOLATED_PAWN_PENALTY;
            }

            // Passed: no enemy pawn on this or an adjacent file, strictly ahead
            let span = adjacent | Bitboard::file_mask(file).0;
            let ahead = if is_white {
                (!0u64).checked_shl(((sq.rank() + 1) * 8) as u32).unwrap_or(0)
            } else {
                !((!0u64).checked_shl((sq.rank() * 8) as u32).unwrap_or(0))
            };
            if their_pawns.0 & span & ahead == 0 {
                let rel_rank = if is_white { sq.rank() } else { 7 - sq.rank() };
                score += PASSED_PAWN_BONUS[rel_rank];
            }
        }

        score
    }

    fn eval_files(&self, us: Color) -> i32 {
        let our_pawns = self.pieces_of(us, Piece::Pawn);
        let all_pawns =
            our_pawns.0 | self.pieces_of(us.opponent(), Piece::Pawn).0;
        let mut score = 0;

        for (piece, open_bonus, semi_bonus) in [
            (Piece::Rook, ROOK_OPEN_FILE_BONUS, ROOK_SEMI_OPEN_FILE_BONUS),
            (Piece::Queen, QUEEN_OPEN_FILE_BONUS, QUEEN_SEMI_OPEN_FILE_BONUS),
        ] {
            for sq in self.pieces_of(us, piece).iter() {
                let file = Bitboard::file_mask(sq.file()).0;
                if all_pawns & file == 0 {
                    score += open_bonus;
                } else if our_pawns.0 & file == 0 {
                    score += semi_bonus;
                }
            }
        }

        score
    }

    /// King placement: shelter table while the opponent still has enough
    /// material to attack, centralisation table once they don't.
    fn eval_king(&self, us: Color) -> i32 {
        let king = self.king_square(us);
        let pst_sq = if us == Color::White {
            king.as_index()
        } else {
            king.as_index() ^ 56
        };

        if self.non_pawn_material(us.opponent()) <= KING_ENDGAME_THRESHOLD {
            KING_EG_PST[pst_sq]
        } else {
            KING_MG_PST[pst_sq]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::Square;

    /// Color-swapped vertical mirror of a position: pieces flipped and
    /// recolored, side to move flipped, castling rights swapped.
    fn mirror(board: &Board) -> Board {
        let mut mirrored = Board::empty();
        for idx in 0..64 {
            let sq = Square::from_index(idx);
            if let Some((color, piece)) = board.piece_at(sq) {
                mirrored.set_piece(sq.flip_vertical(), color.opponent(), piece);
            }
        }
        mirrored.white_to_move = !board.white_to_move;
        let rights = board.castling_rights;
        mirrored.castling_rights = ((rights & 0b0011) << 2) | ((rights & 0b1100) >> 2);
        mirrored.en_passant_target = board.en_passant_target.map(Square::flip_vertical);
        mirrored.halfmove_clock = board.halfmove_clock;
        mirrored.hash = mirrored.calculate_hash();
        mirrored.repetitions.reset(mirrored.hash);
        mirrored
    }

    #[test]
    fn test_eval_startpos_balanced() {
        let board = Board::new();
        assert_eq!(board.evaluate(), TEMPO_BONUS);
    }

    #[test]
    fn test_eval_material_advantage() {
        // White is up a queen
        let board = Board::from_fen("4k3/8/8/8/8/8/3Q4/4K3 w - - 0 1");
        assert!(board.evaluate() > 800);

        // Same position from Black's perspective is just as bad
        let board = Board::from_fen("4k3/8/8/8/8/8/3Q4/4K3 b - - 0 1");
        assert!(board.evaluate() < -800);
    }

    #[test]
    fn test_eval_mirror_symmetry() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1",
            "8/5pk1/6p1/8/8/6P1/5PK1/8 b - - 0 1",
        ];
        for fen in fens {
            let board = Board::from_fen(fen);
            let mirrored = mirror(&board);
            assert_eq!(
                board.evaluate(),
                mirrored.evaluate(),
                "eval asymmetry for {fen}"
            );
        }
    }

    #[test]
    fn test_eval_insufficient_material_draws() {
        for fen in [
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/3NK3 w - - 0 1",
            "4k3/8/8/8/8/8/8/3BK3 b - - 0 1",
            "3bk3/8/8/8/8/8/8/4K3 w - - 0 1",
        ] {
            assert_eq!(Board::from_fen(fen).evaluate(), 0, "not a draw: {fen}");
        }
    }

    #[test]
    fn test_eval_two_minors_not_insufficient() {
        let board = Board::from_fen("3nk3/8/8/8/8/8/8/3NK3 w - - 0 1");
        assert!(!board.is_insufficient_material());
    }

    #[test]
    fn test_eval_passed_pawn_grows_with_rank() {
        let on_fourth = Board::from_fen("4k3/8/8/8/3P4/8/8/4K3 w - - 0 1");
        let on_sixth = Board::from_fen("4k3/8/3P4/8/8/8/8/4K3 w - - 0 1");
        assert!(on_sixth.evaluate() > on_fourth.evaluate());
    }

    #[test]
    fn test_eval_file_control_tiers() {
        // Open file beats semi-open beats blocked, for the same rook
        let open = Board::from_fen("4k3/8/8/8/8/8/8/3RK3 w - - 0 1");
        assert_eq!(open.eval_files(Color::White), ROOK_OPEN_FILE_BONUS);

        let semi = Board::from_fen("4k3/3p4/8/8/8/8/8/3RK3 w - - 0 1");
        assert_eq!(semi.eval_files(Color::White), ROOK_SEMI_OPEN_FILE_BONUS);

        let blocked = Board::from_fen("4k3/8/8/8/8/8/3P4/3RK3 w - - 0 1");
        assert_eq!(blocked.eval_files(Color::White), 0);
    }
}
