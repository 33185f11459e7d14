use super::super::attack_tables::PAWN_ATTACKS;
use super::super::types::{Bitboard, Color, Move, MoveList, Piece, Square, PROMOTION_PIECES};
use super::super::Board;

impl Board {
    fn push_pawn_advance(from: Square, to: Square, moves: &mut MoveList) {
        if to.rank() == 0 || to.rank() == 7 {
            for promo in PROMOTION_PIECES {
                moves.push(Move::promotion(from, to, promo, None));
            }
        } else {
            moves.push(Move::quiet(from, to, Piece::Pawn));
        }
    }

    fn push_pawn_capture(from: Square, to: Square, victim: Piece, moves: &mut MoveList) {
        if to.rank() == 0 || to.rank() == 7 {
            for promo in PROMOTION_PIECES {
                moves.push(Move::promotion(from, to, promo, Some(victim)));
            }
        } else {
            moves.push(Move::capture(from, to, Piece::Pawn, victim));
        }
    }

    pub(crate) fn generate_pawn_moves(&self, us: Color, moves: &mut MoveList) {
        let is_white = us == Color::White;
        let start_rank = if is_white { 1 } else { 6 };
        let their_occ = self.occupied_by(us.opponent());

        for from in self.pieces_of(us, Piece::Pawn).iter() {
            // Pushes
            if let Some(forward) = from.forward(is_white) {
                if self.is_empty_square(forward) {
                    Self::push_pawn_advance(from, forward, moves);
                    if from.rank() == start_rank {
                        let double = forward.forward(is_white).expect("double push off board");
                        if self.is_empty_square(double) {
                            moves.push(Move::double_pawn_push(from, double));
                        }
                    }
                }
            }

            // Diagonal captures and en passant
            let attacks = Bitboard(PAWN_ATTACKS[us.index()][from.as_index()]);
            for to in Bitboard(attacks.0 & their_occ.0).iter() {
                let (_, victim) = self.piece_at(to).expect("capture target empty");
                Self::push_pawn_capture(from, to, victim, moves);
            }
            if let Some(ep) = self.en_passant_target {
                if attacks.contains(ep) {
                    moves.push(Move::en_passant(from, ep));
                }
            }
        }
    }

    /// Tactical pawn moves only: captures, en passant, and all promotions
    /// (a quiet queen promotion is tactical enough for quiescence).
    pub(crate) fn generate_pawn_captures(&self, us: Color, moves: &mut MoveList) {
        let is_white = us == Color::White;
        let their_occ = self.occupied_by(us.opponent());

        for from in self.pieces_of(us, Piece::Pawn).iter() {
            if let Some(forward) = from.forward(is_white) {
                if (forward.rank() == 0 || forward.rank() == 7) && self.is_empty_square(forward) {
                    for promo in PROMOTION_PIECES {
                        moves.push(Move::promotion(from, forward, promo, None));
                    }
                }
            }

            let attacks = Bitboard(PAWN_ATTACKS[us.index()][from.as_index()]);
            for to in Bitboard(attacks.0 & their_occ.0).iter() {
                let (_, victim) = self.piece_at(to).expect("capture target empty");
                Self::push_pawn_capture(from, to, victim, moves);
            }
            if let Some(ep) = self.en_passant_target {
                if attacks.contains(ep) {
                    moves.push(Move::en_passant(from, ep));
                }
            }
        }
    }
}
