use super::super::attack_tables::KING_ATTACKS;
use super::super::types::{Bitboard, Color, Move, MoveList, Piece, Square};
use super::super::Board;

impl Board {
    pub(crate) fn generate_king_moves(&self, us: Color, moves: &mut MoveList) {
        let from = self.king_square(us);
        let own_occ = self.occupied_by(us);

        let targets = Bitboard(KING_ATTACKS[from.as_index()] & !own_occ.0);
        for to in targets.iter() {
            match self.piece_at(to) {
                Some((_, victim)) => moves.push(Move::capture(from, to, Piece::King, victim)),
                None => moves.push(Move::quiet(from, to, Piece::King)),
            }
        }

        self.generate_castling_moves(us, from, moves);
    }

    /// Castling generation checks the rights flag, empty transit squares,
    /// the rook still being home, and that the king's current and transit
    /// squares are unattacked. The destination square is covered by the
    /// ordinary legality filter after the move is made.
    fn generate_castling_moves(&self, us: Color, from: Square, moves: &mut MoveList) {
        let back_rank = if us == Color::White { 0 } else { 7 };
        if from != Square::new(back_rank, 4) {
            return;
        }

        let them = us.opponent();

        if self.has_castling_right(us, true)
            && self.is_empty_square(Square::new(back_rank, 5))
            && self.is_empty_square(Square::new(back_rank, 6))
            && self.piece_at(Square::new(back_rank, 7)) == Some((us, Piece::Rook))
            && !self.is_square_attacked(from, them)
            && !self.is_square_attacked(Square::new(back_rank, 5), them)
        {
            moves.push(Move::castle_kingside(from, Square::new(back_rank, 6)));
        }

        if self.has_castling_right(us, false)
            && self.is_empty_square(Square::new(back_rank, 1))
            && self.is_empty_square(Square::new(back_rank, 2))
            && self.is_empty_square(Square::new(back_rank, 3))
            && self.piece_at(Square::new(back_rank, 0)) == Some((us, Piece::Rook))
            && !self.is_square_attacked(from, them)
            && !self.is_square_attacked(Square::new(back_rank, 3), them)
        {
            moves.push(Move::castle_queenside(from, Square::new(back_rank, 2)));
        }
    }
}
