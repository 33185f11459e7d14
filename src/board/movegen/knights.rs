use super::super::attack_tables::KNIGHT_ATTACKS;
use super::super::types::{Bitboard, Color, Move, MoveList, Piece};
use super::super::Board;

impl Board {
    pub(crate) fn generate_knight_moves(&self, us: Color, moves: &mut MoveList) {
        let own_occ = self.occupied_by(us);
        for from in self.pieces_of(us, Piece::Knight).iter() {
            let targets = Bitboard(KNIGHT_ATTACKS[from.as_index()] & !own_occ.0);
            for to in targets.iter() {
                match self.piece_at(to) {
                    Some((_, victim)) => moves.push(Move::capture(from, to, Piece::Knight, victim)),
                    None => moves.push(Move::quiet(from, to, Piece::Knight)),
                }
            }
        }
    }
}
