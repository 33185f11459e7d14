use super::super::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use super::super::types::{Bitboard, Color, Move, MoveList, Piece};
use super::super::Board;

impl Board {
    pub(crate) fn generate_slider_moves(&self, us: Color, piece: Piece, moves: &mut MoveList) {
        let own_occ = self.occupied_by(us);
        let occ = self.all_occupied.0;

        for from in self.pieces_of(us, piece).iter() {
            let attacks = match piece {
                Piece::Bishop => bishop_attacks(from.as_index(), occ),
                Piece::Rook => rook_attacks(from.as_index(), occ),
                Piece::Queen => queen_attacks(from.as_index(), occ),
                _ => unreachable!("not a slider"),
            };
            for to in Bitboard(attacks & !own_occ.0).iter() {
                match self.piece_at(to) {
                    Some((_, victim)) => moves.push(Move::capture(from, to, piece, victim)),
                    None => moves.push(Move::quiet(from, to, piece)),
                }
            }
        }
    }
}
