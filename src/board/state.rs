use super::types::{
    Bitboard, Color, Move, Piece, Square, ALL_CASTLING_RIGHTS, CASTLE_BLACK_K, CASTLE_BLACK_Q,
    CASTLE_WHITE_K, CASTLE_WHITE_Q,
};

/// Undo record returned by `make_move`, consumed by `unmake_move`.
///
/// The captured piece itself travels inside the [`Move`] encoding; this
/// record carries the state that cannot be recomputed.
#[derive(Clone, Copy, Debug)]
pub struct UnmakeInfo {
    pub(crate) previous_en_passant_target: Option<Square>,
    pub(crate) previous_castling_rights: u8,
    pub(crate) previous_halfmove_clock: u32,
    pub(crate) previous_hash: u64,
}

/// Undo record for a null move.
#[derive(Clone, Copy, Debug)]
pub struct NullUnmakeInfo {
    pub(crate) previous_en_passant_target: Option<Square>,
    pub(crate) previous_hash: u64,
}

/// Upper bound on game length plus search depth, in plies.
const MAX_GAME_PLIES: usize = 1024;

/// Stack of Zobrist keys for every position reached since the game root,
/// including the current one. Allocated once; never grows on the hot path.
///
/// Draw detection only scans back `halfmove_clock` entries, which restricts
/// the scan to positions reachable since the last irreversible move.
#[derive(Clone, Debug)]
pub(crate) struct RepetitionStack {
    keys: Vec<u64>,
}

impl RepetitionStack {
    pub(crate) fn new(root_hash: u64) -> Self {
        let mut keys = Vec::with_capacity(MAX_GAME_PLIES);
        keys.push(root_hash);
        RepetitionStack { keys }
    }

    pub(crate) fn reset(&mut self, root_hash: u64) {
        self.keys.clear();
        self.keys.push(root_hash);
    }

    #[inline]
    pub(crate) fn push(&mut self, hash: u64) {
        self.keys.push(hash);
    }

    #[inline]
    pub(crate) fn pop(&mut self) {
        self.keys.pop();
    }

    /// True if `hash` occurred at least once before the current position,
    /// looking back at most `window` plies (same side to move, so stepping 2).
    pub(crate) fn twofold(&self, hash: u64, window: u32) -> bool {
        let len = self.keys.len();
        let mut d = 2usize;
        while d <= window as usize && d < len {
            if self.keys[len - 1 - d] == hash {
                return true;
            }
            d += 2;
        }
        false
    }

    /// Number of times `hash` has occurred within the last `window` plies,
    /// counting the current position.
    pub(crate) fn count(&self, hash: u64, window: u32) -> u32 {
        let len = self.keys.len();
        let span = (window as usize + 1).min(len);
        self.keys[len - span..]
            .iter()
            .filter(|&&k| k == hash)
            .count() as u32
    }
}

/// A chess position: piece bitboards, a redundant mailbox, and game state.
///
/// Mutated only through `make_move`/`unmake_move` (and the null-move pair);
/// every public accessor is O(1).
#[derive(Clone, Debug)]
pub struct Board {
    /// pieces[color][piece_kind]
    pub(crate) pieces: [[Bitboard; 6]; 2],
    /// Per-side occupancy aggregates
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    /// square -> piece lookup, kept in sync with the bitboards
    pub(crate) mailbox: [Option<(Color, Piece)>; 64],
    pub(crate) white_to_move: bool,
    pub(crate) castling_rights: u8,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
    pub(crate) repetitions: RepetitionStack,
}

impl Board {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            board.set_piece(Square::new(0, file), Color::White, *piece);
            board.set_piece(Square::new(1, file), Color::White, Piece::Pawn);
            board.set_piece(Square::new(6, file), Color::Black, Piece::Pawn);
            board.set_piece(Square::new(7, file), Color::Black, *piece);
        }

        board.castling_rights = ALL_CASTLING_RIGHTS;
        board.hash = board.calculate_hash();
        board.repetitions.reset(board.hash);
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            mailbox: [None; 64],
            white_to_move: true,
            castling_rights: 0,
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            repetitions: RepetitionStack::new(0),
        }
    }

    /// Current 64-bit Zobrist key.
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Side to move.
    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    /// Castling-rights bitmask over {WK, WQ, BK, BQ}.
    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> u8 {
        self.castling_rights
    }

    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    /// Plies since the last pawn move or capture.
    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Number of plies played since the game root.
    #[must_use]
    pub fn game_ply(&self) -> u32 {
        (self.fullmove_number.saturating_sub(1)) * 2 + u32::from(!self.white_to_move)
    }

    /// What is on `sq`? O(1) via the mailbox.
    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.mailbox[sq.as_index()]
    }

    #[inline]
    pub(crate) fn is_empty_square(&self, sq: Square) -> bool {
        self.mailbox[sq.as_index()].is_none()
    }

    #[inline]
    pub(crate) fn pieces_of(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    pub(crate) fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    /// The king's square for `color`. Exactly one king per side is a
    /// position invariant, so the bitboard is never empty.
    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        debug_assert!(!self.pieces_of(color, Piece::King).is_empty());
        self.pieces_of(color, Piece::King).lsb()
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = 1u64 << sq.as_index();
        self.pieces[color.index()][piece.index()].0 |= bit;
        self.occupied[color.index()].0 |= bit;
        self.all_occupied.0 |= bit;
        self.mailbox[sq.as_index()] = Some((color, piece));
    }

    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = 1u64 << sq.as_index();
        self.pieces[color.index()][piece.index()].0 &= !bit;
        self.occupied[color.index()].0 &= !bit;
        self.all_occupied.0 &= !bit;
        self.mailbox[sq.as_index()] = None;
    }

    /// The game is drawn at the current position: fifty-move rule or
    /// threefold repetition.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        if self.halfmove_clock >= 100 {
            return true;
        }
        self.repetitions.count(self.hash, self.halfmove_clock) >= 3
    }

    /// Twofold repetition since the last irreversible move, used by the
    /// search to score in-tree repetitions as draws.
    #[inline]
    pub(crate) fn is_repetition(&self) -> bool {
        self.repetitions.twofold(self.hash, self.halfmove_clock)
    }

    /// Neither side can possibly mate: no pawns, rooks or queens anywhere,
    /// and at most one minor piece on the board in total.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        let heavy = self.pieces_of(Color::White, Piece::Pawn).0
            | self.pieces_of(Color::Black, Piece::Pawn).0
            | self.pieces_of(Color::White, Piece::Rook).0
            | self.pieces_of(Color::Black, Piece::Rook).0
            | self.pieces_of(Color::White, Piece::Queen).0
            | self.pieces_of(Color::Black, Piece::Queen).0;
        if heavy != 0 {
            return false;
        }

        let minors = self.pieces_of(Color::White, Piece::Knight).popcount()
            + self.pieces_of(Color::Black, Piece::Knight).popcount()
            + self.pieces_of(Color::White, Piece::Bishop).popcount()
            + self.pieces_of(Color::Black, Piece::Bishop).popcount();
        minors <= 1
    }

    /// Verify the redundant structures agree. Too slow for the per-move
    /// hot path; tests call it at checkpoints instead.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for idx in 0..64 {
            let sq = Square::from_index(idx);
            let mut from_bitboards = None;
            for color in [Color::White, Color::Black] {
                for piece in super::types::ALL_PIECES {
                    if self.pieces_of(color, piece).contains(sq) {
                        debug_assert!(
                            from_bitboards.is_none(),
                            "square {sq} set in two piece bitboards"
                        );
                        from_bitboards = Some((color, piece));
                    }
                }
            }
            debug_assert_eq!(
                from_bitboards, self.mailbox[idx],
                "mailbox and bitboards disagree on {sq}"
            );
        }
        debug_assert_eq!(
            self.occupied[0].0 | self.occupied[1].0,
            self.all_occupied.0
        );
        debug_assert_eq!(self.occupied[0].0 & self.occupied[1].0, 0);
        debug_assert_eq!(self.hash, self.calculate_hash(), "incremental hash drifted");
    }

    pub(crate) fn has_castling_right(&self, color: Color, kingside: bool) -> bool {
        let bit = match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_K,
            (Color::White, false) => CASTLE_WHITE_Q,
            (Color::Black, true) => CASTLE_BLACK_K,
            (Color::Black, false) => CASTLE_BLACK_Q,
        };
        self.castling_rights & bit != 0
    }

    /// Is `mv` legal in the current position? Used to validate externally
    /// supplied moves (TT hints, book moves, UCI move lists).
    #[must_use]
    pub fn is_legal_move(&mut self, mv: Move) -> bool {
        self.generate_legal().contains(mv)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl std::fmt::Display for Board {
    /// ASCII diagram from White's point of view, with the FEN below.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                match self.piece_at(Square::new(rank, file)) {
                    Some((color, piece)) => write!(f, " {}", piece.to_fen_char(color))?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "fen: {}", self.to_fen())
    }
}
