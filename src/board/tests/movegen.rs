//! Move-generation behavior beyond raw perft counts.

use crate::board::{Board, Color, Square};

#[test]
fn test_startpos_has_twenty_moves() {
    let mut board = Board::new();
    assert_eq!(board.generate_legal().len(), 20);
    // And every pseudo-legal move is legal here
    assert_eq!(board.generate_pseudo_legal().len(), 20);
}

#[test]
fn test_pinned_piece_filtered() {
    // The e-file knight is pinned to the king by the rook
    let mut board = Board::from_fen("4r1k1/8/8/8/8/4N3/8/4K3 w - - 0 1");
    let legal = board.generate_legal();
    assert!(
        legal.iter().all(|m| m.from() != Square::new(2, 4)),
        "pinned knight moved"
    );
    // But pseudo-legal generation still offers its moves
    let pseudo = board.generate_pseudo_legal();
    assert!(pseudo.iter().any(|m| m.from() == Square::new(2, 4)));
}

#[test]
fn test_castling_blocked_by_attack() {
    // A black rook on f8 covers f1, forbidding kingside castling only
    let mut board = Board::from_fen("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let legal = board.generate_legal();
    assert!(!legal.iter().any(|m| m.is_castle_kingside()));
    assert!(legal.iter().any(|m| m.is_castling()));
}

#[test]
fn test_castling_through_check_forbidden() {
    // Rook on e8 gives check: neither castle is available
    let mut board = Board::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let legal = board.generate_legal();
    assert!(!legal.iter().any(|m| m.is_castling()));
}

#[test]
fn test_is_square_attacked() {
    let board = Board::from_fen("4k3/8/8/8/4r3/8/8/4K3 w - - 0 1");
    // The rook sweeps its file and rank
    assert!(board.is_square_attacked(Square::new(0, 4), Color::Black));
    assert!(board.is_square_attacked(Square::new(3, 0), Color::Black));
    assert!(!board.is_square_attacked(Square::new(0, 0), Color::Black));
    assert!(board.is_in_check(Color::White));
    assert!(!board.is_in_check(Color::Black));
}

#[test]
fn test_stalemate_position_has_no_moves() {
    let mut board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(board.generate_legal().is_empty());
    assert!(!board.is_in_check(Color::Black));
    assert!(board.is_stalemate());
    assert!(!board.is_checkmate());
}

#[test]
fn test_checkmate_detection() {
    let mut board = Board::from_fen("R5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1");
    assert!(board.is_checkmate());
    assert!(board.generate_legal().is_empty());
}

mod gives_check {
    use super::*;

    fn assert_gives_check(fen: &str, uci: &str, expected: bool) {
        let mut board = Board::from_fen(fen);
        let mv = board.parse_move(uci).unwrap();
        assert_eq!(
            board.move_gives_check(mv),
            expected,
            "{uci} in {fen}"
        );
        // Cross-check against actually making the move
        let them = board.side_to_move().opponent();
        let info = board.make_move(mv);
        assert_eq!(board.is_in_check(them), expected);
        board.unmake_move(mv, info);
    }

    #[test]
    fn test_direct_checks() {
        assert_gives_check("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", "a1a8", true);
        assert_gives_check("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", "a1b1", false);
        assert_gives_check("4k3/8/8/8/4N3/8/8/4K3 w - - 0 1", "e4d6", true);
        assert_gives_check("4k3/8/8/8/4N3/8/8/4K3 w - - 0 1", "e4c5", false);
    }

    #[test]
    fn test_discovered_check() {
        // The knight steps off the long diagonal, discovering the bishop
        assert_gives_check("7k/8/8/8/3N4/8/8/B3K3 w - - 0 1", "d4f5", true);
        // A second blocker on the diagonal keeps the king safe
        assert_gives_check("7k/8/5P2/8/3N4/8/8/B3K3 w - - 0 1", "d4f5", false);
    }

    #[test]
    fn test_promotion_check() {
        assert_gives_check("8/4P3/8/8/8/8/1k6/4K3 w - - 0 1", "e7e8q", false);
        // The new queen checks down the e8-a4 diagonal
        assert_gives_check("8/4P3/8/8/k7/8/8/4K3 w - - 0 1", "e7e8q", true);
        assert_gives_check("8/4P3/8/8/k7/8/8/4K3 w - - 0 1", "e7e8n", false);
    }

    #[test]
    fn test_castling_rook_check() {
        // After O-O the rook lands on f1, checking the king on f8
        assert_gives_check("5k2/8/8/8/8/8/8/4K2R w K - 0 1", "e1g1", true);
        assert_gives_check("2k5/8/8/8/8/8/8/4K2R w K - 0 1", "e1g1", false);
    }

    #[test]
    fn test_en_passant_discovered_check() {
        // Capturing en passant clears two pawns off the fifth rank at
        // once, opening the rook's line to the king
        assert_gives_check("8/8/8/RPp4k/8/8/8/4K3 w - c6 0 1", "b5c6", true);
        assert_gives_check("8/8/8/KPp4k/8/8/8/8 w - c6 0 1", "b5c6", false);
    }
}
