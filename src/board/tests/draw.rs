//! Draw detection: repetition, the fifty-move rule, insufficient material.

use crate::board::Board;

#[test]
fn test_threefold_repetition_by_knight_shuffle() {
    let mut board = Board::new();
    assert!(!board.is_draw());

    // Both knights out and back, twice: the starting position occurs a
    // third time after the eighth move
    for mv in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
        board.make_move_uci(mv).unwrap();
    }
    assert!(board.is_draw());
}

#[test]
fn test_twofold_is_not_a_game_draw() {
    let mut board = Board::new();
    for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
        board.make_move_uci(mv).unwrap();
    }
    // Back to the start for the second time: repetition in-search, but
    // not yet a claimable game draw
    assert!(board.is_repetition());
    assert!(!board.is_draw());
}

#[test]
fn test_pawn_move_cuts_repetition_window() {
    let mut board = Board::new();
    for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
        board.make_move_uci(mv).unwrap();
    }
    // An irreversible move makes earlier repetitions unreachable
    board.make_move_uci("e2e4").unwrap();
    assert!(!board.is_repetition());
    assert!(!board.is_draw());
}

#[test]
fn test_fifty_move_rule() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80");
    assert!(board.is_draw());

    let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80");
    assert!(!board.is_draw());
}

#[test]
fn test_insufficient_material_cases() {
    // Bare kings, king+knight, king+bishop
    assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").is_insufficient_material());
    assert!(Board::from_fen("4k3/8/8/8/8/8/8/3NK3 w - - 0 1").is_insufficient_material());
    assert!(Board::from_fen("3bk3/8/8/8/8/8/8/4K3 w - - 0 1").is_insufficient_material());

    // Two minors, a pawn, or a heavy piece can still mate
    assert!(!Board::from_fen("3bk3/8/8/8/8/8/8/3NK3 w - - 0 1").is_insufficient_material());
    assert!(!Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").is_insufficient_material());
    assert!(!Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").is_insufficient_material());
    assert!(!Board::from_fen("3qk3/8/8/8/8/8/8/4K3 w - - 0 1").is_insufficient_material());
}
