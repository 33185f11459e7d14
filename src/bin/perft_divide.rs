//! Perft divide: per-move leaf counts for debugging the move generator.
//!
//! Usage: perft_divide <depth> [fen]
//!
//! Prints each root move with its subtree leaf count, then the total,
//! in the format used to diff against a known-good engine.

use std::env;
use std::process::ExitCode;

use cobalt::board::{Board, START_FEN};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let Some(depth) = args.get(1).and_then(|s| s.parse::<usize>().ok()) else {
        eprintln!("usage: perft_divide <depth> [fen]");
        return ExitCode::FAILURE;
    };

    let fen = if args.len() > 2 {
        args[2..].join(" ")
    } else {
        START_FEN.to_string()
    };

    let mut board = match Board::try_from_fen(&fen) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("invalid FEN '{fen}': {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut total = 0u64;
    for m in &board.generate_legal() {
        let info = board.make_move(*m);
        let nodes = if depth > 1 { board.perft(depth - 1) } else { 1 };
        board.unmake_move(*m, info);
        println!("{m}: {nodes}");
        total += nodes;
    }
    println!();
    println!("Nodes searched: {total}");

    ExitCode::SUCCESS
}
