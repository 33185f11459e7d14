//! Universal Chess Interface (UCI) protocol front end.
//!
//! A line loop over stdin drives the engine; searches run on a worker
//! thread signalled through an atomic stop flag, so `stop` and `isready`
//! stay responsive mid-search. All protocol output goes to stdout,
//! diagnostics to stderr via the logger.

pub mod command;
pub mod options;
pub mod time;

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;

use crate::board::Board;
use crate::book::{probe_book, BookProvider, NoBook};
use crate::search::{
    search_with_callback, IterationReport, SearchLimits, SearchState, MATE, MATE_BOUND,
};

use command::{parse_uci_command, GoParams, UciCommand};
use options::{OptionAction, UciOptions};

const ENGINE_NAME: &str = concat!("Cobalt ", env!("CARGO_PKG_VERSION"));
const ENGINE_AUTHOR: &str = "the Cobalt developers";

struct UciEngine {
    board: Board,
    state: Arc<Mutex<SearchState>>,
    options: UciOptions,
    book: Box<dyn BookProvider + Send>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl UciEngine {
    fn new() -> Self {
        let options = UciOptions::new();
        UciEngine {
            board: Board::new(),
            state: Arc::new(Mutex::new(SearchState::new(options.hash_mb))),
            options,
            book: Box::new(NoBook),
            stop: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Handle one command; returns false on `quit`.
    fn handle(&mut self, cmd: UciCommand) -> bool {
        match cmd {
            UciCommand::Uci => {
                println!("id name {ENGINE_NAME}");
                println!("id author {ENGINE_AUTHOR}");
                for line in self.options.declarations() {
                    println!("{line}");
                }
                println!("uciok");
            }
            UciCommand::IsReady => println!("readyok"),
            UciCommand::UciNewGame => {
                self.stop_worker();
                self.state.lock().new_game();
                self.board = Board::new();
            }
            UciCommand::Position { fen, moves } => {
                self.stop_worker();
                self.apply_position(fen.as_deref(), &moves);
            }
            UciCommand::SetOption { name, value } => {
                self.stop_worker();
                if let Some(OptionAction::ResizeHash(mb)) =
                    self.options.apply(&name, value.as_deref())
                {
                    self.state.lock().resize_tt(mb);
                }
            }
            UciCommand::Go(params) => {
                self.stop_worker();
                self.go(&params);
            }
            UciCommand::Stop => self.stop_worker(),
            UciCommand::Display => println!("{}", self.board),
            UciCommand::Quit => {
                self.stop_worker();
                return false;
            }
        }
        true
    }

    /// Set the root position. An invalid FEN keeps the previous position;
    /// an invalid move stops the move list there, keeping earlier moves.
    fn apply_position(&mut self, fen: Option<&str>, moves: &[String]) {
        let mut board = match fen {
            Some(fen) => match Board::try_from_fen(fen) {
                Ok(board) => board,
                Err(e) => {
                    log::warn!("rejected FEN '{fen}': {e}");
                    return;
                }
            },
            None => Board::new(),
        };

        for mv in moves {
            if let Err(e) = board.make_move_uci(mv) {
                log::warn!("rejected move '{mv}': {e}");
                break;
            }
        }

        self.board = board;
    }

    fn go(&mut self, params: &GoParams) {
        // Opening book first, while the game is young
        if self.options.own_book {
            if let Some(mv) = probe_book(&*self.book, &mut self.board, self.options.book_depth) {
                println!("bestmove {mv}");
                return;
            }
        }

        self.stop.store(false, Ordering::Relaxed);
        let limits = SearchLimits {
            max_depth: params.depth,
            max_time: time::allocate_time(
                params,
                self.board.side_to_move(),
                self.options.move_overhead_ms,
            ),
            stop: Arc::clone(&self.stop),
        };

        let mut board = self.board.clone();
        let state = Arc::clone(&self.state);

        self.worker = Some(std::thread::spawn(move || {
            let mut state = state.lock();
            let result = search_with_callback(&mut board, &mut state, &limits, &mut print_info);
            match result.best_move {
                Some(mv) => println!("bestmove {mv}"),
                None => println!("bestmove 0000"),
            }
        }));
    }

    /// Signal the running search (if any) to stop and wait for its
    /// `bestmove`.
    fn stop_worker(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// One `info` line per completed iteration.
fn print_info(report: &IterationReport) {
    let score = if report.score.abs() >= MATE_BOUND {
        let plies = MATE - report.score.abs();
        let mate_in = (plies + 1) / 2;
        if report.score > 0 {
            format!("mate {mate_in}")
        } else {
            format!("mate -{mate_in}")
        }
    } else {
        format!("cp {}", report.score)
    };

    let nps = if report.time_ms > 0 {
        report.nodes * 1000 / report.time_ms
    } else {
        0
    };

    let pv = report
        .pv
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    println!(
        "info depth {} seldepth {} score {} nodes {} nps {} time {} hashfull {} pv {}",
        report.depth,
        report.seldepth,
        score,
        report.nodes,
        nps,
        report.time_ms,
        report.hashfull,
        pv
    );
}

/// Run the UCI loop until `quit` or end of input.
pub fn run_uci_loop() {
    let stdin = std::io::stdin();
    let mut engine = UciEngine::new();

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let Some(cmd) = parse_uci_command(&line) else {
            if !line.trim().is_empty() {
                log::warn!("ignoring unknown command '{}'", line.trim());
            }
            continue;
        };
        if !engine.handle(cmd) {
            break;
        }
    }

    engine.stop_worker();
}
