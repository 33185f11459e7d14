//! Criterion benchmarks: perft, move generation, evaluation, search.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cobalt::board::Board;
use cobalt::search::{find_best_move, SearchLimits, SearchState};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let mut startpos = Board::new();
    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| startpos.perft(black_box(depth)))
        });
    }

    let mut kiwipete = Board::from_fen(KIWIPETE);
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = Board::new();
    group.bench_function("pseudo_legal_startpos", |b| {
        b.iter(|| black_box(startpos.generate_pseudo_legal()))
    });

    let kiwipete = Board::from_fen(KIWIPETE);
    group.bench_function("pseudo_legal_kiwipete", |b| {
        b.iter(|| black_box(kiwipete.generate_pseudo_legal()))
    });

    let mut legal = Board::from_fen(KIWIPETE);
    group.bench_function("legal_kiwipete", |b| {
        b.iter(|| black_box(legal.generate_legal()))
    });

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let kiwipete = Board::from_fen(KIWIPETE);
    c.bench_function("evaluate_kiwipete", |b| {
        b.iter(|| black_box(kiwipete.evaluate()))
    });
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for depth in [4, 6] {
        group.bench_with_input(
            BenchmarkId::new("kiwipete_depth", depth),
            &depth,
            |b, &depth| {
                b.iter(|| {
                    let mut board = Board::from_fen(KIWIPETE);
                    let mut state = SearchState::new(16);
                    let limits = SearchLimits::depth(depth);
                    black_box(find_best_move(&mut board, &mut state, &limits))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_evaluate, bench_search);
criterion_main!(benches);
