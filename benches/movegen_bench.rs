use chesscore::perft::perft;
use chesscore::rules::{compute_all_moves, GenOptions};
use chesscore::{Board, Color};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_movegen(c: &mut Criterion) {
    let b = Board::standard();
    c.bench_function("legal_moves_startpos", |ben| {
        ben.iter(|| {
            let moves = compute_all_moves(black_box(&b), Color::White, &[], GenOptions::LEGAL).unwrap();
            black_box(moves.len())
        })
    });
    c.bench_function("perft_3_startpos", |ben| {
        ben.iter(|| {
            let mut board = b.copy();
            black_box(perft(&mut board, Color::White, &mut Vec::new(), 3).unwrap())
        })
    });
}

criterion_group!(benches, bench_movegen);
criterion_main!(benches);
