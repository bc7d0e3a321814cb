use chesscore::search::eval::evaluate_board;
use chesscore::search::{SearchConfig, Searcher};
use chesscore::{Color, Game};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_search(c: &mut Criterion) {
    let game = Game::default();
    c.bench_function("eval_startpos", |ben| {
        ben.iter(|| {
            let v = evaluate_board(black_box(game.board()), Color::White, Color::Black, &[], game.state()).unwrap();
            black_box(v)
        })
    });
    c.bench_function("search_depth_1_startpos", |ben| {
        ben.iter(|| {
            let config = SearchConfig { depth: 1, movetime: None, seed: Some(1), use_book: false };
            let mut s = Searcher::new(config).with_book(None);
            let mv = s.choose_move(black_box(&game)).unwrap();
            black_box((mv, s.nodes()))
        })
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
