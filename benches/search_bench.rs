use criterion::{criterion_group, criterion_main, Criterion, black_box};
use stupidfish::board::Position;
use stupidfish::search::{SearchConfig, Searcher};

fn bench_search(c: &mut Criterion) {
    c.bench_function("search_depth_3_startpos", |ben| {
        ben.iter(|| {
            let mut pos = Position::startpos();
            let mut s = Searcher::new(SearchConfig::default());
            let r = s.search_depth(black_box(&mut pos), 3);
            black_box(r.map(|r| r.nodes).unwrap_or(0))
        })
    });
    c.bench_function("minimax_depth_3_startpos", |ben| {
        ben.iter(|| {
            let mut pos = Position::startpos();
            let mut s = Searcher::new(SearchConfig { use_pruning: false, ..SearchConfig::fixed_depth(3) });
            let r = s.search_depth(black_box(&mut pos), 3);
            black_box(r.map(|r| r.nodes).unwrap_or(0))
        })
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
