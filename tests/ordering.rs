use stupidfish::board::Position;
use stupidfish::search::{SearchConfig, Searcher};

const FEN: &str = "4k3/8/8/8/5Q2/8/8/2b4K b - - 0 1";

#[test]
fn ordering_does_not_change_the_score() {
    let base = SearchConfig::fixed_depth(3);
    let mut pos = Position::from_fen(FEN).expect("valid fen");
    let ordered = Searcher::new(base).search_depth(&mut pos, 3).unwrap();
    let unordered = Searcher::new(SearchConfig { order_moves: false, ..base }).search_depth(&mut pos, 3).unwrap();
    assert_eq!(ordered.score, unordered.score);
}

#[test]
fn alphabeta_matches_minimax_and_visits_fewer_nodes() {
    for fen in [FEN, "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3"] {
        for order_moves in [true, false] {
            let pruned_cfg = SearchConfig { order_moves, ..SearchConfig::fixed_depth(3) };
            let minimax_cfg = SearchConfig { use_pruning: false, ..pruned_cfg };
            let mut pos = Position::from_fen(fen).expect("valid fen");
            let pruned = Searcher::new(pruned_cfg).search_depth(&mut pos, 3).unwrap();
            let minimax = Searcher::new(minimax_cfg).search_depth(&mut pos, 3).unwrap();
            assert_eq!(pruned.score, minimax.score, "{fen} order={order_moves}");
            assert!(pruned.nodes <= minimax.nodes, "{fen}: pruned {} > minimax {}", pruned.nodes, minimax.nodes);
        }
    }
}
