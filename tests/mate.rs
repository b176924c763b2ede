use stupidfish::board::{Position, Rules};
use stupidfish::search::{Searcher, MATE_SCORE};

#[test]
fn mate_in_one_found_at_depth_one() {
    use stupidfish::search::ordering::order_moves;
    // Ra1-a8 mates; the pawns box the king in.
    let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("valid fen");
    let mut ordered = pos.legal_moves(false);
    order_moves(&pos, &mut ordered);
    let mate_idx = ordered.iter().position(|&m| pos.to_uci(m) == "a1a8").expect("a1a8 is legal");
    assert!(mate_idx + 1 < ordered.len(), "mate must not be the last root move for this check");

    let mut s = Searcher::default();
    let res = s.search(&mut pos, None).expect("has moves");
    assert_eq!(pos.to_uci(res.best_move), "a1a8");
    assert!(res.mate_found);
    assert_eq!(res.depth, 1, "mate should stop deepening");
    assert_eq!(res.score, MATE_SCORE);
    // No captures exist for either side, so each searched root move is one node
    // and nothing after the mating move is tried.
    assert_eq!(res.nodes, mate_idx as u64 + 1, "root moves after the mate were searched");
}

#[test]
fn mate_in_one_for_black() {
    // Fool's mate: Qd8-h4.
    let mut pos = Position::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2").expect("valid fen");
    let res = Searcher::default().search(&mut pos, None).expect("has moves");
    assert_eq!(pos.to_uci(res.best_move), "d8h4");
    assert!(res.mate_found);
    assert_eq!(res.depth, 1);
}

#[test]
fn mated_side_has_no_move() {
    use stupidfish::search::SearchError;
    let mut pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("valid fen");
    assert_eq!(Searcher::default().search(&mut pos, None).unwrap_err(), SearchError::NoLegalMove);
}
