use crate::board::Rules;

/// Leaf count to `depth` using apply/undo on a single position.
pub fn perft<R: Rules>(pos: &mut R, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let moves = pos.legal_moves(false);
    if depth == 1 { return moves.len() as u64; }
    let mut nodes = 0u64;
    for mv in moves {
        pos.apply(mv);
        nodes += perft(pos, depth - 1);
        pos.undo(mv);
    }
    nodes
}

/// Per-root-move counts, in generation order.
pub fn divide<R: Rules>(pos: &mut R, depth: u32) -> Vec<(cozy_chess::Move, u64)> {
    let mut out = Vec::new();
    for mv in pos.legal_moves(false) {
        pos.apply(mv);
        out.push((mv, perft(pos, depth.saturating_sub(1))));
        pos.undo(mv);
    }
    out
}
