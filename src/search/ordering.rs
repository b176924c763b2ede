use cozy_chess::{Move, Piece};
use std::cmp::Reverse;

use crate::board::Rules;
use crate::search::eval::{piece_value, Score};

/// MVV-LVA key `value(victim) * 10 - value(attacker)`; `None` for quiet moves.
pub fn mvv_lva<R: Rules>(pos: &R, mv: Move) -> Option<Score> {
    if !pos.is_capture(mv) { return None; }
    // En passant leaves the target square empty.
    let victim = pos.piece_at(mv.to).map_or(Piece::Pawn, |(_, p)| p);
    let (_, attacker) = pos.piece_at(mv.from)?;
    Some(piece_value(victim) * 10 - piece_value(attacker))
}

/// Captures first, best MVV-LVA first; quiet moves keep their generation order.
pub fn order_moves<R: Rules>(pos: &R, moves: &mut [Move]) {
    moves.sort_by_key(|&m| Reverse(mvv_lva(pos, m)));
}

/// Moves `first` to the front if present.
pub fn promote(moves: &mut Vec<Move>, first: Move) {
    if let Some(idx) = moves.iter().position(|&m| m == first) {
        let mv = moves.remove(idx);
        moves.insert(0, mv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    #[test]
    fn queen_capture_by_pawn_comes_first() {
        // White can take the queen on d5 with the e4 pawn or the c3 knight, or take a pawn on a7.
        let pos = Position::from_fen("4k3/p7/8/3q4/4P3/2N5/8/R3K3 w - - 0 1").unwrap();
        let mut moves = pos.legal_moves(false);
        order_moves(&pos, &mut moves);
        assert_eq!(format!("{}", moves[0]), "e4d5");
        assert_eq!(format!("{}", moves[1]), "c3d5");
        assert_eq!(format!("{}", moves[2]), "a1a7");
        assert!(moves[3..].iter().all(|&m| mvv_lva(&pos, m).is_none()));
    }

    #[test]
    fn king_captures_still_rank_before_quiet_moves() {
        // Kxd2 scores negative but is still a capture.
        let pos = Position::from_fen("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1").unwrap();
        let mut moves = pos.legal_moves(false);
        order_moves(&pos, &mut moves);
        assert_eq!(format!("{}", moves[0]), "e1d2");
        assert_eq!(mvv_lva(&pos, moves[0]), Some(100 * 10 - 10_000));
    }

    #[test]
    fn promote_moves_to_front() {
        let pos = Position::startpos();
        let mut moves = pos.legal_moves(false);
        let last = *moves.last().unwrap();
        promote(&mut moves, last);
        assert_eq!(moves[0], last);
        assert_eq!(moves.len(), 20);
    }
}
