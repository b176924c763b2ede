use cozy_chess::{Color, Piece, Rank};
use serde::{Deserialize, Serialize};

use crate::board::Rules;

/// Search score. Wide enough that negating or offsetting the sentinels never overflows.
pub type Score = i64;

/// Forced win for the perspective side; its negation is a forced loss.
pub const MATE_SCORE: Score = i32::MAX as Score;
/// Strictly beyond any reachable score, used as the open window bound.
pub const INFINITY: Score = MATE_SCORE + 1;

const MATERIAL: [Piece; 5] = [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

pub fn piece_value(piece: Piece) -> Score {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight => 300,
        Piece::Bishop => 300,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 10_000,
    }
}

/// Weights for the secondary terms. Material values are fixed by [`piece_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalParams {
    /// Legal move count of the side to move is divided by this.
    pub mobility_divisor: Score,
    /// Per rank of advancement, for each of the perspective side's pawns (halved).
    pub pawn_advance: Score,
    /// Bonus while the perspective side can still castle.
    pub castle_bonus: Score,
    pub check_bonus: Score,
    /// Draws score `-draw_penalty` unless the perspective side is already behind.
    pub draw_penalty: Score,
}

impl Default for EvalParams {
    fn default() -> Self {
        Self { mobility_divisor: 2, pawn_advance: 5, castle_bonus: 20, check_bonus: 50, draw_penalty: 110 }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    params: EvalParams,
}

impl Evaluator {
    pub fn new(params: EvalParams) -> Self { Self { params } }

    pub fn params(&self) -> &EvalParams { &self.params }

    /// Material difference (kings excluded), positive when `perspective` is ahead.
    pub fn material<R: Rules>(&self, perspective: Color, pos: &R) -> Score {
        MATERIAL.iter().map(|&p| {
            let diff = pos.piece_count(p, perspective) as Score - pos.piece_count(p, !perspective) as Score;
            diff * piece_value(p)
        }).sum()
    }

    /// Static score of `pos` for `perspective`; higher is better for that side.
    pub fn evaluate<R: Rules>(&self, perspective: Color, pos: &R) -> Score {
        let is_player_turn = pos.side_to_move() == perspective;
        let mobility = pos.legal_move_count() as Score;
        if mobility == 0 && pos.is_in_check() {
            return if is_player_turn { -MATE_SCORE } else { MATE_SCORE };
        }

        let material = self.material(perspective, pos);
        if pos.is_draw() {
            return if material >= 0 { -self.params.draw_penalty } else { 0 };
        }

        let p = &self.params;
        let mut score = material;
        let mobility = mobility / p.mobility_divisor.max(1);
        score += if is_player_turn { mobility } else { -mobility };

        let pawns = pos.pieces(Piece::Pawn, perspective);
        let advance: Score = pawns.into_iter().map(|sq| relative_rank(sq.rank(), perspective) * p.pawn_advance).sum();
        score += advance / 2;

        if pos.has_castle_rights(perspective) { score += p.castle_bonus; }
        if pos.is_in_check() {
            score += if is_player_turn { -p.check_bonus } else { p.check_bonus };
        }
        score
    }
}

fn relative_rank(rank: Rank, color: Color) -> Score {
    match color {
        Color::White => rank as Score,
        Color::Black => 7 - rank as Score,
    }
}
