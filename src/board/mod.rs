//! Rules provider surface used by the search and the arena.
//!
//! The engine never inspects board internals directly; it goes through the
//! [`Rules`] trait so that any move generator with make/undo can drive it.

pub mod cozy;

pub use cozy::{Position, PositionError};
pub use cozy_chess::{BitBoard, Color, Move, Piece, Square};

/// Board state with legal move generation and stack-disciplined make/undo.
///
/// `undo` must restore the exact state that preceded the matching `apply`;
/// callers pair them strictly (last applied, first undone).
pub trait Rules {
    fn side_to_move(&self) -> Color;

    /// All legal moves, or only the capturing ones (en passant included).
    fn legal_moves(&self, captures_only: bool) -> Vec<Move>;

    fn apply(&mut self, mv: Move);
    fn undo(&mut self, mv: Move);

    fn is_in_check(&self) -> bool;
    fn is_in_checkmate(&self) -> bool;
    fn is_draw(&self) -> bool;

    /// Bitboard of `piece`s belonging to `color`.
    fn pieces(&self, piece: Piece, color: Color) -> BitBoard;

    fn piece_count(&self, piece: Piece, color: Color) -> u32 {
        self.pieces(piece, color).len()
    }

    fn piece_at(&self, sq: Square) -> Option<(Color, Piece)>;

    /// True if `mv` removes an enemy piece (en passant included).
    fn is_capture(&self, mv: Move) -> bool;

    fn has_castle_rights(&self, color: Color) -> bool;

    fn legal_move_count(&self) -> usize {
        self.legal_moves(false).len()
    }
}
