use cozy_chess::{BitBoard, Board as CozyBoard, Color, File, Move, Piece, Rank, Square};
use std::fmt;
use thiserror::Error;

use super::Rules;

#[derive(Debug, Error)]
pub enum PositionError {
    #[error("FEN error: {0}")]
    Fen(String),
    #[error("illegal move: {0}")]
    IllegalMove(String),
}

/// cozy-chess board with a stack of prior states so moves can be undone.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
    stack: Vec<CozyBoard>,
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

impl Position {
    pub fn startpos() -> Self {
        Self::from_board(CozyBoard::default())
    }

    pub fn from_board(board: CozyBoard) -> Self {
        Self { board, stack: Vec::with_capacity(128) }
    }

    /// Accepts full FEN or 4-field EPD (halfmove/fullmove padded as `0 1`).
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let fen = if parts.len() >= 6 {
            parts[0..6].join(" ")
        } else if parts.len() >= 4 {
            let mut v = parts[0..4].to_vec();
            v.push("0"); v.push("1"); v.join(" ")
        } else {
            return Err(PositionError::Fen(format!("not enough fields: {fen:?}")));
        };
        CozyBoard::from_fen(&fen, false)
            .map(Self::from_board)
            .map_err(|e| PositionError::Fen(format!("{e:?}")))
    }

    pub fn board(&self) -> &CozyBoard { &self.board }

    pub fn fen(&self) -> String { format!("{}", self.board) }

    pub fn hash(&self) -> u64 { self.board.hash() }

    /// Number of moves currently applied on top of the root state.
    pub fn ply_depth(&self) -> usize { self.stack.len() }

    /// Finds the legal move matching a UCI string. Standard castling notation
    /// (`e1g1`) is accepted alongside cozy-chess's king-takes-rook form.
    pub fn find_move(&self, uci: &str) -> Option<Move> {
        let mut found = None;
        self.board.generate_moves(|moves| {
            for m in moves {
                if format!("{}", m) == uci || self.to_uci(m) == uci { found = Some(m); break; }
            }
            found.is_some()
        });
        found
    }

    /// UCI text for `mv`, with castling written as the king's two-square step.
    pub fn to_uci(&self, mv: Move) -> String {
        let castles = self.board.piece_on(mv.from) == Some(Piece::King)
            && self.board.colors(self.board.side_to_move()).has(mv.to);
        if castles {
            let file = if (mv.to.file() as u8) > (mv.from.file() as u8) { File::G } else { File::C };
            return format!("{}{}", mv.from, Square::new(file, mv.from.rank()));
        }
        format!("{}", mv)
    }

    pub fn make_move_uci(&mut self, uci: &str) -> Result<Move, PositionError> {
        let mv = self.find_move(uci).ok_or_else(|| PositionError::IllegalMove(uci.to_string()))?;
        self.apply(mv);
        Ok(mv)
    }

    pub fn set_from_start_and_moves<S: AsRef<str>>(moves: &[S]) -> Result<Self, PositionError> {
        let mut pos = Self::startpos();
        for m in moves { pos.make_move_uci(m.as_ref())?; }
        Ok(pos)
    }

    /// Drops the undo history, making the current state the new root.
    pub fn detached(&self) -> Self {
        Self::from_board(self.board.clone())
    }

    pub fn has_legal_moves(&self) -> bool {
        let mut any = false;
        self.board.generate_moves(|_| { any = true; true });
        any
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && !self.has_legal_moves()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.board.halfmove_clock() >= 100
    }

    /// Threefold repetition within the reversible window of the history.
    pub fn is_repetition(&self) -> bool {
        let key = self.board.hash();
        let window = self.board.halfmove_clock() as usize;
        let seen = self.stack.iter().rev().take(window).filter(|b| b.hash() == key).count();
        seen >= 2
    }

    /// No pawns, rooks or queens, and at most one minor piece left.
    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        let minors = b.pieces(Piece::Knight) | b.pieces(Piece::Bishop);
        heavy.is_empty() && minors.len() <= 1
    }

    fn en_passant_target(&self) -> Option<Square> {
        let rank = match self.board.side_to_move() { Color::White => Rank::Sixth, Color::Black => Rank::Third };
        self.board.en_passant().map(|file| Square::new(file, rank))
    }
}

impl Rules for Position {
    fn side_to_move(&self) -> Color { self.board.side_to_move() }

    fn legal_moves(&self, captures_only: bool) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        let enemy = self.board.colors(!self.board.side_to_move());
        let ep = self.en_passant_target();
        self.board.generate_moves(|moves| {
            let is_pawn = moves.piece == Piece::Pawn;
            for m in moves {
                if !captures_only || enemy.has(m.to) || (is_pawn && Some(m.to) == ep) { out.push(m); }
            }
            false
        });
        out
    }

    fn apply(&mut self, mv: Move) {
        self.stack.push(self.board.clone());
        self.board.play(mv);
    }

    fn undo(&mut self, _mv: Move) {
        if let Some(prev) = self.stack.pop() { self.board = prev; }
    }

    fn is_in_check(&self) -> bool { !(self.board.checkers()).is_empty() }

    fn is_in_checkmate(&self) -> bool { self.is_in_check() && !self.has_legal_moves() }

    fn is_draw(&self) -> bool {
        self.is_fifty_move_draw() || self.is_insufficient_material() || self.is_repetition() || self.is_stalemate()
    }

    fn pieces(&self, piece: Piece, color: Color) -> BitBoard {
        self.board.colors(color) & self.board.pieces(piece)
    }

    fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        Some((self.board.color_on(sq)?, self.board.piece_on(sq)?))
    }

    fn is_capture(&self, mv: Move) -> bool {
        if self.board.colors(!self.board.side_to_move()).has(mv.to) { return true; }
        self.board.piece_on(mv.from) == Some(Piece::Pawn) && Some(mv.to) == self.en_passant_target()
    }

    fn has_castle_rights(&self, color: Color) -> bool {
        let rights = self.board.castle_rights(color);
        rights.short.is_some() || rights.long.is_some()
    }

    fn legal_move_count(&self) -> usize {
        let mut ct = 0usize;
        self.board.generate_moves(|moves| { ct += moves.len(); false });
        ct
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_restores_previous_state() {
        let mut pos = Position::startpos();
        let before = (pos.fen(), pos.hash());
        for mv in pos.legal_moves(false) {
            pos.apply(mv);
            assert_ne!(pos.hash(), before.1);
            pos.undo(mv);
            assert_eq!((pos.fen(), pos.hash()), before);
        }
        assert_eq!(pos.ply_depth(), 0);
    }

    #[test]
    fn captures_only_includes_en_passant() {
        // White pawn e5, black just played d7d5.
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let caps = pos.legal_moves(true);
        assert_eq!(caps.len(), 1);
        assert_eq!(format!("{}", caps[0]), "e5d6");
        assert!(pos.is_capture(caps[0]));
    }

    #[test]
    fn castling_is_not_a_capture_and_roundtrips_uci() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(pos.legal_moves(true).iter().all(|m| m.from != Square::E1));
        let oo = pos.find_move("e1g1").expect("short castling is legal");
        assert_eq!(pos.to_uci(oo), "e1g1");
        let ooo = pos.find_move("e1c1").expect("long castling is legal");
        assert_eq!(pos.to_uci(ooo), "e1c1");
    }

    #[test]
    fn detects_checkmate_and_stalemate() {
        let mate = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert!(mate.is_in_checkmate());
        assert!(!mate.is_draw());
        let stale = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!stale.is_in_checkmate());
        assert!(stale.is_draw());
    }

    #[test]
    fn repetition_is_a_draw() {
        let mut pos = Position::startpos();
        for uci in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
            assert!(!pos.is_draw(), "premature draw before {uci}");
            pos.make_move_uci(uci).unwrap();
        }
        assert!(pos.is_repetition());
        assert!(pos.is_draw());
    }

    #[test]
    fn bare_kings_are_insufficient_material() {
        let pos = Position::from_fen("8/8/4k3/8/8/3NK3/8/8 w - - 0 1").unwrap();
        assert!(pos.is_insufficient_material());
        let pos = Position::from_fen("8/8/4k3/8/8/3RK3/8/8 w - - 0 1").unwrap();
        assert!(!pos.is_insufficient_material());
    }

    #[test]
    fn epd_fields_are_padded() {
        let pos = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").unwrap();
        assert_eq!(pos.fen(), Position::startpos().fen());
        assert!(Position::from_fen("garbage").is_err());
    }
}
