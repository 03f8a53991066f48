//! Pseudo-legal move generation per piece kind, filtered to legal moves by
//! the make/unmake-and-check-for-check approach.

mod kings;
mod knights;
mod pawns;
mod sliders;

use self::sliders::SliderType;
use super::{Board, Move, MoveList, Piece, Square};

impl Board {
    fn generate_pseudo_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let color = self.current_color();
        let c_idx = color.index();

        for from in self.pieces[c_idx][Piece::Pawn.index()].iter() {
            for m in &self.generate_pawn_moves(from) {
                moves.push(*m);
            }
        }
        for from in self.pieces[c_idx][Piece::Knight.index()].iter() {
            for m in &self.generate_knight_moves(from) {
                moves.push(*m);
            }
        }
        for from in self.pieces[c_idx][Piece::Bishop.index()].iter() {
            for m in &self.generate_slider_moves(from, SliderType::Bishop) {
                moves.push(*m);
            }
        }
        for from in self.pieces[c_idx][Piece::Rook.index()].iter() {
            for m in &self.generate_slider_moves(from, SliderType::Rook) {
                moves.push(*m);
            }
        }
        for from in self.pieces[c_idx][Piece::Queen.index()].iter() {
            for m in &self.generate_slider_moves(from, SliderType::Queen) {
                moves.push(*m);
            }
        }
        for from in self.pieces[c_idx][Piece::King.index()].iter() {
            for m in &self.generate_king_moves(from) {
                moves.push(*m);
            }
        }
        moves
    }

    fn generate_piece_moves(&self, from: Square, piece: Piece) -> MoveList {
        match piece {
            Piece::Pawn => self.generate_pawn_moves(from),
            Piece::Knight => self.generate_knight_moves(from),
            Piece::Bishop => self.generate_slider_moves(from, SliderType::Bishop),
            Piece::Rook => self.generate_slider_moves(from, SliderType::Rook),
            Piece::Queen => self.generate_slider_moves(from, SliderType::Queen),
            Piece::King => self.generate_king_moves(from),
        }
    }

    /// Generate all legal moves for the side to move.
    #[must_use]
    pub fn generate_moves(&mut self) -> MoveList {
        let current_color = self.current_color();
        let opponent_color = current_color.opponent();
        let pseudo_moves = self.generate_pseudo_moves();
        let mut legal_moves = MoveList::new();

        for m in &pseudo_moves {
            if m.is_castling() {
                let king_start_sq = m.from();
                let king_mid_sq = Square::new(
                    m.from().rank(),
                    usize::midpoint(m.from().file(), m.to().file()),
                );
                let king_end_sq = m.to();

                if self.is_square_attacked(king_start_sq, opponent_color)
                    || self.is_square_attacked(king_mid_sq, opponent_color)
                    || self.is_square_attacked(king_end_sq, opponent_color)
                {
                    continue;
                }
            }

            let info = self.make_move(*m);
            if !self.is_in_check(current_color) {
                legal_moves.push(*m);
            }
            self.unmake_move(*m, info);
        }
        legal_moves
    }

    #[must_use]
    pub fn is_checkmate(&mut self) -> bool {
        let color = self.current_color();
        self.is_in_check(color) && self.generate_moves().is_empty()
    }

    #[must_use]
    pub fn is_stalemate(&mut self) -> bool {
        let color = self.current_color();
        !self.is_in_check(color) && self.generate_moves().is_empty()
    }

    /// Check whether `mv` is a legal move in the current position.
    /// Used to validate TT moves pulled during PV extraction, which may be
    /// stale or the product of a hash collision.
    #[must_use]
    pub fn is_legal_move(&mut self, mv: Move) -> bool {
        self.generate_moves().iter().any(|m| *m == mv)
    }

    /// Generate legal captures and promotions only (used by quiescence search).
    pub(crate) fn generate_tactical_moves(&mut self) -> MoveList {
        let current_color = self.current_color();
        let mut pseudo_tactical_moves = MoveList::new();
        let c_idx = current_color.index();

        for from in self.pieces[c_idx][Piece::Pawn.index()].iter() {
            self.generate_pawn_tactical_moves(from, &mut pseudo_tactical_moves);
        }

        for piece in [
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
            Piece::King,
        ] {
            for from in self.pieces[c_idx][piece.index()].iter() {
                let piece_moves = self.generate_piece_moves(from, piece);
                for m in &piece_moves {
                    if m.is_tactical() {
                        pseudo_tactical_moves.push(*m);
                    }
                }
            }
        }

        let mut legal_tactical_moves = MoveList::new();
        for m in &pseudo_tactical_moves {
            let info = self.make_move(*m);
            if !self.is_in_check(current_color) {
                legal_tactical_moves.push(*m);
            }
            self.unmake_move(*m, info);
        }

        legal_tactical_moves
    }

    /// Count leaf nodes at `depth` plies (move generation performance test).
    #[must_use]
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for m in &moves {
            let info = self.make_move(*m);
            nodes += self.perft(depth - 1);
            self.unmake_move(*m, info);
        }

        nodes
    }
}
