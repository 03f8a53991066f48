//! Material-signature endgame recognizers.
//!
//! Looked up by a direct-mapped table keyed on piece counts per side rather
//! than a hash, since the number of distinct signatures worth special-casing
//! is small and fixed at compile time.

mod bitbase;

use super::{Board, Color, Piece};

const PIECE_KINDS: usize = 6;

/// Piece counts per color, used to recognize a handful of special-case
/// endgames before falling back to the general evaluator.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Signature {
    counts: [[u8; PIECE_KINDS]; 2],
}

impl Signature {
    fn of(board: &Board) -> Self {
        let mut counts = [[0u8; PIECE_KINDS]; 2];
        for color in [Color::White, Color::Black] {
            for piece in [
                Piece::Pawn,
                Piece::Knight,
                Piece::Bishop,
                Piece::Rook,
                Piece::Queen,
                Piece::King,
            ] {
                counts[color.index()][piece.index()] =
                    board.pieces_of(color, piece).popcount() as u8;
            }
        }
        Signature { counts }
    }

    fn count(&self, color: Color, piece: Piece) -> u8 {
        self.counts[color.index()][piece.index()]
    }

    fn total(&self, color: Color) -> u8 {
        self.counts[color.index()].iter().sum()
    }

    fn non_king_total(&self, color: Color) -> u8 {
        self.total(color) - self.count(color, Piece::King)
    }
}

impl Board {
    /// Recognize a handful of special-case endgames and return a
    /// side-to-move-relative score, bypassing the general evaluator.
    /// Returns `None` when no recognizer matches this material signature.
    #[must_use]
    pub(crate) fn probe_endgame(&self) -> Option<i32> {
        let sig = Signature::of(self);

        if sig.non_king_total(Color::White) == 0 && sig.non_king_total(Color::Black) == 0 {
            return Some(0); // bare kings
        }

        if let Some(score) = self.probe_kxk(&sig) {
            return Some(score);
        }
        if let Some(score) = self.probe_kpk_signature(&sig) {
            return Some(score);
        }
        if let Some(score) = self.probe_kpkp_signature(&sig) {
            return Some(score);
        }
        if let Some(score) = self.probe_krkp_signature(&sig) {
            return Some(score);
        }

        None
    }

    /// King + single major/minor piece vs bare king: always won (barring the
    /// lone-bishop/knight insufficient-material cases), scored by driving the
    /// defending king toward a board edge and the attacking king closer.
    fn probe_kxk(&self, sig: &Signature) -> Option<i32> {
        let (strong, weak) = if sig.non_king_total(Color::Black) == 0 {
            (Color::White, Color::Black)
        } else if sig.non_king_total(Color::White) == 0 {
            (Color::Black, Color::White)
        } else {
            return None;
        };

        if sig.non_king_total(strong) != 1 {
            return None;
        }
        // A single bishop or knight can't force mate.
        if sig.count(strong, Piece::Bishop) == 1 || sig.count(strong, Piece::Knight) == 1 {
            return Some(0);
        }
        if sig.count(strong, Piece::Pawn) == 1 {
            return None; // handled by the KPK bitbase
        }

        let weak_king = self.find_king(weak)?;
        let strong_king = self.find_king(strong)?;
        let corner_distance = center_distance(weak_king);
        let king_distance = square_distance(weak_king, strong_king);

        let material = match () {
            _ if sig.count(strong, Piece::Queen) == 1 => 900,
            _ if sig.count(strong, Piece::Rook) == 1 => 500,
            _ => 0,
        };
        let score = material + (14 - king_distance) * 10 + corner_distance * 10;

        Some(if self.current_color() == strong { score } else { -score })
    }

    fn probe_kpk_signature(&self, sig: &Signature) -> Option<i32> {
        let (strong, weak) = if sig.count(Color::White, Piece::Pawn) == 1
            && sig.non_king_total(Color::White) == 1
            && sig.non_king_total(Color::Black) == 0
        {
            (Color::White, Color::Black)
        } else if sig.count(Color::Black, Piece::Pawn) == 1
            && sig.non_king_total(Color::Black) == 1
            && sig.non_king_total(Color::White) == 0
        {
            (Color::Black, Color::White)
        } else {
            return None;
        };

        let strong_king = self.find_king(strong)?;
        let weak_king = self.find_king(weak)?;
        let pawn_sq = self.pieces_of(strong, Piece::Pawn).iter().next()?;
        let white_to_move = self.current_color() == strong;

        // Mirror onto the White-has-the-pawn orientation the table is built for.
        let (wk, wp, bk) = if strong == Color::White {
            (strong_king.index(), pawn_sq.index(), weak_king.index())
        } else {
            (
                mirror_rank(strong_king.index()),
                mirror_rank(pawn_sq.index()),
                mirror_rank(weak_king.index()),
            )
        };

        let wins = bitbase::probe_kpk(wk, wp, bk, white_to_move);
        let score = if wins { 200 + (pawn_sq.rank() as i32) * 20 } else { 0 };
        Some(if self.current_color() == strong { score } else { -score })
    }

    fn probe_kpkp_signature(&self, sig: &Signature) -> Option<i32> {
        for (a, b) in [(Color::White, Color::Black), (Color::Black, Color::White)] {
            if sig.count(a, Piece::Pawn) == 1
                && sig.non_king_total(a) == 1
                && sig.count(b, Piece::Pawn) == 1
                && sig.non_king_total(b) == 1
            {
                let a_king = self.find_king(a)?;
                let b_king = self.find_king(b)?;
                let a_pawn = self.pieces_of(a, Piece::Pawn).iter().next()?;
                let b_pawn = self.pieces_of(b, Piece::Pawn).iter().next()?;
                let a_to_move = self.current_color() == a;
                // `evaluate_kpkp` assumes `a`'s pawn advances toward rank 7
                // and `b`'s pawn toward rank 0; mirror black's squares to match.
                let (a_k, a_p, b_k, b_p) = if a == Color::White {
                    (a_king.index(), a_pawn.index(), b_king.index(), b_pawn.index())
                } else {
                    (
                        mirror_rank(a_king.index()),
                        mirror_rank(a_pawn.index()),
                        mirror_rank(b_king.index()),
                        mirror_rank(b_pawn.index()),
                    )
                };
                let score = bitbase::evaluate_kpkp(a_k, a_p, b_k, b_p, a_to_move);
                return Some(if self.current_color() == a { score } else { -score });
            }
        }
        None
    }

    fn probe_krkp_signature(&self, sig: &Signature) -> Option<i32> {
        for (rook_side, pawn_side) in [(Color::White, Color::Black), (Color::Black, Color::White)] {
            if sig.count(rook_side, Piece::Rook) == 1
                && sig.non_king_total(rook_side) == 1
                && sig.count(pawn_side, Piece::Pawn) == 1
                && sig.non_king_total(pawn_side) == 1
            {
                let rook_king = self.find_king(rook_side)?;
                let defender_king = self.find_king(pawn_side)?;
                let pawn_sq = self.pieces_of(pawn_side, Piece::Pawn).iter().next()?;
                let rook_sq = self.pieces_of(rook_side, Piece::Rook).iter().next()?;
                let cuts_off = rook_sq.file() == pawn_sq.file() || rook_sq.rank() == pawn_sq.rank();
                // `evaluate_krkp` assumes the defending pawn advances toward
                // rank 7; mirror everything when the pawn side is Black.
                let (rk, dk, ps) = if pawn_side == Color::White {
                    (rook_king.index(), defender_king.index(), pawn_sq.index())
                } else {
                    (
                        mirror_rank(rook_king.index()),
                        mirror_rank(defender_king.index()),
                        mirror_rank(pawn_sq.index()),
                    )
                };
                let score = bitbase::evaluate_krkp(rk, dk, ps, cuts_off);
                return Some(if self.current_color() == rook_side { score } else { -score });
            }
        }
        None
    }
}

fn mirror_rank(sq: usize) -> usize {
    let rank = sq / 8;
    let file = sq % 8;
    (7 - rank) * 8 + file
}

fn square_distance(a: super::Square, b: super::Square) -> i32 {
    let (ar, af) = (a.rank() as i32, a.file() as i32);
    let (br, bf) = (b.rank() as i32, b.file() as i32);
    (ar - br).abs().max((af - bf).abs())
}

fn center_distance(sq: super::Square) -> i32 {
    let (r, f) = (sq.rank() as i32, sq.file() as i32);
    let dr = (3 - r).max(r - 4);
    let df = (3 - f).max(f - 4);
    dr + df
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardBuilder;

    #[test]
    fn bare_kings_is_exactly_draw() {
        let board = BoardBuilder::new()
            .piece(super::super::Square::new(0, 4), Color::White, Piece::King)
            .piece(super::super::Square::new(7, 4), Color::Black, Piece::King)
            .build();
        assert_eq!(board.probe_endgame(), Some(0));
    }

    #[test]
    fn lone_bishop_cannot_win() {
        let board = BoardBuilder::new()
            .piece(super::super::Square::new(0, 4), Color::White, Piece::King)
            .piece(super::super::Square::new(7, 4), Color::Black, Piece::King)
            .piece(super::super::Square::new(1, 1), Color::White, Piece::Bishop)
            .build();
        assert_eq!(board.probe_endgame(), Some(0));
    }

    #[test]
    fn kqk_is_scored_as_a_clear_win_for_the_queen_side() {
        let board = BoardBuilder::new()
            .piece(super::super::Square::new(0, 4), Color::White, Piece::King)
            .piece(super::super::Square::new(7, 4), Color::Black, Piece::King)
            .piece(super::super::Square::new(1, 1), Color::White, Piece::Queen)
            .side_to_move(Color::White)
            .build();
        let score = board.probe_endgame().expect("KQK must be recognized");
        assert!(score > 500);
    }
}
