use super::super::{Board, Color, Move, MoveList, Piece, Square, PROMOTION_PIECES};

impl Board {
    pub(crate) fn generate_pawn_moves(&self, from: Square) -> MoveList {
        let mut moves = MoveList::new();
        let color = self.current_color();
        let is_white = color == Color::White;
        let start_rank = if is_white { 1 } else { 6 };
        let promotion_rank = if is_white { 7 } else { 0 };

        if let Some(forward_sq) = from.forward(is_white) {
            if self.is_empty(forward_sq) {
                push_pawn_advance(&mut moves, from, forward_sq, promotion_rank);
                if from.rank() == start_rank {
                    if let Some(double_sq) = forward_sq.forward(is_white) {
                        if self.is_empty(double_sq) {
                            moves.push(Move::double_pawn_push(from, double_sq));
                        }
                    }
                }
            }

            for capture_file in capture_files(from.file()) {
                let target_sq = Square::new(forward_sq.rank(), capture_file);
                self.push_pawn_capture(&mut moves, from, target_sq, color, promotion_rank);
            }
        }

        moves
    }

    pub(crate) fn generate_pawn_tactical_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.current_color();
        let is_white = color == Color::White;
        let promotion_rank = if is_white { 7 } else { 0 };

        let Some(forward_sq) = from.forward(is_white) else {
            return;
        };

        if forward_sq.rank() == promotion_rank && self.is_empty(forward_sq) {
            push_promotions(moves, from, forward_sq, None);
        }

        for capture_file in capture_files(from.file()) {
            let target_sq = Square::new(forward_sq.rank(), capture_file);
            self.push_pawn_capture(moves, from, target_sq, color, promotion_rank);
        }
    }

    fn push_pawn_capture(
        &self,
        moves: &mut MoveList,
        from: Square,
        target_sq: Square,
        color: Color,
        promotion_rank: usize,
    ) {
        if let Some((target_color, captured)) = self.piece_at(target_sq) {
            if target_color != color {
                if target_sq.rank() == promotion_rank {
                    push_promotions(moves, from, target_sq, Some(captured));
                } else {
                    moves.push(Move::capture(from, target_sq));
                }
            }
        } else if Some(target_sq) == self.en_passant_target {
            moves.push(Move::en_passant(from, target_sq));
        }
    }
}

fn capture_files(from_file: usize) -> impl Iterator<Item = usize> {
    let from_file = from_file as isize;
    [-1isize, 1]
        .into_iter()
        .map(move |df| from_file + df)
        .filter(|&f| (0..8).contains(&f))
        .map(|f| f as usize)
}

fn push_pawn_advance(moves: &mut MoveList, from: Square, to: Square, promotion_rank: usize) {
    if to.rank() == promotion_rank {
        push_promotions(moves, from, to, None);
    } else {
        moves.push(Move::quiet(from, to));
    }
}

fn push_promotions(moves: &mut MoveList, from: Square, to: Square, captured: Option<Piece>) {
    for promo in PROMOTION_PIECES {
        let mv = if captured.is_some() {
            Move::new_promotion_capture(from, to, promo)
        } else {
            Move::new_promotion(from, to, promo)
        };
        moves.push(mv);
    }
}
