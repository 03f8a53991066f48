//! Incremental accumulator cache for king-relative NNUE features.
//!
//! Feature indices depend on the perspective's own king square, so moving a
//! king invalidates every feature for that perspective (the opponent's
//! perspective is unaffected, since only its own king square matters there).
//! This cache tracks, per perspective, whether the king has moved since the
//! last refresh and falls back to a full rebuild only for the stale side.

use super::network::feature_index;
use super::{NnueAccumulator, NnueNetwork};
use crate::board::{Board, Color, Piece, Square};

/// Holds an [`NnueAccumulator`] plus enough state to maintain it
/// incrementally across moves. Not embedded in [`Board`] itself; callers that
/// want incremental NNUE maintenance (e.g. search) own one of these
/// alongside the board.
pub struct NnueAccumulatorCache {
    acc: NnueAccumulator,
    white_king_sq: usize,
    black_king_sq: usize,
    white_dirty: bool,
    black_dirty: bool,
}

impl NnueAccumulatorCache {
    /// Build a cache fully refreshed from `board`'s current position.
    #[must_use]
    pub fn new(board: &Board, network: &NnueNetwork) -> Self {
        let mut cache = Self {
            acc: NnueAccumulator::new(&network.feature_bias),
            white_king_sq: 0,
            black_king_sq: 0,
            white_dirty: true,
            black_dirty: true,
        };
        cache.refresh(board, network);
        cache
    }

    /// Rebuild both perspectives from scratch against `board`'s position.
    pub fn refresh(&mut self, board: &Board, network: &NnueNetwork) {
        let (white_features, black_features) = board.compute_nnue_features();
        self.acc
            .refresh(&white_features, &black_features, network);
        self.white_king_sq = board.find_king(Color::White).map_or(0, Square::as_index);
        self.black_king_sq = board.find_king(Color::Black).map_or(0, Square::as_index);
        self.white_dirty = false;
        self.black_dirty = false;
    }

    /// Record that a piece was placed on `square`. Skips perspectives
    /// already marked dirty, since those will be rebuilt wholesale anyway.
    pub fn on_piece_added(&mut self, piece: Piece, color: Color, square: Square, network: &NnueNetwork) {
        let piece_idx = piece.index();
        let color_idx = color.index();
        let sq_idx = square.as_index();
        if !self.white_dirty {
            let feat = feature_index(piece_idx, color_idx, sq_idx, self.white_king_sq, 0);
            self.acc.add_one(true, feat, network);
        }
        if !self.black_dirty {
            let feat = feature_index(piece_idx, color_idx, sq_idx, self.black_king_sq, 1);
            self.acc.add_one(false, feat, network);
        }
    }

    /// Record that a piece was removed from `square`. See [`Self::on_piece_added`].
    pub fn on_piece_removed(&mut self, piece: Piece, color: Color, square: Square, network: &NnueNetwork) {
        let piece_idx = piece.index();
        let color_idx = color.index();
        let sq_idx = square.as_index();
        if !self.white_dirty {
            let feat = feature_index(piece_idx, color_idx, sq_idx, self.white_king_sq, 0);
            self.acc.sub_one(true, feat, network);
        }
        if !self.black_dirty {
            let feat = feature_index(piece_idx, color_idx, sq_idx, self.black_king_sq, 1);
            self.acc.sub_one(false, feat, network);
        }
    }

    /// Record that `color`'s king moved, invalidating that perspective's
    /// features until the next [`Self::ensure_fresh`] or [`Self::refresh`].
    pub fn on_king_moved(&mut self, color: Color) {
        match color {
            Color::White => self.white_dirty = true,
            Color::Black => self.black_dirty = true,
        }
    }

    /// Rebuild whichever perspectives are dirty. Cheap no-op when neither is.
    pub fn ensure_fresh(&mut self, board: &Board, network: &NnueNetwork) {
        if self.white_dirty || self.black_dirty {
            self.refresh(board, network);
        }
    }

    /// Evaluate `board`'s position, refreshing any stale perspective first.
    pub fn evaluate(&mut self, board: &Board, network: &NnueNetwork) -> i32 {
        self.ensure_fresh(board, network);
        network.evaluate(&self.acc, board.white_to_move())
    }
}
