//! Move-ordering heuristic tables used by the search: killer moves, history,
//! counter moves, and continuation/capture history.
//!
//! All tables are bounds-checked on the heuristic-lookup path (ply, square
//! indices) rather than trusting callers, since ply can exceed `MAX_PLY` in
//! deep forced lines and these are best-effort hints, not correctness-load
//! bearing state.

use crate::board::{Move, Piece, MAX_PLY, EMPTY_MOVE};

/// Killer moves: up to three quiet moves per ply that previously caused a
/// beta cutoff, tried early in move ordering before falling back to history.
pub struct KillerTable {
    slots: Box<[[Move; 3]; MAX_PLY]>,
}

impl KillerTable {
    #[must_use]
    pub fn new() -> Self {
        KillerTable {
            slots: Box::new([[EMPTY_MOVE; 3]; MAX_PLY]),
        }
    }

    #[must_use]
    pub fn primary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(EMPTY_MOVE, |s| s[0])
    }

    #[must_use]
    pub fn secondary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(EMPTY_MOVE, |s| s[1])
    }

    #[must_use]
    pub fn tertiary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(EMPTY_MOVE, |s| s[2])
    }

    /// Record a cutoff move at `ply`, shifting the existing killers down.
    /// A repeat of the current primary killer is a no-op, so a single move
    /// doesn't occupy multiple slots.
    pub fn update(&mut self, ply: usize, mv: Move) {
        let Some(slot) = self.slots.get_mut(ply) else {
            return;
        };
        if slot[0] == mv {
            return;
        }
        slot[2] = slot[1];
        slot[1] = slot[0];
        slot[0] = mv;
    }

    pub fn reset(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = [EMPTY_MOVE; 3];
        }
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Quiet-move history: rewards moves that have caused cutoffs, penalizes
/// ones that were tried and didn't, indexed by from/to square only (moves
/// carry no piece tag to index on).
pub struct HistoryTable {
    scores: Box<[i32; 64 * 64]>,
}

impl HistoryTable {
    #[must_use]
    pub fn new() -> Self {
        HistoryTable {
            scores: Box::new([0; 64 * 64]),
        }
    }

    fn index(mv: &Move) -> usize {
        mv.from().index() * 64 + mv.to().index()
    }

    #[must_use]
    pub fn score(&self, mv: &Move) -> i32 {
        self.scores[Self::index(mv)]
    }

    /// Reward `mv` with a depth-cubed bonus ("history gravity"). `ply` is
    /// accepted for API parity with the other per-ply tables but doesn't
    /// currently affect the bonus.
    pub fn update(&mut self, mv: &Move, depth: u32, _ply: usize) {
        let bonus = (depth * depth * depth) as i32;
        let idx = Self::index(mv);
        self.scores[idx] = self.scores[idx].saturating_add(bonus);
    }

    /// Penalize `mv` for being tried without causing the cutoff.
    pub fn penalize(&mut self, mv: &Move, depth: u32) {
        let malus = (depth * depth * depth) as i32;
        let idx = Self::index(mv);
        self.scores[idx] = self.scores[idx].saturating_sub(malus);
    }

    pub fn decay(&mut self) {
        for entry in self.scores.iter_mut() {
            *entry >>= 2;
        }
    }

    pub fn reset(&mut self) {
        for entry in self.scores.iter_mut() {
            *entry = 0;
        }
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Counter-move table: for each (from, to) of the opponent's last move,
/// the move that previously refuted it.
pub struct CounterMoveTable {
    moves: Box<[[Move; 64]; 64]>,
}

impl CounterMoveTable {
    #[must_use]
    pub fn new() -> Self {
        CounterMoveTable {
            moves: Box::new([[EMPTY_MOVE; 64]; 64]),
        }
    }

    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> Move {
        if from >= 64 || to >= 64 {
            return EMPTY_MOVE;
        }
        self.moves[from][to]
    }

    pub fn set(&mut self, from: usize, to: usize, mv: Move) {
        if from >= 64 || to >= 64 {
            return;
        }
        self.moves[from][to] = mv;
    }

    pub fn reset(&mut self) {
        for row in self.moves.iter_mut() {
            for mv in row.iter_mut() {
                *mv = EMPTY_MOVE;
            }
        }
    }
}

impl Default for CounterMoveTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Continuation history: rewards a quiet move for following up well after a
/// specific (piece, square) the opponent just moved to. Indexed by
/// `(prev_piece, prev_to, current_to)` — moves carry no piece tag, so the
/// current-piece dimension classic engines use is dropped.
pub struct ContinuationHistoryTable {
    // [prev_piece][prev_to][current_to]
    scores: Box<[[[i32; 64]; 64]; 6]>,
}

impl ContinuationHistoryTable {
    #[must_use]
    pub fn new() -> Self {
        ContinuationHistoryTable {
            scores: Box::new([[[0; 64]; 64]; 6]),
        }
    }

    #[must_use]
    pub fn score(&self, prev_piece: Piece, prev_to: usize, mv: &Move) -> i32 {
        if prev_to >= 64 {
            return 0;
        }
        self.scores[prev_piece.index()][prev_to][mv.to().index()]
    }

    pub fn update(&mut self, prev_piece: Piece, prev_to: usize, mv: &Move, depth: u32) {
        if prev_to >= 64 {
            return;
        }
        let bonus = (depth * depth * depth) as i32;
        let entry = &mut self.scores[prev_piece.index()][prev_to][mv.to().index()];
        *entry = entry.saturating_add(bonus);
    }

    pub fn decay(&mut self) {
        for piece_table in self.scores.iter_mut() {
            for row in piece_table.iter_mut() {
                for entry in row.iter_mut() {
                    *entry >>= 2;
                }
            }
        }
    }

    pub fn reset(&mut self) {
        for piece_table in self.scores.iter_mut() {
            for row in piece_table.iter_mut() {
                for entry in row.iter_mut() {
                    *entry = 0;
                }
            }
        }
    }
}

impl Default for ContinuationHistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Capture history: rewards a capturing (attacker, victim) pair for
/// previously causing a cutoff, blended into MVV-LVA ordering.
pub struct CaptureHistoryTable {
    // [attacker][victim]
    scores: [[i32; 6]; 6],
}

impl CaptureHistoryTable {
    #[must_use]
    pub fn new() -> Self {
        CaptureHistoryTable { scores: [[0; 6]; 6] }
    }

    #[must_use]
    pub fn score(&self, attacker: Piece, victim: Piece) -> i32 {
        self.scores[attacker.index()][victim.index()]
    }

    pub fn update(&mut self, attacker: Piece, victim: Piece, depth: u32) {
        let bonus = (depth * depth * depth) as i32;
        let entry = &mut self.scores[attacker.index()][victim.index()];
        *entry = entry.saturating_add(bonus);
    }

    pub fn decay(&mut self) {
        for row in self.scores.iter_mut() {
            for entry in row.iter_mut() {
                *entry >>= 2;
            }
        }
    }

    pub fn reset(&mut self) {
        self.scores = [[0; 6]; 6];
    }
}

impl Default for CaptureHistoryTable {
    fn default() -> Self {
        Self::new()
    }
}
