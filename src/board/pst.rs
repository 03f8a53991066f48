//! Tapered material and piece-square tables used by the incremental
//! evaluation bookkeeping in `eval_update.rs`, `state.rs`, and
//! `make_unmake.rs`.
//!
//! Tables are indexed `[Piece::index()][square index]`, where square index 0
//! is a1 and 63 is h8 (White's own perspective; Black mirrors via
//! `eval_update::pst_square`'s rank flip).

/// Material value in centipawns, middlegame phase, indexed by `Piece::index()`.
pub(crate) const MATERIAL_MG: [i32; 6] = [100, 320, 330, 500, 900, 0];
/// Material value in centipawns, endgame phase, indexed by `Piece::index()`.
pub(crate) const MATERIAL_EG: [i32; 6] = [100, 320, 330, 500, 900, 0];

/// Phase weight per piece kind, indexed by `Piece::index()`. Matches the
/// classic tapered-eval convention: 4 knights + 4 bishops + 4 rooks + 2
/// queens sums to 24 at the start of the game.
pub(crate) const PHASE_WEIGHTS: [i32; 6] = [0, 1, 1, 2, 4, 0];

#[rustfmt::skip]
const PAWN_PST_MG: [i32; 64] = [
       0,    0,    0,    0,    0,    0,    0,    0,
       5,   10,    0,   -5,   -5,    0,   10,    5,
       0,    0,   10,   20,   20,   10,    0,    0,
       5,    5,   15,   25,   25,   15,    5,    5,
      10,   10,   20,   30,   30,   20,   10,   10,
      20,   20,   30,   40,   40,   30,   20,   20,
      50,   50,   50,   50,   50,   50,   50,   50,
       0,    0,    0,    0,    0,    0,    0,    0,
];

#[rustfmt::skip]
const KNIGHT_PST_MG: [i32; 64] = [
     -50,  -40,  -30,  -30,  -30,  -30,  -40,  -50,
     -40,  -20,    0,    5,    5,    0,  -20,  -40,
     -30,    0,   15,   20,   20,   15,    0,  -30,
     -30,    5,   20,   25,   25,   20,    5,  -30,
     -30,    0,   20,   25,   25,   20,    0,  -30,
     -30,    5,   15,   20,   20,   15,    5,  -30,
     -40,  -20,    0,    5,    5,    0,  -20,  -40,
     -50,  -40,  -30,  -30,  -30,  -30,  -40,  -50,
];

#[rustfmt::skip]
const BISHOP_PST_MG: [i32; 64] = [
     -20,  -10,  -10,  -10,  -10,  -10,  -10,  -20,
     -10,   10,    0,    5,    5,    0,   10,  -10,
     -10,    0,   10,   15,   15,   10,    0,  -10,
     -10,    5,   15,   15,   15,   15,    5,  -10,
     -10,    0,   15,   15,   15,   15,    0,  -10,
     -10,   10,   10,   10,   10,   10,   10,  -10,
     -10,    5,    0,    0,    0,    0,    5,  -10,
     -20,  -10,  -10,  -10,  -10,  -10,  -10,  -20,
];

#[rustfmt::skip]
const ROOK_PST_MG: [i32; 64] = [
      -5,    0,    5,   10,   10,    5,    0,   -5,
       0,    0,    0,    5,    5,    0,    0,    0,
       0,    0,    0,    5,    5,    0,    0,    0,
       0,    0,    0,    5,    5,    0,    0,    0,
       0,    0,    0,    5,    5,    0,    0,    0,
       0,    0,    0,    5,    5,    0,    0,    0,
      10,   15,   15,   20,   20,   15,   15,   10,
       0,    0,    0,    5,    5,    0,    0,    0,
];

#[rustfmt::skip]
const QUEEN_PST_MG: [i32; 64] = [
     -20,  -10,  -10,   -5,   -5,  -10,  -10,  -20,
     -10,    0,    0,    0,    0,    0,    0,  -10,
     -10,    0,    5,   10,   10,    5,    0,  -10,
      -5,    0,   10,   10,   10,   10,    0,   -5,
      -5,    0,   10,   10,   10,   10,    0,   -5,
     -10,    5,   10,   10,   10,   10,    5,  -10,
     -10,    0,    5,    5,    5,    5,    0,  -10,
     -20,  -10,  -10,   -5,   -5,  -10,  -10,  -20,
];

#[rustfmt::skip]
const KING_PST_MG: [i32; 64] = [
      20,   30,   -5,  -30,  -10,  -30,   30,   20,
     -30,  -30,  -10,    0,    0,  -10,  -30,  -30,
     -30,  -10,   20,   30,   30,   20,  -10,  -30,
     -30,  -10,   30,   40,   40,   30,  -10,  -30,
     -30,  -10,   30,   40,   40,   30,  -10,  -30,
     -30,  -10,   20,   30,   30,   20,  -10,  -30,
     -30,  -20,  -10,    0,    0,  -10,  -20,  -30,
     -50,  -40,  -30,  -20,  -20,  -30,  -40,  -50,
];

#[rustfmt::skip]
const PAWN_PST_EG: [i32; 64] = [
       0,    0,    0,    0,    0,    0,    0,    0,
       5,    5,    5,    5,    5,    5,    5,    5,
      10,   10,   10,   10,   10,   10,   10,   10,
      20,   20,   20,   20,   20,   20,   20,   20,
      40,   40,   40,   40,   40,   40,   40,   40,
      60,   60,   60,   60,   60,   60,   60,   60,
     100,  100,  100,  100,  100,  100,  100,  100,
       0,    0,    0,    0,    0,    0,    0,    0,
];

#[rustfmt::skip]
const KNIGHT_PST_EG: [i32; 64] = [
     -50,  -40,  -30,  -30,  -30,  -30,  -40,  -50,
     -40,  -20,    0,    5,    5,    0,  -20,  -40,
     -30,    5,   10,   15,   15,   10,    5,  -30,
     -30,    0,   15,   20,   20,   15,    0,  -30,
     -30,    5,   15,   20,   20,   15,    5,  -30,
     -30,    0,   10,   15,   15,   10,    0,  -30,
     -40,  -20,    0,    0,    0,    0,  -20,  -40,
     -50,  -40,  -30,  -30,  -30,  -30,  -40,  -50,
];

#[rustfmt::skip]
const BISHOP_PST_EG: [i32; 64] = [
     -20,  -10,  -10,  -10,  -10,  -10,  -10,  -20,
     -10,    5,    0,    0,    0,    0,    5,  -10,
     -10,   10,   10,   10,   10,   10,   10,  -10,
     -10,    0,   10,   15,   15,   10,    0,  -10,
     -10,    5,   10,   15,   15,   10,    5,  -10,
     -10,    0,   10,   10,   10,   10,    0,  -10,
     -10,    0,    0,    0,    0,    0,    0,  -10,
     -20,  -10,  -10,  -10,  -10,  -10,  -10,  -20,
];

#[rustfmt::skip]
const ROOK_PST_EG: [i32; 64] = [
       0,    0,    0,    0,    0,    0,    0,    0,
       0,    0,    0,    0,    0,    0,    0,    0,
       0,    0,    0,    0,    0,    0,    0,    0,
       0,    0,    0,    0,    0,    0,    0,    0,
       0,    0,    0,    0,    0,    0,    0,    0,
       0,    0,    0,    0,    0,    0,    0,    0,
      15,   15,   15,   15,   15,   15,   15,   15,
       0,    0,    0,    0,    0,    0,    0,    0,
];

#[rustfmt::skip]
const QUEEN_PST_EG: [i32; 64] = [
     -20,  -10,  -10,   -5,   -5,  -10,  -10,  -20,
     -10,    0,    0,    5,    5,    0,    0,  -10,
     -10,    5,   10,   15,   15,   10,    5,  -10,
      -5,    0,   15,   20,   20,   15,    0,   -5,
      -5,    0,   15,   20,   20,   15,    0,   -5,
     -10,    5,   10,   15,   15,   10,    5,  -10,
     -10,    0,    5,    5,    5,    5,    0,  -10,
     -20,  -10,  -10,   -5,   -5,  -10,  -10,  -20,
];

#[rustfmt::skip]
const KING_PST_EG: [i32; 64] = [
     -50,  -30,  -20,  -10,  -10,  -20,  -30,  -50,
     -30,  -10,    0,   10,   10,    0,  -10,  -30,
     -20,    0,   20,   30,   30,   20,    0,  -20,
     -10,   10,   30,   40,   40,   30,   10,  -10,
     -10,   10,   30,   40,   40,   30,   10,  -10,
     -20,    0,   20,   30,   30,   20,    0,  -20,
     -30,  -10,    0,   10,   10,    0,  -10,  -30,
     -50,  -30,  -20,  -10,  -10,  -20,  -30,  -50,
];

/// Middlegame piece-square tables, indexed `[Piece::index()][square]`.
pub(crate) const PST_MG: [[i32; 64]; 6] = [
    PAWN_PST_MG,
    KNIGHT_PST_MG,
    BISHOP_PST_MG,
    ROOK_PST_MG,
    QUEEN_PST_MG,
    KING_PST_MG,
];

/// Endgame piece-square tables, indexed `[Piece::index()][square]`.
pub(crate) const PST_EG: [[i32; 64]; 6] = [
    PAWN_PST_EG,
    KNIGHT_PST_EG,
    BISHOP_PST_EG,
    ROOK_PST_EG,
    QUEEN_PST_EG,
    KING_PST_EG,
];
