//! Thin re-export layer so callers can write `attack_tables::slider_attacks`
//! without caring whether the backing implementation is magic-bitboard
//! lookups or (on non-BMI2 builds) anything else.

pub(crate) use super::magic::{bishop_attacks, queen_attacks, rook_attacks, slider_attacks};
