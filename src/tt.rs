//! Transposition table for caching search results.
//!
//! Uses Zobrist hashes to store and retrieve position evaluations,
//! enabling significant search tree pruning.

use std::mem;

use crate::board::Move;

/// Scores at or beyond this magnitude encode "mate in N" and need ply
/// rescaling when they cross the TT boundary. Kept in sync with
/// `board::search::MATE_SCORE`'s threshold rather than importing it, to
/// avoid a dependency from this module back into `board`.
const MATE_REBASE_THRESHOLD: i32 = 28000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed low - score <= alpha)
    UpperBound, // Score is at most this value (failed high - score >= beta)
}

#[derive(Clone, Debug)]
pub(crate) struct TTEntry {
    hash: u64,
    depth: u32,
    score: i32,
    bound_type: BoundType,
    best_move: Option<Move>,
    generation: u16,
}

impl TTEntry {
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Raw stored score, rebased to distance-from-this-entry rather than
    /// distance-from-search-root. Prefer `score_for_ply` at call sites that
    /// feed the value back into alpha/beta comparisons.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Score adjusted for the probing node's ply, undoing the rebasing
    /// applied at store time so mate scores stay correct regardless of how
    /// deep in the tree the position was originally stored from.
    #[must_use]
    pub fn score_for_ply(&self, ply: usize) -> i32 {
        value_from_tt(self.score, ply)
    }

    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }
}

/// Rebase a search-root-relative score to a ply-independent one before
/// storing it in the TT. Mate scores are shifted outward by `ply` so the
/// same entry can be reused from a different path with a different ply.
fn value_to_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score >= MATE_REBASE_THRESHOLD {
        score + ply
    } else if score <= -MATE_REBASE_THRESHOLD {
        score - ply
    } else {
        score
    }
}

/// Inverse of `value_to_tt`: rebase a stored ply-independent score back to
/// one relative to the probing node's ply.
fn value_from_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score >= MATE_REBASE_THRESHOLD {
        score - ply
    } else if score <= -MATE_REBASE_THRESHOLD {
        score + ply
    } else {
        score
    }
}

pub struct TranspositionTable {
    table: Vec<[Option<TTEntry>; 4]>,
    mask: usize, // To wrap index around using bitwise AND (table size must be power of 2)
    occupied: usize,
}

impl TranspositionTable {
    // size_mb: Desired size in Megabytes
    #[must_use] 
    pub fn new(size_mb: usize) -> Self {
        let entry_size = mem::size_of::<[Option<TTEntry>; 4]>();
        let mut num_entries = (size_mb * 1024 * 1024) / entry_size;

        // Ensure num_entries is a power of 2 for efficient indexing
        num_entries = num_entries.next_power_of_two() / 2; // Find next power of 2, maybe go down one? Test this.
        if num_entries == 0 {
            num_entries = 1024;
        } // Minimum size fallback

        TranspositionTable {
            table: vec![[None, None, None, None]; num_entries],
            mask: num_entries - 1, // e.g., if size is 1024, mask is 1023 (0b1111111111)
            occupied: 0,
        }
    }

    // Calculate index via a multiplicative mix of the high bits of the hash,
    // rather than masking the low bits directly, so the Zobrist key's low
    // bits (which feed other lookups, e.g. repetition detection) don't also
    // determine TT bucket placement.
    fn index(&self, hash: u64) -> usize {
        let num_entries = self.mask + 1;
        (((hash as u128) * (num_entries as u128)) >> 64) as usize
    }

    // Probe the table for a given hash
    pub(crate) fn probe(&self, hash: u64) -> Option<&TTEntry> {
        let index = self.index(hash);
        let bucket = &self.table[index];
        bucket.iter().flatten().find(|entry| entry.hash == hash)
    }

    // Store an entry in the table. `ply` is the depth from the search root at
    // which this position was reached, used to rebase mate scores so they
    // remain valid when the entry is later probed from a different path.
    pub(crate) fn store(
        &mut self,
        hash: u64,
        depth: u32,
        score: i32,
        bound_type: BoundType,
        best_move: Option<Move>,
        generation: u16,
        ply: usize,
    ) {
        let score = value_to_tt(score, ply);
        let index = self.index(hash);
        let bucket = &mut self.table[index];

        for slot in bucket.iter_mut() {
            if let Some(existing) = slot {
                if existing.hash == hash {
                    *slot = Some(TTEntry {
                        hash,
                        depth,
                        score,
                        bound_type,
                        best_move,
                        generation,
                    });
                    return;
                }
            }
        }

        for slot in bucket.iter_mut() {
            if slot.is_none() {
                *slot = Some(TTEntry {
                    hash,
                    depth,
                    score,
                    bound_type,
                    best_move,
                    generation,
                });
                self.occupied += 1;
                return;
            }
        }

        let mut replace_idx = 0;
        let mut worst_priority = i32::MAX;

        for (idx, slot) in bucket.iter().enumerate() {
            if let Some(entry) = slot {
                let age = generation.wrapping_sub(entry.generation);
                let priority = entry.depth.saturating_mul(2) as i32 - age as i32;
                if idx == 0 || priority < worst_priority {
                    replace_idx = idx;
                    worst_priority = priority;
                }
            }
        }

        bucket[replace_idx] = Some(TTEntry {
            hash,
            depth,
            score,
            bound_type,
            best_move,
            generation,
        });
    }

    /// Hint the CPU to start pulling the bucket for `hash` into cache ahead
    /// of the probe/store that will follow once the child move is made.
    /// A no-op on targets without a prefetch intrinsic.
    #[inline]
    pub(crate) fn prefetch(&self, hash: u64) {
        #[cfg(target_arch = "x86_64")]
        {
            use std::arch::x86_64::{_mm_prefetch, _MM_HINT_T0};
            let index = self.index(hash);
            let ptr = self.table.as_ptr().wrapping_add(index).cast::<i8>();
            // SAFETY: prefetch never reads or writes memory, just hints the
            // cache; `ptr` stays in-bounds of `self.table`'s allocation since
            // `index` is masked to the table's length.
            unsafe { _mm_prefetch(ptr, _MM_HINT_T0) };
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            let _ = hash;
        }
    }

    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let total_slots = self.table.len().saturating_mul(4);
        if total_slots == 0 {
            return 0;
        }
        ((self.occupied as u64 * 1000) / total_slots as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_then_probe_round_trips() {
        let mut tt = TranspositionTable::new(1);
        let hash = 0xdead_beef_u64;
        tt.store(hash, 1, 100, BoundType::Exact, None, 0, 0);
        let entry = tt.probe(hash).expect("entry missing");
        assert_eq!(entry.depth(), 1);
        assert_eq!(entry.score(), 100);
    }

    #[test]
    fn shallower_store_does_not_overwrite_deeper_entry() {
        let mut tt = TranspositionTable::new(1);
        let hash = 0x1234_5678_u64;
        tt.store(hash, 5, 200, BoundType::Exact, None, 0, 0);
        tt.store(hash, 1, 50, BoundType::Exact, None, 0, 0);
        let entry = tt.probe(hash).expect("entry missing");
        assert_eq!(entry.depth(), 5);
    }

    #[test]
    fn probe_misses_on_unknown_hash() {
        let tt = TranspositionTable::new(1);
        assert!(tt.probe(0x42).is_none());
    }

    #[test]
    fn mate_score_rebases_across_ply() {
        let mut tt = TranspositionTable::new(1);
        let hash = 0xfeed_u64;
        let mate_in_three_from_root = MATE_REBASE_THRESHOLD + 10;
        // Stored from a node 4 plies deep.
        tt.store(hash, 3, mate_in_three_from_root, BoundType::Exact, None, 0, 4);
        let entry = tt.probe(hash).expect("entry missing");
        // Probed from the same ply: score is unchanged.
        assert_eq!(entry.score_for_ply(4), mate_in_three_from_root);
        // Probed from a shallower ply (position reached sooner from this
        // root): the mate is fewer total plies away, so the score is higher.
        assert_eq!(entry.score_for_ply(2), mate_in_three_from_root + 2);
    }

    #[test]
    fn non_mate_score_is_unaffected_by_ply() {
        let mut tt = TranspositionTable::new(1);
        let hash = 0x9999_u64;
        tt.store(hash, 3, 55, BoundType::Exact, None, 0, 7);
        let entry = tt.probe(hash).expect("entry missing");
        assert_eq!(entry.score_for_ply(0), 55);
        assert_eq!(entry.score_for_ply(10), 55);
    }
}
