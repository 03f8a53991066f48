//! King-and-pawn-vs-king tablebase, built by retrograde analysis at first
//! probe, plus classical-rule heuristics for the two pawn endgames that
//! aren't worth a full tablebase (KPKP, KRKP): a genuine 5-man retrograde
//! table needs the second pawn's (or the rook's) square in the state, which
//! pushes the state count into the tens of millions — impractical to build
//! on first probe the way the ~400K-state KPK table is. These two stay
//! classical-rule heuristics, not tablebases.
//!
//! The KPK solver always treats the pawn as White's: callers mirror ranks
//! and colors before indexing so the single table covers both orientations.
//! `evaluate_kpkp` and `evaluate_krkp` use the same convention: callers
//! mirror so the pawn in question always advances toward rank 7.

use std::sync::OnceLock;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Verdict {
    Unknown,
    Draw,
    Win,
}

const PAWN_RANKS: i32 = 6; // ranks 1..=6 (0-indexed); rank 0/7 aren't valid pawn squares
const TABLE_SIZE: usize = 2 * 64 * 64 * (PAWN_RANKS as usize) * 8;

fn index(turn: usize, wk: i32, bk: i32, pawn_rank: i32, pawn_file: i32) -> usize {
    let pawn_slot = ((pawn_rank - 1) * 8 + pawn_file) as usize;
    (((turn * 64 + wk as usize) * 64 + bk as usize) * PAWN_RANKS as usize * 8) + pawn_slot
}

fn king_adjacent(a: i32, b: i32) -> bool {
    let (ar, af) = (a / 8, a % 8);
    let (br, bf) = (b / 8, b % 8);
    (ar - br).abs() <= 1 && (af - bf).abs() <= 1
}

fn king_moves(sq: i32) -> impl Iterator<Item = i32> {
    let (r, f) = (sq / 8, sq % 8);
    (-1..=1).flat_map(move |dr| {
        (-1..=1).filter_map(move |df| {
            if dr == 0 && df == 0 {
                return None;
            }
            let (nr, nf) = (r + dr, f + df);
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                Some(nr * 8 + nf)
            } else {
                None
            }
        })
    })
}

/// Does the white pawn on `(pawn_rank, pawn_file)` attack `sq`?
fn pawn_attacks(pawn_rank: i32, pawn_file: i32, sq: i32) -> bool {
    let (r, f) = (sq / 8, sq % 8);
    r == pawn_rank + 1 && (f - pawn_file).abs() == 1
}

struct State {
    turn: usize, // 0 = white (attacker, has the pawn) to move, 1 = black to move
    wk: i32,
    bk: i32,
    pawn_rank: i32,
    pawn_file: i32,
}

fn legal(s: &State) -> bool {
    let pawn_sq = s.pawn_rank * 8 + s.pawn_file;
    s.wk != s.bk
        && s.wk != pawn_sq
        && s.bk != pawn_sq
        && !king_adjacent(s.wk, s.bk)
        && !(s.turn == 0 && pawn_attacks(s.pawn_rank, s.pawn_file, s.bk))
}

fn black_in_check(s: &State) -> bool {
    pawn_attacks(s.pawn_rank, s.pawn_file, s.bk)
}

/// Build the full KPK table via fixed-point retrograde analysis: repeatedly
/// classify any still-unknown position whose successors are all resolved,
/// until a pass makes no progress.
fn solve() -> Vec<Verdict> {
    let mut table = vec![Verdict::Unknown; TABLE_SIZE];

    for wk in 0..64i32 {
        for bk in 0..64i32 {
            for pawn_rank in 1..=PAWN_RANKS {
                for pawn_file in 0..8i32 {
                    for turn in 0..2usize {
                        let s = State { turn, wk, bk, pawn_rank, pawn_file };
                        if !legal(&s) {
                            table[index(turn, wk, bk, pawn_rank, pawn_file)] = Verdict::Draw;
                        }
                    }
                }
            }
        }
    }

    loop {
        let mut changed = false;
        for wk in 0..64i32 {
            for bk in 0..64i32 {
                for pawn_rank in 1..=PAWN_RANKS {
                    for pawn_file in 0..8i32 {
                        for turn in 0..2usize {
                            let idx = index(turn, wk, bk, pawn_rank, pawn_file);
                            if table[idx] != Verdict::Unknown {
                                continue;
                            }
                            let s = State { turn, wk, bk, pawn_rank, pawn_file };
                            if let Some(v) = classify(&s, &table) {
                                table[idx] = v;
                                changed = true;
                            }
                        }
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }

    // Anything still unknown after the fixed point is a position whose
    // every successor is itself unresolved: a cycle of non-progressing king
    // shuffles, which is a draw by repetition.
    for v in &mut table {
        if *v == Verdict::Unknown {
            *v = Verdict::Draw;
        }
    }

    table
}

fn classify(s: &State, table: &[Verdict]) -> Option<Verdict> {
    let mut any_unknown = false;
    let mut any_draw = false;

    if s.turn == 0 {
        // Attacker to move: a win if some move forces a win; if every move
        // is known and none wins, it's a draw.
        let mut any_move = false;

        // King moves.
        for dest in king_moves(s.wk) {
            if dest == s.bk {
                continue;
            }
            any_move = true;
            let next = State { turn: 1, wk: dest, bk: s.bk, pawn_rank: s.pawn_rank, pawn_file: s.pawn_file };
            if !legal(&next) {
                continue;
            }
            match table[index(1, dest, s.bk, s.pawn_rank, s.pawn_file)] {
                Verdict::Win => return Some(Verdict::Win),
                Verdict::Draw => any_draw = true,
                Verdict::Unknown => any_unknown = true,
            }
        }

        // Single and double pawn pushes.
        let pushes: &[i32] = if s.pawn_rank == 1 { &[1, 2] } else { &[1] };
        for &step in pushes {
            let new_rank = s.pawn_rank + step;
            if new_rank > 6 {
                // Promotes: a queen (or rook) alone with a king is a won
                // endgame against a bare king, modulo the rare KQK stalemate
                // trick, which normal search handles from here on.
                any_move = true;
                return Some(Verdict::Win);
            }
            if (new_rank * 8 + s.pawn_file) == s.wk || (new_rank * 8 + s.pawn_file) == s.bk {
                break; // blocked
            }
            any_move = true;
            let next_turn = 1;
            if !legal(&State { turn: next_turn, wk: s.wk, bk: s.bk, pawn_rank: new_rank, pawn_file: s.pawn_file }) {
                continue;
            }
            match table[index(next_turn, s.wk, s.bk, new_rank, s.pawn_file)] {
                Verdict::Win => return Some(Verdict::Win),
                Verdict::Draw => any_draw = true,
                Verdict::Unknown => any_unknown = true,
            }
        }

        if !any_move {
            return Some(Verdict::Draw); // stalemated attacker
        }
        if any_unknown {
            None
        } else {
            Some(Verdict::Draw)
        }
    } else {
        // Defender to move: a win (for the attacker) only if every legal
        // move loses; any move to a known draw makes this a draw.
        let mut any_move = false;

        for dest in king_moves(s.bk) {
            if dest == s.wk || king_adjacent(s.wk, dest) {
                continue;
            }
            let pawn_sq = s.pawn_rank * 8 + s.pawn_file;
            if dest == pawn_sq {
                any_move = true;
                any_draw = true; // captures the pawn
                continue;
            }
            any_move = true;
            match table[index(0, s.wk, dest, s.pawn_rank, s.pawn_file)] {
                Verdict::Draw => any_draw = true,
                Verdict::Unknown => any_unknown = true,
                Verdict::Win => {}
            }
        }

        if !any_move {
            return Some(if black_in_check(s) { Verdict::Win } else { Verdict::Draw });
        }
        if any_draw {
            Some(Verdict::Draw)
        } else if any_unknown {
            None
        } else {
            Some(Verdict::Win)
        }
    }
}

static KPK_TABLE: OnceLock<Vec<Verdict>> = OnceLock::new();

/// Probe the KPK tablebase. All arguments are from White's perspective: the
/// caller mirrors squares and flips `white_to_move` beforehand if Black
/// actually holds the pawn.
///
/// Returns `true` if the position is a theoretical win for the side with the
/// pawn, `false` if it's a draw.
pub(crate) fn probe_kpk(white_king: usize, white_pawn: usize, black_king: usize, white_to_move: bool) -> bool {
    let table = KPK_TABLE.get_or_init(solve);
    let pawn_rank = (white_pawn / 8) as i32;
    let pawn_file = (white_pawn % 8) as i32;
    let turn = usize::from(!white_to_move);
    table[index(turn, white_king as i32, black_king as i32, pawn_rank, pawn_file)] == Verdict::Win
}

fn chebyshev_distance(a: i32, b: i32) -> i32 {
    let (ar, af) = (a / 8, a % 8);
    let (br, bf) = (b / 8, b % 8);
    (ar - br).abs().max((af - bf).abs())
}

/// Squares a king needs to reach to catch a pawn queening on `promo_sq`,
/// counting the pawn's own remaining race: the classical "square of the
/// pawn" rule, generalized to an arbitrary number of ranks left.
fn within_square(king: i32, pawn: i32, promo_sq: i32, pawn_to_move_first: bool) -> bool {
    let ranks_to_go = (promo_sq / 8 - pawn / 8).abs();
    let catch_distance = ranks_to_go + i32::from(!pawn_to_move_first);
    chebyshev_distance(king, promo_sq) <= catch_distance
}

/// Classical-rule verdict for king+pawn vs king+pawn: the side whose pawn is
/// closer to promotion and whose king either races home or keeps the
/// opposing king out of its own pawn's queening square usually wins;
/// otherwise drawn. A real retrograde solve needs both pawns plus both
/// kings in the state (see the module doc for why that isn't tractable
/// here), so this stays a rule-of-the-square heuristic.
pub(crate) fn evaluate_kpkp(
    stronger_king: usize,
    stronger_pawn: usize,
    weaker_king: usize,
    weaker_pawn: usize,
    stronger_to_move: bool,
) -> i32 {
    let stronger_rank = (stronger_pawn / 8) as i32;
    let weaker_rank = 7 - (weaker_pawn / 8) as i32; // distance-to-promotion from weaker's own perspective
    let tempo = i32::from(stronger_to_move);

    let stronger_runs_first = stronger_rank + tempo > weaker_rank;

    // Can the weaker king catch the stronger pawn before it queens on its file?
    let stronger_promo_sq = ((stronger_pawn % 8) + 56) as i32;
    let weaker_catches = within_square(
        weaker_king as i32,
        stronger_pawn as i32,
        stronger_promo_sq,
        !stronger_to_move,
    );

    // Can the stronger king catch the weaker pawn before it queens on rank 0?
    let weaker_promo_sq = weaker_pawn % 8;
    let stronger_catches = within_square(
        stronger_king as i32,
        weaker_pawn as i32,
        weaker_promo_sq as i32,
        stronger_to_move,
    );

    if stronger_runs_first && !weaker_catches {
        300 + stronger_rank * 20
    } else if !stronger_runs_first && !stronger_catches {
        -(300 + weaker_rank * 20)
    } else if stronger_catches && !weaker_catches {
        80 + stronger_rank * 10
    } else {
        0
    }
}

/// Classical-rule verdict for king+rook vs king+pawn: won for the rook side
/// unless the pawn is far advanced, defended by its own king, and the
/// defending king is close enough to shepherd it while the rook can't cut
/// it off from behind (the standard "rook vs far-advanced supported pawn"
/// drawing chances). The rook's own square isn't part of the state — only
/// whether it currently cuts the pawn off — so this stays a heuristic
/// rather than a solved table; see the module doc.
pub(crate) fn evaluate_krkp(
    rook_side_king: usize,
    defender_king: usize,
    defender_pawn: usize,
    rook_rank_or_file_cuts_off: bool,
) -> i32 {
    let pawn_rank = (defender_pawn / 8) as i32;
    let pawn_file = (defender_pawn % 8) as i32;
    let pawn_sq = pawn_rank * 8 + pawn_file;

    let advanced = pawn_rank >= 5;
    let king_supports = king_adjacent(defender_king as i32, pawn_sq);
    let rook_king_far = chebyshev_distance(rook_side_king as i32, pawn_sq) > 3;

    if advanced && king_supports && rook_king_far && !rook_rank_or_file_cuts_off {
        20 // drawish: keep close to material score
    } else {
        400 // comfortably won for the rook
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unopposed_pawn_promotes() {
        // White king and pawn both near promotion, black king far away and
        // uninvolved: the pawn simply walks in, no matter whose move it is.
        let white_king = 5 * 8 + 6; // g6
        let white_pawn = 4 * 8 + 4; // e5
        let black_king = 0; // a1, irrelevant
        assert!(probe_kpk(white_king, white_pawn, black_king, true));
    }

    #[test]
    fn adjacent_king_captures_undefended_pawn() {
        // Black king stands right next to the pawn with the move and no
        // white piece anywhere near: it just takes the pawn.
        let white_king = 0; // a1
        let white_pawn = 3 * 8 + 4; // e4
        let black_king = 4 * 8 + 4; // e5, adjacent to the pawn
        assert!(!probe_kpk(white_king, white_pawn, black_king, false));
    }
}
