//! Attack sets for every piece kind.
//!
//! Knight and king targets come from tables built at compile time; sliding
//! attacks walk their rays against the blocker set at the call site. The
//! board core only consults these for legality probes and castling checks,
//! so the plain ray walk is plenty.

use crate::Bitboard;
use skiff_core::Square;

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const DIAGONAL_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONAL_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&KNIGHT_DELTAS);
const KING_ATTACKS: [Bitboard; 64] = leaper_table(&KING_DELTAS);

/// Builds a 64-entry target table for a piece that jumps by fixed offsets.
const fn leaper_table(deltas: &[(i8, i8); 8]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut bits = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            let r = rank + deltas[i].0;
            let f = file + deltas[i].1;
            if r >= 0 && r < 8 && f >= 0 && f < 8 {
                bits |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }
        table[sq] = Bitboard(bits);
        sq += 1;
    }
    table
}

/// Returns knight targets from the given square.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index() as usize]
}

/// Returns king targets from the given square.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index() as usize]
}

/// Returns the squares a pawn of the side to move attacks from `sq`.
/// Pawns always advance north in the side-relative frame.
#[inline]
pub fn pawn_attacks(sq: Square) -> Bitboard {
    let bb = Bitboard::from_square(sq);
    bb.north_east() | bb.north_west()
}

/// Walks the four rays in `rays` from `sq`, stopping at (and including)
/// the first blocker on each.
fn ray_attacks(sq: Square, occupied: Bitboard, rays: &[(i8, i8); 4]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    let rank = (sq.index() / 8) as i8;
    let file = (sq.index() % 8) as i8;
    for &(dr, df) in rays {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            // SAFETY: r and f were just bounds-checked
            let target = unsafe { Square::from_index_unchecked((r * 8 + f) as u8) };
            attacks.set(target);
            if occupied.contains(target) {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

/// Returns bishop attacks from `sq` against the given blocker set.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, &DIAGONAL_RAYS)
}

/// Returns rook attacks from `sq` against the given blocker set.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, &ORTHOGONAL_RAYS)
}

/// Returns queen attacks from `sq` against the given blocker set.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}
