//! Legal move generation.
//!
//! Because the position is always stored from the side to move's
//! viewpoint, there is exactly one set of directions to generate: pawns
//! push north, the double push starts on rank 2, promotions happen on
//! rank 8, and castling always departs from e1. Legality is settled by
//! applying each candidate and probing the mover's king.

pub mod attacks;
pub mod perft;

use crate::{Bitboard, Position};
use skiff_core::{Move, MoveKind, Rank, Square};

pub use attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
};
pub use perft::{perft, perft_divide};

/// A list of moves with a fixed maximum capacity.
///
/// No chess position has more than 218 legal moves, so a fixed-size array
/// avoids heap allocation during generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Upper bound on moves in any position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all legal moves for the side to move, in its frame.
pub fn generate_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();

    generate_pawn_moves(position, &mut moves);
    generate_knight_moves(position, &mut moves);
    generate_slider_moves(position, &mut moves);
    generate_king_moves(position, &mut moves);
    generate_castling_moves(position, &mut moves);

    // A move is legal when the mover's own king survives it.
    moves.retain(|m| {
        let mut next = *position;
        next.make_move(*m);
        !mover_left_in_check(&next)
    });

    moves
}

/// After a move the mover's pieces are "them"; the move was illegal if the
/// new side to move can take the mover's king.
fn mover_left_in_check(position: &Position) -> bool {
    match (position.kings() & position.them()).lsb() {
        Some(king) => attacked_by_us(position, king),
        None => false,
    }
}

fn generate_pawn_moves(position: &Position, moves: &mut MoveList) {
    let pawns = position.pawns() & position.us();
    let empty = !position.occupancy();

    let single = pawns.north() & empty;
    for to in single {
        // SAFETY: a pushed pawn came from one rank below
        let from = unsafe { Square::from_index_unchecked(to.index() - 8) };
        push_pawn_move(moves, from, to);
    }

    // A double push passes through the empty rank-3 square.
    let double = (single & Bitboard::RANK_3).north() & empty;
    for to in double {
        // SAFETY: the pawn came from rank 2
        let from = unsafe { Square::from_index_unchecked(to.index() - 16) };
        moves.push(Move::quiet(from, to));
    }

    for from in pawns {
        let captures = pawn_attacks(from) & position.them();
        for to in captures {
            push_pawn_move(moves, from, to);
        }
    }

    if let Some(target) = position.en_passant_square() {
        let target_bb = Bitboard::from_square(target);
        let capturers = (target_bb.south_east() | target_bb.south_west()) & pawns;
        for from in capturers {
            moves.push(Move::new(from, target, MoveKind::EnPassant));
        }
    }
}

fn push_pawn_move(moves: &mut MoveList, from: Square, to: Square) {
    if to.rank() == Rank::R8 {
        moves.push(Move::new(from, to, MoveKind::PromoteQueen));
        moves.push(Move::new(from, to, MoveKind::PromoteRook));
        moves.push(Move::new(from, to, MoveKind::PromoteBishop));
        moves.push(Move::new(from, to, MoveKind::PromoteKnight));
    } else {
        moves.push(Move::quiet(from, to));
    }
}

fn generate_knight_moves(position: &Position, moves: &mut MoveList) {
    let knights = position.knights() & position.us();
    for from in knights {
        for to in knight_attacks(from) & !position.us() {
            moves.push(Move::quiet(from, to));
        }
    }
}

fn generate_slider_moves(position: &Position, moves: &mut MoveList) {
    let occupied = position.occupancy();
    let us = position.us();

    for from in position.bishops() & us {
        for to in bishop_attacks(from, occupied) & !us {
            moves.push(Move::quiet(from, to));
        }
    }
    for from in position.rooks() & us {
        for to in rook_attacks(from, occupied) & !us {
            moves.push(Move::quiet(from, to));
        }
    }
    for from in position.queens() & us {
        for to in queen_attacks(from, occupied) & !us {
            moves.push(Move::quiet(from, to));
        }
    }
}

fn generate_king_moves(position: &Position, moves: &mut MoveList) {
    if let Some(from) = (position.kings() & position.us()).lsb() {
        for to in king_attacks(from) & !position.us() {
            moves.push(Move::quiet(from, to));
        }
    }
}

fn generate_castling_moves(position: &Position, moves: &mut MoveList) {
    let rights = position.castling_rights();
    if !rights.ours_kingside() && !rights.ours_queenside() {
        return;
    }
    // No castling out of check.
    if attacked_by_them(position, Square::E1) {
        return;
    }

    let occupied = position.occupancy();
    // f1 and g1
    const KINGSIDE_SPACE: Bitboard = Bitboard(0x60);
    // b1, c1 and d1
    const QUEENSIDE_SPACE: Bitboard = Bitboard(0x0E);

    // The king may not pass through an attacked square; the landing square
    // is covered by the ordinary legality filter.
    if rights.ours_kingside()
        && (occupied & KINGSIDE_SPACE).is_empty()
        && !attacked_by_them(position, Square::F1)
    {
        moves.push(Move::new(Square::E1, Square::G1, MoveKind::CastleKingside));
    }
    if rights.ours_queenside()
        && (occupied & QUEENSIDE_SPACE).is_empty()
        && !attacked_by_them(position, Square::D1)
    {
        moves.push(Move::new(Square::E1, Square::C1, MoveKind::CastleQueenside));
    }
}

/// Returns true if the side to move attacks `sq`.
pub fn attacked_by_us(position: &Position, sq: Square) -> bool {
    let us = position.us();
    let occupied = position.occupancy();
    let bb = Bitboard::from_square(sq);

    // Our pawns attack north, so a pawn attacker sits to the south of sq.
    ((bb.south_east() | bb.south_west()) & position.pawns() & us).is_not_empty()
        || (knight_attacks(sq) & position.knights() & us).is_not_empty()
        || (king_attacks(sq) & position.kings() & us).is_not_empty()
        || (bishop_attacks(sq, occupied) & position.diag_sliders() & us).is_not_empty()
        || (rook_attacks(sq, occupied) & position.orth_sliders() & us).is_not_empty()
}

/// Returns true if the opponent attacks `sq`.
pub fn attacked_by_them(position: &Position, sq: Square) -> bool {
    let them = position.them();
    let occupied = position.occupancy();
    let bb = Bitboard::from_square(sq);

    // Their pawns attack south, so a pawn attacker sits to the north of sq.
    ((bb.north_east() | bb.north_west()) & position.pawns() & them).is_not_empty()
        || (knight_attacks(sq) & position.knights() & them).is_not_empty()
        || (king_attacks(sq) & position.kings() & them).is_not_empty()
        || (bishop_attacks(sq, occupied) & position.diag_sliders() & them).is_not_empty()
        || (rook_attacks(sq, occupied) & position.orth_sliders() & them).is_not_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn count_kind(moves: &MoveList, kind: MoveKind) -> usize {
        moves.as_slice().iter().filter(|m| m.kind() == kind).count()
    }

    #[test]
    fn movelist_push_and_index() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let m1 = Move::quiet(sq("e2"), sq("e4"));
        let m2 = Move::quiet(sq("d2"), sq("d4"));
        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
    }

    #[test]
    fn movelist_clear_and_retain() {
        let mut list = MoveList::new();
        list.push(Move::quiet(sq("e2"), sq("e3")));
        list.push(Move::quiet(sq("e2"), sq("e4")));
        list.push(Move::quiet(sq("d2"), sq("d4")));

        list.retain(|m| m.from() == sq("e2"));
        assert_eq!(list.len(), 2);

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let position = Position::startpos();
        assert_eq!(generate_moves(&position).len(), 20);
    }

    #[test]
    fn black_generates_in_its_own_frame() {
        let mut position = Position::startpos();
        position.make_move(Move::quiet(sq("e2"), sq("e4")));
        let moves = generate_moves(&position);
        assert_eq!(moves.len(), 20);
        // Black's pawn pushes also read as rank-2-to-rank-3 moves.
        assert!(moves
            .as_slice()
            .iter()
            .any(|m| m.from() == sq("e2") && m.to() == sq("e4")));
    }

    #[test]
    fn castling_generated_when_clear() {
        let position =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let moves = generate_moves(&position);
        assert_eq!(count_kind(&moves, MoveKind::CastleKingside), 1);
        assert_eq!(count_kind(&moves, MoveKind::CastleQueenside), 1);
    }

    #[test]
    fn castling_blocked_by_pieces() {
        let position =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R2QK2R w KQkq - 0 1").unwrap();
        let moves = generate_moves(&position);
        assert_eq!(count_kind(&moves, MoveKind::CastleKingside), 1);
        assert_eq!(count_kind(&moves, MoveKind::CastleQueenside), 0);
    }

    #[test]
    fn no_castling_through_check() {
        // A rook on f5 covers f1, the square the king passes through.
        let position =
            Position::from_fen("r3k2r/pppp1ppp/8/5r2/8/8/PPPP2PP/R3K2R w KQkq - 0 1").unwrap();
        let moves = generate_moves(&position);
        assert_eq!(count_kind(&moves, MoveKind::CastleKingside), 0);
        assert_eq!(count_kind(&moves, MoveKind::CastleQueenside), 1);
    }

    #[test]
    fn no_castling_out_of_check() {
        let position =
            Position::from_fen("r3k2r/pppp1ppp/8/4r3/8/8/PPPP2PP/R3K2R w KQkq - 0 1").unwrap();
        let moves = generate_moves(&position);
        assert_eq!(count_kind(&moves, MoveKind::CastleKingside), 0);
        assert_eq!(count_kind(&moves, MoveKind::CastleQueenside), 0);
    }

    #[test]
    fn castling_without_rights_not_generated() {
        let position =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - - 0 1").unwrap();
        let moves = generate_moves(&position);
        assert_eq!(count_kind(&moves, MoveKind::CastleKingside), 0);
        assert_eq!(count_kind(&moves, MoveKind::CastleQueenside), 0);
    }

    #[test]
    fn en_passant_generated() {
        let position =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3")
                .unwrap();
        let moves = generate_moves(&position);
        assert_eq!(count_kind(&moves, MoveKind::EnPassant), 1);
    }

    #[test]
    fn en_passant_pinned_capturer_rejected() {
        // Taking en passant would clear both pawns off the fifth rank and
        // expose the king to the rook.
        let position =
            Position::from_fen("8/8/8/KPp4r/8/8/8/4k3 w - c6 0 1").unwrap();
        let moves = generate_moves(&position);
        assert_eq!(count_kind(&moves, MoveKind::EnPassant), 0);
    }

    #[test]
    fn promotions_generated_in_quadruplets() {
        let position = Position::from_fen("8/P7/8/8/8/8/8/4K2k w - - 0 1").unwrap();
        let moves = generate_moves(&position);
        let promotions = moves
            .as_slice()
            .iter()
            .filter(|m| m.kind().is_promotion())
            .count();
        assert_eq!(promotions, 4);
    }

    #[test]
    fn fools_mate_is_mate() {
        // 1.f3 e5 2.g4 Qh4#
        let position =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert!(generate_moves(&position).is_empty());
    }

    #[test]
    fn evasions_only_while_in_check() {
        // A rook check on the e-file: every reply must parry it.
        let position =
            Position::from_fen("4r1k1/8/8/8/8/8/3P1P2/4K3 w - - 0 1").unwrap();
        let moves = generate_moves(&position);
        assert!(!moves.is_empty());
        for m in &moves {
            let mut next = position;
            next.make_move(*m);
            assert!(!mover_left_in_check(&next), "illegal move {} survived", m);
        }
        // The king must step off the e-file; the pawns cannot block.
        assert!(moves.as_slice().iter().all(|m| m.from() == sq("e1")));
    }

    #[test]
    fn attacked_probes_agree_with_pawn_geometry() {
        let position = Position::startpos();
        // e3 is covered by our d2 and f2 pawns.
        assert!(attacked_by_us(&position, sq("e3")));
        assert!(!attacked_by_us(&position, sq("e5")));
        // e6 is covered by their d7 and f7 pawns.
        assert!(attacked_by_them(&position, sq("e6")));
        assert!(!attacked_by_them(&position, sq("e4")));
    }

    #[test]
    fn stalemate_has_no_moves() {
        let position = Position::from_fen("k7/8/1Q6/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert!(generate_moves(&position).is_empty());
    }

    #[test]
    fn checkmate_has_no_moves() {
        // Back-rank mate.
        let position = Position::from_fen("R3k3/8/4K3/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(generate_moves(&position).is_empty());
    }
}
