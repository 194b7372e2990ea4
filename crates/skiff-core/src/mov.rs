//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// The 4-bit move-kind tag.
///
/// Quiet moves, ordinary captures and double pawn pushes all carry the
/// `Quiet` tag; the board distinguishes them from position state when the
/// move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    /// Quiet move, ordinary capture, or double pawn push.
    Quiet = 0,
    /// Kingside castling (O-O).
    CastleKingside = 1,
    /// Queenside castling (O-O-O).
    CastleQueenside = 2,
    /// En passant capture.
    EnPassant = 3,
    /// Pawn promotion to knight.
    PromoteKnight = 4,
    /// Pawn promotion to bishop.
    PromoteBishop = 5,
    /// Pawn promotion to rook.
    PromoteRook = 6,
    /// Pawn promotion to queen.
    PromoteQueen = 7,
}

impl MoveKind {
    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        match self {
            MoveKind::PromoteKnight => Some(Piece::Knight),
            MoveKind::PromoteBishop => Some(Piece::Bishop),
            MoveKind::PromoteRook => Some(Piece::Rook),
            MoveKind::PromoteQueen => Some(Piece::Queen),
            _ => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self as u8 >= MoveKind::PromoteKnight as u8
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }

    /// Builds the promotion kind for a piece, if it is a legal promotion
    /// target.
    #[inline]
    pub const fn promotion_to(piece: Piece) -> Option<Self> {
        match piece {
            Piece::Knight => Some(MoveKind::PromoteKnight),
            Piece::Bishop => Some(MoveKind::PromoteBishop),
            Piece::Rook => Some(MoveKind::PromoteRook),
            Piece::Queen => Some(MoveKind::PromoteQueen),
            _ => None,
        }
    }
}

/// A chess move, encoded in 16 bits: 6 bits from-square, 6 bits to-square,
/// 4 bits move kind.
///
/// The squares are expressed in whatever frame the position they apply to
/// is stored in; the board engine keeps the side to move at the bottom, so
/// a move's coordinates are relative to the mover. Conversion to and from
/// the external always-white-at-the-bottom notation lives with the UCI
/// codec, which knows the side to move.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        let encoded =
            (from.index() as u16) | ((to.index() as u16) << 6) | ((kind as u16) << 12);
        Move(encoded)
    }

    /// Creates a quiet move (also used for ordinary captures and double
    /// pawn pushes).
    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::Quiet)
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        // SAFETY: masked to 6 bits, always a valid square index
        unsafe { Square::from_index_unchecked((self.0 & 0x3F) as u8) }
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        // SAFETY: masked to 6 bits, always a valid square index
        unsafe { Square::from_index_unchecked(((self.0 >> 6) & 0x3F) as u8) }
    }

    /// Returns the move kind.
    #[inline]
    pub const fn kind(self) -> MoveKind {
        match (self.0 >> 12) as u8 {
            0 => MoveKind::Quiet,
            1 => MoveKind::CastleKingside,
            2 => MoveKind::CastleQueenside,
            3 => MoveKind::EnPassant,
            4 => MoveKind::PromoteKnight,
            5 => MoveKind::PromoteBishop,
            6 => MoveKind::PromoteRook,
            7 => MoveKind::PromoteQueen,
            _ => MoveKind::Quiet,
        }
    }

    /// Returns the raw 16-bit encoding.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// A null move placeholder, not a legal move.
    pub const NULL: Move = Move(0);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self)
    }
}

impl fmt::Display for Move {
    /// Renders the raw frame-relative coordinates with an optional
    /// promotion letter. Useful for debugging; use the UCI codec for
    /// externally valid move text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(piece) = self.kind().promotion_piece() {
            write!(f, "{}", piece.promotion_char())?;
        }
        Ok(())
    }
}
