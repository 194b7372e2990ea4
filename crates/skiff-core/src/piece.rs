//! Piece identity codes.
//!
//! The board engine stores a position in three union words:
//! `pbq` (pawns, bishops, queens), `nbk` (knights, bishops, kings) and
//! `rqk` (rooks, queens, kings). The 3-bit piece code of a square is read
//! straight out of those words, weighted `pbq = 1`, `nbk = 2`, `rqk = 4`:
//!
//! | code | piece  |
//! |------|--------|
//! | 0    | empty  |
//! | 1    | pawn   |
//! | 2    | knight |
//! | 3    | bishop |
//! | 4    | rook   |
//! | 5    | queen  |
//! | 6    | king   |
//! | 7    | (none) |
//!
//! Code 7 would require a piece in all three words at once and is
//! unreachable from any legal position.

use crate::Color;

/// The six piece kinds, with the 3-bit union-word code as discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl Piece {
    /// All piece kinds in code order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Returns the 3-bit union-word code (1-6).
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Recovers a piece from a 3-bit code. `None` for 0 (empty) and 7
    /// (the impossible all-three-words combination).
    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Piece::Pawn),
            2 => Some(Piece::Knight),
            3 => Some(Piece::Bishop),
            4 => Some(Piece::Rook),
            5 => Some(Piece::Queen),
            6 => Some(Piece::King),
            _ => None,
        }
    }

    /// True if the piece occupies the `pbq` word (pawn, bishop, queen).
    #[inline]
    pub const fn in_pbq(self) -> bool {
        self.code() & 1 != 0
    }

    /// True if the piece occupies the `nbk` word (knight, bishop, king).
    #[inline]
    pub const fn in_nbk(self) -> bool {
        self.code() & 2 != 0
    }

    /// True if the piece occupies the `rqk` word (rook, queen, king).
    #[inline]
    pub const fn in_rqk(self) -> bool {
        self.code() & 4 != 0
    }

    /// Returns the FEN character for this piece with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a piece and color.
    pub const fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some((piece, color))
    }

    /// Returns the lowercase promotion letter used in UCI move strings.
    /// Only knight, bishop, rook and queen are valid promotion targets.
    #[inline]
    pub const fn promotion_char(self) -> char {
        match self {
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            _ => 'q',
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// The 4-bit per-square identity: the 3-bit piece code shifted left by one,
/// with bit 0 set when the piece belongs to the side to move.
///
/// `0b0000` is an empty square, `0bCCC1` one of our pieces, `0bCCC0` (with
/// a non-zero code) one of theirs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(u8);

impl PieceId {
    /// The identity of an empty square.
    pub const EMPTY: PieceId = PieceId(0);

    /// Builds an identity from a piece and ownership flag.
    #[inline]
    pub const fn new(piece: Piece, mine: bool) -> Self {
        PieceId(piece.code() << 1 | mine as u8)
    }

    /// Wraps a raw 4-bit identity as produced by the board's column probe.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        debug_assert!(bits < 16);
        PieceId(bits)
    }

    /// Returns the raw 4-bit value.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns the 3-bit piece code (0 for an empty square).
    #[inline]
    pub const fn code(self) -> u8 {
        self.0 >> 1
    }

    /// True if the square is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if the square holds a piece of the side to move.
    #[inline]
    pub const fn is_ours(self) -> bool {
        self.0 & 1 != 0
    }

    /// True if the square holds an opponent piece.
    #[inline]
    pub const fn is_theirs(self) -> bool {
        self.0 & 1 == 0 && self.0 != 0
    }

    /// Returns the piece kind, or `None` for an empty square.
    #[inline]
    pub const fn piece(self) -> Option<Piece> {
        Piece::from_code(self.code())
    }
}
