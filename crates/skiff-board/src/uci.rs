//! Translation between UCI move text and the internal move encoding.
//!
//! UCI coordinates always describe the board with White at the bottom,
//! while the position and its moves live in the side to move's frame. The
//! codec mirrors ranks at this boundary and consults the position to
//! recover the move kind the four (or five) characters leave implicit.

use crate::Position;
use skiff_core::{Color, Move, MoveKind, Piece, Rank, Square};
use thiserror::Error;

/// Errors for UCI move strings that cannot be interpreted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UciMoveError {
    #[error("move string must be 4 or 5 characters, got {0}")]
    WrongLength(usize),

    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("no piece on the from-square '{0}'")]
    EmptyFromSquare(String),

    #[error("pawn move to the last rank needs a promotion letter")]
    MissingPromotion,

    #[error("invalid promotion letter '{0}'")]
    InvalidPromotion(char),
}

/// Parses a UCI move string (`e2e4`, `e7e8q`, ...) against a position.
///
/// The squares are re-expressed in the side to move's frame, then the
/// piece on the from-square decides the kind: a pawn landing on the
/// en-passant target captures en passant, a pawn reaching the last rank
/// promotes to the piece named by the fifth character, and a king moving
/// e1-g1 or e1-c1 castles. The move is not checked for legality; that is
/// the move generator's contract.
pub fn uci_to_move(position: &Position, text: &str) -> Result<Move, UciMoveError> {
    if !text.is_ascii() {
        return Err(UciMoveError::InvalidSquare(text.to_string()));
    }
    if text.len() != 4 && text.len() != 5 {
        return Err(UciMoveError::WrongLength(text.len()));
    }

    let from_ext = Square::from_algebraic(&text[0..2])
        .ok_or_else(|| UciMoveError::InvalidSquare(text[0..2].to_string()))?;
    let to_ext = Square::from_algebraic(&text[2..4])
        .ok_or_else(|| UciMoveError::InvalidSquare(text[2..4].to_string()))?;

    let (from, to) = if position.side_to_move() == Color::Black {
        (from_ext.flip_vertical(), to_ext.flip_vertical())
    } else {
        (from_ext, to_ext)
    };

    let id = position.piece_id(from);
    if id.is_empty() {
        return Err(UciMoveError::EmptyFromSquare(text[0..2].to_string()));
    }

    let promotion = if text.len() == 5 {
        let c = text.as_bytes()[4] as char;
        match c.to_ascii_lowercase() {
            'n' => Some(MoveKind::PromoteKnight),
            'b' => Some(MoveKind::PromoteBishop),
            'r' => Some(MoveKind::PromoteRook),
            'q' => Some(MoveKind::PromoteQueen),
            _ => return Err(UciMoveError::InvalidPromotion(c)),
        }
    } else {
        None
    };

    let kind = match id.piece() {
        Some(Piece::Pawn) => {
            if position.en_passant_square() == Some(to) {
                MoveKind::EnPassant
            } else if to.rank() == Rank::R8 {
                promotion.ok_or(UciMoveError::MissingPromotion)?
            } else {
                MoveKind::Quiet
            }
        }
        Some(Piece::King) if from == Square::E1 && to == Square::G1 => MoveKind::CastleKingside,
        Some(Piece::King) if from == Square::E1 && to == Square::C1 => MoveKind::CastleQueenside,
        _ => MoveKind::Quiet,
    };

    Ok(Move::new(from, to, kind))
}

/// Renders a move of this position as UCI text in the external
/// white-at-the-bottom frame.
pub fn move_to_uci(position: &Position, m: Move) -> String {
    let (from, to) = if position.side_to_move() == Color::Black {
        (m.from().flip_vertical(), m.to().flip_vertical())
    } else {
        (m.from(), m.to())
    };
    let mut text = format!("{}{}", from, to);
    if let Some(piece) = m.kind().promotion_piece() {
        text.push(piece.promotion_char());
    }
    text
}
