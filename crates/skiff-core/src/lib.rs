//! Core types for the Skiff chess engine.
//!
//! This crate provides the fundamental types shared by the board engine and
//! its callers:
//! - [`Color`] for the two players
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Piece`] and [`PieceId`] for the packed piece identity codes
//! - [`Move`] and [`MoveKind`] for the 16-bit move encoding
//! - FEN field parsing and validation
//!
//! None of these types hold board state; the position representation lives
//! in the `skiff-board` crate.

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenFields};
pub use mov::{Move, MoveKind};
pub use piece::{Piece, PieceId};
pub use square::{File, Rank, Square};
