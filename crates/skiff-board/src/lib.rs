//! Quad-bitboard position engine for the Skiff chess engine.
//!
//! This crate answers the two questions the search asks in its innermost
//! loops: *what are the legal moves here?* and *what does the board look
//! like after this move?*
//!
//! # Representation
//!
//! A [`Position`] packs the whole board into five 64-bit words: the side
//! to move's occupancy plus three piece-union words (`pawns|bishops|queens`,
//! `knights|bishops|kings`, `rooks|queens|kings`) whose per-square bit
//! columns spell out a 3-bit piece code, and one auxiliary word carrying
//! castling anchors, the en-passant target and a pair of co-packed halfmove
//! clocks with the side-to-move sentinel.
//!
//! The position is always stored from the side to move's point of view:
//! applying a move ends with a whole-board byte swap, so the mover's home
//! rank is rank 1 in every position the engine ever looks at. Move
//! generation therefore needs only one set of pawn and castling directions,
//! and [`Position::make_move`] updates every piece of state branchlessly.
//! The standard white-at-the-bottom frame exists only at the FEN and UCI
//! boundaries.
//!
//! # Example
//!
//! ```
//! use skiff_board::{uci_to_move, Position};
//!
//! let mut position = Position::startpos();
//! let m = uci_to_move(&position, "e2e4").unwrap();
//! position.make_move(m);
//! assert_eq!(
//!     position.to_fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//! ```

mod bitboard;
pub mod movegen;
mod position;
mod uci;

pub use bitboard::{pdep, pext, Bitboard};
pub use movegen::{generate_moves, perft, MoveList};
pub use position::{castling_diff, CastlingRights, Position};
pub use uci::{move_to_uci, uci_to_move, UciMoveError};
