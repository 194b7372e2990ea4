//! FEN (Forsyth-Edwards Notation) field parsing and validation.

use crate::{Color, Piece, Rank, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// The six raw FEN fields, split and validated but not yet interpreted.
///
/// The board engine converts these into its packed position encoding;
/// this type guarantees the fields are well-formed and fit that encoding:
/// the placement respects the per-side piece budgets, the en-passant
/// square sits on the rank the side to move could capture on, and the
/// clock fits the 7-bit co-packed slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenFields {
    /// Piece placement string (e.g., "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
    pub placement: String,
    /// The side to move
    pub active_color: Color,
    /// Castling availability (e.g., "KQkq", "-")
    pub castling: String,
    /// En passant target square (e.g., "e3", "-")
    pub en_passant: String,
    /// Halfmove clock (for the 50-move rule), at most 100
    pub halfmove_clock: u8,
    /// Fullmove number
    pub fullmove_number: u16,
}

impl FenFields {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses and validates a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();

        if fields.len() != 6 {
            return Err(FenError::InvalidFieldCount(fields.len()));
        }

        let placement = fields[0];
        Self::validate_placement(placement)?;

        let active_color = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = fields[2];
        Self::validate_castling(castling)?;

        let en_passant = fields[3];
        Self::validate_en_passant(en_passant, active_color)?;

        // The clock is co-packed into a pair of 7-bit slots by the board
        // engine and bounded by the 50-move rule.
        let halfmove_clock = fields[4]
            .parse::<u8>()
            .ok()
            .filter(|&clock| clock <= 100)
            .ok_or_else(|| FenError::InvalidHalfmoveClock(fields[4].to_string()))?;

        let fullmove_number = fields[5]
            .parse::<u16>()
            .map_err(|_| FenError::InvalidFullmoveNumber(fields[5].to_string()))?;

        Ok(FenFields {
            placement: placement.to_string(),
            active_color,
            castling: castling.to_string(),
            en_passant: en_passant.to_string(),
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Checks rank shapes and the per-side piece budgets the packed
    /// encoding relies on: at most one king and eight pawns per side, and
    /// no pawn on a back rank.
    fn validate_placement(placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut kings = [0u32; 2];
        let mut pawns = [0u32; 2];

        for (i, rank) in ranks.iter().enumerate() {
            let mut squares = 0;
            for c in rank.chars() {
                if let Some(digit) = c.to_digit(10) {
                    squares += digit;
                } else if let Some((piece, color)) = Piece::from_fen_char(c) {
                    match piece {
                        Piece::King => kings[color.index()] += 1,
                        Piece::Pawn => {
                            if i == 0 || i == 7 {
                                return Err(FenError::InvalidPiecePlacement(format!(
                                    "pawn on rank {}",
                                    8 - i
                                )));
                            }
                            pawns[color.index()] += 1;
                        }
                        _ => {}
                    }
                    squares += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - i
                    )));
                }
            }
            if squares != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - i,
                    squares
                )));
            }
        }

        for color in [Color::White, Color::Black] {
            if kings[color.index()] > 1 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "more than one {} king",
                    color
                )));
            }
            if pawns[color.index()] > 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "more than eight {} pawns",
                    color
                )));
            }
        }

        Ok(())
    }

    /// Checks the castling field against the four rights, rejecting
    /// unknown letters and a right granted twice.
    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }

        let mut granted = 0u8;
        for c in castling.chars() {
            let right = match c {
                'K' => 1u8,
                'Q' => 1 << 1,
                'k' => 1 << 2,
                'q' => 1 << 3,
                _ => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        c
                    )))
                }
            };
            if granted & right != 0 {
                return Err(FenError::InvalidCastlingRights(format!(
                    "duplicate '{}'",
                    c
                )));
            }
            granted |= right;
        }

        Ok(())
    }

    /// Checks the en-passant field. The target is the square behind a
    /// pawn that just advanced two ranks, so it must sit on rank 6 when
    /// White is to move and on rank 3 when Black is; anywhere else would
    /// corrupt the board's auxiliary word.
    fn validate_en_passant(ep: &str, active_color: Color) -> Result<(), FenError> {
        if ep == "-" {
            return Ok(());
        }

        let target = match Square::from_algebraic(ep) {
            Some(sq) => sq,
            None => return Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        };
        let expected = match active_color {
            Color::White => Rank::R6,
            Color::Black => Rank::R3,
        };
        if target.rank() != expected {
            return Err(FenError::InvalidEnPassantSquare(ep.to_string()));
        }

        Ok(())
    }

    /// Reassembles the fields into a FEN string.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.placement,
            self.active_color.fen_char(),
            self.castling,
            self.en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl Default for FenFields {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let fen = FenFields::parse(FenFields::STARTPOS).unwrap();
        assert_eq!(fen.active_color, Color::White);
        assert_eq!(fen.castling, "KQkq");
        assert_eq!(fen.en_passant, "-");
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
    }

    #[test]
    fn parse_custom_position() {
        let fen =
            FenFields::parse("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
                .unwrap();
        assert_eq!(fen.active_color, Color::White);
        assert_eq!(fen.halfmove_clock, 2);
        assert_eq!(fen.fullmove_number, 3);
    }

    #[test]
    fn roundtrip() {
        let original = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let parsed = FenFields::parse(original).unwrap();
        assert_eq!(parsed.to_fen(), original);
    }

    #[test]
    fn invalid_field_count() {
        assert!(matches!(
            FenFields::parse("invalid"),
            Err(FenError::InvalidFieldCount(_))
        ));
    }

    #[test]
    fn invalid_active_color() {
        assert!(matches!(
            FenFields::parse("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_placement_rank_count() {
        assert!(matches!(
            FenFields::parse("8/8/8/8/8/8/8 w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_placement_char() {
        assert!(matches!(
            FenFields::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_placement_square_count() {
        // a rank with 9 squares
        assert!(matches!(
            FenFields::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_placement_two_kings() {
        assert!(matches!(
            FenFields::parse("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_placement_nine_pawns() {
        assert!(matches!(
            FenFields::parse("4k3/8/8/8/P7/8/PPPPPPPP/4K3 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_placement_pawn_on_back_rank() {
        assert!(matches!(
            FenFields::parse("4k3/8/8/8/8/8/8/P3K3 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenFields::parse("p3k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn kingless_studies_still_parse() {
        // The budgets bound the counts from above only; empty boards and
        // bare-king studies stay parseable.
        assert!(FenFields::parse("8/8/8/8/8/8/8/8 w - - 0 1").is_ok());
        assert!(FenFields::parse("8/8/8/8/8/8/8/K6k w - - 0 1").is_ok());
    }

    #[test]
    fn invalid_castling_rights() {
        assert!(matches!(
            FenFields::parse("8/8/8/8/8/8/8/8 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
    }

    #[test]
    fn duplicate_castling_right() {
        assert!(matches!(
            FenFields::parse("8/8/8/8/8/8/8/8 w KKq - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
    }

    #[test]
    fn invalid_en_passant() {
        for bad in ["abc", "x3", "e4"] {
            let fen = format!("8/8/8/8/8/8/8/8 w - {} 0 1", bad);
            assert!(matches!(
                FenFields::parse(&fen),
                Err(FenError::InvalidEnPassantSquare(_))
            ));
        }
    }

    #[test]
    fn en_passant_rank_follows_side_to_move() {
        // White to move captures onto rank 6, Black onto rank 3.
        assert!(FenFields::parse("8/8/8/8/8/8/8/8 w - e6 0 1").is_ok());
        assert!(FenFields::parse("8/8/8/8/8/8/8/8 b - e3 0 1").is_ok());
        assert!(matches!(
            FenFields::parse("8/8/8/8/8/8/8/8 w - e3 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            FenFields::parse("8/8/8/8/8/8/8/8 b - e6 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
    }

    #[test]
    fn invalid_halfmove_clock() {
        assert!(matches!(
            FenFields::parse("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        // over the 50-move-rule bound
        assert!(matches!(
            FenFields::parse("8/8/8/8/8/8/8/8 w - - 101 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
    }

    #[test]
    fn halfmove_clock_bound_inclusive() {
        let fen = FenFields::parse("8/8/8/8/8/8/8/8 w - - 100 1").unwrap();
        assert_eq!(fen.halfmove_clock, 100);
    }

    #[test]
    fn invalid_fullmove_number() {
        assert!(matches!(
            FenFields::parse("8/8/8/8/8/8/8/8 w - - 0 xyz"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn default_is_startpos() {
        let fen = FenFields::default();
        assert_eq!(fen.active_color, Color::White);
        assert_eq!(fen.to_fen(), FenFields::STARTPOS);
    }

    #[test]
    fn black_to_move_with_en_passant() {
        let fen = FenFields::parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .unwrap();
        assert_eq!(fen.active_color, Color::Black);
        assert_eq!(fen.en_passant, "e3");
    }

    #[test]
    fn partial_castling() {
        let fen = FenFields::parse("8/8/8/8/8/8/8/8 w Kq - 0 1").unwrap();
        assert_eq!(fen.castling, "Kq");
    }

    #[test]
    fn error_messages_carry_token() {
        let err = FenError::InvalidFieldCount(3);
        assert!(format!("{}", err).contains('3'));

        let err = FenError::InvalidActiveColor("x".to_string());
        assert!(format!("{}", err).contains('x'));

        let err = FenError::InvalidEnPassantSquare("z9".to_string());
        assert!(format!("{}", err).contains("z9"));
    }
}
