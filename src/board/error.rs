//! Error types for board operations.

use std::error::Error;
use std::fmt;

/// Errors from FEN parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Too few whitespace-separated fields
    TooFewParts { found: usize },
    /// More than eight ranks in the placement field
    InvalidRank { rank: usize },
    /// A rank describes more than eight files
    TooManyFiles { rank: usize, files: usize },
    /// Unknown piece character
    InvalidPiece { ch: char },
    /// Side-to-move field is not "w" or "b"
    InvalidSideToMove { found: String },
    /// Unknown castling character
    InvalidCastling { ch: char },
    /// En passant field is not "-" or a valid square
    InvalidEnPassant { found: String },
    /// A side has no king or more than one king
    BadKingCount { white: u32, black: u32 },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN has {found} fields, expected at least 4")
            }
            FenError::InvalidRank { rank } => write!(f, "FEN has too many ranks (rank {rank})"),
            FenError::TooManyFiles { rank, files } => {
                write!(f, "rank {rank} describes {files} files")
            }
            FenError::InvalidPiece { ch } => write!(f, "invalid piece character '{ch}'"),
            FenError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}'")
            }
            FenError::InvalidCastling { ch } => write!(f, "invalid castling character '{ch}'"),
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant target '{found}'")
            }
            FenError::BadKingCount { white, black } => {
                write!(f, "position has {white} white and {black} black kings")
            }
        }
    }
}

impl Error for FenError {}

/// Errors from parsing a move in long algebraic notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string is not 4 or 5 characters
    InvalidLength { len: usize },
    /// A square is not in file+rank form
    InvalidSquare { notation: String },
    /// Promotion character is not one of q, r, b, n
    InvalidPromotion { ch: char },
    /// The move does not match any legal move in the position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "move string has length {len}, expected 4 or 5")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "invalid square in move '{notation}'")
            }
            MoveParseError::InvalidPromotion { ch } => {
                write!(f, "invalid promotion piece '{ch}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "move '{notation}' is not legal in this position")
            }
        }
    }
}

impl Error for MoveParseError {}

/// Errors from square notation parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Not a two-character file+rank string
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::InvalidNotation { notation } => {
                write!(f, "invalid square notation '{notation}'")
            }
        }
    }
}

impl Error for SquareError {}
