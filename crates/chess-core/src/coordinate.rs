//! Human-facing board coordinates.

use std::fmt;
use std::str::FromStr;

use crate::{GridPos, RuleViolation};

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files in order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(File::A),
            1 => Some(File::B),
            2 => Some(File::C),
            3 => Some(File::D),
            4 => Some(File::E),
            5 => Some(File::F),
            6 => Some(File::G),
            7 => Some(File::H),
            _ => None,
        }
    }

    /// Creates a file from a character ('a'-'h' or 'A'-'H').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(File::A),
            'b' => Some(File::B),
            'c' => Some(File::C),
            'd' => Some(File::D),
            'e' => Some(File::E),
            'f' => Some(File::F),
            'g' => Some(File::G),
            'h' => Some(File::H),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// All ranks in order.
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Creates a rank from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rank::R1),
            1 => Some(Rank::R2),
            2 => Some(Rank::R3),
            3 => Some(Rank::R4),
            4 => Some(Rank::R5),
            5 => Some(Rank::R6),
            6 => Some(Rank::R7),
            7 => Some(Rank::R8),
            _ => None,
        }
    }

    /// Creates a rank from a character ('1'-'8').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank::R1),
            '2' => Some(Rank::R2),
            '3' => Some(Rank::R3),
            '4' => Some(Rank::R4),
            '5' => Some(Rank::R5),
            '6' => Some(Rank::R6),
            '7' => Some(Rank::R7),
            '8' => Some(Rank::R8),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A board coordinate in chess notation: file letter plus rank number.
///
/// This is the coordinate form users type and see ("e2"). The engine works
/// in [`GridPos`] internally; the two are related by `row = 8 - rank` and
/// `col = file - 'a'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessCoordinate {
    file: File,
    rank: Rank,
}

impl ChessCoordinate {
    /// Creates a coordinate from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        ChessCoordinate { file, rank }
    }

    /// Returns the file.
    #[inline]
    pub const fn file(self) -> File {
        self.file
    }

    /// Returns the rank.
    #[inline]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    /// Converts to the internal grid position.
    #[inline]
    pub const fn to_grid(self) -> GridPos {
        // 7 - rank index because grid row 0 is rank 8.
        match GridPos::new(7 - self.rank.index(), self.file.index()) {
            Some(pos) => pos,
            None => unreachable!(),
        }
    }

    /// Converts an internal grid position back to chess notation.
    #[inline]
    pub const fn from_grid(pos: GridPos) -> Self {
        let file = match File::from_index(pos.col()) {
            Some(f) => f,
            None => unreachable!(),
        };
        let rank = match Rank::from_index(7 - pos.row()) {
            Some(r) => r,
            None => unreachable!(),
        };
        ChessCoordinate { file, rank }
    }
}

impl From<GridPos> for ChessCoordinate {
    #[inline]
    fn from(pos: GridPos) -> Self {
        ChessCoordinate::from_grid(pos)
    }
}

impl FromStr for ChessCoordinate {
    type Err = RuleViolation;

    /// Parses a coordinate from chess notation (e.g., "e4").
    ///
    /// Anything outside a1-h8 is rejected with
    /// [`RuleViolation::InvalidCoordinate`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RuleViolation::InvalidCoordinate(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = File::from_char(bytes[0] as char).ok_or_else(invalid)?;
        let rank = Rank::from_char(bytes[1] as char).ok_or_else(invalid)?;
        Ok(ChessCoordinate::new(file, rank))
    }
}

impl fmt::Display for ChessCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}
