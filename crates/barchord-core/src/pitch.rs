//! Natural pitch classes

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven natural note letters, ignoring octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

/// The natural scale in letter order, starting from C.
pub const NATURAL_SCALE: [PitchClass; 7] = [
    PitchClass::C,
    PitchClass::D,
    PitchClass::E,
    PitchClass::F,
    PitchClass::G,
    PitchClass::A,
    PitchClass::B,
];

impl PitchClass {
    /// Parse a note letter, case-insensitive
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'c' => Some(Self::C),
            'd' => Some(Self::D),
            'e' => Some(Self::E),
            'f' => Some(Self::F),
            'g' => Some(Self::G),
            'a' => Some(Self::A),
            'b' => Some(Self::B),
            _ => None,
        }
    }

    /// Position within `NATURAL_SCALE`
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::A => 'A',
            Self::B => 'B',
        }
    }

    /// The seven naturals rotated so the scale begins on `self`
    pub fn scale_from(self, naturals: &[PitchClass; 7]) -> [PitchClass; 7] {
        let mut scale = *naturals;
        let start = naturals.iter().position(|&p| p == self).unwrap_or(0);
        scale.rotate_left(start);
        scale
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
