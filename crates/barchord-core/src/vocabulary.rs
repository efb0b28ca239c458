//! Diatonic chord vocabulary for a key

use crate::error::{BarchordError, Result};
use crate::key::{Key, Mode};
use crate::pitch::{NATURAL_SCALE, PitchClass};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Chord Types
// ============================================================================

/// Triad quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quality {
    Major,
    Minor,
    Diminished,
}

impl Quality {
    /// Suffix appended to the root letter in a chord name
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Major => "",
            Self::Minor => "m",
            Self::Diminished => "dim",
        }
    }

    /// The triad quality that matches a key's own mode
    pub fn of_mode(mode: Mode) -> Self {
        match mode {
            Mode::Major => Self::Major,
            Mode::Minor => Self::Minor,
        }
    }
}

/// Chord name: root letter plus quality, e.g. `C`, `Dm`, `Bdim`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChordName {
    pub root: PitchClass,
    pub quality: Quality,
}

impl ChordName {
    pub fn new(root: PitchClass, quality: Quality) -> Self {
        Self { root, quality }
    }
}

impl fmt::Display for ChordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality.suffix())
    }
}

/// A triad: name plus its root, third and fifth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    pub name: ChordName,
    pub tones: [PitchClass; 3],
}

impl Chord {
    pub fn contains(&self, pitch: PitchClass) -> bool {
        self.tones.contains(&pitch)
    }
}

// ============================================================================
// Quality Tables
// ============================================================================

/// Triad qualities on scale degrees 1..7 of a major key
pub const MAJOR_QUALITIES: [Quality; 7] = [
    Quality::Major,
    Quality::Minor,
    Quality::Minor,
    Quality::Major,
    Quality::Major,
    Quality::Minor,
    Quality::Diminished,
];

/// Triad qualities on scale degrees 1..7 of a minor key
pub const MINOR_QUALITIES: [Quality; 7] = [
    Quality::Minor,
    Quality::Diminished,
    Quality::Major,
    Quality::Minor,
    Quality::Minor,
    Quality::Major,
    Quality::Major,
];

/// The constant tables the generator reads from
#[derive(Debug, Clone, Copy)]
pub struct HarmonyTables<'a> {
    pub naturals: &'a [PitchClass; 7],
    pub major: &'a [Quality; 7],
    pub minor: &'a [Quality; 7],
}

impl HarmonyTables<'_> {
    pub fn qualities(&self, mode: Mode) -> &[Quality; 7] {
        match mode {
            Mode::Major => self.major,
            Mode::Minor => self.minor,
        }
    }
}

pub const DEFAULT_TABLES: HarmonyTables<'static> = HarmonyTables {
    naturals: &NATURAL_SCALE,
    major: &MAJOR_QUALITIES,
    minor: &MINOR_QUALITIES,
};

// ============================================================================
// Vocabulary Generator
// ============================================================================

/// The candidate chords for one tune, in scale-degree order.
///
/// Built once per key and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordVocabulary {
    key: Key,
    chords: Vec<Chord>,
}

impl ChordVocabulary {
    /// Generate the vocabulary for `key` from the default tables
    pub fn generate(key: Key, include_diminished: bool) -> Self {
        Self::generate_with(&DEFAULT_TABLES, key, include_diminished)
    }

    /// Generate the vocabulary for `key` from explicit tables.
    ///
    /// Each scale degree gets the triad built on itself: scale notes at
    /// positions (i, i+2, i+4) mod 7, walking from the key root.
    pub fn generate_with(tables: &HarmonyTables<'_>, key: Key, include_diminished: bool) -> Self {
        let scale = key.root.scale_from(tables.naturals);
        let qualities = tables.qualities(key.mode);

        let chords = (0..scale.len())
            .filter(|&i| include_diminished || qualities[i] != Quality::Diminished)
            .map(|i| Chord {
                name: ChordName::new(scale[i], qualities[i]),
                tones: [scale[i], scale[(i + 2) % 7], scale[(i + 4) % 7]],
            })
            .collect();

        Self { key, chords }
    }

    /// Generate from a textual root letter such as `"a"` or `"C"`
    pub fn from_root_str(root: &str, mode: Mode, include_diminished: bool) -> Result<Self> {
        let root = root.trim();
        let mut chars = root.chars();
        let Some(letter) = chars.next() else {
            return Err(BarchordError::InvalidRoot(root.to_string()));
        };
        let rest = chars.as_str();
        let pitch = PitchClass::from_char(letter)
            .ok_or_else(|| BarchordError::InvalidRoot(root.to_string()))?;
        match rest {
            "" => Ok(Self::generate(Key::new(pitch, mode), include_diminished)),
            "#" | "b" => Err(BarchordError::UnsupportedKey(format!("accidental root '{}'", root))),
            _ => Err(BarchordError::InvalidRoot(root.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chord> {
        self.chords.iter()
    }

    /// Scale-degree position of a chord, used to order ties
    pub fn degree_of(&self, name: ChordName) -> Option<usize> {
        self.chords.iter().position(|c| c.name == name)
    }

    /// Build a vocabulary from hand-picked chords
    #[cfg(test)]
    pub(crate) fn from_chords(key: Key, chords: Vec<Chord>) -> Self {
        Self { key, chords }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchClass::*;

    fn names(vocab: &ChordVocabulary) -> Vec<String> {
        vocab.iter().map(|c| c.name.to_string()).collect()
    }

    fn tones(vocab: &ChordVocabulary, name: &str) -> [PitchClass; 3] {
        vocab
            .iter()
            .find(|c| c.name.to_string() == name)
            .map(|c| c.tones)
            .unwrap_or_else(|| panic!("{name} not in vocabulary"))
    }

    #[test]
    fn test_c_major_without_diminished() {
        let vocab = ChordVocabulary::generate(Key::new(C, Mode::Major), false);
        assert_eq!(vocab.len(), 6);
        assert_eq!(names(&vocab), vec!["C", "Dm", "Em", "F", "G", "Am"]);
        assert!(vocab.iter().all(|c| c.name.quality != Quality::Diminished));
        assert_eq!(tones(&vocab, "C"), [C, E, G]);
        assert_eq!(tones(&vocab, "Dm"), [D, F, A]);
        assert_eq!(tones(&vocab, "G"), [G, B, D]);
        assert_eq!(tones(&vocab, "Am"), [A, C, E]);
    }

    #[test]
    fn test_c_major_with_diminished() {
        let vocab = ChordVocabulary::generate(Key::new(C, Mode::Major), true);
        assert_eq!(vocab.len(), 7);
        assert_eq!(tones(&vocab, "Bdim"), [B, D, F]);
    }

    #[test]
    fn test_a_minor() {
        let vocab = ChordVocabulary::generate(Key::new(A, Mode::Minor), true);
        assert_eq!(names(&vocab), vec!["Am", "Bdim", "C", "Dm", "Em", "F", "G"]);
        assert_eq!(tones(&vocab, "Em"), [E, G, B]);

        let vocab = ChordVocabulary::generate(Key::new(A, Mode::Minor), false);
        assert_eq!(names(&vocab), vec!["Am", "C", "Dm", "Em", "F", "G"]);
    }

    #[test]
    fn test_degrees_build_on_themselves() {
        // Letters only: D "major" walks the natural scale from D.
        let vocab = ChordVocabulary::generate(Key::new(D, Mode::Major), true);
        assert_eq!(names(&vocab), vec!["D", "Em", "Fm", "G", "A", "Bm", "Cdim"]);
        assert_eq!(tones(&vocab, "Cdim"), [C, E, G]);
    }

    #[test]
    fn test_deterministic() {
        for dim in [false, true] {
            for mode in [Mode::Major, Mode::Minor] {
                let a = ChordVocabulary::generate(Key::new(G, mode), dim);
                let b = ChordVocabulary::generate(Key::new(G, mode), dim);
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_from_root_str() {
        let vocab = ChordVocabulary::from_root_str("c", Mode::Major, false).unwrap();
        assert_eq!(vocab, ChordVocabulary::generate(Key::new(C, Mode::Major), false));
        assert!(matches!(
            ChordVocabulary::from_root_str("x", Mode::Major, false),
            Err(BarchordError::InvalidRoot(_))
        ));
        assert!(matches!(
            ChordVocabulary::from_root_str("F#", Mode::Major, false),
            Err(BarchordError::UnsupportedKey(_))
        ));
        assert!(matches!(
            ChordVocabulary::from_root_str("Bb", Mode::Minor, false),
            Err(BarchordError::UnsupportedKey(_))
        ));
    }

    #[test]
    fn test_chord_names() {
        assert_eq!(ChordName::new(C, Quality::Major).to_string(), "C");
        assert_eq!(ChordName::new(A, Quality::Minor).to_string(), "Am");
        assert_eq!(ChordName::new(B, Quality::Diminished).to_string(), "Bdim");
    }
}
