//! Note tokenizer for bar text
//!
//! Extracts `(pitch class, length suffix)` pairs from one bar of ABC
//! notation. Octave marks are dropped and letter case is folded, so `C,`,
//! `c` and `c'` all read as the pitch class C. Rests, spaces, brackets and
//! other non-note characters are skipped silently.

use crate::error::{BarchordError, Result};
use crate::pitch::PitchClass;
use crate::ratio::Ratio;
use regex::Regex;
use std::sync::LazyLock;

/// Optional accidental, natural letter, optional length suffix.
static NOTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\^\^|\^|__|_|=)?([a-g])(\d*(?:\.\d+)?/*\d*)").expect("note pattern is valid")
});

/// A note as written in the bar, before its length is weighed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteToken {
    pub pitch: PitchClass,
    /// Raw length suffix, e.g. `""`, `"2"`, `"/"`, `"3/2"`
    pub length: String,
}

impl NoteToken {
    /// Beat weight of this note
    pub fn weight(&self) -> Result<Ratio> {
        crate::duration::note_weight(&self.length)
    }
}

/// Scan one bar and return its notes in order of appearance.
///
/// Fails with `UnsupportedNotation` if any note carries an accidental,
/// wherever it sits in the bar. A bar with no notes yields an empty vec.
pub fn tokenize_bar(bar: &str) -> Result<Vec<NoteToken>> {
    let text: String = bar
        .chars()
        .filter(|&c| c != '\'' && c != ',')
        .collect::<String>()
        .to_lowercase();

    let mut notes = Vec::new();
    for caps in NOTE_PATTERN.captures_iter(&text) {
        if let Some(accidental) = caps.get(1) {
            let token = &caps[0];
            tracing::debug!(accidental = accidental.as_str(), token, "Accidental in bar");
            return Err(BarchordError::UnsupportedNotation(token.to_string()));
        }

        let letter = caps[2].chars().next();
        let Some(pitch) = letter.and_then(PitchClass::from_char) else {
            continue;
        };
        notes.push(NoteToken {
            pitch,
            length: caps[3].to_string(),
        });
    }

    Ok(notes)
}
