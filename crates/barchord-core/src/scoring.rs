//! Weighted chord scoring for a single bar

use crate::error::{BarchordError, Result};
use crate::pitch::PitchClass;
use crate::ratio::Ratio;
use crate::tokenizer::NoteToken;
use crate::vocabulary::{ChordName, ChordVocabulary};
use std::collections::BTreeMap;

/// Accumulated weight per chord for one bar.
///
/// Chords that no note touched are absent, not present with zero. Weights
/// are exact, so the note order of a bar never changes a score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChordScores(BTreeMap<ChordName, Ratio>);

impl ChordScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: ChordName) -> Option<Ratio> {
        self.0.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChordName, Ratio)> + '_ {
        self.0.iter().map(|(&name, &score)| (name, score))
    }

    /// Highest score present, if any
    pub fn max_score(&self) -> Option<Ratio> {
        self.0.values().copied().max()
    }

    /// All scored chords, best first; equal scores keep scale-degree order
    pub fn ranked(&self, vocabulary: &ChordVocabulary) -> Vec<(ChordName, Ratio)> {
        let mut ranked: Vec<(ChordName, Ratio)> = self.iter().collect();
        ranked.sort_by(|a, b| {
            b.1.cmp(&a.1).then_with(|| {
                let da = vocabulary.degree_of(a.0).unwrap_or(usize::MAX);
                let db = vocabulary.degree_of(b.0).unwrap_or(usize::MAX);
                da.cmp(&db)
            })
        });
        ranked
    }

    fn add(&mut self, name: ChordName, weight: Ratio) -> Result<()> {
        let score = self.0.entry(name).or_insert(Ratio::zero());
        *score = score.checked_add(weight).ok_or(BarchordError::LengthOverflow)?;
        Ok(())
    }
}

impl FromIterator<(ChordName, Ratio)> for ChordScores {
    fn from_iter<I: IntoIterator<Item = (ChordName, Ratio)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Sum the durations of same-letter notes
pub fn pitch_weights(notes: &[NoteToken]) -> Result<BTreeMap<PitchClass, Ratio>> {
    let mut weights: BTreeMap<PitchClass, Ratio> = BTreeMap::new();
    for note in notes {
        let total = weights.entry(note.pitch).or_insert(Ratio::zero());
        *total = total.checked_add(note.weight()?).ok_or(BarchordError::LengthOverflow)?;
    }
    Ok(weights)
}

/// Score already-weighed pitch classes against the vocabulary.
///
/// Each pitch class adds its weight to every chord containing it.
pub fn score_weights(weights: &BTreeMap<PitchClass, Ratio>, vocabulary: &ChordVocabulary) -> Result<ChordScores> {
    let mut scores = ChordScores::new();
    for (&pitch, &weight) in weights {
        for chord in vocabulary.iter().filter(|c| c.contains(pitch)) {
            scores.add(chord.name, weight)?;
        }
    }
    Ok(scores)
}

/// Score one bar's notes against the vocabulary
pub fn score_bar(notes: &[NoteToken], vocabulary: &ChordVocabulary) -> Result<ChordScores> {
    let weights = pitch_weights(notes)?;
    score_weights(&weights, vocabulary)
}
