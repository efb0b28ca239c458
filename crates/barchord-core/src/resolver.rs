//! Picking the winning chord(s) for a bar

use crate::error::{BarchordError, Result};
use crate::key::Key;
use crate::pitch::PitchClass;
use crate::ratio::Ratio;
use crate::scoring::ChordScores;
use crate::vocabulary::{ChordName, Quality};
use std::collections::BTreeSet;

/// Optional preferences applied only when several chords tie for the top score
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TieBreak {
    /// Acceptable qualities, e.g. `{Major}` for a major tune
    pub mode: Option<BTreeSet<Quality>>,
    /// Preferred chord root
    pub root: Option<PitchClass>,
}

impl TieBreak {
    /// Biases derived from a key's own mode and root
    pub fn for_key(key: Key, own_mode: bool, own_root: bool) -> Self {
        Self {
            mode: own_mode.then(|| BTreeSet::from([Quality::of_mode(key.mode)])),
            root: own_root.then_some(key.root),
        }
    }
}

/// The chord(s) proposed for one bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Winning chords; more than one when the tie could not be broken
    pub chords: BTreeSet<ChordName>,
    pub score: Ratio,
    /// A bias would have removed every candidate and was ignored
    pub bias_fallback: bool,
}

impl Resolution {
    pub fn names(&self) -> Vec<String> {
        self.chords.iter().map(|c| c.to_string()).collect()
    }
}

/// Select the top-scoring chords and narrow ties with `bias`.
///
/// Fails with `NoChordsFound` when nothing was scored.
pub fn resolve(scores: &ChordScores, bias: &TieBreak) -> Result<Resolution> {
    let Some(score) = scores.max_score() else {
        return Err(BarchordError::NoChordsFound);
    };

    let tied: BTreeSet<ChordName> = scores
        .iter()
        .filter(|&(_, s)| s == score)
        .map(|(name, _)| name)
        .collect();

    let mut chords = tied.clone();

    if chords.len() > 1 {
        if let Some(qualities) = &bias.mode {
            let kept: BTreeSet<ChordName> = chords
                .iter()
                .copied()
                .filter(|c| qualities.contains(&c.quality))
                .collect();
            if kept.is_empty() {
                tracing::warn!(
                    tied = ?names_of(&tied),
                    "Mode bias rejects every tied chord, keeping the tie"
                );
                return Ok(Resolution { chords: tied, score, bias_fallback: true });
            }
            chords = kept;
        }
    }

    if chords.len() > 1 {
        if let Some(root) = bias.root {
            if let Some(&hit) = chords.iter().find(|c| c.root == root) {
                chords = BTreeSet::from([hit]);
            }
        }
    }

    Ok(Resolution { chords, score, bias_fallback: false })
}

fn names_of(chords: &BTreeSet<ChordName>) -> Vec<String> {
    chords.iter().map(|c| c.to_string()).collect()
}
