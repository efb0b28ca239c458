//! Per-bar chord analysis for a whole tune

use crate::error::{BarchordError, Result};
use crate::key::Key;
use crate::resolver::{Resolution, TieBreak, resolve};
use crate::scoring::{ChordScores, score_bar};
use crate::tokenizer::tokenize_bar;
use crate::vocabulary::ChordVocabulary;
use serde::{Deserialize, Serialize};

/// Analysis settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Keep the diminished triad in the vocabulary
    pub include_diminished: bool,
    /// Break ties towards chords in the tune's own mode
    pub bias_own_mode: bool,
    /// Break ties towards the chord on the tune's root
    pub bias_own_root: bool,
}

/// What to do when a bar cannot be analysed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Stop at the first bad bar
    #[default]
    Abort,
    /// Record the error against the bar and carry on
    SkipBar,
}

/// One bar's outcome
#[derive(Debug)]
pub struct BarAnalysis {
    /// 1-based
    pub index: usize,
    pub text: String,
    pub scores: ChordScores,
    pub outcome: std::result::Result<Resolution, BarchordError>,
}

/// Scores bars against one tune-level vocabulary
#[derive(Debug, Clone)]
pub struct Analyzer {
    vocabulary: ChordVocabulary,
    bias: TieBreak,
}

impl Analyzer {
    pub fn new(key: Key, options: AnalysisOptions) -> Self {
        let vocabulary = ChordVocabulary::generate(key, options.include_diminished);
        tracing::debug!(
            key = %key,
            chords = ?vocabulary.iter().map(|c| c.name.to_string()).collect::<Vec<_>>(),
            "Built chord vocabulary"
        );
        Self {
            vocabulary,
            bias: TieBreak::for_key(key, options.bias_own_mode, options.bias_own_root),
        }
    }

    pub fn vocabulary(&self) -> &ChordVocabulary {
        &self.vocabulary
    }

    /// Score one bar without resolving
    pub fn score(&self, bar: &str) -> Result<ChordScores> {
        let notes = tokenize_bar(bar)?;
        score_bar(&notes, &self.vocabulary)
    }

    /// Tokenize, weigh, score and resolve one bar
    pub fn analyze_bar(&self, bar: &str) -> Result<Resolution> {
        let scores = self.score(bar)?;
        resolve(&scores, &self.bias)
    }

    /// Analyse every bar in order.
    ///
    /// With `ErrorPolicy::Abort` the first failing bar fails the run.
    /// With `ErrorPolicy::SkipBar` failures are kept on their bar.
    pub fn analyze_bars<S: AsRef<str>>(&self, bars: &[S], policy: ErrorPolicy) -> Result<Vec<BarAnalysis>> {
        let mut results = Vec::with_capacity(bars.len());

        for (i, bar) in bars.iter().enumerate() {
            let index = i + 1;
            let text = bar.as_ref();

            let (scores, outcome) = match self.score(text) {
                Ok(scores) => {
                    let outcome = resolve(&scores, &self.bias);
                    (scores, outcome)
                }
                Err(e) => (ChordScores::new(), Err(e)),
            };

            let outcome = match outcome {
                Err(e) if policy == ErrorPolicy::Abort => return Err(e),
                other => other,
            };

            match &outcome {
                Ok(res) => {
                    tracing::debug!(bar = index, text, chords = ?res.names(), score = %res.score, "Bar resolved");
                }
                Err(e) => tracing::warn!(bar = index, text, error = %e, "Skipping bar"),
            }

            results.push(BarAnalysis {
                index,
                text: text.to_string(),
                scores,
                outcome,
            });
        }

        Ok(results)
    }
}
