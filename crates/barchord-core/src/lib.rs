//! barchord-core: Bar-by-bar chord suggestions for ABC melodies

pub mod analysis;
pub mod duration;
mod error;
pub mod key;
pub mod pitch;
pub mod ratio;
pub mod resolver;
pub mod scoring;
pub mod tokenizer;
pub mod tune;
pub mod vocabulary;

pub use analysis::{AnalysisOptions, Analyzer, BarAnalysis, ErrorPolicy};
pub use duration::note_weight;
pub use error::{BarchordError, Result};
pub use key::{Key, Mode};
pub use pitch::{NATURAL_SCALE, PitchClass};
pub use ratio::Ratio;
pub use resolver::{Resolution, TieBreak, resolve};
pub use scoring::{ChordScores, score_bar};
pub use tokenizer::{NoteToken, tokenize_bar};
pub use tune::{Tune, split_bars};
pub use vocabulary::{Chord, ChordName, ChordVocabulary, Quality};
