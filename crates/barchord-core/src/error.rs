//! Error types for barchord

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BarchordError {
    #[error("Unsupported notation: accidental in '{0}'")]
    UnsupportedNotation(String),
    #[error("Invalid root: '{0}' is not a natural note letter")]
    InvalidRoot(String),
    #[error("Unsupported key: {0}")]
    UnsupportedKey(String),
    #[error("Invalid duration: '{0}'")]
    InvalidDuration(String),
    #[error("Note lengths in bar are too fine to add exactly")]
    LengthOverflow,
    #[error("No chords found in bar")]
    NoChordsFound,
    #[error("Tune has no key (K:) header")]
    MissingKey,
    #[error("More than one tune found in this file")]
    MultipleTunes,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BarchordError>;
