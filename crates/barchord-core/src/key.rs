//! Key signatures (natural roots, major or minor)

use crate::error::{BarchordError, Result};
use crate::pitch::PitchClass;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Major/minor mode flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
        }
    }
}

/// A tune key: natural root plus mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    pub root: PitchClass,
    pub mode: Mode,
}

impl Key {
    pub fn new(root: PitchClass, mode: Mode) -> Self {
        Self { root, mode }
    }
}

/// Parse an ABC `K:` value such as `C`, `Cmaj`, `Am`, `Amin`.
impl FromStr for Key {
    type Err = BarchordError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        let Some(first) = chars.next() else {
            return Err(BarchordError::InvalidRoot(String::new()));
        };
        let root = PitchClass::from_char(first)
            .ok_or_else(|| BarchordError::InvalidRoot(first.to_string()))?;

        let suffix = chars.as_str().trim();
        if suffix.starts_with('#') || suffix.starts_with('b') {
            return Err(BarchordError::UnsupportedKey(format!(
                "accidental root '{}{}' in '{}'",
                root,
                &suffix[..1],
                s
            )));
        }

        let mode = match suffix.to_ascii_lowercase().as_str() {
            "" | "maj" | "major" => Mode::Major,
            "m" | "min" | "minor" => Mode::Minor,
            other => {
                return Err(BarchordError::UnsupportedKey(format!(
                    "mode '{}' in '{}'",
                    other, s
                )));
            }
        };

        Ok(Self { root, mode })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Mode::Major => write!(f, "{}", self.root),
            Mode::Minor => write!(f, "{}m", self.root),
        }
    }
}
