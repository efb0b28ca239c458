//! ABC tune loading and bar splitting

use crate::error::{BarchordError, Result};
use crate::key::Key;
use serde::Serialize;
use std::path::Path;

/// Header fields recognised before the tune body
const HEADER_FIELDS: [char; 6] = ['X', 'T', 'R', 'M', 'L', 'K'];

/// A single-voice ABC tune
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tune {
    /// Reference number (X:)
    pub reference: Option<String>,
    /// Title (T:)
    pub title: Option<String>,
    /// Rhythm (R:)
    pub rhythm: Option<String>,
    /// Meter (M:)
    pub meter: Option<String>,
    /// Unit note length (L:)
    pub unit_length: Option<String>,
    /// Key (K:), unparsed
    pub key: Option<String>,
    /// Body lines, trimmed and joined with single spaces
    pub body: String,
}

impl Tune {
    /// Read and parse a tune file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse tune text.
    ///
    /// Header lines are read until the first line that is not one of
    /// X, T, R, M, L or K; everything after is the body.
    pub fn parse(text: &str) -> Result<Self> {
        let mut tune = Tune::default();
        let lines: Vec<&str> = text.lines().collect();

        let mut body_start = lines.len();
        for (i, line) in lines.iter().enumerate() {
            let Some((field, value)) = header_field(line) else {
                body_start = i;
                break;
            };
            let value = Some(value.to_string());
            match field {
                'X' => tune.reference = value,
                'T' => tune.title = value,
                'R' => tune.rhythm = value,
                'M' => tune.meter = value,
                'L' => tune.unit_length = value,
                _ => tune.key = value,
            }
        }

        tune.body = lines[body_start..]
            .iter()
            .map(|l| l.trim())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        if tune.body.contains("X:") {
            return Err(BarchordError::MultipleTunes);
        }

        Ok(tune)
    }

    /// Parsed key signature
    pub fn key(&self) -> Result<Key> {
        self.key
            .as_deref()
            .ok_or(BarchordError::MissingKey)?
            .parse()
    }

    pub fn bars(&self) -> Vec<String> {
        split_bars(&self.body)
    }
}

/// `K: Am` -> `('K', "Am")`
fn header_field(line: &str) -> Option<(char, &str)> {
    let (name, value) = line.trim().split_once(':')?;
    let mut chars = name.trim().chars();
    let field = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !HEADER_FIELDS.contains(&field) {
        return None;
    }
    Some((field, value.trim()))
}

/// Split a tune body into bars.
///
/// Repeat marks and spaces are removed first, so `|:` and `:|` act as plain
/// bar lines; empty bars are dropped.
pub fn split_bars(body: &str) -> Vec<String> {
    let cleaned: String = body.chars().filter(|&c| c != ':' && c != ' ').collect();
    cleaned
        .split('|')
        .filter(|bar| !bar.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Mode;
    use crate::pitch::PitchClass;

    const TUNE: &str = "X:1\nT: Speed the Plough\nR:reel\nM:4/4\nL:1/8\nK:Gmaj\n|:GABc dedB|dedB dedB|\n  c2ec B2dB|c2A2 A2BA:|\n";

    #[test]
    fn test_parse_headers() {
        let tune = Tune::parse(TUNE).unwrap();
        assert_eq!(tune.reference.as_deref(), Some("1"));
        assert_eq!(tune.title.as_deref(), Some("Speed the Plough"));
        assert_eq!(tune.rhythm.as_deref(), Some("reel"));
        assert_eq!(tune.meter.as_deref(), Some("4/4"));
        assert_eq!(tune.unit_length.as_deref(), Some("1/8"));
        assert_eq!(tune.key().unwrap(), Key::new(PitchClass::G, Mode::Major));
        assert_eq!(tune.body, "|:GABc dedB|dedB dedB| c2ec B2dB|c2A2 A2BA:|");
    }

    #[test]
    fn test_bars() {
        let tune = Tune::parse(TUNE).unwrap();
        assert_eq!(tune.bars(), vec!["GABcdedB", "dedBdedB", "c2ecB2dB", "c2A2A2BA"]);
    }

    #[test]
    fn test_split_bars_drops_empty_and_repeats() {
        assert_eq!(split_bars("|:cd|ef:|g||"), vec!["cd", "ef", "g"]);
        assert!(split_bars("").is_empty());
        assert!(split_bars("||::||").is_empty());
    }

    #[test]
    fn test_header_stops_at_first_body_line() {
        let tune = Tune::parse("T:First\nK:C\ncdef|\nT:not a header|").unwrap();
        assert_eq!(tune.title.as_deref(), Some("First"));
        assert_eq!(tune.body, "cdef| T:not a header|");
    }

    #[test]
    fn test_unknown_header_ends_header() {
        let tune = Tune::parse("T:Tune\nZ:someone\nK:C\ncdef|").unwrap();
        assert_eq!(tune.key, None);
        assert!(matches!(tune.key(), Err(BarchordError::MissingKey)));
    }

    #[test]
    fn test_second_tune_rejected() {
        let text = "X:1\nK:C\ncdef|\nX:2\nK:G\ngabc|";
        // The second X: line is in the body.
        assert!(matches!(Tune::parse(text), Err(BarchordError::MultipleTunes)));
    }

    #[test]
    fn test_lowercase_header_names() {
        let tune = Tune::parse("t:quiet\nk:Am\nabc|").unwrap();
        assert_eq!(tune.title.as_deref(), Some("quiet"));
        assert_eq!(tune.key().unwrap(), Key::new(PitchClass::A, Mode::Minor));
    }
}
