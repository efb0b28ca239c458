//! Text and JSON reports

use barchord_core::{BarAnalysis, ChordVocabulary};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct TuneReport<'a> {
    pub title: &'a str,
    pub key: &'a str,
    pub bars: Vec<BarReport>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BarReport {
    pub index: usize,
    pub bar: String,
    pub chords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bias_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ranking: Vec<(String, f64)>,
}

impl BarReport {
    pub(crate) fn new(analysis: &BarAnalysis, vocabulary: &ChordVocabulary, ranked: bool) -> Self {
        let ranking = if ranked {
            analysis
                .scores
                .ranked(vocabulary)
                .into_iter()
                .map(|(name, score)| (name.to_string(), score.to_f64()))
                .collect()
        } else {
            Vec::new()
        };

        match &analysis.outcome {
            Ok(res) => Self {
                index: analysis.index,
                bar: analysis.text.clone(),
                chords: res.names(),
                score: Some(res.score.to_f64()),
                bias_fallback: res.bias_fallback,
                error: None,
                ranking,
            },
            Err(e) => Self {
                index: analysis.index,
                bar: analysis.text.clone(),
                chords: Vec::new(),
                score: None,
                bias_fallback: false,
                error: Some(e.to_string()),
                ranking,
            },
        }
    }
}

/// Plain report: a title line, then `<index> <bar> [<chords>]` per bar
pub(crate) fn render_text(report: &TuneReport<'_>) -> String {
    let mut lines = vec![format!("\t{} ({})", report.title, report.key)];

    for bar in &report.bars {
        lines.push(match &bar.error {
            Some(error) => format!("{} {} error: {}", bar.index, bar.bar, error),
            None => format!("{} {} [{}]", bar.index, bar.bar, bar.chords.join(", ")),
        });

        if !bar.ranking.is_empty() {
            let ranking: Vec<String> = bar
                .ranking
                .iter()
                .map(|(name, score)| format!("{name}={score}"))
                .collect();
            lines.push(format!("    {}", ranking.join(" ")));
        }
    }

    lines.iter().map(|line| format!("{line}\n")).collect()
}

pub(crate) fn render_json(report: &TuneReport<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
