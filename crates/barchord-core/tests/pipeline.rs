use barchord_core::{AnalysisOptions, Analyzer, BarchordError, ErrorPolicy, Tune};

const SCALE_TUNE: &str = "\
X:1
T:Scales
M:4/4
L:1/4
K:C
|:cdefg|f2a2c|g//b//d/ g3|
CEG2|]
";

fn names(tune: &Tune, options: AnalysisOptions) -> Vec<Vec<String>> {
    let analyzer = Analyzer::new(tune.key().unwrap(), options);
    analyzer
        .analyze_bars(&tune.bars(), ErrorPolicy::Abort)
        .unwrap()
        .into_iter()
        .map(|bar| bar.outcome.unwrap().names())
        .collect()
}

#[test]
fn test_file_to_chords() {
    let tune = Tune::parse(SCALE_TUNE).unwrap();
    assert_eq!(tune.bars(), vec!["cdefg", "f2a2c", "g//b//d/g3", "CEG2", "]"]);

    let tune = Tune { body: tune.body.replace("|]", "|"), ..tune };
    let chords = names(&tune, AnalysisOptions::default());
    assert_eq!(chords, vec![vec!["C"], vec!["F"], vec!["G"], vec!["C"]]);
}

#[test]
fn test_trailing_bracket_is_an_empty_bar() {
    let tune = Tune::parse(SCALE_TUNE).unwrap();
    let analyzer = Analyzer::new(tune.key().unwrap(), AnalysisOptions::default());

    let result = analyzer.analyze_bars(&tune.bars(), ErrorPolicy::Abort);
    assert!(matches!(result, Err(BarchordError::NoChordsFound)));

    let bars = analyzer.analyze_bars(&tune.bars(), ErrorPolicy::SkipBar).unwrap();
    assert_eq!(bars.len(), 5);
    assert!(bars[..4].iter().all(|b| b.outcome.is_ok()));
    assert!(bars[4].outcome.is_err());
}

#[test]
fn test_minor_tune_with_biases() {
    let text = "T:Minor\nK:Am\nae|ce|";
    let tune = Tune::parse(text).unwrap();

    // "ae": Am holds both notes; "ce": C and Am tie.
    let plain = names(&tune, AnalysisOptions::default());
    assert_eq!(plain, vec![vec!["Am"], vec!["C", "Am"]]);

    let biased = names(
        &tune,
        AnalysisOptions { bias_own_mode: true, ..Default::default() },
    );
    assert_eq!(biased, vec![vec!["Am"], vec!["Am"]]);
}

#[test]
fn test_accidental_stops_the_run() {
    let tune = Tune::parse("K:G\ngab|^fga|").unwrap();
    let analyzer = Analyzer::new(tune.key().unwrap(), AnalysisOptions::default());
    let result = analyzer.analyze_bars(&tune.bars(), ErrorPolicy::Abort);
    assert!(matches!(result, Err(BarchordError::UnsupportedNotation(_))));
}

#[test]
fn test_unsupported_key() {
    let tune = Tune::parse("K:F#m\nfga|").unwrap();
    assert!(matches!(tune.key(), Err(BarchordError::UnsupportedKey(_))));
}
