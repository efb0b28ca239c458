//! barchord: suggest accompaniment chords for each bar of an ABC melody

mod config;
mod report;

use anyhow::Context;
use barchord_core::{Analyzer, Tune};
use clap::Parser;
use report::{BarReport, TuneReport};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "barchord", version)]
#[command(about = "Suggest a chord for every bar of a single-voice ABC tune")]
struct Cli {
    /// ABC file holding one tune
    file: PathBuf,

    /// Include the diminished triad in the candidate chords
    #[arg(long)]
    diminished: bool,

    /// On ties, prefer chords in the tune's own mode
    #[arg(long)]
    bias_mode: bool,

    /// On ties, prefer the chord built on the tune's root
    #[arg(long)]
    bias_root: bool,

    /// Report bad bars and carry on instead of stopping
    #[arg(long)]
    keep_going: bool,

    /// Print every scored chord under each bar
    #[arg(long)]
    ranked: bool,

    /// Emit a JSON report
    #[arg(long)]
    json: bool,

    /// Config file (defaults to the per-user barchord/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let directive = format!("barchord={level}");

    // RUST_LOG wins over -v
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config(),
    };
    config.analysis.include_diminished |= cli.diminished;
    config.analysis.bias_own_mode |= cli.bias_mode;
    config.analysis.bias_own_root |= cli.bias_root;
    config.keep_going |= cli.keep_going;

    let tune = Tune::load(&cli.file).with_context(|| format!("loading {}", cli.file.display()))?;
    let key_text = tune.key.clone().unwrap_or_default();
    let key = tune.key().with_context(|| format!("key of {}", cli.file.display()))?;
    let title = tune.title.clone().unwrap_or_default();
    let bars = tune.bars();
    tracing::info!(title = %title, key = %key, bars = bars.len(), "Loaded tune");

    let analyzer = Analyzer::new(key, config.analysis);
    let results = analyzer
        .analyze_bars(&bars, config.error_policy())
        .with_context(|| format!("analysing {}", cli.file.display()))?;

    let report = TuneReport {
        title: &title,
        key: &key_text,
        bars: results
            .iter()
            .map(|bar| BarReport::new(bar, analyzer.vocabulary(), cli.ranked))
            .collect(),
    };

    if cli.json {
        println!("{}", report::render_json(&report)?);
    } else {
        print!("{}", report::render_text(&report));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::parse_from(["barchord", "tune.abc", "--bias-mode", "--keep-going", "-vv"]);
        assert_eq!(cli.file, PathBuf::from("tune.abc"));
        assert!(cli.bias_mode);
        assert!(!cli.bias_root);
        assert!(cli.keep_going);
        assert_eq!(cli.verbose, 2);
    }
}
