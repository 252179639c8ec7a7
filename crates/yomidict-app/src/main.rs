use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use yomidict_config::Config;
use yomidict_lang_japanese::{DictMaker, VibratoAnalyzer, extract_file};

mod cli;

use self::cli::{BuildArgs, Cli, Command};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    match &cli.command {
        Command::Build(args) => build(config, args),
        Command::Extract { file } => {
            let text = extract_file(file, &config.extract)
                .with_context(|| format!("Failed to extract {}", file.display()))?;
            print!("{text}");
            Ok(())
        }
    }
}

/// Logs go to stderr so `extract` output stays clean
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(Config::new()),
    }
}

fn build(mut config: Config, args: &BuildArgs) -> anyhow::Result<()> {
    args.apply(&mut config);

    let analyzer = VibratoAnalyzer::load(&config.analyzer)
        .context("Failed to set up the UniDic morphological analyzer")?;
    let mut maker = DictMaker::new(analyzer, config.extract.clone());

    let report = maker
        .feed_files(&args.files, &config.feed)
        .context("Batch aborted")?;
    for skipped in &report.skipped {
        tracing::debug!("Skipped {}: {}", skipped.path.display(), skipped.reason);
    }

    let saved = maker
        .save(&args.output, &config.save)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "{} files processed, {} skipped, {} terms written to {}",
        report.processed,
        report.skipped_count(),
        maker.aggregator().occurrences().len(),
        saved.display()
    );
    Ok(())
}
