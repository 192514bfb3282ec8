use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use trec_engine::build::index_corpus;
use trec_engine::topics::read_topics;
use trec_engine::{run_topics, ClassicNorm, Result, RunConfig, SearchEngine};
use tracing_subscriber::EnvFilter;

/// Index a TREC corpus, score every topic with TF-IDF and append the
/// rankings to trec_eval run files.
#[derive(Parser, Debug)]
#[command(name = "trec-rank", version, about)]
struct Cli {
    /// JSON run configuration
    config: PathBuf,
}

fn run(cli: Cli) -> Result<()> {
    let config = RunConfig::from_file(&cli.config)?;
    let index = index_corpus(&config.corpus_paths, &ClassicNorm)?;
    let topics = read_topics(&config.topics_path)?;

    let engine = SearchEngine::new(index, ClassicNorm);
    let summary = run_topics(&engine, &topics, &config)?;
    if summary.lines_failed > 0 {
        tracing::warn!(failed = summary.lines_failed, "Some run lines could not be written");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            ExitCode::FAILURE
        }
    }
}
