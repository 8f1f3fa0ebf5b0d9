use std::path::PathBuf;

use clap::Parser;

use pinyin_cli::commands::{convert_ops, ModelSource, DEFAULT_BIGRAM_PATH, DEFAULT_UNIGRAM_PATH};
use pinyin_cli::logging;

/// Reads whitespace-separated pinyin syllables from stdin, one sequence per
/// line, and writes the decoded characters to stdout.
#[derive(Parser)]
#[command(name = "pinyin", about = "Pinyin to Hanzi decoder")]
struct Cli {
    /// Unigram table (JSON)
    #[arg(long, default_value = DEFAULT_UNIGRAM_PATH)]
    unigram: PathBuf,
    /// Bigram table (JSON)
    #[arg(long, default_value = DEFAULT_BIGRAM_PATH)]
    bigram: PathBuf,
    /// Compiled model snapshot; overrides --unigram/--bigram
    #[arg(long)]
    model: Option<PathBuf>,
    /// Settings TOML (default: embedded settings)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Decoding threads
    #[arg(short, long, default_value = "1")]
    jobs: usize,
}

fn main() {
    logging::init_tracing();
    let cli = Cli::parse();
    let source = ModelSource::new(cli.unigram, cli.bigram, cli.model);
    convert_ops::decode_stdin(&source, cli.config.as_deref(), cli.jobs);
}
