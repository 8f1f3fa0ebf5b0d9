use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use pinyin_cli::commands::{
    accuracy_ops, config_ops, convert_ops, model_ops, ModelSource, DEFAULT_BIGRAM_PATH,
    DEFAULT_UNIGRAM_PATH,
};
use pinyin_cli::logging;

#[derive(Parser)]
#[command(name = "pinyintool", about = "Pinyin decoder diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ModelArgs {
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
}

impl ModelArgs {
    fn source(&self) -> ModelSource {
        ModelSource::new(self.unigram.clone(), self.bigram.clone(), self.model.clone())
    }
}

#[derive(Subcommand)]
enum Command {
    /// Decode one syllable sequence and print the characters with their score
    Decode {
        #[command(flatten)]
        model: ModelArgs,
        /// Syllables
        #[arg(required = true)]
        syllables: Vec<String>,
    },
    /// Show every position's beam for a syllable sequence
    Explain {
        #[command(flatten)]
        model: ModelArgs,
        /// Syllables
        #[arg(required = true)]
        syllables: Vec<String>,
        /// Cells shown per position
        #[arg(short, long, default_value = "10")]
        n: usize,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Compile JSON tables into a binary model snapshot
    Compile {
        /// Unigram table (JSON)
        unigram_file: String,
        /// Bigram table (JSON)
        bigram_file: String,
        /// Output file
        output_file: String,
    },
    /// Show a summary of a compiled model snapshot
    Info {
        /// Snapshot file
        file: String,
    },
    /// Compare decoded output against expected output
    Accuracy {
        /// Expected characters, one sentence per line
        expected_file: String,
        /// Decoded characters, one sentence per line
        actual_file: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the default settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    logging::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Decode { model, syllables } => {
            convert_ops::decode_cmd(&model.source(), model.config.as_deref(), &syllables)
        }
        Command::Explain {
            model,
            syllables,
            n,
            json,
        } => convert_ops::explain_cmd(&model.source(), model.config.as_deref(), &syllables, n, json),
        Command::Compile {
            unigram_file,
            bigram_file,
            output_file,
        } => model_ops::compile(&unigram_file, &bigram_file, &output_file),
        Command::Info { file } => model_ops::info(&file),
        Command::Accuracy {
            expected_file,
            actual_file,
            json,
        } => accuracy_ops::accuracy(&expected_file, &actual_file, json),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
