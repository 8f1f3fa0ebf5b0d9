use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pinyin_core::settings::parse_settings_toml;
use pinyin_core::{LanguageModel, ModelError, Settings, SettingsError};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod accuracy_ops;
pub mod config_ops;
pub mod convert_ops;
pub mod model_ops;

pub const DEFAULT_UNIGRAM_PATH: &str = "./1_word.txt";
pub const DEFAULT_BIGRAM_PATH: &str = "./2_word.txt";

/// Where the language model comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Tables { unigram: PathBuf, bigram: PathBuf },
    Snapshot(PathBuf),
}

impl ModelSource {
    /// A compiled snapshot wins over the JSON table paths.
    pub fn new(unigram: PathBuf, bigram: PathBuf, snapshot: Option<PathBuf>) -> Self {
        match snapshot {
            Some(path) => Self::Snapshot(path),
            None => Self::Tables { unigram, bigram },
        }
    }

    pub fn load(&self) -> Result<LanguageModel, ModelError> {
        match self {
            Self::Tables { unigram, bigram } => LanguageModel::open(unigram, bigram),
            Self::Snapshot(path) => LanguageModel::open_snapshot(path),
        }
    }
}

impl Default for ModelSource {
    fn default() -> Self {
        Self::Tables {
            unigram: PathBuf::from(DEFAULT_UNIGRAM_PATH),
            bigram: PathBuf::from(DEFAULT_BIGRAM_PATH),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Embedded defaults, or the TOML file at `path`.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_settings_toml(&content)?)
}

/// Load model and settings, exiting with status 1 on failure.
pub(crate) fn load_or_die(source: &ModelSource, config: Option<&Path>) -> (LanguageModel, Settings) {
    let settings = die!(load_settings(config), "Error loading settings: {}");
    let model = die!(source.load(), "Error loading model: {}");
    (model, settings)
}
