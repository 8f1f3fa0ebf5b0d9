pub mod decoder;
pub mod model;
pub mod settings;

pub use decoder::{decode, DecodedPath, Decoder, FallbackTable};
pub use model::{BigramTable, LanguageModel, ModelError, UnigramTable};
pub use settings::{Settings, SettingsError};
