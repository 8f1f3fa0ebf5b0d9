use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

use super::{LanguageModel, ModelError};

pub(super) const MAGIC: &[u8; 4] = b"PYLM";
pub(super) const VERSION: u8 = 1;
const HEADER_SIZE: usize = MAGIC.len() + 1;

impl LanguageModel {
    /// Serialize to bytes (PYLM format: magic, version, bincode body).
    pub fn to_bytes(&self) -> Result<Vec<u8>, ModelError> {
        let body = bincode::serialize(self).map_err(ModelError::Serialize)?;
        let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    /// Deserialize from bytes (PYLM format).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ModelError> {
        if bytes.len() < HEADER_SIZE {
            return Err(ModelError::InvalidHeader);
        }
        if &bytes[..4] != MAGIC {
            return Err(ModelError::InvalidMagic);
        }
        if bytes[4] != VERSION {
            return Err(ModelError::UnsupportedVersion(bytes[4]));
        }
        bincode::deserialize(&bytes[HEADER_SIZE..]).map_err(ModelError::Deserialize)
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Open a compiled snapshot written by [`LanguageModel::save`].
    pub fn open_snapshot(path: &Path) -> Result<Self, ModelError> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ModelError::MissingTable(path.to_path_buf()),
            _ => ModelError::Io(e),
        })?;
        let model = Self::from_bytes(&bytes)?;
        info!(
            path = %path.display(),
            syllables = model.unigram.vocab_size(),
            syllable_pairs = model.bigram.pair_count(),
            "snapshot loaded"
        );
        Ok(model)
    }
}
