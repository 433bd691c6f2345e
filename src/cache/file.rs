//! Durable store: one `<key>.<extension>` file per record under a directory.
//! Stores with different extensions can share a directory without clearing each other.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{DocumentStore, StoreError};

pub const CACHE_EXTENSION: &str = "cache";

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    extension: String,
}

impl FileStore {
    /// Store writing `.cache` records. The directory is created on first write, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_extension(dir, CACHE_EXTENSION)
    }

    pub fn with_extension(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        FileStore {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.{}", self.extension)))
    }
}

impl DocumentStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.record_path(key)?;
        fs::create_dir_all(&self.dir)?;
        // Write-then-rename so readers never see a half-written record.
        let tmp = path.with_extension(format!("{}.tmp", self.extension));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        for entry in entries {
            let path = entry?.path();
            let is_record = path.is_file()
                && path
                    .extension()
                    .map_or(false, |ext| ext == self.extension.as_str());
            if is_record {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}
