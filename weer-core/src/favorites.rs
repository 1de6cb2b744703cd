//! Favorite cities persisted as a JSON array of strings.
//!
//! Every mutation rewrites the whole file through a temporary file in the same
//! directory that is then renamed over the target. There is no locking: two
//! processes mutating the same file race and the last writer wins.

use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{error::StoreError, model::FavoritesList};

#[derive(Debug, Clone)]
pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the list; a missing file is an empty list.
    pub fn load(&self) -> Result<FavoritesList, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no favorites file yet");
                return Ok(FavoritesList::default());
            }
            Err(source) => return Err(self.io_error(source)),
        };

        let names: Vec<String> =
            serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        let list = FavoritesList::from_names(names);
        tracing::debug!(path = %self.path.display(), count = list.len(), "loaded favorites");
        Ok(list)
    }

    /// Append `city` unless present, then persist. The file is written even
    /// when nothing changed.
    pub fn add(&self, mut list: FavoritesList, city: &str) -> Result<FavoritesList, StoreError> {
        list.insert(city.to_string());
        self.save(&list)?;
        Ok(list)
    }

    /// Drop every occurrence of `city`, then persist.
    pub fn remove(&self, mut list: FavoritesList, city: &str) -> Result<FavoritesList, StoreError> {
        list.remove_all(city);
        self.save(&list)?;
        Ok(list)
    }

    fn save(&self, list: &FavoritesList) -> Result<(), StoreError> {
        let json = serde_json::to_vec(list).map_err(|source| StoreError::Serialize {
            path: self.path.clone(),
            source,
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(&json).map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        tracing::info!(path = %self.path.display(), count = list.len(), "saved favorites");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}
