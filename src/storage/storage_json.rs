use std::{
  collections::BTreeMap,
  io::Write,
  path::{Path, PathBuf},
};

use log::{debug, warn};

use super::{KeyValueStorage, StorageError};

/// Keeps every key in a single JSON object on disk. Each write replaces the
/// file atomically, so readers never see half of an update.
pub struct JsonFileStorage {
  filepath: PathBuf,
  buffer: BTreeMap<String, String>,
}

impl JsonFileStorage {
  pub fn new(filepath: &Path) -> Result<Self, StorageError> {
    if let Some(parent) = filepath.parent() {
      if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent)?;
      }
    }

    let mut storage = Self {
      filepath: filepath.to_path_buf(),
      buffer: BTreeMap::new(),
    };
    storage.restore()?;

    debug!(
      "restored {} keys from: {}",
      storage.buffer.len(),
      storage.filepath.display()
    );

    return Ok(storage);
  }

  pub fn storage_path(&self) -> &Path {
    self.filepath.as_path()
  }

  fn restore(&mut self) -> Result<(), StorageError> {
    let content = match std::fs::read_to_string(&self.filepath) {
      Ok(content) => content,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
      Err(err) => return Err(err.into()),
    };

    if content.trim().is_empty() {
      return Ok(());
    }

    self.buffer = match serde_json::from_str(&content) {
      Ok(items) => items,
      Err(err) => {
        warn!(
          "ignoring unreadable storage file {}: {}",
          self.filepath.display(),
          err
        );
        BTreeMap::new()
      }
    };
    Ok(())
  }

  fn flush(&self) -> Result<(), StorageError> {
    let dir = match self.filepath.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(serde_json::to_string_pretty(&self.buffer)?.as_bytes())?;
    tmp.flush()?;
    tmp
      .persist(&self.filepath)
      .map_err(|err| StorageError::Io(err.error))?;
    Ok(())
  }
}

impl KeyValueStorage for JsonFileStorage {
  fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
    Ok(self.buffer.get(key).cloned())
  }

  fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    let previous = self.buffer.insert(key.to_owned(), value.to_owned());
    if let Err(err) = self.flush() {
      match previous {
        Some(previous) => self.buffer.insert(key.to_owned(), previous),
        None => self.buffer.remove(key),
      };
      return Err(err);
    }
    Ok(())
  }

  fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
    if let Some(previous) = self.buffer.remove(key) {
      if let Err(err) = self.flush() {
        self.buffer.insert(key.to_owned(), previous);
        return Err(err);
      }
    }
    Ok(())
  }
}
