use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use super::{KeyValueStorage, StorageError};

#[derive(Default)]
struct Inner {
  items: BTreeMap<String, String>,
  quota: Option<usize>,
  unavailable: bool,
  writes: usize,
}

/// In-process storage. Clones share the same items, so a view and whoever
/// created it observe the same medium.
#[derive(Clone, Default)]
pub struct MemoryStorage {
  inner: Rc<RefCell<Inner>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  /// Limits the total size of all keys and values, in bytes.
  pub fn with_quota(quota: usize) -> Self {
    let storage = Self::default();
    storage.inner.borrow_mut().quota = Some(quota);
    return storage;
  }

  pub fn set_unavailable(&self, unavailable: bool) {
    self.inner.borrow_mut().unavailable = unavailable;
  }

  /// Number of successful `set_item` calls so far.
  pub fn writes(&self) -> usize {
    self.inner.borrow().writes
  }

  pub fn keys(&self) -> Vec<String> {
    self.inner.borrow().items.keys().cloned().collect()
  }

  fn check_available(&self) -> Result<(), StorageError> {
    if self.inner.borrow().unavailable {
      return Err(StorageError::Unavailable("memory storage disabled".to_owned()));
    }
    Ok(())
  }
}

impl KeyValueStorage for MemoryStorage {
  fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
    self.check_available()?;
    Ok(self.inner.borrow().items.get(key).cloned())
  }

  fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    self.check_available()?;
    let mut inner = self.inner.borrow_mut();

    if let Some(quota) = inner.quota {
      let others: usize = inner
        .items
        .iter()
        .filter(|(k, _)| k.as_str() != key)
        .map(|(k, v)| k.len() + v.len())
        .sum();
      let needed = others + key.len() + value.len();
      if needed > quota {
        return Err(StorageError::QuotaExceeded {
          key: key.to_owned(),
          needed,
          quota,
        });
      }
    }

    inner.items.insert(key.to_owned(), value.to_owned());
    inner.writes += 1;
    Ok(())
  }

  fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
    self.check_available()?;
    self.inner.borrow_mut().items.remove(key);
    Ok(())
  }
}
