use super::StorageError;

/// String key/value medium with whole-value replace semantics, the way browser
/// local storage behaves. A write either lands completely or not at all.
pub trait KeyValueStorage {
  fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
  fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
  fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}
