use log::{debug, warn};

use crate::{error::Error, storage::KeyValueStorage, task::Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationState {
  Unhydrated,
  Hydrating,
  Hydrated,
  /// The read failed. Nothing is ever written for the rest of the mount.
  Failed,
}

/// Moves one user's task collection between memory and storage.
///
/// Hydration is a one-shot latch: the first `hydrate` reads the record,
/// every later call is ignored. Nothing is written until hydration finished,
/// so an empty collection can never overwrite a stored one. A failed read
/// leaves the bridge in `Failed`, which never writes either.
pub struct PersistenceBridge {
  key: Option<String>,
  state: HydrationState,
}

impl PersistenceBridge {
  pub fn new(key: Option<String>) -> Self {
    Self {
      key,
      state: HydrationState::Unhydrated,
    }
  }

  pub fn key(&self) -> Option<&str> {
    self.key.as_deref()
  }

  pub fn state(&self) -> HydrationState {
    self.state
  }

  /// Loads the stored collection.
  ///
  /// Returns `Ok(None)` when hydration already happened. A missing or
  /// undecodable record hydrates as an empty collection; a failed read trips
  /// the latch into `Failed` and reports the failure.
  pub fn hydrate(&mut self, storage: &dyn KeyValueStorage) -> Result<Option<Vec<Task>>, Error> {
    if self.state != HydrationState::Unhydrated {
      debug!("hydrate skipped, state: {:?}", self.state);
      return Ok(None);
    }

    let key = match self.key.as_deref() {
      Some(key) => key,
      None => return Err(Error::MissingIdentity),
    };

    self.state = HydrationState::Hydrating;
    let stored = match storage.get_item(key) {
      Ok(stored) => stored,
      Err(err) => {
        self.state = HydrationState::Failed;
        return Err(err.into());
      }
    };
    self.state = HydrationState::Hydrated;

    let tasks = match stored {
      Some(raw) => serde_json::from_str::<Vec<Task>>(&raw).unwrap_or_else(|err| {
        warn!("couldn't decode tasks under {}: {}", key, err);
        Vec::new()
      }),
      None => Vec::new(),
    };

    debug!("hydrated {} tasks from: {}", tasks.len(), key);
    return Ok(Some(tasks));
  }

  /// Replaces the stored record with `tasks`.
  pub fn persist(&self, storage: &mut dyn KeyValueStorage, tasks: &[Task]) -> Result<(), Error> {
    let key = self.key.as_deref().ok_or(Error::MissingIdentity)?;
    if self.state != HydrationState::Hydrated {
      return Err(Error::NotHydrated);
    }

    let raw = serde_json::to_string(tasks).map_err(crate::storage::StorageError::from)?;
    storage.set_item(key, &raw)?;

    debug!("persisted {} tasks to: {}", tasks.len(), key);
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::{HydrationState, PersistenceBridge};
  use crate::{
    error::Error,
    storage::{KeyValueStorage, MemoryStorage},
    task::Task,
  };

  const KEY: &str = "tasks_ann@example.com";

  fn bridge() -> PersistenceBridge {
    PersistenceBridge::new(Some(KEY.to_owned()))
  }

  fn sample() -> Vec<Task> {
    let mut done = Task::new(2, "B");
    done.toggle();
    vec![Task::new(1, "A"), done, Task::new(3, "C")]
  }

  #[test]
  fn hydrate_empty_storage_does_not_write() {
    let storage = MemoryStorage::new();
    let mut bridge = bridge();

    let tasks = bridge.hydrate(&storage).unwrap().unwrap();
    assert!(tasks.is_empty());
    assert_eq!(storage.writes(), 0);
    assert_eq!(bridge.state(), HydrationState::Hydrated);
  }

  #[test]
  fn hydrate_runs_once() {
    let mut storage = MemoryStorage::new();
    storage.set_item(KEY, r#"[{"id":1,"text":"A","completed":false}]"#).unwrap();
    let mut bridge = bridge();

    assert_eq!(bridge.hydrate(&storage).unwrap().unwrap().len(), 1);
    assert!(bridge.hydrate(&storage).unwrap().is_none());
  }

  #[test]
  fn persist_then_hydrate_round_trips() {
    let mut storage = MemoryStorage::new();
    let mut writer = bridge();
    writer.hydrate(&storage).unwrap();
    writer.persist(&mut storage, &sample()).unwrap();

    let mut reader = bridge();
    assert_eq!(reader.hydrate(&storage).unwrap().unwrap(), sample());
  }

  #[test]
  fn persist_before_hydrate_is_refused() {
    let mut storage = MemoryStorage::new();
    let err = bridge().persist(&mut storage, &sample()).unwrap_err();
    assert!(matches!(err, Error::NotHydrated));
    assert_eq!(storage.writes(), 0);
  }

  #[test]
  fn persist_only_touches_own_key() {
    let mut storage = MemoryStorage::new();
    storage.set_item("tasks_bob@example.com", "[]").unwrap();

    let mut bridge = bridge();
    bridge.hydrate(&storage).unwrap();
    bridge.persist(&mut storage, &sample()).unwrap();

    assert_eq!(
      storage.get_item("tasks_bob@example.com").unwrap().as_deref(),
      Some("[]")
    );
  }

  #[test]
  fn undecodable_record_hydrates_empty() {
    let mut storage = MemoryStorage::new();
    storage.set_item(KEY, "not json").unwrap();

    let tasks = bridge().hydrate(&storage).unwrap().unwrap();
    assert!(tasks.is_empty());
  }

  #[test]
  fn missing_identity_short_circuits() {
    let mut storage = MemoryStorage::new();
    let mut bridge = PersistenceBridge::new(None);

    assert!(matches!(bridge.hydrate(&storage), Err(Error::MissingIdentity)));
    assert!(matches!(
      bridge.persist(&mut storage, &sample()),
      Err(Error::MissingIdentity)
    ));
    assert_eq!(bridge.state(), HydrationState::Unhydrated);
  }

  #[test]
  fn failed_read_never_writes() {
    let mut storage = MemoryStorage::new();
    storage.set_unavailable(true);
    let mut bridge = bridge();

    assert!(matches!(bridge.hydrate(&storage), Err(Error::Persistence(_))));
    assert_eq!(bridge.state(), HydrationState::Failed);

    storage.set_unavailable(false);
    assert!(bridge.hydrate(&storage).unwrap().is_none());
    assert!(matches!(
      bridge.persist(&mut storage, &sample()),
      Err(Error::NotHydrated)
    ));
    assert_eq!(storage.writes(), 0);
  }

  #[test]
  fn quota_exceeded_is_reported() {
    let mut storage = MemoryStorage::with_quota(10);
    let mut bridge = bridge();
    bridge.hydrate(&storage).unwrap();

    assert!(matches!(
      bridge.persist(&mut storage, &sample()),
      Err(Error::Persistence(_))
    ));
  }
}
