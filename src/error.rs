use crate::{storage::StorageError, task::TaskId};

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("{0}")]
  Validation(String),

  #[error("storage failure: {0}")]
  Persistence(#[from] StorageError),

  #[error("no user email in session, tasks won't be stored")]
  MissingIdentity,

  #[error("tasks haven't been loaded yet")]
  NotHydrated,

  #[error("no task ids left")]
  IdsExhausted,

  #[error("task with id: {0} not found")]
  TaskNotFound(TaskId),

  #[error("config: {0}")]
  Config(String),
}
