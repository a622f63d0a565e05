use crate::{
  error::Error,
  task::{Task, TaskId},
  traits::Indexable,
};

pub trait Clock {
  fn now_millis(&self) -> u64;
}

pub struct SystemClock;

impl Clock for SystemClock {
  fn now_millis(&self) -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
  }
}

impl<F> Clock for F
where
  F: Fn() -> u64,
{
  fn now_millis(&self) -> u64 {
    self()
  }
}

/// Hands out task ids derived from the creation timestamp.
///
/// Two tasks created within the same millisecond (or after the wall clock
/// stepped backwards) still get distinct, increasing ids: the next id is never
/// lower than `last + 1`.
pub struct IdGenerator {
  clock: Box<dyn Clock>,
  last: TaskId,
}

impl IdGenerator {
  pub fn new() -> Self {
    Self::with_clock(Box::new(SystemClock))
  }

  pub fn with_clock(clock: Box<dyn Clock>) -> Self {
    Self { clock, last: 0 }
  }

  /// Makes sure no id already present in `tasks` is handed out again.
  pub fn seed(&mut self, tasks: &[Task]) {
    if let Some(max_id) = tasks.iter().map(|t| t.id()).max() {
      self.last = self.last.max(max_id);
    }
  }

  /// Fails once `u64::MAX` has been handed out or seeded.
  pub fn next(&mut self) -> Result<TaskId, Error> {
    let floor = self.last.checked_add(1).ok_or(Error::IdsExhausted)?;
    let id = self.clock.now_millis().max(floor);
    self.last = id;
    return Ok(id);
  }
}

impl Default for IdGenerator {
  fn default() -> Self {
    Self::new()
  }
}
