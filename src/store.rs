use crate::{
  error::Error,
  id::IdGenerator,
  task::{Task, TaskId},
  traits::Indexable,
};

pub const EMPTY_TASK_MSG: &str = "Task cannot be empty..";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
  Added(Task),
  Updated(Task),
}

impl Submitted {
  pub fn task(&self) -> &Task {
    match self {
      Submitted::Added(task) | Submitted::Updated(task) => task,
    }
  }
}

/// The in-memory task list of the mounted dashboard, plus the form state
/// (pending input and edit target) that drives add/update.
///
/// Order is insertion order. Nothing here ever re-sorts.
pub struct TaskStore {
  tasks: Vec<Task>,
  input: String,
  edit_target: Option<TaskId>,
  ids: IdGenerator,
}

impl TaskStore {
  pub fn new(ids: IdGenerator) -> Self {
    Self {
      tasks: Vec::new(),
      input: String::new(),
      edit_target: None,
      ids,
    }
  }

  /// Replaces the collection with a hydrated one.
  pub fn load(&mut self, tasks: Vec<Task>) {
    self.ids.seed(&tasks);
    self.tasks = tasks;
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  pub fn task_by_id(&self, id: TaskId) -> Option<&Task> {
    self.tasks.iter().find(|t| t.id() == id)
  }

  pub fn input(&self) -> &str {
    self.input.as_str()
  }

  pub fn set_input(&mut self, text: &str) {
    self.input = text.to_owned();
  }

  pub fn edit_target(&self) -> Option<TaskId> {
    self.edit_target
  }

  /// Submits the pending input against the current edit target.
  pub fn submit(&mut self) -> Result<Submitted, Error> {
    let input = std::mem::take(&mut self.input);
    let result = self.add_or_update(&input, self.edit_target);
    if result.is_err() {
      self.input = input;
    }
    return result;
  }

  /// Appends a new task, or rewrites the text of `edit_target`.
  ///
  /// On success the pending input and edit target are cleared. Empty text
  /// leaves everything as it was. A target that no longer exists clears the
  /// edit target but keeps the collection intact.
  pub fn add_or_update(
    &mut self,
    input: &str,
    edit_target: Option<TaskId>,
  ) -> Result<Submitted, Error> {
    let text = input.trim();
    if text.is_empty() {
      return Err(Error::Validation(EMPTY_TASK_MSG.to_owned()));
    }

    let submitted = match edit_target {
      Some(id) => {
        self.edit_target = None;
        let task = self
          .tasks
          .iter_mut()
          .find(|t| t.id() == id)
          .ok_or(Error::TaskNotFound(id))?;
        task.set_text(text);
        Submitted::Updated(task.clone())
      }
      None => {
        let task = Task::new(self.ids.next()?, text);
        self.tasks.push(task.clone());
        Submitted::Added(task)
      }
    };

    self.edit_target = None;
    self.input.clear();
    return Ok(submitted);
  }

  /// Flips the completion flag. Unknown ids are ignored.
  pub fn toggle_complete(&mut self, id: TaskId) -> Option<&Task> {
    let task = self.tasks.iter_mut().find(|t| t.id() == id)?;
    task.toggle();
    Some(&*task)
  }

  /// Removes the task. Unknown ids are ignored. A pending edit of the
  /// removed task stays pending and fails on submit.
  pub fn delete(&mut self, id: TaskId) -> Option<Task> {
    let position = self.tasks.iter().position(|t| t.id() == id)?;
    Some(self.tasks.remove(position))
  }

  /// Loads the task's text into the input and marks it as the edit target.
  pub fn begin_edit(&mut self, id: TaskId) -> Option<&str> {
    let text = self.task_by_id(id)?.text().to_owned();
    self.input = text;
    self.edit_target = Some(id);
    Some(self.input.as_str())
  }
}

#[cfg(test)]
mod test {
  use super::{Submitted, TaskStore, EMPTY_TASK_MSG};
  use crate::{error::Error, id::IdGenerator, task::Task, traits::Indexable};

  fn store_at(now: u64) -> TaskStore {
    TaskStore::new(IdGenerator::with_clock(Box::new(move || now)))
  }

  fn store_with(tasks: Vec<Task>) -> TaskStore {
    let mut store = store_at(1);
    store.load(tasks);
    store
  }

  #[test]
  fn add_to_empty_collection() {
    let mut store = store_at(1_000);
    let submitted = store.add_or_update("Buy milk", None).unwrap();

    assert_eq!(submitted, Submitted::Added(Task::new(1_000, "Buy milk")));
    assert_eq!(store.tasks(), &[Task::new(1_000, "Buy milk")]);
  }

  #[test]
  fn add_trims_text() {
    let mut store = store_at(1);
    store.add_or_update("  Buy milk \n", None).unwrap();
    assert_eq!(store.tasks()[0].text(), "Buy milk");
  }

  #[test]
  fn whitespace_input_is_rejected() {
    let mut store = store_with(vec![Task::new(1, "A")]);
    store.set_input("  ");

    match store.submit() {
      Err(Error::Validation(msg)) => assert_eq!(msg, EMPTY_TASK_MSG),
      other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(store.tasks(), &[Task::new(1, "A")]);
    assert_eq!(store.input(), "  ");
  }

  #[test]
  fn rapid_adds_get_distinct_ids() {
    let mut store = store_at(42);
    for n in 0..50 {
      store.add_or_update(&format!("task {}", n), None).unwrap();
    }

    let mut ids: Vec<u64> = store.tasks().iter().map(|t| t.id()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
  }

  #[test]
  fn new_ids_never_collide_with_hydrated_ones() {
    let mut store = store_with(vec![Task::new(500, "old")]);
    let submitted = store.add_or_update("new", None).unwrap();
    assert_eq!(submitted.task().id(), 501);
  }

  #[test]
  fn edit_flow_updates_in_place() {
    let mut store = store_with(vec![Task::new(1, "A"), Task::new(2, "B")]);

    assert_eq!(store.begin_edit(1), Some("A"));
    assert_eq!(store.edit_target(), Some(1));

    store.set_input("A2");
    let submitted = store.submit().unwrap();

    assert_eq!(submitted, Submitted::Updated(Task::new(1, "A2")));
    assert_eq!(store.tasks(), &[Task::new(1, "A2"), Task::new(2, "B")]);
    assert_eq!(store.edit_target(), None);
    assert_eq!(store.input(), "");
  }

  #[test]
  fn update_keeps_completion() {
    let mut store = store_with(vec![Task::new(1, "A")]);
    store.toggle_complete(1);
    store.add_or_update("A2", Some(1)).unwrap();
    assert!(store.tasks()[0].completed());
  }

  #[test]
  fn update_with_empty_text_keeps_edit_target() {
    let mut store = store_with(vec![Task::new(1, "A")]);
    store.begin_edit(1);
    store.set_input(" ");

    assert!(store.submit().is_err());
    assert_eq!(store.edit_target(), Some(1));
    assert_eq!(store.tasks()[0].text(), "A");
  }

  #[test]
  fn update_of_vanished_task_clears_target() {
    let mut store = store_with(vec![Task::new(1, "A")]);
    store.begin_edit(1);
    store.delete(1);
    assert_eq!(store.edit_target(), Some(1));
    store.set_input("A2");

    assert!(matches!(store.submit(), Err(Error::TaskNotFound(1))));
    assert_eq!(store.edit_target(), None);
    assert_eq!(store.input(), "A2");
    assert!(store.tasks().is_empty());
  }

  #[test]
  fn toggle_twice_restores_flag() {
    let mut store = store_with(vec![Task::new(1, "A")]);

    assert!(store.toggle_complete(1).unwrap().completed());
    assert!(!store.toggle_complete(1).unwrap().completed());
  }

  #[test]
  fn toggle_unknown_id_is_noop() {
    let mut store = store_with(vec![Task::new(1, "A")]);
    assert!(store.toggle_complete(9).is_none());
    assert_eq!(store.tasks(), &[Task::new(1, "A")]);
  }

  #[test]
  fn delete_twice() {
    let mut store = store_with(vec![Task::new(1, "A"), Task::new(2, "B")]);

    assert_eq!(store.delete(1), Some(Task::new(1, "A")));
    assert_eq!(store.tasks(), &[Task::new(2, "B")]);
    assert_eq!(store.delete(1), None);
    assert_eq!(store.tasks(), &[Task::new(2, "B")]);
  }

  #[test]
  fn add_fails_once_ids_are_exhausted() {
    let mut store = store_with(vec![Task::new(u64::MAX, "last")]);

    assert!(matches!(
      store.add_or_update("one more", None),
      Err(Error::IdsExhausted)
    ));
    assert_eq!(store.tasks(), &[Task::new(u64::MAX, "last")]);
  }

  #[test]
  fn begin_edit_unknown_id_is_noop() {
    let mut store = store_with(vec![Task::new(1, "A")]);
    store.set_input("draft");

    assert_eq!(store.begin_edit(3), None);
    assert_eq!(store.input(), "draft");
    assert_eq!(store.edit_target(), None);
  }
}
