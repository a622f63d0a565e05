use crate::traits::Indexable;

pub type TaskId = u64;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Task {
  id: TaskId,
  text: String,
  #[serde(default)]
  completed: bool,
}

impl Indexable for Task {
  fn id(&self) -> TaskId {
    self.id
  }
}

impl Task {
  pub fn new(id: TaskId, text: &str) -> Self {
    Self {
      id,
      text: text.to_owned(),
      completed: false,
    }
  }

  pub fn text(&self) -> &str {
    self.text.as_str()
  }

  pub fn completed(&self) -> bool {
    self.completed
  }

  pub fn set_text(&mut self, text: &str) {
    self.text = text.to_owned();
  }

  pub fn toggle(&mut self) {
    self.completed = !self.completed;
  }
}
