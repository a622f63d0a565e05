use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  Success,
  Error,
  Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
  pub level: Level,
  pub message: String,
}

impl Notification {
  pub fn new(level: Level, message: &str) -> Self {
    Self {
      level,
      message: message.to_owned(),
    }
  }
}

/// Side channel for toasts. Delivery is fire-and-forget.
pub trait Notifier {
  fn notify(&mut self, notification: Notification);

  fn success(&mut self, message: &str) {
    self.notify(Notification::new(Level::Success, message));
  }

  fn error(&mut self, message: &str) {
    self.notify(Notification::new(Level::Error, message));
  }

  fn warning(&mut self, message: &str) {
    self.notify(Notification::new(Level::Warning, message));
  }
}

/// Collects notifications for a front end to render. Clones share the queue.
#[derive(Clone, Default)]
pub struct ToastQueue {
  queue: Rc<RefCell<VecDeque<Notification>>>,
}

impl ToastQueue {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn drain(&self) -> Vec<Notification> {
    self.queue.borrow_mut().drain(..).collect()
  }

  pub fn is_empty(&self) -> bool {
    self.queue.borrow().is_empty()
  }
}

impl Notifier for ToastQueue {
  fn notify(&mut self, notification: Notification) {
    debug!("{:?}: {}", notification.level, notification.message);
    self.queue.borrow_mut().push_back(notification);
  }
}
