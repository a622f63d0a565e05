use std::time::Duration;

use log::{debug, warn};

use crate::{
  error::Error,
  id::IdGenerator,
  identity::IdentityContext,
  notify::Notifier,
  persistence::{HydrationState, PersistenceBridge},
  session,
  storage::KeyValueStorage,
  store::{Submitted, TaskStore},
  task::{Task, TaskId},
};

pub const TASK_ADDED_MSG: &str = "Your task is added";
pub const TASK_UPDATED_MSG: &str = "Task updated successfully!";
pub const LOGOUT_MSG: &str = "You logout successfully";
pub const DEFAULT_LOGOUT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
  Login,
  Dashboard,
}

impl Route {
  pub fn path(&self) -> &'static str {
    match self {
      Route::Login => "/login",
      Route::Dashboard => "/dashboard",
    }
  }
}

/// Where the session boundary should navigate next, and how long to wait so
/// the last toast stays visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
  pub route: Route,
  pub after: Duration,
}

/// A mounted dashboard view for one user.
pub struct Dashboard {
  storage: Box<dyn KeyValueStorage>,
  identity: IdentityContext,
  bridge: PersistenceBridge,
  store: TaskStore,
  notifier: Box<dyn Notifier>,
  logout_delay: Duration,
}

impl Dashboard {
  /// Resolves the session from `storage` and refuses anonymous visitors.
  pub fn open(
    storage: Box<dyn KeyValueStorage>,
    notifier: Box<dyn Notifier>,
  ) -> Result<Self, Redirect> {
    let identity = session::resolve(storage.as_ref());
    if !identity.is_authenticated() {
      debug!("no session token, redirecting to {}", Route::Login.path());
      return Err(Redirect {
        route: Route::Login,
        after: Duration::ZERO,
      });
    }
    Ok(Self::new(storage, identity, notifier))
  }

  pub fn new(
    storage: Box<dyn KeyValueStorage>,
    identity: IdentityContext,
    notifier: Box<dyn Notifier>,
  ) -> Self {
    let bridge = PersistenceBridge::new(identity.storage_key());
    Self {
      storage,
      identity,
      bridge,
      store: TaskStore::new(IdGenerator::new()),
      notifier,
      logout_delay: DEFAULT_LOGOUT_DELAY,
    }
  }

  pub fn with_ids(mut self, ids: IdGenerator) -> Self {
    self.store = TaskStore::new(ids);
    return self;
  }

  pub fn with_logout_delay(mut self, delay: Duration) -> Self {
    self.logout_delay = delay;
    return self;
  }

  /// Loads the user's tasks. Safe to call repeatedly; only the first call
  /// reads storage, and none of them write.
  pub fn mount(&mut self) {
    match self.bridge.hydrate(self.storage.as_ref()) {
      Ok(Some(tasks)) => self.store.load(tasks),
      Ok(None) => {}
      Err(Error::MissingIdentity) => {
        warn!("no user email in session, tasks are kept in memory only");
      }
      Err(err) => {
        warn!("hydrate failed: {}", err);
        self.notifier.warning(&err.to_string());
      }
    };
  }

  pub fn hydration_state(&self) -> HydrationState {
    self.bridge.state()
  }

  pub fn identity(&self) -> &IdentityContext {
    &self.identity
  }

  pub fn tasks(&self) -> &[Task] {
    self.store.tasks()
  }

  pub fn input(&self) -> &str {
    self.store.input()
  }

  pub fn edit_target(&self) -> Option<TaskId> {
    self.store.edit_target()
  }

  pub fn submit_label(&self) -> &'static str {
    match self.store.edit_target() {
      Some(_) => "Update",
      None => "Add",
    }
  }

  pub fn set_input(&mut self, text: &str) {
    self.store.set_input(text);
  }

  pub fn submit(&mut self) -> Result<Submitted, Error> {
    match self.store.submit() {
      Ok(submitted) => {
        self.commit();
        match submitted {
          Submitted::Added(_) => self.notifier.success(TASK_ADDED_MSG),
          Submitted::Updated(_) => self.notifier.success(TASK_UPDATED_MSG),
        };
        Ok(submitted)
      }
      Err(err) => {
        self.notifier.error(&err.to_string());
        Err(err)
      }
    }
  }

  pub fn toggle_complete(&mut self, id: TaskId) -> Option<Task> {
    let toggled = self.store.toggle_complete(id).cloned();
    if toggled.is_some() {
      self.commit();
    }
    return toggled;
  }

  pub fn delete(&mut self, id: TaskId) -> Option<Task> {
    let removed = self.store.delete(id);
    if removed.is_some() {
      self.commit();
    }
    return removed;
  }

  pub fn begin_edit(&mut self, id: TaskId) -> bool {
    self.store.begin_edit(id).is_some()
  }

  /// Ends the session and discards the in-memory list. Stored tasks stay.
  pub fn logout(mut self) -> Redirect {
    if let Err(err) = session::end(self.storage.as_mut()) {
      warn!("couldn't clear session: {}", err);
    }
    self.notifier.success(LOGOUT_MSG);
    return Redirect {
      route: Route::Login,
      after: self.logout_delay,
    };
  }

  fn commit(&mut self) {
    match self.bridge.persist(self.storage.as_mut(), self.store.tasks()) {
      Ok(_) => {}
      Err(Error::MissingIdentity) | Err(Error::NotHydrated) => {
        debug!("skip persist, state: {:?}", self.bridge.state());
      }
      Err(err) => {
        warn!("persist failed: {}", err);
        self.notifier.warning(&format!(
          "{}. Changes are kept until you leave this page.",
          err
        ));
      }
    };
  }
}
