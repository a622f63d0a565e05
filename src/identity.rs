const STORAGE_KEY_PREFIX: &str = "tasks_";

/// Who is looking at the dashboard. Resolved once when the view mounts and
/// never re-read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityContext {
  token: Option<String>,
  name: Option<String>,
  email: Option<String>,
}

impl IdentityContext {
  pub fn new(token: Option<String>, name: Option<String>, email: Option<String>) -> Self {
    Self {
      token: non_empty(token),
      name: non_empty(name),
      email: non_empty(email),
    }
  }

  pub fn anonymous() -> Self {
    Self::default()
  }

  pub fn token(&self) -> Option<&str> {
    self.token.as_deref()
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub fn email(&self) -> Option<&str> {
    self.email.as_deref()
  }

  /// Route guard: the dashboard is only reachable with a session token.
  pub fn is_authenticated(&self) -> bool {
    self.token.is_some()
  }

  /// Storage partition for this user's tasks, `tasks_<email>`.
  pub fn storage_key(&self) -> Option<String> {
    self
      .email
      .as_ref()
      .map(|email| format!("{}{}", STORAGE_KEY_PREFIX, email))
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}
