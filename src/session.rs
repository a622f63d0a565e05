use log::debug;

use crate::{
  identity::IdentityContext,
  storage::{KeyValueStorage, StorageError},
};

pub const TOKEN_KEY: &str = "token";
pub const USER_NAME_KEY: &str = "loggedInUser";
pub const USER_EMAIL_KEY: &str = "userEmail";

/// Reads the session fields the login flow left in storage. Unreadable
/// fields count as absent.
pub fn resolve(storage: &dyn KeyValueStorage) -> IdentityContext {
  let read = |key: &str| match storage.get_item(key) {
    Ok(value) => value,
    Err(err) => {
      debug!("couldn't read session key {}: {}", key, err);
      None
    }
  };

  IdentityContext::new(read(TOKEN_KEY), read(USER_NAME_KEY), read(USER_EMAIL_KEY))
}

/// Records a session for `name`/`email` and returns the fresh token.
pub fn begin(
  storage: &mut dyn KeyValueStorage,
  name: &str,
  email: &str,
) -> Result<String, StorageError> {
  let token = uuid::Uuid::new_v4().as_simple().to_string();
  storage.set_item(TOKEN_KEY, &token)?;
  storage.set_item(USER_NAME_KEY, name)?;
  storage.set_item(USER_EMAIL_KEY, email)?;
  debug!("session started for: {}", email);
  return Ok(token);
}

/// Drops the session fields. Task records stay for the next login.
pub fn end(storage: &mut dyn KeyValueStorage) -> Result<(), StorageError> {
  storage.remove_item(TOKEN_KEY)?;
  storage.remove_item(USER_NAME_KEY)?;
  storage.remove_item(USER_EMAIL_KEY)?;
  Ok(())
}
