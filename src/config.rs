use std::path::{Path, PathBuf};

use crate::error::Error;

const TASKBOARD_DEFAULT_STORAGE_DIR: &str = ".taskboard";
const TASKBOARD_DEFAULT_STORAGE_FILE: &str = "storage.json";
const TASKBOARD_DEFAULT_CONFIG_NAME: &str = ".taskboard.json";
const TASKBOARD_CONFIG_ENV: &str = "TASKBOARD_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Config {
  pub storage_path: String,
  #[serde(default = "default_logout_redirect_ms")]
  pub logout_redirect_ms: u64,
}

fn default_logout_redirect_ms() -> u64 {
  1000
}

impl Config {
  /// Reads the config from `$TASKBOARD_CONFIG`, or `~/.taskboard.json`.
  /// A missing file is created with defaults.
  pub fn new() -> Result<Self, Error> {
    let home_env = std::env::var("HOME").map_err(|_| Error::Config("HOME is not set".to_owned()))?;
    let home = Path::new(home_env.as_str());

    let config_file_path = match std::env::var(TASKBOARD_CONFIG_ENV) {
      Ok(file_path) => PathBuf::from(file_path),
      Err(_) => home.join(TASKBOARD_DEFAULT_CONFIG_NAME),
    };

    return Self::load_or_create(&config_file_path, home);
  }

  pub fn load_or_create(config_file_path: &Path, home: &Path) -> Result<Self, Error> {
    if !config_file_path.exists() {
      let config = Self::with_home(home);
      let file = std::fs::File::create(config_file_path).map_err(|err| {
        Error::Config(format!("can't create {}: {}", config_file_path.display(), err))
      })?;
      serde_json::to_writer_pretty(file, &config)
        .map_err(|err| Error::Config(format!("can't write default config: {}", err)))?;
      return Ok(config);
    }

    let file = std::fs::File::open(config_file_path)
      .map_err(|err| Error::Config(format!("can't open {}: {}", config_file_path.display(), err)))?;
    return serde_json::from_reader(file)
      .map_err(|err| Error::Config(format!("bad config {}: {}", config_file_path.display(), err)));
  }

  fn with_home(home: &Path) -> Self {
    Self {
      storage_path: home
        .join(TASKBOARD_DEFAULT_STORAGE_DIR)
        .join(TASKBOARD_DEFAULT_STORAGE_FILE)
        .to_string_lossy()
        .into_owned(),
      logout_redirect_ms: default_logout_redirect_ms(),
    }
  }

  pub fn logout_redirect(&self) -> std::time::Duration {
    std::time::Duration::from_millis(self.logout_redirect_ms)
  }
}
