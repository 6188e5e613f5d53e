use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SERVER_URL_ENV: &str = "LIFTLOG_SERVER_URL";

const APP_DIR: &str = "liftlog";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:3333".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Defaults, then the user's config file, then `LIFTLOG_SERVER_URL`
    pub fn load() -> Self {
        let mut config = Self::config_path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default();

        if let Ok(server_url) = std::env::var(SERVER_URL_ENV)
            && !server_url.trim().is_empty()
        {
            config.server_url = server_url;
        }

        config
    }

    /// Read a config file; `None` when it is missing or unreadable
    pub fn load_from(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str::<Config>(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                log::warn!(
                    "[Config] Ignoring malformed {}: {}",
                    path.display(),
                    err
                );
                None
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }
}
