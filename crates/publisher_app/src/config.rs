use std::fs;
use std::path::Path;

use publisher_core::RepoConfig;
use publisher_engine::{parse_repo_url, ConfigError};
use publisher_logging::{publish_error, publish_info, publish_warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "publisher.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredConfig {
    pub token: String,
    pub repo_url: String,
    #[serde(default = "default_date_prefix")]
    pub date_prefix: bool,
}

fn default_date_prefix() -> bool {
    true
}

/// Loads the stored configuration. A missing file is not an error; an
/// unreadable or unparseable one degrades to `None` with a logged warning.
pub fn load_config(path: &Path) -> Option<StoredConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return None;
        }
        Err(err) => {
            publish_warn!("Failed to read config from {:?}: {}", path, err);
            return None;
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            publish_info!("Loaded configuration from {:?}", path);
            Some(config)
        }
        Err(err) => {
            publish_warn!("Failed to parse config from {:?}: {}", path, err);
            None
        }
    }
}

pub fn save_config(path: &Path, config: &StoredConfig) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(config, pretty) {
        Ok(text) => text,
        Err(err) => {
            publish_error!("Failed to serialize config: {}", err);
            return;
        }
    };

    if let Err(err) = fs::write(path, content) {
        publish_error!("Failed to write config to {:?}: {}", path, err);
    }
}

/// Resolves a stored configuration into the core's repository config by
/// parsing the repository reference.
pub fn resolve(stored: &StoredConfig) -> Result<RepoConfig, ConfigError> {
    let repo_ref = parse_repo_url(&stored.repo_url)?;
    Ok(RepoConfig {
        token: stored.token.clone(),
        owner: repo_ref.owner,
        repo: repo_ref.repo,
        date_prefix: stored.date_prefix,
    })
}
