//! Initialize the configuration directory: create ~/.tattle and a config template.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Written by `tattle init` when no config exists yet. Credentials stay null;
/// they are normally injected via SLACK_BOT_TOKEN / MOD_CHANNEL_ID instead.
const DEFAULT_CONFIG: &str = r#"{
  "gateway": {
    "bind": "127.0.0.1",
    "port": 15252
  },
  "slack": {
    "botToken": null,
    "modChannelId": null,
    "verificationToken": null,
    "apiBase": null
  }
}
"#;

/// Create the config directory and a default config file if they do not exist.
pub fn init_config_dir(config_path: &Path) -> Result<PathBuf> {
    let config_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(config_dir)
        .with_context(|| format!("creating config directory {}", config_dir.display()))?;

    if !config_path.exists() {
        std::fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("writing default config to {}", config_path.display()))?;
        log::info!("created default config at {}", config_path.display());
    } else {
        log::debug!("config already exists at {}, skipping", config_path.display());
    }

    Ok(config_dir.to_path_buf())
}
