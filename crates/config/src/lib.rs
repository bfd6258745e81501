pub mod schema;
pub mod watcher;

pub use schema::{ChartConfig, ConnectionConfig, MindflexConfig, ReconnectMode, ThemeConfig};
pub use watcher::ConfigWatcher;

use mindflex_core::{DashboardError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `MindflexConfig::default()`
/// if the file doesn't exist so the dashboard always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<MindflexConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(MindflexConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| DashboardError::Config(format!("cannot read '{}': {e}", path.display())))?;

    toml::from_str(&raw).map_err(|e| DashboardError::Config(format!("TOML parse error: {e}")))
}

/// Write `config` as pretty TOML, creating parent directories as needed.
pub fn save(config: &MindflexConfig, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let raw = toml::to_string_pretty(config)
        .map_err(|e| DashboardError::Config(format!("TOML serialize error: {e}")))?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, raw)?;
    Ok(())
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("mindflex").join("mindflex.toml")
}
