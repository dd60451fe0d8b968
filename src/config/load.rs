use std::{env, path::PathBuf};

use log::warn;

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `ENCORE__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ENCORE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Load and validate settings. Config is optional: a file that fails to
    /// load or validate yields the defaults, with a warning.
    pub fn load_or_default() -> Self {
        let loaded = Self::load()
            .map_err(|e| format!("failed to load config: {e}"))
            .and_then(|s| s.validate().map(|()| s).map_err(|msg| format!("invalid config: {msg}")));
        loaded.unwrap_or_else(|msg| {
            warn!("{msg}; using defaults");
            Self::default()
        })
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let volume = self.playback.volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(format!("playback.volume must be within [0, 1], got {volume}"));
        }
        if self.runtime.poll_interval_ms == 0 {
            return Err("runtime.poll_interval_ms must be >= 1".to_string());
        }
        Ok(())
    }

    /// Snapshot location: the configured path, else the XDG state default.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.storage
            .snapshot_path
            .clone()
            .or_else(default_snapshot_path)
    }
}

/// Resolve the config path from `ENCORE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ENCORE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

fn xdg_dir(var: &str, home_fallback: &[&str]) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var) {
        return Some(PathBuf::from(dir));
    }
    env::var_os("HOME").map(|home| {
        home_fallback
            .iter()
            .fold(PathBuf::from(home), |acc, part| acc.join(part))
    })
}

/// Compute the default config path under `$XDG_CONFIG_HOME/encore/config.toml`
/// or `~/.config/encore/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"]).map(|d| d.join("encore").join("config.toml"))
}

/// Compute the default snapshot path under `$XDG_STATE_HOME/encore/snapshot.json`
/// or `~/.local/state/encore/snapshot.json`.
pub fn default_snapshot_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", &[".local", "state"]).map(|d| d.join("encore").join("snapshot.json"))
}
