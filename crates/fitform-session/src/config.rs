use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Controller tunables. These are programmatic defaults; the on-disk
/// [`FitformConfig`] overrides the autosave interval.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Fixed autosave cadence.
    pub autosave_interval: Duration,
    /// How long `saved` stays visible before decaying to `idle`.
    pub saved_display: Duration,
    /// First retry delay after a failed save; doubles per consecutive
    /// failure up to `backoff_cap`.
    pub backoff_base: Duration,
    pub backoff_cap: Duration,
    /// Consecutive failures before the surfaced status becomes `stalled`.
    pub stall_after: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            autosave_interval: Duration::from_secs(30),
            saved_display: Duration::from_secs(2),
            backoff_base: Duration::from_secs(10),
            backoff_cap: Duration::from_secs(300),
            stall_after: 5,
        }
    }
}

/// On-disk application config, stored as JSON under the platform config dir.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitformConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Root directory for the file-backed assessment store.
    pub data_dir: PathBuf,
    /// Added in v1; older configs get the default backfilled by migration.
    #[serde(default = "default_autosave_secs")]
    pub autosave_interval_secs: u64,
}

fn default_autosave_secs() -> u64 {
    30
}

impl FitformConfig {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            autosave_interval: Duration::from_secs(self.autosave_interval_secs),
            ..SessionConfig::default()
        }
    }
}

fn config_dir() -> Result<PathBuf, SessionError> {
    let base = dirs::config_dir()
        .ok_or_else(|| SessionError::Config("no config directory found".to_string()))?;
    Ok(base.join("com.fitform.app"))
}

fn config_path() -> Result<PathBuf, SessionError> {
    Ok(config_dir()?.join("config.json"))
}

pub fn has_config() -> bool {
    config_path().map(|p| p.exists()).unwrap_or(false)
}

pub fn load_config() -> Result<FitformConfig, SessionError> {
    let path = config_path()?;
    let contents = std::fs::read_to_string(&path)?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: FitformConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
fn migrate(
    mut json: serde_json::Value,
    from_version: u32,
) -> Result<serde_json::Value, SessionError> {
    if from_version > CURRENT_VERSION {
        return Err(SessionError::Config(format!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update FitForm."
        )));
    }

    // v0 → v1: add autosave_interval_secs (fixed at 30 before it was tunable)
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| SessionError::Config("config is not a JSON object".to_string()))?;
        obj.entry("autosave_interval_secs")
            .or_insert(serde_json::Value::Number(default_autosave_secs().into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added autosave_interval_secs)");
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}

pub fn save_config(config: &FitformConfig) -> Result<(), SessionError> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn delete_config() -> Result<(), SessionError> {
    let path = config_path()?;
    if path.exists() {
        std::fs::remove_file(&path)?;
        tracing::info!(path = %path.display(), "config deleted");
    }
    Ok(())
}
