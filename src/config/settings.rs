use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::AppConfig;

const APP_NAME: &str = "DirtreeCsv";
const CONFIG_FILE: &str = "config.json";

/// Returns the platform-specific configuration directory for the application.
pub fn get_config_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "dirtreecsv", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Returns the full path to the configuration file.
pub fn get_config_file_path() -> Option<PathBuf> {
    get_config_directory().map(|dir| dir.join(CONFIG_FILE))
}

fn resolve_path(path_override: Option<&Path>) -> Result<PathBuf> {
    match path_override {
        Some(path) => Ok(path.to_path_buf()),
        None => get_config_file_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory")),
    }
}

/// Loads the application configuration.
///
/// `path_override` replaces the platform config file, which tests use to stay
/// inside a temporary directory. A missing file is created with defaults. A file
/// that cannot be parsed is migrated field by field, and if that fails too the
/// defaults are used.
pub fn load_config(path_override: Option<&Path>) -> Result<AppConfig> {
    let config_path = resolve_path(path_override)?;

    if !config_path.exists() {
        tracing::info!(
            "Config file not found, creating default config at {:?}",
            config_path
        );
        let default_config = AppConfig::default();
        save_config(&default_config, Some(&config_path))?;
        return Ok(default_config);
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file {:?}", config_path))?;

    match serde_json::from_str::<AppConfig>(&config_content) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", config_path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Falling back to default config.",
                config_path,
                e
            );
            migrate_legacy_config(&config_content).or_else(|_| Ok(AppConfig::default()))
        }
    }
}

/// Fills missing or null fields of an older config with their defaults.
fn migrate_legacy_config(config_content: &str) -> Result<AppConfig> {
    let mut value: Value = serde_json::from_str(config_content)?;
    let obj = value
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Config is not a JSON object"))?;

    let defaults = serde_json::to_value(AppConfig::default())?;
    let Value::Object(defaults) = defaults else {
        anyhow::bail!("Default config did not serialize to an object");
    };

    for (key, default_val) in defaults {
        if obj.get(&key).map_or(true, Value::is_null) {
            obj.insert(key, default_val);
        }
    }

    let migrated_config: AppConfig = serde_json::from_value(value)?;
    tracing::info!("Successfully migrated legacy config");
    Ok(migrated_config)
}

/// Saves the provided configuration, creating the parent directory if needed.
pub fn save_config(config: &AppConfig, path_override: Option<&Path>) -> Result<()> {
    let config_path = resolve_path(path_override)?;

    if let Some(config_dir) = config_path.parent() {
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)
                .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;
            tracing::info!("Created config directory: {:?}", config_dir);
        }
    }

    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, config_json)
        .with_context(|| format!("Failed to write config file {:?}", config_path))?;
    tracing::info!("Saved config to {:?}", config_path);

    Ok(())
}

// Platform-specific configuration paths for reference:
// macOS:   ~/Library/Application Support/com.dirtreecsv.DirtreeCsv/
// Linux:   ~/.config/dirtreecsv/
// Windows: %APPDATA%/dirtreecsv/DirtreeCsv/config/
