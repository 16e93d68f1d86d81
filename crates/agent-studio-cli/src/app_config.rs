use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("Missing configuration directory")]
    MissingDirectory,
}

/// Persisted CLI settings. Unknown or missing fields fall back to defaults
/// so old settings files keep loading.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppSettings {
    pub default_project_path: PathBuf,
    pub debug_mode: bool,
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            default_project_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            debug_mode: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppSettings {
    pub fn load_from(path: &Path) -> Result<Option<Self>, SettingsError> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let settings = serde_json::from_str(&contents)?;
            Ok(Some(settings))
        } else {
            Ok(None)
        }
    }
}

pub struct AppConfig {
    base_dir: PathBuf,
}

impl AppConfig {
    pub fn new() -> Result<Self, SettingsError> {
        let proj_dirs = ProjectDirs::from("dev", "agent-studio", "agentstudio")
            .ok_or(SettingsError::MissingDirectory)?;

        let config_dir = proj_dirs.config_dir().to_path_buf();
        fs::create_dir_all(&config_dir)?; // Ensure it exists

        Ok(Self {
            base_dir: config_dir,
        })
    }

    fn settings_path(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn save_settings(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(self.settings_path(), json)?;
        Ok(())
    }

    pub fn load_settings(&self) -> Result<Option<AppSettings>, SettingsError> {
        AppSettings::load_from(&self.settings_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_settings_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppSettings::load_from(&dir.path().join("config.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn settings_round_trip_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let settings = AppSettings {
            default_project_path: PathBuf::from("/tmp/projects"),
            debug_mode: true,
            log_level: "debug".to_string(),
        };
        fs::write(&path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();

        let loaded = AppSettings::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.default_project_path, settings.default_project_path);
        assert!(loaded.debug_mode);
        assert_eq!(loaded.log_level, "debug");
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"debug_mode": true}"#).unwrap();

        let loaded = AppSettings::load_from(&path).unwrap().unwrap();
        assert!(loaded.debug_mode);
        assert_eq!(loaded.log_level, "info");
    }
}
