use crate::config::AppSettings;
use std::path::{Path, PathBuf};

/// Failures while reading or writing the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("no configuration directory available on this system")]
    NoConfigDir,
    #[error("settings I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Location of `settings.json` in the OS config directory.
pub fn settings_path() -> Result<PathBuf, SettingsError> {
    directories::ProjectDirs::from("", "", "ActivityLog")
        .map(|dirs| dirs.config_dir().join("settings.json"))
        .ok_or(SettingsError::NoConfigDir)
}

/// Load settings from a JSON file.
pub fn load_settings(path: &Path) -> Result<AppSettings, SettingsError> {
    let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut settings: AppSettings =
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    settings.timeline.sanitize();
    log::info!("loaded settings from {}", path.display());
    Ok(settings)
}

/// Save settings to a JSON file, creating the parent directory if needed.
pub fn save_settings(settings: &AppSettings, path: &Path) -> Result<(), SettingsError> {
    let io_err = |source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(settings).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(io_err)?;
    log::info!("saved settings to {}", path.display());
    Ok(())
}

/// Load settings from the default location, falling back to defaults.
///
/// A missing file is the normal first-run case and is not reported.
pub fn load_or_default() -> (AppSettings, Option<PathBuf>) {
    let path = match settings_path() {
        Ok(path) => path,
        Err(e) => {
            log::warn!("{e}; using default settings");
            return (AppSettings::default(), None);
        }
    };
    if !path.exists() {
        return (AppSettings::default(), Some(path));
    }
    match load_settings(&path) {
        Ok(settings) => (settings, Some(path)),
        Err(e) => {
            log::warn!("{e}; using default settings");
            (AppSettings::default(), Some(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_preserves_tunables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut settings = AppSettings::default();
        settings.timeline.max_zoom = 6.0;
        settings.timeline.track_height = 80.0;

        save_settings(&settings, &path).unwrap();
        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_settings(&path),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
