//! Saved user preferences.
//!
//! A small TOML file holding the theme flag and the last selected city.
//! There is no schema versioning: unknown keys are ignored and missing keys
//! take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use urban_map_city::DEFAULT_CITY;

/// Environment variable overriding the preferences file location.
pub const PREFERENCES_ENV: &str = "URBAN_MAP_PREFERENCES";

/// Errors from reading or writing preferences.
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preferences parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Preferences serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// User preferences persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Whether the dark theme is selected.
    pub dark_theme: bool,
    /// Last selected city.
    pub city: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_theme: false,
            city: DEFAULT_CITY.to_string(),
        }
    }
}

impl Preferences {
    /// Loads preferences from `path`, returning defaults if the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// * If the file exists but cannot be read
    /// * If the file is not valid TOML
    pub fn load(path: &Path) -> Result<Self, PreferencesError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(toml::de::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No preferences at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes preferences to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// * If the directory or file cannot be written
    pub fn save(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string(self)?)?;
        log::debug!("Saved preferences to {}", path.display());
        Ok(())
    }
}

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Location of the preferences file: `$URBAN_MAP_PREFERENCES`, or
/// `data/preferences.toml` under the project root.
#[must_use]
pub fn preferences_path() -> PathBuf {
    std::env::var_os(PREFERENCES_ENV).map_or_else(
        || project_root().join("data").join("preferences.toml"),
        PathBuf::from,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.city, "Brasília");
        assert!(!prefs.dark_theme);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.toml");
        let prefs = Preferences {
            dark_theme: true,
            city: "Brasília".to_string(),
        };
        prefs.save(&path).unwrap();
        assert_eq!(Preferences::load(&path).unwrap(), prefs);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "dark_theme = true\nunknown = 3\n").unwrap();
        let prefs = Preferences::load(&path).unwrap();
        assert!(prefs.dark_theme);
        assert_eq!(prefs.city, "Brasília");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "dark_theme = [").unwrap();
        assert!(matches!(
            Preferences::load(&path),
            Err(PreferencesError::Parse(_))
        ));
    }
}
