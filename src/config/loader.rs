//! Loading and persisting the user configuration file

use std::fs;
use std::path::{Path, PathBuf};

use ::config::{File, FileFormat};
use directories::ProjectDirs;
use tracing::debug;

use super::ConfigError;
use super::model::Config;
use super::overlay::ConfigOverlay;

/// File name of the user configuration inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default location of the user configuration file
///
/// Resolves to the platform configuration directory (for example
/// `~/.config/gesture-lights/config.toml` on Linux), falling back to
/// `./config.toml` when no home directory can be determined.
pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("", "", "gesture-lights")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// What [`Config::load_with_status`] did to the file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The file was missing and has been written with the defaults
    Created,
    /// The file lacked fields and has been rewritten with the merged result
    Updated,
    /// The file was left as it was
    Unchanged,
}

impl Config {
    /// Loads the configuration at `path`, merged over the built-in defaults
    ///
    /// A missing file is created from the defaults. An existing file is
    /// merged over the defaults and validated; when it lacks fields the
    /// merged result carries, it is rewritten so users see every option.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_status(path).map(|(config, _)| config)
    }

    /// Same as [`Config::load`], also reporting whether the file was written
    pub fn load_with_status(path: &Path) -> Result<(Self, LoadStatus), ConfigError> {
        let mut config = Config::default();

        if !path.exists() {
            config.save(path)?;
            return Ok((config, LoadStatus::Created));
        }

        let overlay = read_overlay(path)?;
        config.merge(overlay.clone());
        config.validate()?;

        if ConfigOverlay::from(&config) != overlay {
            config.save(path)?;
            return Ok((config, LoadStatus::Updated));
        }

        Ok((config, LoadStatus::Unchanged))
    }

    /// Like [`Config::load`] but never touches the file
    ///
    /// A missing file yields the defaults.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        if path.exists() {
            config.merge(read_overlay(path)?);
        }
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Parses the user file into a sparse overlay
pub fn read_overlay(path: &Path) -> Result<ConfigOverlay, ConfigError> {
    debug!(path = %path.display(), "Reading configuration");

    let overlay = ::config::Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml).required(true))
        .build()?
        .try_deserialize::<ConfigOverlay>()?;

    Ok(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{Action, Binding, FingerPattern, Gesture, Hsbk, LogLevel, Selector};
    use crate::config::model::SelectorType;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let (config, status) = Config::load_with_status(&path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(status, LoadStatus::Created);
        assert!(path.exists());

        // Loading the freshly written file yields the same configuration
        let (reloaded, status) = Config::load_with_status(&path).unwrap();
        assert_eq!(reloaded, Config::default());
        assert_eq!(status, LoadStatus::Unchanged);
    }

    #[test]
    fn test_incomplete_file_reports_update() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[general]\ntransition_ms = 30\n").unwrap();

        let (config, status) = Config::load_with_status(&path).unwrap();
        assert_eq!(config.general.transition_ms, 30);
        assert_eq!(status, LoadStatus::Updated);
        assert_eq!(Config::load_with_status(&path).unwrap().1, LoadStatus::Unchanged);
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
[general]
transition_ms = 400

[logging]
level = "debug"

[[bindings]]
gesture = "swipe_left"
action = "set_color"
selector = { type = "serial", value = "d073d5000000" }
hsbk = { hue = 240, saturation = 100, brightness = 100 }

[[bindings]]
pattern = [1, 1, 1, 1, 1]
action = "power_on"
selector = { type = "all" }
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.general.transition_ms, 400);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.tracking, Config::default().tracking);
        assert_eq!(config.bindings.len(), 2);

        let color = &config.bindings[0];
        assert_eq!(color.gesture, Some(Gesture::SwipeLeft));
        assert_eq!(color.action, Some(Action::SetColor));
        assert_eq!(color.selector.kind, SelectorType::Serial);
        assert_eq!(
            color.selector.serial.map(|s| s.to_string()),
            Some("d073d5000000".to_string())
        );
        assert_eq!(
            color.hsbk,
            Some(Hsbk {
                hue: Some(240.0),
                saturation: Some(100.0),
                brightness: Some(100.0),
                kelvin: None,
            })
        );

        let power = &config.bindings[1];
        assert_eq!(power.pattern, Some(FingerPattern::OPEN));
        assert_eq!(power.selector, Selector::all());

        // Missing tracking section was written back
        let overlay = read_overlay(&path).unwrap();
        assert!(overlay.tracking.is_some());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[tracking]\ngesture_threshold = 1.2\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.to_string(), "tracking.gesture_threshold: must be <= 1.0");
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[general\ntransition_ms = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = Config::with_bindings(vec![
            Binding::gesture(Gesture::PullUp, Action::PowerOn, Selector::new(SelectorType::Group, "Bedroom")),
            Binding::pattern(FingerPattern::CLOSED, Action::PowerOff, Selector::all()),
        ]);
        config.general.transition_ms = 20;
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_read_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        assert_eq!(Config::read(&path).unwrap(), Config::default());
        assert!(!path.exists());

        fs::write(&path, "[general]\ntransition_ms = 50\n").unwrap();
        assert_eq!(Config::read(&path).unwrap().general.transition_ms, 50);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[general]\ntransition_ms = 50\n");
    }
}
