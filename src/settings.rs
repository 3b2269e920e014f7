use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{msg::View, standings::JoinKey};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("channel_capacity must be at least 1")]
    ZeroCapacity,
}

/// Server settings. Every key is optional in the TOML file.
///
/// ```toml
/// host = "0.0.0.0"
/// port = 5000
/// data_dir = "/srv/gc/data"
/// join = "name"
/// view = "gc-standings"
/// channel_capacity = 1000
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Directory holding `teams.json` and `standings.json`.
    pub data_dir: PathBuf,
    pub join: JoinKey,
    /// Which notifications refresh the table.
    pub view: View,
    /// How many change notifications may queue before slow subscribers
    /// start missing them.
    pub channel_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            data_dir: PathBuf::from("data"),
            join: JoinKey::Name,
            view: View::GcStandings,
            channel_capacity: 1000,
        }
    }
}

impl Settings {
    pub fn from_toml(path: &Path, text: &str) -> Result<Self, SettingsError> {
        let settings: Settings =
            toml::from_str(text).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads the settings file, or returns the defaults if no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| {
            SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_toml(path, &text)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.channel_capacity == 0 {
            return Err(SettingsError::ZeroCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings =
            Settings::from_toml(Path::new("gc.toml"), "port = 8080\njoin = \"id\"")
                .unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.join, JoinKey::Id);
        assert_eq!(settings.host, Settings::default().host);
    }

    #[test]
    fn test_view_is_configurable() {
        let settings = Settings::from_toml(
            Path::new("gc.toml"),
            "view = \"results-and-standings\"",
        )
        .unwrap();
        assert_eq!(settings.view, View::ResultsAndStandings);
        assert!(
            Settings::from_toml(Path::new("gc.toml"), "view = \"teams\"")
                .is_err()
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = Settings::from_toml(Path::new("gc.toml"), "prot = 8080")
            .unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let err =
            Settings::from_toml(Path::new("gc.toml"), "channel_capacity = 0")
                .unwrap_err();
        assert!(matches!(err, SettingsError::ZeroCapacity));
    }

    #[test]
    fn test_no_file_means_defaults() {
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }

    #[test]
    fn test_defaults_round_trip() {
        let text = toml::to_string(&Settings::default()).unwrap();
        assert_eq!(
            Settings::from_toml(Path::new("gc.toml"), &text).unwrap(),
            Settings::default()
        );
    }
}
