use anyhow::Result;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::input::parse_time_zone;
use crate::types::SampleWindow;

pub const DEFAULT_MIN_ALTITUDE: f64 = 30.0;

fn default_min_altitude() -> f64 {
    DEFAULT_MIN_ALTITUDE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default observer location, in the same "lat, lon" form the CLI accepts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// IANA zone name used for hour labels and the local window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default)]
    pub window: SampleWindow,

    /// Altitude a target must clear to count as observable in the summary
    #[serde(default = "default_min_altitude")]
    pub min_altitude: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            location: None,
            timezone: None,
            window: SampleWindow::default(),
            min_altitude: DEFAULT_MIN_ALTITUDE,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("sky-visibility");
        Ok(config_dir.join("config.toml"))
    }

    /// Load from the user config directory, falling back to defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                AppConfig::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return AppConfig::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Failed to parse config: {}", e),
            },
            Err(e) => tracing::warn!("Failed to read config: {}", e),
        }
        AppConfig::default()
    }

    /// Configured zone, or UTC when unset or unknown.
    pub fn time_zone(&self) -> Tz {
        match self.timezone.as_deref().map(parse_time_zone) {
            Some(Ok(tz)) => tz,
            Some(Err(e)) => {
                tracing::warn!("{} in config, using UTC", e);
                Tz::UTC
            }
            None => Tz::UTC,
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let mut clean = self.clone();
        if clean.location.as_deref().map(str::trim).unwrap_or_default().is_empty() {
            clean.location = None;
        }
        if clean.timezone.as_deref().map(str::trim).unwrap_or_default().is_empty() {
            clean.timezone = None;
        }

        let content = toml::to_string_pretty(&clean)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            location: Some("40.7128, -74.0060".to_string()),
            timezone: Some("America/New_York".to_string()),
            window: SampleWindow::MidnightToMidnight,
            min_altitude: 25.0,
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
        assert!(toml_str.contains("window = \"midnight\""));
    }

    #[test]
    fn test_window_accepts_long_names() {
        let parsed: AppConfig = toml::from_str("window = \"midnight-to-midnight\"\n").unwrap();
        assert_eq!(parsed.window, SampleWindow::MidnightToMidnight);
        let parsed: AppConfig = toml::from_str("window = \"noon\"\n").unwrap();
        assert_eq!(parsed.window, SampleWindow::NoonToNoon);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: AppConfig = toml::from_str("location = \"51.5, -0.12\"\n").unwrap();
        assert_eq!(parsed.window, SampleWindow::NoonToNoon);
        assert_eq!(parsed.min_altitude, DEFAULT_MIN_ALTITUDE);
        assert!(parsed.timezone.is_none());
    }

    #[test]
    fn test_time_zone_falls_back_to_utc() {
        let mut config = AppConfig::default();
        assert_eq!(config.time_zone(), Tz::UTC);
        config.timezone = Some("Europe/Berlin".to_string());
        assert_eq!(config.time_zone(), chrono_tz::Europe::Berlin);
        config.timezone = Some("Mars/Olympus_Mons".to_string());
        assert_eq!(config.time_zone(), Tz::UTC);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("sky-visibility-missing").join("none.toml");
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }

    #[test]
    fn test_save_drops_blank_fields() {
        let dir = std::env::temp_dir().join(format!("sky-visibility-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let config = AppConfig {
            location: Some("  ".to_string()),
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path);
        assert!(loaded.location.is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
