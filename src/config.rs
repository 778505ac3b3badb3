//! Configuration
//!
//! Read from a TOML file, every value has a default. The backend location and
//! key can also come from the environment.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable overriding `backend.url`
pub const ENV_BACKEND_URL: &str = "HAGWON_BACKEND_URL";
/// Environment variable overriding `backend.api_key`
pub const ENV_BACKEND_KEY: &str = "HAGWON_BACKEND_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub timetable: TimetableConfig,

    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hosted backend holding academies and classes
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Project URL, without the `/rest/v1` suffix
    #[serde(default)]
    pub url: Option<String>,

    /// Public (anon) key
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Terminal timetable
#[derive(Debug, Clone, Deserialize)]
pub struct TimetableConfig {
    /// Length of a row, in minutes
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,

    /// Width of a day column
    #[serde(default = "default_cell_length")]
    pub cell_length: usize,
}

fn default_slot_minutes() -> u32 {
    30
}

fn default_cell_length() -> usize {
    12
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            slot_minutes: default_slot_minutes(),
            cell_length: default_cell_length(),
        }
    }
}

/// iCalendar export
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Number of weeks every class repeats
    #[serde(default = "default_weeks")]
    pub weeks: u32,
}

fn default_timezone() -> String {
    "Asia/Seoul".to_string()
}

fn default_weeks() -> u32 {
    16
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            weeks: default_weeks(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration
    ///
    /// An explicit `path` must exist. Without one the default location is
    /// tried and defaults are used when there is no file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Override values with the environment, `lookup` reads a variable
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_BACKEND_URL) {
            self.backend.url = Some(url);
        }
        if let Some(key) = lookup(ENV_BACKEND_KEY) {
            self.backend.api_key = Some(key);
        }
    }

    fn validate(&self) -> Result<()> {
        let slot = self.timetable.slot_minutes;
        if slot == 0 || 60 % slot != 0 {
            return Err(Error::Config(format!(
                "timetable.slot_minutes must divide an hour, got {slot}"
            )));
        }
        if self.timetable.cell_length < 4 {
            return Err(Error::Config("timetable.cell_length is too small".into()));
        }
        if self.calendar.weeks == 0 {
            return Err(Error::Config("calendar.weeks must be at least 1".into()));
        }

        Ok(())
    }
}

/// `<config dir>/hagwon-timetable/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hagwon-timetable").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.timetable.slot_minutes, 30);
        assert_eq!(config.calendar.timezone, "Asia/Seoul");
        assert_eq!(config.calendar.weeks, 16);
        assert!(config.backend.url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file() {
        let file = write_config(
            r#"
            [backend]
            url = "https://example.supabase.co"

            [timetable]
            slot_minutes = 15
            "#,
        );

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(
            config.backend.url.as_deref(),
            Some("https://example.supabase.co")
        );
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.timetable.slot_minutes, 15);
        assert_eq!(config.timetable.cell_length, 12);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn invalid_toml() {
        let file = write_config("[timetable\nslot_minutes = ");
        assert!(matches!(Config::from_file(file.path()), Err(Error::Toml(_))));
    }

    #[test]
    fn missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(dir.path().join("nope.toml").as_path()));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn slot_must_divide_an_hour() {
        let file = write_config("[timetable]\nslot_minutes = 25\n");
        assert!(matches!(
            Config::load(Some(file.path())),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn environment_overrides_file() {
        let mut config = Config::default();
        config.backend.url = Some("https://file.example".into());

        let env = HashMap::from([(ENV_BACKEND_KEY, "secret".to_string())]);
        config.apply_env(|key| env.get(key).cloned());

        assert_eq!(config.backend.url.as_deref(), Some("https://file.example"));
        assert_eq!(config.backend.api_key.as_deref(), Some("secret"));
    }
}
