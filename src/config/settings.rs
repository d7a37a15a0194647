use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::features::tasbeeh::DEFAULT_DAILY_GOAL;

fn default_latitude() -> f64 {
    33.6938
}
fn default_longitude() -> f64 {
    73.0651
}
fn default_location_name() -> String {
    "Islamabad".to_string()
}
fn default_calc_method() -> String {
    "MuslimWorldLeague".to_string()
}
fn default_madhab() -> String {
    "Hanafi".to_string()
}
fn default_timezone_offset() -> i32 {
    300
}
fn default_tick_ms() -> u64 {
    1000
}
fn default_stopwatch_tick_ms() -> u64 {
    10
}
fn default_daily_goal() -> u32 {
    DEFAULT_DAILY_GOAL
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the database location under the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    #[serde(default = "default_true")]
    pub hour12: bool,
    /// Days to add/subtract from the Hijri date for local moon sighting.
    #[serde(default)]
    pub hijri_offset: i32,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_stopwatch_tick_ms")]
    pub stopwatch_tick_ms: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            hour12: true,
            hijri_offset: 0,
            tick_ms: default_tick_ms(),
            stopwatch_tick_ms: default_stopwatch_tick_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasbeehConfig {
    #[serde(default = "default_daily_goal")]
    pub default_goal: u32,
}

impl Default for TasbeehConfig {
    fn default() -> Self {
        Self {
            default_goal: default_daily_goal(),
        }
    }
}

/// Location used by `prayer sync` to calculate times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalahConfig {
    #[serde(default = "default_location_name")]
    pub location_name: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_calc_method")]
    pub calc_method: String,
    #[serde(default = "default_madhab")]
    pub madhab: String,
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset: i32, // minutes from UTC
}

impl Default for SalahConfig {
    fn default() -> Self {
        Self {
            location_name: default_location_name(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            calc_method: default_calc_method(),
            madhab: default_madhab(),
            timezone_offset: default_timezone_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub tasbeeh: TasbeehConfig,
    #[serde(default)]
    pub salah: SalahConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "trifecta")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("trifecta.db")),
        }
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            log::debug!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Parsing config.toml")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Serializing config")
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.to_toml()?).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    /// Create the directory that will hold the database.
    pub fn ensure_data_dir(&self) -> Result<PathBuf> {
        let db_path = self.db_path()?;
        let dir = match db_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => return Ok(PathBuf::from(".")),
        };
        std::fs::create_dir_all(&dir).with_context(|| format!("Creating {:?}", dir))?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_loads_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert!(config.clock.hour12);
        assert_eq!(config.clock.tick_ms, 1000);
        assert_eq!(config.clock.stopwatch_tick_ms, 10);
        assert_eq!(config.tasbeeh.default_goal, 33);
        assert_eq!(config.salah.calc_method, "MuslimWorldLeague");
        assert!(config.storage.db_path.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            "[clock]\nhour12 = false\n\n[salah]\nlatitude = 21.4225\n\n[storage]\ndb_path = \"/tmp/t.db\"\n",
        )
        .unwrap();
        assert!(!config.clock.hour12);
        assert_eq!(config.clock.tick_ms, 1000);
        assert_eq!(config.salah.latitude, 21.4225);
        assert_eq!(config.salah.madhab, "Hanafi");
        assert_eq!(config.db_path().unwrap(), PathBuf::from("/tmp/t.db"));
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut config = AppConfig::default();
        config.tasbeeh.default_goal = 99;
        let text = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap().tasbeeh.default_goal, 99);
    }

    #[test]
    fn ensure_data_dir_creates_parent_of_db_override() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.storage.db_path = Some(dir.path().join("nested").join("trifecta.db"));
        let created = config.ensure_data_dir().unwrap();
        assert!(created.is_dir());
    }
}
