use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::data::default_cities;
use crate::error::InputError;
use crate::models::City;
use crate::utils::hijri::HijriCalendar;
use crate::zakat::NisabPolicy;

fn default_city_name() -> String {
    "Mecca".to_string()
}
fn default_hijri_offset() -> i32 {
    0
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_city_name")]
    pub default_city: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_city: default_city_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Days to add/subtract from Hijri date for local moon sighting.
    /// 0 = default (Saudi), -1 = one day behind (e.g. some Indian regions), +1 = one day ahead
    #[serde(default = "default_hijri_offset")]
    pub hijri_offset: i32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            hijri_offset: default_hijri_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub zakat: NisabPolicy,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default = "default_cities")]
    pub cities: Vec<City>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            location: LocationConfig::default(),
            calendar: CalendarConfig::default(),
            zakat: NisabPolicy::default(),
            cache: CacheConfig::default(),
            cities: default_cities(),
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "zee-tools")
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

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("zee-tools.db"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Case-insensitive lookup in the configured city table.
    pub fn find_city(&self, name: &str) -> Result<&City, InputError> {
        let wanted = name.trim();
        self.cities
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InputError::UnknownCity(wanted.to_string()))
    }

    pub fn default_city(&self) -> Result<&City, InputError> {
        self.find_city(&self.location.default_city)
    }

    pub fn hijri_calendar(&self) -> HijriCalendar {
        HijriCalendar::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.location.default_city, "Mecca");
        assert_eq!(config.calendar.hijri_offset, 0);
        assert!(config.cache.enabled);
        assert_eq!(config.zakat, NisabPolicy::default());
        assert_eq!(config.cities.len(), 10);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [zakat]
            gold_price_per_gram = 80.0

            [[cities]]
            name = "Kuala Lumpur"
            latitude = 3.139
            longitude = 101.6869
            "#,
        )
        .unwrap();
        assert_eq!(config.zakat.gold_price_per_gram, 80.0);
        assert_eq!(config.zakat.rate, 0.025);
        assert_eq!(config.cities.len(), 1);
        assert_eq!(config.find_city("kuala lumpur").unwrap().longitude, 101.6869);
    }

    #[test]
    fn city_lookup_is_case_insensitive() {
        let config = AppConfig::default();
        assert_eq!(config.find_city("new york").unwrap().name, "New York");
        assert_eq!(config.find_city("  LONDON ").unwrap().name, "London");
        assert!(matches!(
            config.find_city("Atlantis"),
            Err(InputError::UnknownCity(name)) if name == "Atlantis"
        ));
        assert_eq!(config.default_city().unwrap().name, "Mecca");
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.location.default_city = "Karachi".into();
        config.calendar.hijri_offset = -1;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.location.default_city, "Karachi");
        assert_eq!(loaded.calendar.hijri_offset, -1);
        assert_eq!(loaded.cities, config.cities);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.location.default_city, "Mecca");
    }
}
