use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::calendar::Locale;

/// Hours assumed for every shift when deriving hourly rates. A single
/// length for all shifts regardless of type or actual duration.
pub const SHIFT_HOURS: f64 = 5.5;

const CONFIG_FILE_NAME: &str = "config.json";
const DATA_DIR_NAME: &str = ".tiptrack";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct StatsConfig {
    pub shift_hours: f64,
    pub locale: Locale,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            shift_hours: SHIFT_HOURS,
            locale: Locale::default(),
        }
    }
}

impl StatsConfig {
    /// Reads `config.json` from `dir`. A missing file means defaults.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: StatsConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Invalid config {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.shift_hours.is_finite() || self.shift_hours <= 0.0 {
            return Err(anyhow!(
                "shift_hours must be a positive number, got {}",
                self.shift_hours
            ));
        }
        Ok(())
    }
}

/// `~/.tiptrack` unless a directory is given.
pub fn data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    match base_dir {
        Some(dir) => Ok(dir),
        None => {
            let home_dir = dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            Ok(home_dir.join(DATA_DIR_NAME))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tiptrack-config-{}-{}", name, uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = temp_dir("missing");
        let config = StatsConfig::load(&dir).unwrap();
        assert_eq!(config.shift_hours, 5.5);
        assert_eq!(config.locale, Locale::English);
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = temp_dir("partial");
        fs::write(dir.join(CONFIG_FILE_NAME), r#"{ "locale": "german" }"#).unwrap();
        let config = StatsConfig::load(&dir).unwrap();
        assert_eq!(config.shift_hours, SHIFT_HOURS);
        assert_eq!(config.locale, Locale::German);
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_rejects_non_positive_hours() {
        let dir = temp_dir("zero");
        fs::write(dir.join(CONFIG_FILE_NAME), r#"{ "shift_hours": 0 }"#).unwrap();
        assert!(StatsConfig::load(&dir).is_err());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_data_dir_override() {
        let dir = PathBuf::from("/tmp/somewhere");
        assert_eq!(data_dir(Some(dir.clone())).unwrap(), dir);
    }
}
