use std::path::PathBuf;
use std::time::Duration;

use crate::application::SaveDestination;
use crate::domain::AppError;
use crate::utils::sanitize_filename;

pub const DEFAULT_ASSET: &str = "./aces.apk";
pub const DEFAULT_FILE_NAME: &str = "aces.apk";
pub const DEFAULT_AUTO_DELAY_MS: u64 = 3000;
pub const DEFAULT_TICK_MS: u64 = 400;
pub const DEFAULT_ICON: &str = "assets/icon.png";

#[derive(Debug, Clone)]
pub struct PresenterConfig {
    /// Asset path or http(s) URL.
    pub asset_location: String,
    /// Name suggested for the saved file.
    pub file_name: String,
    pub auto_trigger_delay: Duration,
    pub tick_interval: Duration,
    pub destination: SaveDestination,
    pub icon_path: PathBuf,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            asset_location: DEFAULT_ASSET.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            auto_trigger_delay: Duration::from_millis(DEFAULT_AUTO_DELAY_MS),
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            destination: SaveDestination::Prompt,
            icon_path: PathBuf::from(DEFAULT_ICON),
        }
    }
}

impl PresenterConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `ACES_*` variables, falling back to defaults for
    /// unset or blank ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(asset) = get("ACES_ASSET") {
            config.asset_location = asset.trim().to_string();
        }

        if let Some(name) = get("ACES_FILE_NAME") {
            config.file_name = sanitize_filename(&name).ok_or_else(|| {
                AppError::Config(format!("ACES_FILE_NAME is not a usable file name: {:?}", name))
            })?;
        }

        if let Some(dir) = get("ACES_DOWNLOAD_DIR") {
            config.destination = SaveDestination::Directory(PathBuf::from(dir));
        }

        if let Some(ms) = get("ACES_AUTO_DELAY_MS") {
            let ms = parse_millis("ACES_AUTO_DELAY_MS", &ms)?;
            config.auto_trigger_delay = Duration::from_millis(ms);
        }

        if let Some(ms) = get("ACES_TICK_MS") {
            let ms = parse_millis("ACES_TICK_MS", &ms)?;
            if ms == 0 {
                return Err(AppError::Config("ACES_TICK_MS must be positive".to_string()));
            }
            config.tick_interval = Duration::from_millis(ms);
        }

        if let Some(icon) = get("ACES_ICON") {
            config.icon_path = PathBuf::from(icon);
        }

        Ok(config)
    }
}

fn parse_millis(key: &str, value: &str) -> Result<u64, AppError> {
    value
        .trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{} must be milliseconds: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = PresenterConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.asset_location, "./aces.apk");
        assert_eq!(config.file_name, "aces.apk");
        assert_eq!(config.auto_trigger_delay, Duration::from_secs(3));
        assert_eq!(config.tick_interval, Duration::from_millis(400));
        assert_eq!(config.destination, SaveDestination::Prompt);
    }

    #[test]
    fn test_overrides() {
        let config = PresenterConfig::from_lookup(lookup(&[
            ("ACES_ASSET", "https://cdn.example.com/aces.apk"),
            ("ACES_FILE_NAME", "aces:beta.apk"),
            ("ACES_DOWNLOAD_DIR", "/tmp/downloads"),
            ("ACES_AUTO_DELAY_MS", "1500"),
            ("ACES_TICK_MS", " 250 "),
            ("ACES_ICON", ""),
        ]))
        .unwrap();

        assert_eq!(config.asset_location, "https://cdn.example.com/aces.apk");
        assert_eq!(config.file_name, "aces_beta.apk");
        assert_eq!(
            config.destination,
            SaveDestination::Directory(PathBuf::from("/tmp/downloads"))
        );
        assert_eq!(config.auto_trigger_delay, Duration::from_millis(1500));
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.icon_path, PathBuf::from(DEFAULT_ICON));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            PresenterConfig::from_lookup(lookup(&[("ACES_TICK_MS", "0")])),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            PresenterConfig::from_lookup(lookup(&[("ACES_AUTO_DELAY_MS", "soon")])),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            PresenterConfig::from_lookup(lookup(&[("ACES_FILE_NAME", " .. ")])),
            Err(AppError::Config(_))
        ));
    }
}
