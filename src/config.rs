use crate::logging::normalize_level;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const CONFIG_ENV_VAR: &str = "CRUD_SAMPLE_CONFIG";
pub const DEFAULT_STORAGE_PATH: &str = "SampleService.db";
const IN_MEMORY: &str = ":memory:";
const DATA_SOURCE_KEY: &str = "data source";
const VALID_KEYS: &[&str] = &["storage.path", "log-level"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Where the backing store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    InMemory,
}

impl StoreLocation {
    /// Parses `Data Source=<path>[;]`, a bare path, or `:memory:`.
    ///
    /// Only the syntax is checked here; [`StoreLocation::ensure_reachable`]
    /// looks at the filesystem.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim();
        let location = match data_source(value)? {
            Some(location) => location,
            None => value,
        };

        if location == IN_MEMORY {
            return Ok(StoreLocation::InMemory);
        }
        parse_storage_path(location).map(StoreLocation::File)
    }

    /// Fails when a file store's parent directory does not exist.
    pub fn ensure_reachable(self) -> Result<Self, ConfigError> {
        if let StoreLocation::File(path) = &self {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(ConfigError::InvalidConfig(format!(
                        "Parent directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }
        Ok(self)
    }
}

impl FromStr for StoreLocation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Extracts the path from a `Data Source=` connection string.
///
/// Returns `None` when `value` is not a connection string, so paths that
/// happen to contain `=` are left alone. Other keys are rejected.
fn data_source(value: &str) -> Result<Option<&str>, ConfigError> {
    let is_connection_string = value
        .split_once('=')
        .is_some_and(|(key, _)| key.trim().eq_ignore_ascii_case(DATA_SOURCE_KEY));
    if !is_connection_string {
        return Ok(None);
    }

    let mut source = None;
    for pair in value.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
        let (key, path) = pair.split_once('=').unwrap_or((pair, ""));
        let key = key.trim();
        if !key.eq_ignore_ascii_case(DATA_SOURCE_KEY) {
            return Err(ConfigError::InvalidConfig(format!(
                "Unsupported connection string key: {key}"
            )));
        }
        if source.replace(path.trim()).is_some() {
            return Err(ConfigError::InvalidConfig(
                "Data Source is given more than once".to_string(),
            ));
        }
    }
    Ok(source)
}

fn parse_storage_path(path: &str) -> Result<PathBuf, ConfigError> {
    if path.contains('\0') {
        return Err(ConfigError::InvalidConfig(
            "Path contains invalid characters".to_string(),
        ));
    }
    if path.is_empty() {
        return Err(ConfigError::InvalidConfig(
            "Path cannot be empty".to_string(),
        ));
    }

    let path = shellexpand::tilde(path);
    Ok(PathBuf::from(path.as_ref()))
}

fn validate_log_level(value: &str) -> Result<&'static str, ConfigError> {
    normalize_level(value).ok_or_else(|| {
        ConfigError::InvalidConfig(
            "log-level must be one of: trace, debug, info, warn, error".to_string(),
        )
    })
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub storage_path: Option<String>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    pub fn with_defaults() -> Self {
        Self {
            storage_path: Some(DEFAULT_STORAGE_PATH.to_string()),
            log_level: None,
        }
    }

    /// Syntax checks only, so a config pointing at a removed directory can
    /// still be loaded and repaired.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.storage_path {
            StoreLocation::parse(path)?;
        }
        if let Some(ref level) = self.log_level {
            validate_log_level(level)?;
        }
        Ok(())
    }
}

/// Reads and writes the JSON configuration file.
pub struct ConfigManager {
    path: PathBuf,
    config: Config,
}

impl ConfigManager {
    /// Loads the config at `config_path`, `$CRUD_SAMPLE_CONFIG`, or the
    /// default location, in that order. A missing file yields empty settings.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => default_config_path()?,
        };

        let config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                Config::default()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            Config::default()
        };
        config.validate()?;

        Ok(Self { path, config })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.config)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "storage.path" => self.config.storage_path.clone(),
            "log-level" => self.config.log_level.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut config = self.config.clone();
        match key {
            "storage.path" => {
                StoreLocation::parse(value)?.ensure_reachable()?;
                config.storage_path = Some(value.trim().to_string());
            }
            "log-level" => {
                config.log_level = Some(validate_log_level(value)?.to_string());
            }
            _ => return Err(ConfigError::InvalidKey(key.to_string())),
        }
        config.validate()?;
        self.config = config;
        self.save()
    }

    pub fn unset(&mut self, key: &str) -> Result<(), ConfigError> {
        match key {
            "storage.path" => self.config.storage_path = None,
            "log-level" => self.config.log_level = None,
            _ => return Err(ConfigError::InvalidKey(key.to_string())),
        }
        self.save()
    }

    /// Lists every key with its effective value and whether it is a default.
    pub fn list(&self) -> Vec<(String, String, bool)> {
        let defaults = Config::with_defaults();
        VALID_KEYS
            .iter()
            .map(|key| {
                let (value, default) = match *key {
                    "storage.path" => (&self.config.storage_path, &defaults.storage_path),
                    _ => (&self.config.log_level, &defaults.log_level),
                };
                match value {
                    Some(value) => (key.to_string(), value.clone(), false),
                    None => (
                        key.to_string(),
                        default.clone().unwrap_or_else(|| "null".to_string()),
                        true,
                    ),
                }
            })
            .collect()
    }

    /// Resolves the store location: `override_location`, then the config
    /// file, then [`DEFAULT_STORAGE_PATH`].
    pub fn store_location(
        &self,
        override_location: Option<&str>,
    ) -> Result<StoreLocation, ConfigError> {
        let location = override_location
            .or(self.config.storage_path.as_deref())
            .unwrap_or(DEFAULT_STORAGE_PATH);
        StoreLocation::parse(location)?.ensure_reachable()
    }
}

fn default_config_path() -> Result<PathBuf, ConfigError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(shellexpand::tilde(&path).as_ref()));
        }
    }

    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::InvalidConfig("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".config").join("crud-sample").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (ConfigManager, TempDir) {
        let temp_dir = tempfile::Builder::new()
            .prefix("crud_sample_test")
            .tempdir()
            .expect("Failed to create temporary directory");
        let manager = ConfigManager::load(Some(&temp_dir.path().join("config.json")))
            .expect("Failed to load config");
        (manager, temp_dir)
    }

    #[test]
    fn test_parse_data_source_connection_string() {
        assert_eq!(
            StoreLocation::parse("Data Source=SampleService.db").unwrap(),
            StoreLocation::File(PathBuf::from("SampleService.db"))
        );
        assert_eq!(
            StoreLocation::parse("data source = SampleService.db;").unwrap(),
            StoreLocation::File(PathBuf::from("SampleService.db"))
        );
    }

    #[test]
    fn test_parse_bare_path_and_memory() {
        assert_eq!(
            "todos.db".parse::<StoreLocation>().unwrap(),
            StoreLocation::File(PathBuf::from("todos.db"))
        );
        assert_eq!(
            StoreLocation::parse(":memory:").unwrap(),
            StoreLocation::InMemory
        );
        assert_eq!(
            StoreLocation::parse("Data Source=:memory:").unwrap(),
            StoreLocation::InMemory
        );
    }

    #[test]
    fn test_parse_expands_tilde() {
        let location = StoreLocation::parse("~/sample.db").unwrap();
        assert_eq!(
            location,
            StoreLocation::File(PathBuf::from(shellexpand::tilde("~/sample.db").as_ref()))
        );
    }

    #[test]
    fn test_parse_bare_path_containing_equals() {
        assert_eq!(
            StoreLocation::parse("/tmp/x/a=b.db").unwrap(),
            StoreLocation::File(PathBuf::from("/tmp/x/a=b.db"))
        );
        assert_eq!(
            StoreLocation::parse("Data Source=/tmp/x/a=b.db").unwrap(),
            StoreLocation::File(PathBuf::from("/tmp/x/a=b.db"))
        );
    }

    #[test]
    fn test_parse_rejects_bad_locations() {
        assert!(matches!(
            StoreLocation::parse("Data Source=SampleService.db;Cache=Shared"),
            Err(ConfigError::InvalidConfig(_))
        ));
        assert!(matches!(
            StoreLocation::parse("Data Source=a.db;Data Source=b.db"),
            Err(ConfigError::InvalidConfig(_))
        ));
        assert!(matches!(
            StoreLocation::parse("Data Source="),
            Err(ConfigError::InvalidConfig(_))
        ));
        assert!(matches!(
            StoreLocation::parse(""),
            Err(ConfigError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_missing_parent_directory_is_unreachable() {
        let location = StoreLocation::parse("/definitely/not/a/dir/sample.db").unwrap();
        assert!(matches!(
            location.ensure_reachable(),
            Err(ConfigError::InvalidConfig(_))
        ));
        assert_eq!(
            StoreLocation::InMemory.ensure_reachable().unwrap(),
            StoreLocation::InMemory
        );
    }

    #[test]
    fn test_config_with_removed_directory_can_be_repaired() {
        let (mut manager, temp_dir) = manager();
        let gone = temp_dir.path().join("gone");
        std::fs::create_dir(&gone).unwrap();
        let db_path = gone.join("x.db");
        manager.set("storage.path", db_path.to_str().unwrap()).unwrap();
        std::fs::remove_dir(&gone).unwrap();

        let mut reloaded = ConfigManager::load(Some(manager.path())).unwrap();
        assert!(matches!(
            reloaded.store_location(None),
            Err(ConfigError::InvalidConfig(_))
        ));
        assert!(reloaded
            .list()
            .iter()
            .any(|(key, _, default)| key == "storage.path" && !default));

        reloaded.unset("storage.path").unwrap();
        assert_eq!(
            reloaded.store_location(None).unwrap(),
            StoreLocation::File(PathBuf::from(DEFAULT_STORAGE_PATH))
        );
        assert!(matches!(
            reloaded.set("storage.path", db_path.to_str().unwrap()),
            Err(ConfigError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let (manager, _temp_dir) = manager();

        assert_eq!(manager.config(), &Config::default());
        assert_eq!(
            manager.store_location(None).unwrap(),
            StoreLocation::File(PathBuf::from(DEFAULT_STORAGE_PATH))
        );
    }

    #[test]
    fn test_set_persists_and_reloads() {
        let (mut manager, temp_dir) = manager();
        let db_path = temp_dir.path().join("data.db");
        let db_path = db_path.to_str().unwrap();

        manager.set("storage.path", db_path).unwrap();
        manager.set("log-level", "WARNING").unwrap();

        let reloaded = ConfigManager::load(Some(manager.path())).unwrap();
        assert_eq!(reloaded.get("storage.path"), Some(db_path.to_string()));
        assert_eq!(reloaded.get("log-level"), Some("warn".to_string()));
        assert_eq!(
            reloaded.store_location(None).unwrap(),
            StoreLocation::File(PathBuf::from(db_path))
        );
    }

    #[test]
    fn test_override_wins_over_config() {
        let (mut manager, _temp_dir) = manager();
        manager.set("storage.path", "Data Source=a.db").unwrap();

        assert_eq!(
            manager.store_location(Some(":memory:")).unwrap(),
            StoreLocation::InMemory
        );
    }

    #[test]
    fn test_set_rejects_invalid_values_and_keys() {
        let (mut manager, _temp_dir) = manager();

        assert!(matches!(
            manager.set("log-level", "loud"),
            Err(ConfigError::InvalidConfig(_))
        ));
        assert!(matches!(
            manager.set("storage.type", "sqlite"),
            Err(ConfigError::InvalidKey(_))
        ));
        assert_eq!(manager.get("log-level"), None);
    }

    #[test]
    fn test_unset_and_list() {
        let (mut manager, _temp_dir) = manager();
        manager.set("log-level", "debug").unwrap();

        let list = manager.list();
        assert!(list.contains(&("log-level".to_string(), "debug".to_string(), false)));
        assert!(list.contains(&(
            "storage.path".to_string(),
            DEFAULT_STORAGE_PATH.to_string(),
            true
        )));

        manager.unset("log-level").unwrap();
        assert_eq!(manager.get("log-level"), None);
        assert!(manager
            .list()
            .contains(&("log-level".to_string(), "null".to_string(), true)));
        assert!(matches!(
            manager.unset("nope"),
            Err(ConfigError::InvalidKey(_))
        ));
    }
}
