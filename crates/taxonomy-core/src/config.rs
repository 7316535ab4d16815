use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::JsonFileSource;
use crate::error::{Result, TaxonomyError};

const CONFIG_FILE: &str = "config.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# taxonomy configuration file
# Location: ~/.taxonomy/config.toml

[source]
# Remote category collection export (JSON array of documents, or an object
# with a "documents" array). When it cannot be read the builtin tree is used.
# Example: remote = "/srv/exports/categorias.json"
# remote = ""

[output]
# Default output format for `taxonomy tree` and `taxonomy build`
# Values: "tree", "json"
format = "tree"
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Input source configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceConfig {
    /// Remote collection export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Tree,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree => write!(f, "tree"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(Self::Tree),
            "json" => Ok(Self::Json),
            other => Err(TaxonomyError::InvalidConfigValue {
                key: "output.format".to_string(),
                message: format!("unknown format '{}' (expected tree or json)", other),
            }),
        }
    }
}

/// Keys accepted by `taxonomy config get/set`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    SourceRemote,
    OutputFormat,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 2] = [ConfigKey::SourceRemote, ConfigKey::OutputFormat];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SourceRemote => "source.remote",
            Self::OutputFormat => "output.format",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| TaxonomyError::ConfigKeyNotFound { key: s.to_string() })
    }
}

impl Config {
    /// Config file location under `base_dir`
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Read `config.toml`; a missing file yields the defaults
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = Self::path(base_dir);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&content).map_err(|e| TaxonomyError::ConfigParse {
            path,
            message: e.to_string(),
        })
    }

    pub fn save(&self, base_dir: &Path) -> Result<()> {
        fs::create_dir_all(base_dir)?;
        fs::write(Self::path(base_dir), toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Write the commented template unless a config file already exists
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(base_dir)?;
        let path = Self::path(base_dir);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => file.write_all(DEFAULT_CONFIG_TEMPLATE.as_bytes())?,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e.into()),
        }

        Ok(path)
    }

    /// Current value of `key`, rendered for display
    pub fn value(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::SourceRemote => self
                .source
                .remote
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            ConfigKey::OutputFormat => self.output.format.to_string(),
        }
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        key.parse().ok().map(|k| self.value(k))
    }

    /// Set a config value by dot-notation key. An empty `source.remote`
    /// clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key.parse()? {
            ConfigKey::SourceRemote => {
                let trimmed = value.trim();
                self.source.remote = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
            }
            ConfigKey::OutputFormat => self.output.format = value.parse()?,
        }
        Ok(())
    }

    pub fn list(&self) -> Vec<(ConfigKey, String)> {
        ConfigKey::ALL.into_iter().map(|k| (k, self.value(k))).collect()
    }

    /// Remote source configured in `[source]`, if any
    pub fn remote_source(&self) -> Option<JsonFileSource> {
        self.source.remote.as_ref().map(JsonFileSource::new)
    }
}

/// Default base directory (`~/.taxonomy`)
pub fn default_base_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|h| h.join(".taxonomy"))
        .ok_or(TaxonomyError::HomeNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_get_set() {
        let mut config = Config::default();
        assert_eq!(config.get("source.remote").unwrap(), "");
        assert_eq!(config.get("output.format").unwrap(), "tree");

        config.set("source.remote", "/tmp/categorias.json").unwrap();
        config.set("output.format", "JSON").unwrap();
        assert_eq!(config.get("source.remote").unwrap(), "/tmp/categorias.json");
        assert_eq!(config.output.format, OutputFormat::Json);

        config.set("source.remote", "  ").unwrap();
        assert!(config.source.remote.is_none());
        assert!(config.remote_source().is_none());
    }

    #[test]
    fn test_config_rejects_unknown() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("profile.exclude", "x"),
            Err(TaxonomyError::ConfigKeyNotFound { .. })
        ));
        assert!(matches!(
            config.set("output.format", "yaml"),
            Err(TaxonomyError::InvalidConfigValue { .. })
        ));
        assert!(config.get("nope").is_none());
    }

    #[test]
    fn test_init_template_parses() {
        let dir = TempDir::new().unwrap();
        let path = Config::init(dir.path()).unwrap();
        assert!(path.exists());

        let config = Config::load(dir.path()).unwrap();
        assert!(config.source.remote.is_none());
        assert_eq!(config.output.format, OutputFormat::Tree);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.set("source.remote", "/data/export.json").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(
            loaded.source.remote,
            Some(PathBuf::from("/data/export.json"))
        );
        assert_eq!(loaded.list().len(), 2);
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        fs::write(Config::path(dir.path()), "[output]\nformat = \"json\"\n").unwrap();

        Config::init(dir.path()).unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("absent")).unwrap();
        assert_eq!(config.value(ConfigKey::OutputFormat), "tree");
    }

    #[test]
    fn test_config_keys_parse() {
        for key in ConfigKey::ALL {
            assert_eq!(key.as_str().parse::<ConfigKey>().unwrap(), key);
        }
        assert!("output".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = TempDir::new().unwrap();
        fs::write(Config::path(dir.path()), "[output]\nformat = 3\n").unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(TaxonomyError::ConfigParse { .. })
        ));
    }
}
