use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FavThingsError, Result};
use crate::whitelist::Whitelist;

const CONFIG_FILE: &str = "config.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# favthings configuration file
# Location: ~/.favthings/config.toml

[categories]
# Categories file in the categories.conf format ("Colors:Foods:Dogs", one or
# more names per line). Replaces the builtin list when set. A relative path is
# taken from the directory holding this file.
# Example: file = "categories.conf"
# file = ""

# Category names accepted in addition to the builtin list or the file above
# Default: []
# Example: extra = ["Countries", "Mammals"]
extra = []
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub categories: CategoriesConfig,
}

/// Whitelist-related configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CategoriesConfig {
    /// Categories file replacing the builtin list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Names accepted on top of the builtin list or the file
    #[serde(default)]
    pub extra: Vec<String>,
}

impl Config {
    /// Read `config.toml` under `base_dir`; a missing file means defaults.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = Self::path(base_dir);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&content).map_err(|e| FavThingsError::ConfigParse {
            path,
            message: e.to_string(),
        })
    }

    pub fn save(&self, base_dir: &Path) -> Result<()> {
        fs::create_dir_all(base_dir)?;
        fs::write(Self::path(base_dir), toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Write the commented template unless a config already exists.
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = Self::path(base_dir);
        fs::create_dir_all(base_dir)?;

        match fs::OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => file.write_all(DEFAULT_CONFIG_TEMPLATE.as_bytes())?,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "config already present");
            }
            Err(e) => return Err(e.into()),
        }
        Ok(path)
    }

    /// Load, change one key and save. The new whitelist must resolve first,
    /// so a categories file that cannot be read is never stored.
    pub fn update(base_dir: &Path, key: &str, value: &str) -> Result<Self> {
        let mut config = Self::load(base_dir)?;
        config.set(key, value)?;
        config.whitelist(base_dir)?;
        config.save(base_dir)?;
        Ok(config)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "categories.file" => Some(
                self.categories
                    .file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "categories.extra" => Some(format!("{:?}", self.categories.extra)),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    ///
    /// An empty value clears `categories.file`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "categories.file" => {
                let value = value.trim();
                self.categories.file = (!value.is_empty()).then(|| PathBuf::from(value));
                Ok(())
            }
            "categories.extra" => {
                self.categories.extra = parse_string_list(value);
                Ok(())
            }
            _ => Err(FavThingsError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        ["categories.file", "categories.extra"]
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }

    /// The configured categories file, relative paths taken from `base_dir`.
    pub fn categories_file(&self, base_dir: &Path) -> Option<PathBuf> {
        let file = self.categories.file.as_deref()?;
        Some(if file.is_relative() {
            base_dir.join(file)
        } else {
            file.to_path_buf()
        })
    }

    /// Build the effective whitelist: the builtin list (or the configured
    /// file) plus the extra names.
    pub fn whitelist(&self, base_dir: &Path) -> Result<Whitelist> {
        self.whitelist_from(self.categories_file(base_dir).as_deref())
    }

    /// Same as [`Config::whitelist`] with the categories file given directly.
    pub fn whitelist_from(&self, file: Option<&Path>) -> Result<Whitelist> {
        let mut whitelist = match file {
            Some(path) => Whitelist::load(path)?,
            None => Whitelist::builtin(),
        };
        whitelist.extend(
            self.categories
                .extra
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty()),
        );
        Ok(whitelist)
    }
}

/// Parse a comma-separated or JSON-like list string
fn parse_string_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed);

    inner
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
