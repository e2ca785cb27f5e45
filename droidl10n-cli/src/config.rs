//! Optional `droidl10n.toml` defaults, overridden by command-line flags.
//!
//! ```toml
//! store = "l10n/store.json"
//! tags = ["android"]
//! untagged = true
//! include_untranslated = false
//! ```

use std::path::{Path, PathBuf};

use droidl10n::WriteOptions;
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "droidl10n.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path of the JSON store.
    pub store: Option<PathBuf>,
    /// Tags a row must carry to be generated.
    pub tags: Vec<String>,
    /// Whether untagged rows are generated.
    pub untagged: Option<bool>,
    /// Whether missing translations fall back to the primary language.
    pub include_untranslated: Option<bool>,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| format!("Invalid config: {}", e))
    }

    /// Loads `explicit` if given, else [`DEFAULT_CONFIG_FILE`] when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        tracing::debug!(path = %path.display(), "loading config");
        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
        Self::from_toml(&text)
    }

    /// The store path from the flag, or from the config file.
    pub fn resolve_store(&self, flag: Option<PathBuf>) -> Result<PathBuf, String> {
        flag.or_else(|| self.store.clone())
            .ok_or_else(|| "No store given; pass --store or set `store` in the config".to_string())
    }

    /// Write options from flags layered over the config file.
    pub fn write_options(
        &self,
        tags: Vec<String>,
        exclude_untagged: bool,
        include_untranslated: bool,
    ) -> WriteOptions {
        let tags = if tags.is_empty() { self.tags.clone() } else { tags };
        WriteOptions::new()
            .with_tags(tags)
            .with_untagged(!exclude_untagged && self.untagged.unwrap_or(true))
            .with_untranslated(include_untranslated || self.include_untranslated.unwrap_or(false))
    }
}
