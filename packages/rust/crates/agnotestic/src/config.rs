//! Runtime configuration: notes root and zettel id format.
//!
//! The root is resolved from, in order: the `--root` flag (or its
//! `AGNOTESTIC_ROOT` environment fallback, both handled by the CLI), then the
//! `wiki-location` key of the TOML config file.
//!
//! ```toml
//! wiki-location = "/home/me/notes/wiki"
//! zettel-dateformat = "%Y%m%d%H%M"
//! ```

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Config file read from the working directory when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Default strftime format used to derive zettel ids from file timestamps.
pub const DEFAULT_ZETTEL_DATE_FORMAT: &str = "%Y%m%d%H%M";

/// On-disk TOML config. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Root directory of the note collection.
    #[serde(default)]
    pub wiki_location: Option<PathBuf>,
    /// strftime format for zettel ids.
    #[serde(default)]
    pub zettel_dateformat: Option<String>,
}

impl ConfigFile {
    /// Parse config from TOML text. `path` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on invalid TOML or unknown keys.
    pub fn from_toml_str(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw, path)
    }

    /// Load an explicitly requested config file, or fall back to
    /// [`DEFAULT_CONFIG_FILE`] in `cwd` when it exists.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file yields an empty config.
    ///
    /// # Errors
    ///
    /// Propagates [`ConfigFile::load`] errors.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = cwd.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading default config file");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

/// Resolved configuration used by the scanner and the note parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesConfig {
    /// Root directory of the note collection.
    pub root: PathBuf,
    /// strftime format for zettel ids (validated).
    pub zettel_date_format: String,
}

impl NotesConfig {
    /// Config for `root` with the default zettel date format.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            zettel_date_format: DEFAULT_ZETTEL_DATE_FORMAT.to_string(),
        }
    }

    /// Replace the zettel date format.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDateFormat`] when `format` contains an
    /// unknown strftime specifier.
    pub fn with_date_format(mut self, format: &str) -> Result<Self, ConfigError> {
        validate_date_format(format)?;
        self.zettel_date_format = format.to_string();
        Ok(self)
    }

    /// Combine the CLI/environment root with the config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRoot`] when no source names a root, and
    /// [`ConfigError::InvalidDateFormat`] for a bad `zettel-dateformat`.
    pub fn resolve(cli_root: Option<PathBuf>, file: ConfigFile) -> Result<Self, ConfigError> {
        let root = cli_root
            .filter(|p| !p.as_os_str().is_empty())
            .or(file.wiki_location)
            .ok_or(ConfigError::MissingRoot)?;
        let config = Self::new(root);
        match file
            .zettel_dateformat
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
        {
            Some(format) => config.with_date_format(format),
            None => Ok(config),
        }
    }
}

fn validate_date_format(format: &str) -> Result<(), ConfigError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidDateFormat(format.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_root_wins_over_file() {
        let file = ConfigFile {
            wiki_location: Some(PathBuf::from("/from/file")),
            zettel_dateformat: None,
        };
        let config = NotesConfig::resolve(Some(PathBuf::from("/from/cli")), file).unwrap();
        assert_eq!(config.root, PathBuf::from("/from/cli"));
        assert_eq!(config.zettel_date_format, DEFAULT_ZETTEL_DATE_FORMAT);
    }

    #[test]
    fn test_file_root_used_when_cli_absent() {
        let file = ConfigFile::from_toml_str(
            "wiki-location = \"/notes\"\nzettel-dateformat = \"%Y-%m-%d\"\n",
            Path::new("config.toml"),
        )
        .unwrap();
        let config = NotesConfig::resolve(None, file).unwrap();
        assert_eq!(config.root, PathBuf::from("/notes"));
        assert_eq!(config.zettel_date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_missing_root_is_error() {
        let err = NotesConfig::resolve(None, ConfigFile::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRoot));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ConfigFile::from_toml_str("wiki_dir = \"x\"\n", Path::new("config.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_date_format_rejected() {
        let file = ConfigFile {
            wiki_location: Some(PathBuf::from("/notes")),
            zettel_dateformat: Some("%Q".to_string()),
        };
        let err = NotesConfig::resolve(None, file).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDateFormat(_)));
    }

    #[test]
    fn test_discover_reads_default_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(DEFAULT_CONFIG_FILE),
            "wiki-location = \"wiki\"\n",
        )
        .unwrap();
        let file = ConfigFile::discover(None, temp_dir.path()).unwrap();
        assert_eq!(file.wiki_location, Some(PathBuf::from("wiki")));
    }

    #[test]
    fn test_discover_without_default_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let file = ConfigFile::discover(None, temp_dir.path()).unwrap();
        assert_eq!(file, ConfigFile::default());
    }

    #[test]
    fn test_discover_explicit_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        let err = ConfigFile::discover(Some(&missing), temp_dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
