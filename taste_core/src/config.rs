//! Tracker configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::taste_store::VisibilityPolicy;

/// User-facing options, read from a TOML file with PascalCase keys.
///
/// Love is always shown and has no key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TrackerConfig {
    pub show_neutral: bool,
    pub show_likes: bool,
    pub show_dislikes: bool,
    pub show_hates: bool,

    /// Directory holding one taste file per save context.
    pub data_directory: PathBuf,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            show_neutral: false,
            show_likes: true,
            show_dislikes: true,
            show_hates: true,
            data_directory: PathBuf::from("data"),
        }
    }
}

impl TrackerConfig {
    /// Parse a configuration document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load the configuration file, falling back to defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// The visibility policy these options describe.
    pub fn visibility(&self) -> VisibilityPolicy {
        VisibilityPolicy {
            show_likes: self.show_likes,
            show_dislikes: self.show_dislikes,
            show_hates: self.show_hates,
            show_neutral: self.show_neutral,
        }
    }

    /// Taste file for a save context.
    ///
    /// The save name always maps to a single file directly inside
    /// `data_directory`; separators and control characters become `_`.
    pub fn storage_path(&self, save_name: &str) -> PathBuf {
        self.data_directory.join(format!("{}.json", file_stem(save_name)))
    }
}

fn file_stem(save_name: &str) -> String {
    save_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gift_catalogue::ReactionCategory;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert!(!config.show_neutral);
        assert!(config.show_likes);
        assert!(config.show_dislikes);
        assert!(config.show_hates);
    }

    #[test]
    fn test_partial_document() {
        let config = TrackerConfig::from_toml_str("ShowNeutral = true\nShowHates = false\n").unwrap();
        assert!(config.show_neutral);
        assert!(!config.show_hates);
        assert!(config.show_likes);
        assert_eq!(config.data_directory, PathBuf::from("data"));
    }

    #[test]
    fn test_invalid_document() {
        assert!(TrackerConfig::from_toml_str("ShowNeutral = \"yes\"").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TrackerConfig::load(dir.path().join("config.toml")).unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "ShowLikes = false\nDataDirectory = \"saves\"\n").unwrap();

        let config = TrackerConfig::load(&path).unwrap();
        assert!(!config.show_likes);
        assert_eq!(
            config.storage_path("Farm_1"),
            Path::new("saves").join("Farm_1.json")
        );
    }

    #[test]
    fn test_storage_path_stays_in_data_directory() {
        let config = TrackerConfig::default();
        let data = Path::new("data");

        assert_eq!(config.storage_path("../escape").parent(), Some(data));
        assert_eq!(config.storage_path(".."), data.join("...json"));
        assert_eq!(config.storage_path("a/b"), data.join("a_b.json"));
        assert_eq!(config.storage_path("C:\\Saves\\x"), data.join("C__Saves_x.json"));
        assert_eq!(config.storage_path("Farm\n1"), data.join("Farm_1.json"));
    }

    #[test]
    fn test_visibility_keeps_love() {
        let config = TrackerConfig {
            show_likes: false,
            show_dislikes: false,
            show_hates: false,
            ..TrackerConfig::default()
        };
        let policy = config.visibility();
        assert!(policy.shows(ReactionCategory::Love));
        assert!(!policy.shows(ReactionCategory::Like));
        assert!(!policy.shows(ReactionCategory::Neutral));
    }
}
