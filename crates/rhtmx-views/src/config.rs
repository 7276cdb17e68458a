// File: src/config.rs
// Purpose: Configuration parsing from the [views] table of rhtmx.toml

use crate::expander::language::DEFAULT_LANGUAGE_ROUTE_KEY;
use crate::expander::LanguageViewLocationFormat;
use crate::location::{
    default_area_view_location_formats, default_view_location_formats, LocationFormats, DEFAULT_EXTENSION,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub views: ViewsConfig,
}

/// View lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsConfig {
    /// Directory the view locations are relative to (default: ".")
    #[serde(default = "default_root_dir")]
    pub root_dir: String,

    /// Extension rooted view paths must carry (default: ".cshtml")
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Templates searched when the request has no area
    #[serde(default = "default_view_location_formats")]
    pub view_location_formats: Vec<String>,

    /// Templates searched when the request has an area
    #[serde(default = "default_area_view_location_formats")]
    pub area_view_location_formats: Vec<String>,

    /// Language-specific view lookup; off when absent
    #[serde(default)]
    pub language: Option<LanguageConfig>,
}

/// Settings for the language expander
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    #[serde(default)]
    pub format: LanguageViewLocationFormat,

    /// Route value holding the request language (default: "culture")
    #[serde(default = "default_route_key")]
    pub route_key: String,
}

// Default values
fn default_root_dir() -> String {
    ".".to_string()
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_route_key() -> String {
    DEFAULT_LANGUAGE_ROUTE_KEY.to_string()
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            extension: default_extension(),
            view_location_formats: default_view_location_formats(),
            area_view_location_formats: default_area_view_location_formats(),
            language: None,
        }
    }
}

impl ViewsConfig {
    /// Load the [views] table of a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Config::load(path).map(|config| config.views)
    }

    pub fn formats(&self) -> LocationFormats {
        LocationFormats::new(
            self.view_location_formats.clone(),
            self.area_view_location_formats.clone(),
        )
    }
}

impl Config {
    /// Load configuration from rhtmx.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./rhtmx.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("rhtmx.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.views.root_dir, ".");
        assert_eq!(config.views.extension, ".cshtml");
        assert_eq!(config.views.formats(), LocationFormats::default());
        assert!(config.views.language.is_none());
    }

    #[test]
    fn test_load_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rhtmx.toml");

        fs::write(&path, "").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.views.formats(), LocationFormats::default());
        assert_eq!(config.views.root_dir, ".");

        fs::write(&path, "  \n\t\n").unwrap();
        let views = ViewsConfig::load(&path).unwrap();
        assert_eq!(views.formats(), LocationFormats::default());
        assert_eq!(views.extension, ".cshtml");
    }

    #[test]
    fn test_views_config_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rhtmx.toml");

        assert_eq!(ViewsConfig::load(&path).unwrap().root_dir, ".");

        fs::write(&path, "[views]\nroot_dir = \"app\"\narea_view_location_formats = [\"/Modules/{2}/{0}.cshtml\"]\n").unwrap();
        let views = ViewsConfig::load(&path).unwrap();
        assert_eq!(views.root_dir, "app");
        assert_eq!(views.area_view_location_formats, vec!["/Modules/{2}/{0}.cshtml"]);
        assert_eq!(views.view_location_formats, default_view_location_formats());
    }

    #[test]
    fn test_custom_views() {
        let toml = r#"
            [views]
            root_dir = "app"
            view_location_formats = ["/Pages/{1}/{0}.cshtml"]

            [views.language]
            format = "subfolder"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.views.root_dir, "app");
        assert_eq!(config.views.view_location_formats, vec!["/Pages/{1}/{0}.cshtml"]);
        assert_eq!(
            config.views.area_view_location_formats,
            default_area_view_location_formats()
        );
        assert_eq!(
            config.views.language,
            Some(LanguageConfig {
                format: LanguageViewLocationFormat::SubFolder,
                route_key: "culture".to_string(),
            })
        );
    }

    #[test]
    fn test_load_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = Config::load(dir.path().join("rhtmx.toml")).unwrap();
        assert_eq!(missing.views.extension, ".cshtml");

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "[views\nroot_dir = ").unwrap();
        let err = Config::load(&broken).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));

        let valid = dir.path().join("valid.toml");
        fs::write(&valid, "[views]\nextension = \".rhtmx\"\n").unwrap();
        assert_eq!(Config::load(&valid).unwrap().views.extension, ".rhtmx");
    }
}
