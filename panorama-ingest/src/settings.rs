use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// An external program and the arguments placed before its path operand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolSettings {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Tunables for one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngestSettings {
    pub archive_extension: String,
    pub intermediate_extension: String,
    pub configs_dir: String,
    pub marker_element: String,
    pub decompress: ToolSettings,
    pub extract: ToolSettings,
}

/// Errors returned when loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

impl Default for IngestSettings {
    fn default() -> Self {
        let embedded = include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/settings/default.toml"
        ));
        parse_settings(embedded, "embedded settings".to_string())
            .unwrap_or_else(|_| fallback_settings())
    }
}

impl IngestSettings {
    /// True when `path` ends in `.<archive_extension>` (case-insensitive).
    pub fn accepts(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| {
                let suffix = format!(".{}", self.archive_extension.to_ascii_lowercase());
                let name = name.to_ascii_lowercase();
                name.len() > suffix.len() && name.ends_with(&suffix)
            })
    }
}

/// Load settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<IngestSettings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_settings(&raw, path.display().to_string())
}

fn parse_settings(raw: &str, path: String) -> Result<IngestSettings, SettingsError> {
    toml::from_str(raw).map_err(|source| SettingsError::Parse { path, source })
}

fn fallback_settings() -> IngestSettings {
    IngestSettings {
        archive_extension: "tgz".to_string(),
        intermediate_extension: "tar".to_string(),
        configs_dir: "configs".to_string(),
        marker_element: "panorama".to_string(),
        decompress: ToolSettings {
            program: "gzip".to_string(),
            args: vec!["-d".to_string(), "-f".to_string()],
        },
        extract: ToolSettings {
            program: "tar".to_string(),
            args: vec!["--force-local".to_string(), "-xvf".to_string()],
        },
    }
}
