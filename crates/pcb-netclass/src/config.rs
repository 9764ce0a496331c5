//! Loading of rule configuration documents (`.yaml`, `.yml`, `.json`)

use crate::document::Document;
use crate::error::ConfigError;
use crate::validate::{validate, ValidatedConfig};
use crate::ValidationError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Rules shipped with the tool, used when no configuration file is given
const BUILTIN_RULES: &str = include_str!("../rules/default.yaml");

/// Starter document written by [`write_template`]
const TEMPLATE: &str = include_str!("../rules/template.yaml");

/// Where a configuration document came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    BuiltIn,
    File(PathBuf),
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::BuiltIn => write!(f, "built-in rules"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Inline => write!(f, "inline document"),
        }
    }
}

/// A parsed but not yet validated configuration document
///
/// Mapping order is preserved, so rules keep their declaration order.
#[derive(Debug, Clone)]
pub struct Config {
    document: Document,
    source: ConfigSource,
}

impl Config {
    /// Load a configuration file; the format is picked from the extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let format = match ext.as_str() {
            "yaml" | "yml" => Format::Yaml,
            "json" => Format::Json,
            _ => return Err(ConfigError::UnsupportedFormat(format!(".{ext}"))),
        };

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let origin = path.display().to_string();
        let document = format.parse(&content, &origin)?;
        log::info!("Loaded configuration from: {}", path.display());

        Ok(Self {
            document,
            source: ConfigSource::File(path.to_path_buf()),
        })
    }

    /// Load `path` if given, otherwise the built-in rules
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// The rule document shipped with the tool
    pub fn builtin() -> Result<Self, ConfigError> {
        let document = Format::Yaml.parse(BUILTIN_RULES, "built-in rules")?;
        log::info!("Loaded built-in configuration");
        Ok(Self {
            document,
            source: ConfigSource::BuiltIn,
        })
    }

    /// Parse a YAML document from string content
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Self::inline(Format::Yaml, content)
    }

    /// Parse a JSON document from string content, e.g. one produced by a rule editor
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Self::inline(Format::Json, content)
    }

    fn inline(format: Format, content: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            document: format.parse(content, "inline document")?,
            source: ConfigSource::Inline,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Run the schema validator and compile the rule set
    pub fn validate(&self) -> Result<ValidatedConfig, ValidationError> {
        validate(self)
    }
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Yaml,
    Json,
}

impl Format {
    fn parse(self, content: &str, origin: &str) -> Result<Document, ConfigError> {
        match self {
            Format::Yaml => serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
                format: "YAML",
                origin: origin.to_string(),
                message: e.to_string(),
            }),
            Format::Json => serde_json::from_str(content).map_err(|e| ConfigError::Parse {
                format: "JSON",
                origin: origin.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// Write a starter configuration with one custom rule
pub fn write_template(path: &Path) -> Result<(), ConfigError> {
    fs::write(path, TEMPLATE).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("User config template created at: {}", path.display());
    Ok(())
}
