//! Reader configuration documents (JSON, or YAML with the `yaml` feature).

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::options::{Dialect, ReaderOptions};
use crate::error::{ConfigError, ErrorPolicy};
use crate::policy::HeaderPolicy;

/// Reader options as they appear in a configuration document.
///
/// Every key is optional; missing keys take the [`ReaderOptions`] defaults.
/// Pipelines cannot be expressed in a document and are added in code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderConfig {
    /// Single ASCII character
    #[serde(default)]
    pub delimiter: Option<String>,
    /// Single ASCII character
    #[serde(default)]
    pub enclosure: Option<String>,
    /// Single ASCII character, or "" to disable escapes
    #[serde(default)]
    pub escape: Option<String>,
    #[serde(default, alias = "length", alias = "max_line_length")]
    pub max_line_length: Option<usize>,
    /// "noHeader", "disregardHeader", "dataOptional" or "dataRequired"
    #[serde(default, alias = "header_policy")]
    pub header_policy: Option<String>,
    #[serde(default, alias = "use_labels_as_keys")]
    pub use_labels_as_keys: Option<bool>,
    /// "fast_fail" or "accumulate"
    #[serde(default, alias = "error_policy")]
    pub error_policy: Option<String>,
    /// Anything else; rejected on conversion
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

impl ReaderConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Document(Box::new(e)))
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(s).map_err(|e| ConfigError::Document(Box::new(e)))
    }

    /// Load a document, picking the format from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Document(Box::new(e)))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            #[cfg(feature = "yaml")]
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            Some("json") | None => Self::from_json_str(&content),
            Some(other) => Err(ConfigError::Document(
                format!("unsupported configuration format '{}'", other).into(),
            )),
        }
    }

    /// Set the header policy by name.
    pub fn with_header_policy(mut self, policy: impl Into<String>) -> Self {
        self.header_policy = Some(policy.into());
        self
    }

    /// Set the delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }
}

fn single_byte(name: &'static str, value: &str) -> Result<u8, ConfigError> {
    match value.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(ConfigError::InvalidOption {
            name,
            reason: format!("expected a single ASCII character, got {:?}", value),
        }),
    }
}

impl TryFrom<ReaderConfig> for ReaderOptions {
    type Error = ConfigError;

    fn try_from(config: ReaderConfig) -> Result<Self, Self::Error> {
        if let Some(name) = config.unknown.keys().next() {
            return Err(match name.as_str() {
                "validator" | "validation" | "parser" => ConfigError::InvalidOption {
                    name: "pipeline",
                    reason: format!("\"{}\" must be supplied in code", name),
                },
                _ => ConfigError::UnsupportedOption(name.clone()),
            });
        }

        let defaults = Dialect::default();
        let dialect = Dialect {
            delimiter: match &config.delimiter {
                Some(d) => single_byte("delimiter", d)?,
                None => defaults.delimiter,
            },
            enclosure: match &config.enclosure {
                Some(e) => single_byte("enclosure", e)?,
                None => defaults.enclosure,
            },
            escape: match config.escape.as_deref() {
                Some("") => None,
                Some(e) => Some(single_byte("escape", e)?),
                None => defaults.escape,
            },
            max_line_length: config.max_line_length.unwrap_or(defaults.max_line_length),
        };

        let header_policy = match config.header_policy {
            Some(name) => HeaderPolicy::try_from(name)?,
            None => HeaderPolicy::default(),
        };

        let error_policy = match config.error_policy.as_deref() {
            Some(name) => ErrorPolicy::from_str(name).ok_or_else(|| ConfigError::InvalidOption {
                name: "errorPolicy",
                reason: format!("\"{}\" is not fast_fail or accumulate", name),
            })?,
            None => ErrorPolicy::default(),
        };

        Ok(ReaderOptions {
            dialect,
            header_policy,
            use_labels_as_keys: config.use_labels_as_keys.unwrap_or(true),
            error_policy,
            validator: None,
            parser: None,
        })
    }
}

impl ReaderOptions {
    /// Build options from a configuration document.
    pub fn from_config(config: ReaderConfig) -> Result<Self, ConfigError> {
        Self::try_from(config)
    }
}
