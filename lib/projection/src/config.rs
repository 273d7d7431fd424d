//! The field-mapping configuration.
//!
//! A configuration is a YAML document of the following shape:
//! ```yaml
//! prefixes: |
//!   PREFIX schema: <http://schema.org/>
//! fields:
//!   - name: name
//!     select: SELECT ?name WHERE { ?subject schema:name ?name }
//!   - name: country
//!     construct:
//!       - CONSTRUCT { ?subject schema:country ?c } WHERE { ?subject schema:country ?c }
//!     select: SELECT ?c WHERE { ?subject schema:country ?c }
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::error;

/// The file name a configuration is conventionally stored under.
pub const DEFAULT_CONFIG_FILE: &str = "indexing.yml";

/// A decoded field-mapping configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Text prepended verbatim to every query, usually `PREFIX` declarations.
    pub prologue: String,
    /// The fields to project, in output order.
    pub fields: Vec<FieldSpec>,
}

/// How a single document field is computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// The document field the values are written to. Several specs may share a name.
    pub name: String,
    /// The SELECT query template.
    pub select: String,
    /// CONSTRUCT query templates materializing the graph `select` is evaluated against.
    ///
    /// When empty, `select` is evaluated against the store.
    pub construct: Vec<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, select: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            select: select.into(),
            construct: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_construct(mut self, query: impl Into<String>) -> Self {
        self.construct.push(query.into());
        self
    }
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    prefixes: Option<String>,
    #[serde(default)]
    fields: Option<Vec<RawFieldSpec>>,
}

#[derive(Deserialize)]
struct RawFieldSpec {
    name: String,
    select: String,
    #[serde(default)]
    construct: Option<Vec<String>>,
}

impl Config {
    /// Decodes a YAML configuration.
    ///
    /// A missing `prefixes` is the empty prologue and a missing or `null` `construct` means the
    /// field is selected from the store.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        Ok(Self {
            prologue: raw.prefixes.unwrap_or_default(),
            fields: raw
                .fields
                .unwrap_or_default()
                .into_iter()
                .map(|field| FieldSpec {
                    name: field.name,
                    select: field.select,
                    construct: field.construct.unwrap_or_default(),
                })
                .collect(),
        })
    }

    /// Reads and decodes the configuration provided by `source`.
    ///
    /// Any failure is logged and yields the empty configuration, so no field is projected.
    pub fn load(source: &(impl ConfigSource + ?Sized)) -> Self {
        match source
            .read_config()
            .and_then(|yaml| Self::from_yaml_str(&yaml))
        {
            Ok(config) => config,
            Err(error) => {
                error!(%error, "Unable to load the field-mapping configuration, no field will be projected");
                Self::default()
            }
        }
    }
}

/// Provides the text of a configuration.
///
/// The text is requested anew for each projection, so edits are picked up without a restart.
pub trait ConfigSource {
    fn read_config(&self) -> Result<String, ConfigError>;
}

impl ConfigSource for str {
    fn read_config(&self) -> Result<String, ConfigError> {
        Ok(self.to_owned())
    }
}

impl ConfigSource for String {
    fn read_config(&self) -> Result<String, ConfigError> {
        Ok(self.clone())
    }
}

/// A configuration held in memory.
#[derive(Debug, Clone, Default)]
pub struct InlineConfigSource {
    yaml: String,
}

impl InlineConfigSource {
    pub fn new(yaml: impl Into<String>) -> Self {
        Self { yaml: yaml.into() }
    }
}

impl ConfigSource for InlineConfigSource {
    fn read_config(&self) -> Result<String, ConfigError> {
        Ok(self.yaml.clone())
    }
}

/// A configuration stored in a UTF-8 file.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfigSource {
    fn read_config(&self) -> Result<String, ConfigError> {
        fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
