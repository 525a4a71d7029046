//! Generator configuration.
//!
//! [`GeneratorConfig`] holds everything the orchestrator needs besides the
//! schema itself. It deserializes from YAML or JSON with kebab-case keys and
//! every field defaulted, so a config file only lists what it overrides.
//!
//! ## Examples
//!
//! ```
//! use swagger_gen::config::{ElementKind, Format, GeneratorConfig, ModelStrategyKind};
//!
//! let config: GeneratorConfig = serde_yaml::from_str("format: json\nelements: [rpc]\n").unwrap();
//! assert_eq!(config.format, Format::Json);
//! assert_eq!(config.elements, vec![ElementKind::Rpc]);
//! assert_eq!(config.strategy, ModelStrategyKind::Optimizing);
//! assert_eq!(config.host, "localhost:8080");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::errors::GeneratorError;

/// Output serialization format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

/// Schema element kinds to generate paths for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Containers and lists (`/data/...`).
    Data,
    /// Remote procedures (`/operations/...`).
    Rpc,
}

/// How definitions are derived from schema nodes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ModelStrategyKind {
    /// One definition per grouping; nodes using groupings compose them.
    #[default]
    Optimizing,
    /// Grouping content is inlined into every node's definition.
    Unpacking,
}

/// Built-in tag derivation strategies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TagStrategy {
    /// Tag operations with the owning module name.
    Module,
    /// Tag operations with their leading path segment names.
    Segment,
}

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeneratorConfig {
    pub host: String,
    pub base_path: String,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    /// API version written to `info.version`.
    pub version: String,
    pub format: Format,
    pub elements: Vec<ElementKind>,
    pub strategy: ModelStrategyKind,
    pub tags: Vec<TagStrategy>,
    /// Number of leading segment names used by the segment tag strategy.
    pub segment_tag_depth: usize,
    /// Repeat alias collapsing until no alias wrapper definition remains.
    pub collapse_alias_chains: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            host: "localhost:8080".to_string(),
            base_path: "/restconf".to_string(),
            consumes: vec!["application/json".to_string()],
            produces: vec!["application/json".to_string()],
            version: "1.0.0-SNAPSHOT".to_string(),
            format: Format::Yaml,
            elements: vec![ElementKind::Data, ElementKind::Rpc],
            strategy: ModelStrategyKind::Optimizing,
            tags: Vec::new(),
            segment_tag_depth: 1,
            collapse_alias_chains: false,
        }
    }
}

impl GeneratorConfig {
    /// Loads a configuration file (`.json`, otherwise YAML).
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::ReadInput`] or [`GeneratorError::ParseInput`].
    pub fn from_file(path: &Path) -> Result<Self, GeneratorError> {
        let content = fs::read_to_string(path).map_err(|source| GeneratorError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| GeneratorError::ParseInput {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Checks the settings before generation.
    ///
    /// ## Errors
    ///
    /// - [`GeneratorError::NoElements`] when no element kind is selected
    /// - [`GeneratorError::InvalidConfig`] for a base path without a leading
    ///   `/` or a zero segment tag depth
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.elements.is_empty() {
            return Err(GeneratorError::NoElements);
        }
        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            return Err(GeneratorError::InvalidConfig(format!(
                "base path '{}' must start with '/'",
                self.base_path
            )));
        }
        if self.segment_tag_depth == 0 {
            return Err(GeneratorError::InvalidConfig(
                "segment tag depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn includes(&self, kind: ElementKind) -> bool {
        self.elements.contains(&kind)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Replaces both `consumes` and `produces`.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        let media_type = media_type.into();
        self.consumes = vec![media_type.clone()];
        self.produces = vec![media_type];
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_elements(mut self, elements: impl IntoIterator<Item = ElementKind>) -> Self {
        self.elements = elements.into_iter().collect();
        self
    }

    pub fn with_strategy(mut self, strategy: ModelStrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Appends a built-in tag strategy.
    pub fn with_tag(mut self, tag: TagStrategy) -> Self {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    pub fn with_segment_tag_depth(mut self, depth: usize) -> Self {
        self.segment_tag_depth = depth;
        self
    }

    pub fn with_collapse_alias_chains(mut self, collapse: bool) -> Self {
        self.collapse_alias_chains = collapse;
        self
    }
}
