//! Error types for the swagger generator.

use std::path::PathBuf;

use swagger_define::SchemaError;
use thiserror::Error;

/// Errors that can occur while loading a schema, generating or writing a
/// document.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The selected module set is empty.
    #[error("No modules selected for generation")]
    NoModules,

    /// A selected module is not part of the schema context.
    #[error("Unknown module '{name}'. Available modules: {available}")]
    UnknownModule { name: String, available: String },

    /// No element kinds (data, rpc) configured.
    #[error("No element kinds configured; expected at least one of: data, rpc")]
    NoElements,

    /// The schema tree failed to resolve.
    #[error("Invalid schema tree: {0}")]
    Schema(#[from] SchemaError),

    /// Failed to read the input file
    #[error("Failed to read input file '{path}': {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the input file
    #[error("Failed to parse input file '{path}': {message}")]
    ParseInput { path: PathBuf, message: String },

    /// Input file extension is not json, yaml or yml.
    #[error("Unsupported input format '{path}'; expected .json, .yaml or .yml")]
    UnsupportedInput { path: PathBuf },

    #[error("JSON serialization failed: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    YamlSerialize(#[from] serde_yaml::Error),

    /// Failed to write output
    #[error("Failed to write output '{path}': {source}")]
    WriteOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
