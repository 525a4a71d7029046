//! Swagger 2.0 generator for YANG schema trees.
//!
//! Takes a resolved [`swagger_define::SchemaContext`] and a selection of its
//! modules and produces a Swagger document describing RESTCONF-style CRUD
//! paths for every container and list, a `POST` operation for every rpc and a
//! JSON schema definition for every data structure.
//!
//! ## Modules
//!
//! - [`generator`] - Orchestrates a generation run
//! - [`traversal`] - Walks schema trees and drives the strategies
//! - [`segment`] - Path segment chain with key parameters
//! - [`models`] - Model strategies (optimizing, unpacking)
//! - [`paths`] - Path strategies (RFC 8040)
//! - [`tags`] - Operation tag strategies
//! - [`postprocess`] - Alias removal, reference fixing and ordering
//! - [`naming`] - Unique definition names
//! - [`config`] - Generator configuration
//! - [`input`] / [`output`] - Schema loading and document writing
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use swagger_gen::config::GeneratorConfig;
//! use swagger_gen::generator::SwaggerGenerator;
//! use swagger_gen::input::load_context;
//! use swagger_gen::output::write_file;
//!
//! let ctx = load_context(Path::new("tree.yaml")).unwrap();
//! let config = GeneratorConfig::default();
//! let format = config.format;
//!
//! let doc = SwaggerGenerator::for_all_modules(&ctx, config)
//!     .unwrap()
//!     .generate()
//!     .unwrap();
//! write_file(&doc, format, Path::new("swagger.yaml")).unwrap();
//! ```

pub mod config;
pub mod errors;
pub mod generator;
pub mod input;
pub mod models;
pub mod naming;
pub mod output;
pub mod paths;
pub mod postprocess;
pub mod segment;
pub mod tags;
pub mod traversal;

#[cfg(test)]
pub(crate) mod test_utils;
