//! Swagger Definition Library
//!
//! This crate provides the data types on both sides of the swagger generator:
//! the parsed schema tree it consumes and the Swagger 2.0 document it
//! produces. The types are consumed by `swagger-gen`, which walks the schema
//! tree and fills a [`Swagger`] document.
//!
//! ## Core Types
//!
//! ### Schema Tree
//!
//! - [`SchemaContext`] - All parsed modules, resolved (paths, inheritance, origins)
//! - [`Module`] - A schema module with data nodes, rpcs and groupings
//! - [`SchemaNode`] - Container, list, choice, leaf, leaf-list or anyxml node
//! - [`NodeMeta`] - Name, module, config flag and paths shared by every node
//! - [`LeafType`] - Built-in leaf types
//! - [`Rpc`] - Remote procedure with optional input and output
//! - [`Grouping`] - Reusable node set
//!
//! ### Swagger Document
//!
//! - [`Swagger`] - The root document
//! - [`PathItem`] / [`Operation`] - Paths and their per-method operations
//! - [`Parameter`] / [`Response`] - Operation inputs and outputs
//! - [`Model`] - Reference, composed (`allOf`) or plain definitions
//! - [`Property`] - Reference, array or scalar properties
//!
//! ## Examples
//!
//! ```
//! use swagger_define::{ContainerNode, LeafNode, LeafType, Module, SchemaContext};
//!
//! let ctx = SchemaContext::new(vec![
//!     Module::new("acme").with_child(
//!         ContainerNode::new("system").with_child(LeafNode::new("hostname", LeafType::String)),
//!     ),
//! ])
//! .unwrap();
//!
//! assert_eq!(ctx.modules().len(), 1);
//! assert_eq!(ctx.module("acme").unwrap().children[0].name(), "system");
//! ```

pub mod context;
pub mod model;
pub mod module;
pub mod node;
pub mod prelude;
pub mod swagger;

// Re-export main types at crate root
pub use context::{SchemaContext, SchemaError, grouping_path};
pub use model::{
    ArrayProperty, ComposedModel, DEFINITIONS_PREFIX, Model, ModelImpl, Property, RefModel,
    RefProperty, ScalarProperty,
};
pub use module::{Grouping, Module, Rpc, RpcIo};
pub use node::{
    AnyxmlNode, CaseNode, ChoiceNode, ContainerNode, DataNode, LeafListNode, LeafNode, LeafType,
    ListNode, NodeMeta, SchemaNode, SchemaPath,
};
pub use swagger::{
    BodyParameter, HttpMethod, Info, Operation, Parameter, PathItem, PathParameter, Response,
    Swagger, Tag,
};
