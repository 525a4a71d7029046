//! Convenient re-exports for building schema trees and inspecting documents.
//!
//! ## Examples
//!
//! ```
//! use swagger_define::prelude::*;
//!
//! let module = Module::new("acme")
//!     .with_grouping(Grouping::new("endpoint").with_child(LeafNode::new("address", LeafType::String)))
//!     .with_rpc(Rpc::new("restart"));
//!
//! let ctx = SchemaContext::new(vec![module]).unwrap();
//! assert!(ctx.grouping("endpoint", "acme").is_some());
//! ```

pub use crate::context::{SchemaContext, SchemaError, grouping_path};
pub use crate::model::{ComposedModel, Model, ModelImpl, Property, RefModel, ScalarProperty};
pub use crate::module::{Grouping, Module, Rpc, RpcIo};
pub use crate::node::{
    AnyxmlNode, CaseNode, ChoiceNode, ContainerNode, DataNode, LeafListNode, LeafNode, LeafType,
    ListNode, NodeMeta, SchemaNode, SchemaPath,
};
pub use crate::swagger::{HttpMethod, Operation, Parameter, PathItem, Response, Swagger};
