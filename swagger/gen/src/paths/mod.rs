//! Path strategies.
//!
//! A [`PathHandlerBuilder`] is configured once per generation and hands out
//! one [`PathHandler`] per module. Traversal calls the handler for every
//! container, list and rpc; the handler adds the matching path items and
//! operations to the document and asks the model strategy for the
//! definitions they reference.
//!
//! [`Rfc8040PathHandlerBuilder`] lays paths out as RESTCONF does.

mod rfc8040;

pub use rfc8040::{Rfc8040PathHandler, Rfc8040PathHandlerBuilder};

use std::rc::Rc;

use swagger_define::{DataNode, Module, Rpc, SchemaContext, Swagger};

use crate::models::ModelStrategy;
use crate::segment::PathSegment;
use crate::tags::TagGenerator;

/// Creates per-module path handlers.
pub trait PathHandlerBuilder {
    /// Called once per generation, before any handler is created.
    fn configure(&mut self, _ctx: &SchemaContext) {}

    /// Registers a tag generator applied to every operation.
    fn add_tag_generator(&mut self, generator: Rc<dyn TagGenerator>);

    /// Creates the handler for `module`.
    fn for_module(&self, module: &Module) -> Box<dyn PathHandler>;
}

/// Adds paths and operations for schema nodes.
pub trait PathHandler {
    /// Handles a container or list at `segment`.
    fn path(
        &mut self,
        node: DataNode<'_>,
        segment: &PathSegment,
        doc: &mut Swagger,
        models: &mut dyn ModelStrategy,
    );

    /// Handles the input/output pair of an rpc at `segment`.
    fn rpc(
        &mut self,
        rpc: &Rpc,
        segment: &PathSegment,
        doc: &mut Swagger,
        models: &mut dyn ModelStrategy,
    );
}

/// Tags of every generator for `segment`, in order, without duplicates.
pub fn collect_tags(generators: &[Rc<dyn TagGenerator>], segment: &PathSegment) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in generators.iter().flat_map(|g| g.tags(segment)) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
