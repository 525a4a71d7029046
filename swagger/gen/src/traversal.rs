//! Module traversal.
//!
//! Walks a module's schema tree and drives the path and model strategies.
//! Containers and lists open a path segment, hand it to the path handler,
//! recurse into their children and finally register their model. Choices and
//! cases are transparent. Leafs, leaf-lists and anyxml nodes only appear as
//! model properties.
//!
//! Every data segment carries the name of the module being traversed, so
//! augmenting nodes from another selected module stay under the augmented
//! module's prefix and tags.

use std::collections::HashSet;
use std::rc::Rc;

use swagger_define::{DataNode, Module, SchemaNode, Swagger};
use tracing::{debug, info};

use crate::config::ElementKind;
use crate::models::ModelStrategy;
use crate::paths::PathHandler;
use crate::segment::PathSegment;

/// Collaborators lent to one traversal.
pub struct TraversalContext<'t> {
    pub handler: &'t mut dyn PathHandler,
    pub models: &'t mut dyn ModelStrategy,
    pub doc: &'t mut Swagger,
}

/// Visits the nodes of selected modules.
#[derive(Debug, Clone)]
pub struct ModuleTraversal {
    selected: HashSet<String>,
    elements: Vec<ElementKind>,
}

impl ModuleTraversal {
    /// Traversal limited to `selected` modules, producing `elements`.
    pub fn new<I, S>(selected: I, elements: &[ElementKind]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: selected.into_iter().map(Into::into).collect(),
            elements: elements.to_vec(),
        }
    }

    /// Traverses `module`.
    ///
    /// Data nodes owned by a module outside the selection (augmentations) are
    /// skipped with a debug diagnostic.
    pub fn traverse(&self, module: &Module, cx: &mut TraversalContext<'_>) {
        if self.elements.contains(&ElementKind::Data) {
            let root = PathSegment::root(module.name.as_str());
            for node in &module.children {
                self.visit(node, &root, &module.name, cx);
            }
        }

        if self.elements.contains(&ElementKind::Rpc) {
            let root = PathSegment::root(module.name.as_str());
            for rpc in &module.rpcs {
                let module_name = if rpc.module_name().is_empty() {
                    module.name.as_str()
                } else {
                    rpc.module_name()
                };
                info!(rpc = %rpc.name, module = %module_name, "Processing rpc");
                let segment = root.push(rpc.name.as_str(), module_name, false, &[]);
                cx.handler.rpc(rpc, &segment, cx.doc, cx.models);
                segment.pop();
            }
        }
    }

    fn visit(
        &self,
        node: &SchemaNode,
        parent: &Rc<PathSegment>,
        module: &str,
        cx: &mut TraversalContext<'_>,
    ) {
        let meta = node.meta();
        if !self.selected.contains(meta.module_name()) {
            debug!(
                node = %meta.name,
                module = %meta.module_name(),
                "Skipping node from unselected module"
            );
            return;
        }

        if let Some(data) = node.as_data_node() {
            self.visit_data(data, parent, module, cx);
            return;
        }

        if let SchemaNode::Choice(choice) = node {
            info!(choice = %meta.name, path = %meta.path, "Processing choice");
            for child in choice.case_children() {
                self.visit(child, parent, module, cx);
            }
        }
    }

    fn visit_data(
        &self,
        data: DataNode<'_>,
        parent: &Rc<PathSegment>,
        module: &str,
        cx: &mut TraversalContext<'_>,
    ) {
        let meta = data.meta();
        let kind = if data.is_list() { "list" } else { "container" };
        info!(kind, node = %meta.name, path = %meta.path, "Processing {kind}");

        let segment = parent.push(
            meta.name.as_str(),
            module,
            !meta.is_configuration(),
            data.keys(),
        );

        cx.handler.path(data, &segment, cx.doc, cx.models);

        for child in data.children() {
            self.visit(child, &segment, module, cx);
        }

        cx.models.add_model(data, cx.doc);
        segment.pop();
    }
}
