//! Optimizing model strategy.
//!
//! Nodes are keyed by their definition site, so every instantiation of a
//! grouping shares one set of definitions. Each used grouping gets its own
//! model; a node that uses groupings becomes a composed model listing a
//! reference per grouping, followed by a plain model of the children it adds
//! itself. A node that adds nothing to a single grouping therefore ends up as
//! an alias wrapper, which the post-processor collapses.

use std::collections::HashSet;

use swagger_define::{
    ComposedModel, DataNode, Model, ModelImpl, Module, SchemaContext, SchemaNode, Swagger,
    grouping_path,
};
use tracing::{debug, warn};

use super::{ModelStrategy, add_property, data_children, flatten_children};
use crate::naming::{NameRegistry, camel_case, qualifiers};

/// Definitions shared per grouping, composed per node.
#[derive(Debug)]
pub struct OptimizingStrategy<'a> {
    ctx: &'a SchemaContext,
    names: NameRegistry,
    building: HashSet<String>,
}

/// What a model is built from: a data node or a grouping definition.
struct Source<'n> {
    children: &'n [SchemaNode],
    uses: &'n [String],
    module: &'n str,
    keys: &'n [String],
    description: Option<String>,
}

impl<'a> OptimizingStrategy<'a> {
    pub fn new(ctx: &'a SchemaContext) -> Self {
        Self {
            ctx,
            names: NameRegistry::new(),
            building: HashSet::new(),
        }
    }

    /// Definition name of grouping `reference` as used from `module`.
    pub fn grouping_name(&mut self, reference: &str, module: &str) -> String {
        let path = grouping_path(reference, module);
        let base = camel_case(path.last().unwrap_or(reference));
        self.names.assign(&path, &base, &qualifiers(&path))
    }

    fn prime(&mut self, children: &[SchemaNode]) {
        for node in data_children(children) {
            self.model_name(node);
            self.prime(node.children());
        }
    }

    /// Registers the model of a grouping and returns its name.
    fn add_grouping_model(
        &mut self,
        reference: &str,
        module: &str,
        doc: &mut Swagger,
    ) -> Option<String> {
        let ctx = self.ctx;
        let Some(grouping) = ctx.grouping(reference, module) else {
            warn!(grouping = %reference, module = %module, "Used grouping not found; reference omitted");
            return None;
        };

        let name = self.grouping_name(reference, module);
        if doc.has_definition(&name) || !self.building.insert(name.clone()) {
            return Some(name);
        }

        let path = grouping_path(reference, module);
        let grouping_module = path.names().first().map(String::as_str).unwrap_or(module);
        let model = self.build(
            Source {
                children: &grouping.children,
                uses: &grouping.uses,
                module: grouping_module,
                keys: &[],
                description: grouping.description.clone(),
            },
            doc,
        );

        debug!(definition = %name, grouping = %path, "Registered grouping model");
        doc.add_definition(name.clone(), model);
        self.building.remove(&name);
        Some(name)
    }

    fn build(&mut self, source: Source<'_>, doc: &mut Swagger) -> Model {
        if source.uses.is_empty() {
            let mut model = self.plain(&source, false, doc);
            model.description = source.description;
            return Model::Plain(model);
        }

        let mut composed = ComposedModel::new();
        for reference in source.uses {
            if let Some(parent) = self.add_grouping_model(reference, source.module, doc) {
                composed = composed.with_ref(&parent);
            }
        }

        let own = self.plain(&source, true, doc);
        if composed.all_of.is_empty() {
            let mut model = own;
            model.description = source.description;
            return Model::Plain(model);
        }
        if !own.is_empty() {
            composed = composed.with_inline(own);
        }
        composed.description = source.description;
        Model::Composed(composed)
    }

    /// Plain model of the children, optionally without grouping content.
    fn plain(&mut self, source: &Source<'_>, own_only: bool, doc: &mut Swagger) -> ModelImpl {
        let mut model = ModelImpl::new();
        for (child, from_grouping) in flatten_children(source.children) {
            if own_only && from_grouping {
                continue;
            }
            let reference = match child.as_data_node() {
                Some(data) => {
                    self.add_model(data, doc);
                    Some(self.model_name(data))
                }
                None => None,
            };
            add_property(
                &mut model,
                child,
                source.module,
                source.keys,
                reference.as_deref(),
            );
        }
        model
    }
}

impl ModelStrategy for OptimizingStrategy<'_> {
    fn process_module(&mut self, module: &Module) {
        for grouping in &module.groupings {
            self.grouping_name(&grouping.name, &module.name);
            self.prime(&grouping.children);
        }

        self.prime(&module.children);

        for rpc in &module.rpcs {
            for container in [&rpc.input, &rpc.output].into_iter().flatten() {
                let path = &container.meta.path;
                let base = format!("{}{}", camel_case(&rpc.name), camel_case(&container.meta.name));
                self.names.assign(path, &base, &qualifiers(&path.parent()));
                self.prime(&container.children);
            }
        }
    }

    fn add_model(&mut self, node: DataNode<'_>, doc: &mut Swagger) {
        let name = self.model_name(node);
        if doc.has_definition(&name) {
            return;
        }

        let meta = node.meta();
        let model = self.build(
            Source {
                children: node.children(),
                uses: node.uses(),
                module: meta.module_name(),
                keys: node.keys(),
                description: meta.description.clone(),
            },
            doc,
        );

        debug!(definition = %name, origin = %meta.definition_path(), "Registered model");
        doc.add_definition(name, model);
    }

    fn model_name(&mut self, node: DataNode<'_>) -> String {
        let key = node.meta().definition_path();
        self.names
            .assign(key, &camel_case(node.name()), &qualifiers(key))
    }
}
