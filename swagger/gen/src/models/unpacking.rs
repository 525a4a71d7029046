//! Unpacking model strategy.
//!
//! Every container and list gets its own plain model with all of its
//! children as properties, keyed by its data path. Groupings leave no trace
//! in the output.

use swagger_define::{DataNode, Model, ModelImpl, Module, SchemaNode, Swagger};
use tracing::debug;

use super::{ModelStrategy, add_property, data_children, flatten_children};
use crate::naming::{NameRegistry, camel_case, qualifiers};

/// One plain definition per data node.
#[derive(Debug, Default)]
pub struct UnpackingStrategy {
    names: NameRegistry,
}

impl UnpackingStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    fn prime(&mut self, children: &[SchemaNode]) {
        for node in data_children(children) {
            self.model_name(node);
            self.prime(node.children());
        }
    }
}

impl ModelStrategy for UnpackingStrategy {
    fn process_module(&mut self, module: &Module) {
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
        let mut model = ModelImpl::new();
        model.description = meta.description.clone();

        for (child, _) in flatten_children(node.children()) {
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
                meta.module_name(),
                node.keys(),
                reference.as_deref(),
            );
        }

        debug!(definition = %name, path = %meta.path, "Registered unpacked model");
        doc.add_definition(name, Model::Plain(model));
    }

    fn model_name(&mut self, node: DataNode<'_>) -> String {
        let path = &node.meta().path;
        self.names
            .assign(path, &camel_case(node.name()), &qualifiers(path))
    }
}
