//! The resolved set of parsed modules.
//!
//! [`SchemaContext::new`] runs a single resolution pass over every module:
//! owning modules and configuration flags are inherited from parents, data
//! paths are assigned, and nodes instantiated from groupings get their
//! definition-site origin.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::module::{Grouping, Module};
use crate::node::{ContainerNode, SchemaNode, SchemaPath};

/// Errors raised while resolving a schema tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Duplicate module: {0}")]
    DuplicateModule(String),

    #[error("Unnamed schema node under '{parent}'")]
    UnnamedNode { parent: String },
}

/// Path of grouping `reference` as seen from `current_module`.
///
/// A reference is either a bare grouping name, resolved in the current
/// module, or `module:grouping`.
///
/// ## Examples
///
/// ```
/// use swagger_define::grouping_path;
///
/// assert_eq!(grouping_path("endpoint", "acme").to_string(), "acme/grouping/endpoint");
/// assert_eq!(grouping_path("base:addr", "acme").to_string(), "base/grouping/addr");
/// ```
pub fn grouping_path(reference: &str, current_module: &str) -> SchemaPath {
    let (module, name) = reference
        .split_once(':')
        .unwrap_or((current_module, reference));
    SchemaPath::from_iter([module, "grouping", name])
}

/// All parsed modules, resolved and ready for generation.
///
/// ## Examples
///
/// ```
/// use swagger_define::{ContainerNode, Module, SchemaContext};
///
/// let ctx = SchemaContext::new(vec![
///     Module::new("acme").with_child(ContainerNode::new("system").with_config(false)),
/// ])
/// .unwrap();
///
/// let system = &ctx.module("acme").unwrap().children[0];
/// assert_eq!(system.module_name(), "acme");
/// assert_eq!(system.meta().path.to_string(), "acme/system");
/// assert!(!system.meta().is_configuration());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawContext")]
pub struct SchemaContext {
    modules: Vec<Module>,
}

#[derive(Deserialize)]
struct RawContext {
    #[serde(default)]
    modules: Vec<Module>,
}

impl TryFrom<RawContext> for SchemaContext {
    type Error = SchemaError;

    fn try_from(raw: RawContext) -> Result<Self, Self::Error> {
        Self::new(raw.modules)
    }
}

impl SchemaContext {
    /// Resolves `modules` into a context.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateModule`] when two modules share a name
    /// and [`SchemaError::UnnamedNode`] for a node without a name.
    pub fn new(mut modules: Vec<Module>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        for module in &modules {
            if !seen.insert(module.name.clone()) {
                return Err(SchemaError::DuplicateModule(module.name.clone()));
            }
        }

        for module in &mut modules {
            resolve_module(module)?;
        }

        Ok(Self { modules })
    }

    /// All modules in input order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Looks up a module by name.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Looks up a grouping by reference (see [`grouping_path`]).
    pub fn grouping(&self, reference: &str, current_module: &str) -> Option<&Grouping> {
        let (module, name) = reference
            .split_once(':')
            .unwrap_or((current_module, reference));
        self.module(module)?.grouping(name)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

struct Scope<'a> {
    module: &'a str,
    config: bool,
    path: SchemaPath,
    origin: Option<SchemaPath>,
}

fn resolve_module(module: &mut Module) -> Result<(), SchemaError> {
    let name = module.name.clone();

    let scope = Scope {
        module: &name,
        config: true,
        path: SchemaPath::from_iter([name.as_str()]),
        origin: None,
    };
    resolve_nodes(&mut module.children, &scope)?;

    for grouping in &mut module.groupings {
        let path = grouping_path(&grouping.name, &name);
        let scope = Scope {
            module: &name,
            config: true,
            path: path.clone(),
            origin: Some(path),
        };
        resolve_nodes(&mut grouping.children, &scope)?;
    }

    for rpc in &mut module.rpcs {
        let rpc_module = rpc.module.get_or_insert_with(|| name.clone()).clone();
        let rpc_path = SchemaPath::from_iter([name.as_str(), rpc.name.as_str()]);
        for (io, container) in [("input", &mut rpc.input), ("output", &mut rpc.output)] {
            if let Some(container) = container {
                resolve_rpc_io(container, io, &rpc_module, &rpc_path)?;
            }
        }
    }

    Ok(())
}

fn resolve_rpc_io(
    container: &mut ContainerNode,
    io: &str,
    module: &str,
    rpc_path: &SchemaPath,
) -> Result<(), SchemaError> {
    let meta = &mut container.meta;
    if meta.name.is_empty() {
        meta.name = io.to_string();
    }
    let module = meta.module.get_or_insert_with(|| module.to_string()).clone();
    meta.config = Some(true);
    meta.path = rpc_path.child(meta.name.as_str());
    meta.origin = None;

    let scope = Scope {
        module: &module,
        config: true,
        path: meta.path.clone(),
        origin: None,
    };
    resolve_nodes(&mut container.children, &scope)
}

fn resolve_nodes(nodes: &mut [SchemaNode], scope: &Scope<'_>) -> Result<(), SchemaError> {
    for node in nodes {
        resolve_node(node, scope)?;
    }
    Ok(())
}

fn resolve_node(node: &mut SchemaNode, scope: &Scope<'_>) -> Result<(), SchemaError> {
    let meta = node.meta_mut();
    if meta.name.is_empty() {
        return Err(SchemaError::UnnamedNode {
            parent: scope.path.to_string(),
        });
    }

    let module = meta
        .module
        .get_or_insert_with(|| scope.module.to_string())
        .clone();
    let config = meta.config.unwrap_or(scope.config);
    meta.config = Some(config);
    meta.path = scope.path.child(meta.name.as_str());
    meta.origin = match &meta.grouping {
        Some(grouping) => Some(grouping_path(grouping, &module).child(meta.name.as_str())),
        None => scope.origin.as_ref().map(|o| o.child(meta.name.as_str())),
    };

    match node {
        SchemaNode::Container(container) => {
            let child_scope = Scope {
                module: &module,
                config,
                path: container.meta.path.clone(),
                origin: container.meta.origin.clone(),
            };
            resolve_nodes(&mut container.children, &child_scope)
        }
        SchemaNode::List(list) => {
            let child_scope = Scope {
                module: &module,
                config,
                path: list.meta.path.clone(),
                origin: list.meta.origin.clone(),
            };
            resolve_nodes(&mut list.children, &child_scope)
        }
        SchemaNode::Choice(choice) => {
            // Case children live at the level of the choice's parent.
            let child_scope = Scope {
                module: &module,
                config,
                path: scope.path.clone(),
                origin: choice.meta.origin.as_ref().map(SchemaPath::parent),
            };
            for case in &mut choice.cases {
                resolve_nodes(&mut case.children, &child_scope)?;
            }
            Ok(())
        }
        SchemaNode::Leaf(_) | SchemaNode::LeafList(_) | SchemaNode::Anyxml(_) => Ok(()),
    }
}
