//! Shared schema fixtures for unit tests.

use swagger_define::{
    ContainerNode, Grouping, LeafNode, LeafType, ListNode, Module, Rpc, SchemaContext,
};

/// Resolves a single module into a context.
pub fn resolve(module: Module) -> SchemaContext {
    resolve_all(vec![module])
}

pub fn resolve_all(modules: Vec<Module>) -> SchemaContext {
    SchemaContext::new(modules).expect("fixture modules are valid")
}

/// Module `acme`: grouping `endpoint` (address, port) used by container
/// `top`, plus rpc `reset` with an input and no output.
pub fn grouped_module() -> Module {
    Module::new("acme")
        .with_grouping(
            Grouping::new("endpoint")
                .with_child(LeafNode::new("address", LeafType::String))
                .with_child(LeafNode::new("port", LeafType::Uint16)),
        )
        .with_child(
            ContainerNode::new("top")
                .with_uses("endpoint")
                .with_child(LeafNode::new("address", LeafType::String).from_grouping("endpoint"))
                .with_child(LeafNode::new("port", LeafType::Uint16).from_grouping("endpoint")),
        )
        .with_rpc(
            Rpc::new("reset")
                .with_input(ContainerNode::new("input").with_child(LeafNode::new("delay", LeafType::Uint32))),
        )
}

/// Module `m`: container `A` holding read-only list `B` keyed by `id`.
pub fn container_list_module() -> Module {
    Module::new("m").with_child(
        ContainerNode::new("A").with_child(
            ListNode::new("B", ["id"])
                .with_config(false)
                .with_child(LeafNode::new("id", LeafType::String))
                .with_child(LeafNode::new("x", LeafType::Int32)),
        ),
    )
}
