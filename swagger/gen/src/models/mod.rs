//! Model construction strategies.
//!
//! A [`ModelStrategy`] decides which definitions the document gets for the
//! containers and lists of the schema tree and what they are called.
//!
//! - [`UnpackingStrategy`] - one plain model per data node, grouping content
//!   inlined
//! - [`OptimizingStrategy`] - one model per grouping; nodes that use
//!   groupings become composed (`allOf`) models referencing them
//!
//! Both share the leaf type converter ([`type_property`]) and the property
//! collection in this module.

mod optimizing;
mod unpacking;

pub use optimizing::OptimizingStrategy;
pub use unpacking::UnpackingStrategy;

use swagger_define::{
    DataNode, LeafType, ModelImpl, Module, Property, Rpc, RpcIo, ScalarProperty, SchemaContext,
    SchemaNode, Swagger,
};

use crate::config::ModelStrategyKind;

/// Builds the definitions of a document.
pub trait ModelStrategy {
    /// Assigns definition names for every data node, rpc input/output (and
    /// strategy-specific extras) of `module`, in declaration order.
    fn process_module(&mut self, module: &Module);

    /// Registers the definition of `node` in `doc`, together with the
    /// definitions its properties reference. Calling it again for the same
    /// node does nothing.
    fn add_model(&mut self, node: DataNode<'_>, doc: &mut Swagger);

    /// Definition name of a container or list.
    fn model_name(&mut self, node: DataNode<'_>) -> String;

    /// Definition name of an rpc's input or output.
    fn rpc_model_name(&mut self, rpc: &Rpc, io: RpcIo) -> Option<String> {
        rpc.io(io)
            .map(|container| self.model_name(DataNode::Container(container)))
    }
}

/// Creates the strategy selected by `kind`.
pub fn strategy_for<'a>(
    kind: ModelStrategyKind,
    ctx: &'a SchemaContext,
) -> Box<dyn ModelStrategy + 'a> {
    match kind {
        ModelStrategyKind::Optimizing => Box::new(OptimizingStrategy::new(ctx)),
        ModelStrategyKind::Unpacking => Box::new(UnpackingStrategy::new()),
    }
}

/// Scalar property for a leaf type.
///
/// ## Examples
///
/// ```
/// use swagger_define::LeafType;
/// use swagger_gen::models::type_property;
///
/// let prop = type_property(&LeafType::Uint32);
/// assert_eq!(prop.property_type, "integer");
/// assert_eq!(prop.format.as_deref(), Some("int64"));
/// ```
pub fn type_property(leaf_type: &LeafType) -> ScalarProperty {
    match leaf_type {
        LeafType::String | LeafType::Identityref { .. } | LeafType::Union { .. } => {
            ScalarProperty::new("string")
        }
        LeafType::Binary => ScalarProperty::new("string").with_format("binary"),
        LeafType::Boolean | LeafType::Empty => ScalarProperty::new("boolean"),
        LeafType::Int8
        | LeafType::Int16
        | LeafType::Int32
        | LeafType::Uint8
        | LeafType::Uint16 => ScalarProperty::new("integer").with_format("int32"),
        LeafType::Int64 | LeafType::Uint32 | LeafType::Uint64 => {
            ScalarProperty::new("integer").with_format("int64")
        }
        LeafType::Decimal64 => ScalarProperty::new("number").with_format("double"),
        LeafType::Enumeration { values } => ScalarProperty {
            enum_values: values.clone(),
            ..ScalarProperty::new("string")
        },
        LeafType::Leafref { path } => ScalarProperty {
            x_path: Some(path.clone()),
            ..ScalarProperty::new("string")
        },
    }
}

/// Children of a node with choices and cases flattened away.
///
/// The flag tells whether the child was instantiated from a grouping, either
/// directly or through an enclosing choice that was.
pub(crate) fn flatten_children(children: &[SchemaNode]) -> Vec<(&SchemaNode, bool)> {
    let mut flat = Vec::new();
    push_flat(children, false, &mut flat);
    flat
}

fn push_flat<'n>(children: &'n [SchemaNode], inherited: bool, out: &mut Vec<(&'n SchemaNode, bool)>) {
    for child in children {
        let from_grouping = inherited || child.meta().grouping.is_some();
        match child {
            SchemaNode::Choice(choice) => {
                for case in &choice.cases {
                    push_flat(&case.children, from_grouping, out);
                }
            }
            _ => out.push((child, from_grouping)),
        }
    }
}

/// Data nodes among `children`, choices flattened, in declaration order.
pub(crate) fn data_children(children: &[SchemaNode]) -> impl Iterator<Item = DataNode<'_>> {
    flatten_children(children)
        .into_iter()
        .filter_map(|(child, _)| child.as_data_node())
}

/// Property name of `child` inside a model owned by `parent_module`.
///
/// Members from another module are qualified as `module:name`.
fn property_name(child: &SchemaNode, parent_module: &str) -> String {
    let module = child.module_name();
    if module.is_empty() || module == parent_module {
        child.name().to_string()
    } else {
        format!("{module}:{}", child.name())
    }
}

/// Adds the property for one (non-choice) child to `model`.
///
/// `reference` is the definition name to use for container and list
/// children.
pub(crate) fn add_property(
    model: &mut ModelImpl,
    child: &SchemaNode,
    parent_module: &str,
    keys: &[String],
    reference: Option<&str>,
) {
    let name = property_name(child, parent_module);
    let meta = child.meta();
    let description = meta.description.clone();

    let property = match child {
        SchemaNode::Leaf(leaf) => {
            let mut scalar = type_property(&leaf.leaf_type);
            scalar.description = description;
            scalar.default = leaf.default.clone();
            scalar.read_only = !meta.is_configuration();
            if leaf.mandatory || keys.contains(&leaf.meta.name) {
                model.add_required(name.clone());
            }
            Property::Scalar(scalar)
        }
        SchemaNode::LeafList(leaf_list) => {
            let mut items = type_property(&leaf_list.leaf_type);
            items.read_only = !meta.is_configuration();
            Property::array(items.into()).with_description(description)
        }
        SchemaNode::Container(_) => match reference {
            Some(target) => Property::reference(target).with_description(description),
            None => return,
        },
        SchemaNode::List(_) => match reference {
            Some(target) => {
                Property::array(Property::reference(target)).with_description(description)
            }
            None => return,
        },
        SchemaNode::Anyxml(_) => ScalarProperty::new("object").into(),
        SchemaNode::Choice(_) => return,
    };

    model.add_property(name, property);
}

#[cfg(test)]
mod tests {
    use super::*;
    use swagger_define::{
        AnyxmlNode, CaseNode, ChoiceNode, ContainerNode, LeafListNode, LeafNode, ListNode,
    };

    #[test]
    fn integer_widths_map_to_formats() {
        for t in [LeafType::Int8, LeafType::Int16, LeafType::Int32, LeafType::Uint8, LeafType::Uint16] {
            assert_eq!(type_property(&t).format.as_deref(), Some("int32"), "{t:?}");
        }
        for t in [LeafType::Int64, LeafType::Uint32, LeafType::Uint64] {
            assert_eq!(type_property(&t).format.as_deref(), Some("int64"), "{t:?}");
        }
    }

    #[test]
    fn special_types_convert() {
        let prop = type_property(&LeafType::Decimal64);
        assert_eq!((prop.property_type.as_str(), prop.format.as_deref()), ("number", Some("double")));

        assert_eq!(type_property(&LeafType::Empty).property_type, "boolean");
        assert_eq!(type_property(&LeafType::Binary).format.as_deref(), Some("binary"));

        let prop = type_property(&LeafType::Enumeration {
            values: vec!["up".to_string(), "down".to_string()],
        });
        assert_eq!(prop.property_type, "string");
        assert_eq!(prop.enum_values, ["up", "down"]);

        let prop = type_property(&LeafType::Leafref {
            path: "/if:interfaces/if:interface/if:name".to_string(),
        });
        assert_eq!(prop.x_path.as_deref(), Some("/if:interfaces/if:interface/if:name"));
    }

    #[test]
    fn flatten_marks_grouping_content_through_choices() {
        let children: Vec<SchemaNode> = vec![
            LeafNode::new("own", LeafType::String).into(),
            ChoiceNode::new("c")
                .with_case(CaseNode::new("a").with_child(LeafNode::new("in-case", LeafType::String)))
                .into(),
            {
                let mut choice = ChoiceNode::new("g")
                    .with_case(CaseNode::new("b").with_child(ContainerNode::new("deep")));
                choice.meta.grouping = Some("grp".to_string());
                choice.into()
            },
        ];

        let flat: Vec<_> = flatten_children(&children)
            .into_iter()
            .map(|(n, g)| (n.name().to_string(), g))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("own".to_string(), false),
                ("in-case".to_string(), false),
                ("deep".to_string(), true),
            ]
        );
        assert_eq!(data_children(&children).count(), 1);
    }

    #[test]
    fn properties_follow_node_kinds() {
        let mut model = ModelImpl::new();
        let key = LeafNode::new("id", LeafType::Uint8);
        let mut state = LeafNode::new("oper", LeafType::String);
        state.meta.config = Some(false);
        let foreign = ContainerNode::new("ext").with_module("other");

        add_property(&mut model, &key.into(), "m", &["id".to_string()], None);
        add_property(&mut model, &state.into(), "m", &[], None);
        add_property(&mut model, &LeafListNode::new("tags", LeafType::String).into(), "m", &[], None);
        add_property(&mut model, &ListNode::new("items", ["k"]).into(), "m", &[], Some("Item"));
        add_property(&mut model, &foreign.into(), "m", &[], Some("Ext"));
        add_property(&mut model, &AnyxmlNode::new("blob").into(), "m", &[], None);

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["required"], serde_json::json!(["id"]));
        assert_eq!(json["properties"]["oper"]["readOnly"], true);
        assert_eq!(json["properties"]["tags"]["type"], "array");
        assert_eq!(json["properties"]["items"]["items"]["$ref"], "#/definitions/Item");
        assert_eq!(json["properties"]["other:ext"]["$ref"], "#/definitions/Ext");
        assert_eq!(json["properties"]["blob"]["type"], "object");
    }
}
