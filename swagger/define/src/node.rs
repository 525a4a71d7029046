//! Schema tree nodes.
//!
//! These types describe the already-parsed schema tree handed over by the
//! schema parser. A tree is a list of [`SchemaNode`]s per module; containers
//! and lists nest further nodes, choices group alternative node sets into
//! cases.
//!
//! Every node carries a [`NodeMeta`] with its local name, owning module,
//! configuration flag and (after [`SchemaContext`](crate::SchemaContext)
//! resolution) its data-tree path and grouping origin.
//!
//! ## Examples
//!
//! ```
//! use swagger_define::{ContainerNode, LeafNode, LeafType, ListNode, SchemaNode};
//!
//! let tree: SchemaNode = ContainerNode::new("interfaces")
//!     .with_child(
//!         ListNode::new("interface", ["name"])
//!             .with_child(LeafNode::new("name", LeafType::String))
//!             .with_child(LeafNode::new("mtu", LeafType::Uint16)),
//!     )
//!     .into();
//!
//! assert_eq!(tree.name(), "interfaces");
//! assert!(tree.as_data_node().is_some());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered list of names identifying a node, module name first.
///
/// ## Examples
///
/// ```
/// use swagger_define::SchemaPath;
///
/// let path = SchemaPath::from_iter(["acme", "interfaces"]).child("interface");
/// assert_eq!(path.to_string(), "acme/interfaces/interface");
/// assert_eq!(path.last(), Some("interface"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaPath(Vec<String>);

impl SchemaPath {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns a new path with `name` appended.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut names = self.0.clone();
        names.push(name.into());
        Self(names)
    }

    /// Returns the path without its innermost name.
    pub fn parent(&self) -> Self {
        let mut names = self.0.clone();
        names.pop();
        Self(names)
    }

    /// The names of this path, outermost first.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// The innermost name.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Number of names in the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the path has no names.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SchemaPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Attributes shared by every schema node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NodeMeta {
    /// Local name of the node.
    #[serde(default)]
    pub name: String,

    /// Owning module. Defaults to the enclosing module during resolution.
    ///
    /// Nodes added by an augmentation from another module carry that
    /// module's name here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Configuration flag (`true` = read/write data, `false` = operational).
    ///
    /// Inherited from the parent when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<bool>,

    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Grouping whose `uses` instantiated this node, if any.
    ///
    /// Either a bare grouping name (same module) or `module:grouping`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping: Option<String>,

    /// Data-tree path, filled by resolution.
    #[serde(skip)]
    pub path: SchemaPath,

    /// Definition-site path for nodes that belong to a grouping.
    #[serde(skip)]
    pub origin: Option<SchemaPath>,
}

impl NodeMeta {
    /// Creates metadata with just a local name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Name of the owning module (empty before resolution if unset).
    pub fn module_name(&self) -> &str {
        self.module.as_deref().unwrap_or_default()
    }

    /// Effective configuration flag.
    pub fn is_configuration(&self) -> bool {
        self.config.unwrap_or(true)
    }

    /// Path identifying where this node is defined: the grouping origin when
    /// the node was instantiated from a grouping, its data path otherwise.
    pub fn definition_path(&self) -> &SchemaPath {
        self.origin.as_ref().unwrap_or(&self.path)
    }
}

/// Built-in leaf types understood by the type converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "base", rename_all = "kebab-case")]
pub enum LeafType {
    String,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Decimal64,
    Empty,
    Binary,
    Enumeration {
        #[serde(default)]
        values: Vec<String>,
    },
    Leafref {
        path: String,
    },
    Identityref {
        #[serde(rename = "base-identity")]
        base_identity: String,
    },
    Union {
        #[serde(default)]
        types: Vec<LeafType>,
    },
}

/// A node of the schema tree.
///
/// Serialized with a `kind` tag (`container`, `list`, `choice`, `leaf`,
/// `leaf-list`, `anyxml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SchemaNode {
    Container(ContainerNode),
    List(ListNode),
    Choice(ChoiceNode),
    Leaf(LeafNode),
    LeafList(LeafListNode),
    Anyxml(AnyxmlNode),
}

impl SchemaNode {
    /// Common metadata of the node.
    pub fn meta(&self) -> &NodeMeta {
        match self {
            Self::Container(n) => &n.meta,
            Self::List(n) => &n.meta,
            Self::Choice(n) => &n.meta,
            Self::Leaf(n) => &n.meta,
            Self::LeafList(n) => &n.meta,
            Self::Anyxml(n) => &n.meta,
        }
    }

    pub(crate) fn meta_mut(&mut self) -> &mut NodeMeta {
        match self {
            Self::Container(n) => &mut n.meta,
            Self::List(n) => &mut n.meta,
            Self::Choice(n) => &mut n.meta,
            Self::Leaf(n) => &mut n.meta,
            Self::LeafList(n) => &mut n.meta,
            Self::Anyxml(n) => &mut n.meta,
        }
    }

    /// Local name of the node.
    pub fn name(&self) -> &str {
        &self.meta().name
    }

    /// Owning module name.
    pub fn module_name(&self) -> &str {
        self.meta().module_name()
    }

    /// Returns the container/list view of this node, if it is one.
    pub fn as_data_node(&self) -> Option<DataNode<'_>> {
        match self {
            Self::Container(n) => Some(DataNode::Container(n)),
            Self::List(n) => Some(DataNode::List(n)),
            _ => None,
        }
    }
}

/// A container node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContainerNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SchemaNode>,
    /// Groupings used directly by this node.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uses: Vec<String>,
    #[serde(default)]
    pub presence: bool,
}

impl ContainerNode {
    /// Creates an empty container.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: NodeMeta::new(name),
            ..Self::default()
        }
    }

    /// Appends a child node.
    pub fn with_child(mut self, child: impl Into<SchemaNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Records a directly used grouping.
    pub fn with_uses(mut self, grouping: impl Into<String>) -> Self {
        self.uses.push(grouping.into());
        self
    }

    /// Sets the configuration flag.
    pub fn with_config(mut self, config: bool) -> Self {
        self.meta.config = Some(config);
        self
    }

    /// Sets the owning module.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.meta.module = Some(module.into());
        self
    }

    /// Marks the node as instantiated from `grouping`.
    pub fn from_grouping(mut self, grouping: impl Into<String>) -> Self {
        self.meta.grouping = Some(grouping.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.meta.description = Some(description.into());
        self
    }
}

/// A list node addressed by its key leafs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ListNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    /// Key leaf names, in key order. Operational lists may have none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SchemaNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uses: Vec<String>,
}

impl ListNode {
    /// Creates an empty list with the given key leaf names.
    pub fn new<I, S>(name: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            meta: NodeMeta::new(name),
            keys: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Appends a child node.
    pub fn with_child(mut self, child: impl Into<SchemaNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Records a directly used grouping.
    pub fn with_uses(mut self, grouping: impl Into<String>) -> Self {
        self.uses.push(grouping.into());
        self
    }

    /// Sets the configuration flag.
    pub fn with_config(mut self, config: bool) -> Self {
        self.meta.config = Some(config);
        self
    }

    /// Sets the owning module.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.meta.module = Some(module.into());
        self
    }

    /// Marks the node as instantiated from `grouping`.
    pub fn from_grouping(mut self, grouping: impl Into<String>) -> Self {
        self.meta.grouping = Some(grouping.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.meta.description = Some(description.into());
        self
    }
}

/// A choice between alternative cases.
///
/// Choices and cases carry no addressing or modeling identity: their cases'
/// children behave as direct children of the choice's parent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChoiceNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(default)]
    pub cases: Vec<CaseNode>,
}

impl ChoiceNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: NodeMeta::new(name),
            cases: Vec::new(),
        }
    }

    /// Appends a case.
    pub fn with_case(mut self, case: CaseNode) -> Self {
        self.cases.push(case);
        self
    }

    /// Children of every case, in declaration order.
    pub fn case_children(&self) -> impl Iterator<Item = &SchemaNode> {
        self.cases.iter().flat_map(|case| case.children.iter())
    }
}

/// One alternative of a [`ChoiceNode`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<SchemaNode>,
}

impl CaseNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: impl Into<SchemaNode>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// A leaf holding a single typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LeafNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(rename = "type")]
    pub leaf_type: LeafType,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl LeafNode {
    pub fn new(name: impl Into<String>, leaf_type: LeafType) -> Self {
        Self {
            meta: NodeMeta::new(name),
            leaf_type,
            mandatory: false,
            default: None,
        }
    }

    /// Marks the leaf as mandatory.
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Sets the configuration flag.
    pub fn with_config(mut self, config: bool) -> Self {
        self.meta.config = Some(config);
        self
    }

    /// Marks the node as instantiated from `grouping`.
    pub fn from_grouping(mut self, grouping: impl Into<String>) -> Self {
        self.meta.grouping = Some(grouping.into());
        self
    }

    /// Sets the owning module.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.meta.module = Some(module.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.meta.description = Some(description.into());
        self
    }
}

/// A leaf-list holding a sequence of typed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LeafListNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(rename = "type")]
    pub leaf_type: LeafType,
}

impl LeafListNode {
    pub fn new(name: impl Into<String>, leaf_type: LeafType) -> Self {
        Self {
            meta: NodeMeta::new(name),
            leaf_type,
        }
    }
}

/// An opaque anyxml/anydata node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnyxmlNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
}

impl AnyxmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: NodeMeta::new(name),
        }
    }
}

macro_rules! impl_into_schema_node {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for SchemaNode {
                fn from(node: $ty) -> Self {
                    SchemaNode::$variant(node)
                }
            }
        )*
    };
}

impl_into_schema_node!(
    ContainerNode => Container,
    ListNode => List,
    ChoiceNode => Choice,
    LeafNode => Leaf,
    LeafListNode => LeafList,
    AnyxmlNode => Anyxml,
);

/// Borrowed view over the nodes that produce paths and models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataNode<'a> {
    Container(&'a ContainerNode),
    List(&'a ListNode),
}

impl<'a> DataNode<'a> {
    pub fn meta(&self) -> &'a NodeMeta {
        match self {
            Self::Container(n) => &n.meta,
            Self::List(n) => &n.meta,
        }
    }

    /// Local name of the node.
    pub fn name(&self) -> &'a str {
        &self.meta().name
    }

    pub fn children(&self) -> &'a [SchemaNode] {
        match self {
            Self::Container(n) => &n.children,
            Self::List(n) => &n.children,
        }
    }

    /// Groupings used directly by the node.
    pub fn uses(&self) -> &'a [String] {
        match self {
            Self::Container(n) => &n.uses,
            Self::List(n) => &n.uses,
        }
    }

    /// Key leaf names (empty for containers).
    pub fn keys(&self) -> &'a [String] {
        match self {
            Self::Container(_) => &[],
            Self::List(n) => &n.keys,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}
