//! Modules, groupings and remote procedures.

use serde::{Deserialize, Serialize};

use crate::node::{ContainerNode, SchemaNode};

/// A parsed schema module.
///
/// ## Examples
///
/// ```
/// use swagger_define::{ContainerNode, Module};
///
/// let module = Module::new("acme").with_child(ContainerNode::new("system"));
/// assert_eq!(module.name, "acme");
/// assert_eq!(module.children.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Module {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Top-level data nodes, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SchemaNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rpcs: Vec<Rpc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groupings: Vec<Grouping>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends a top-level data node.
    pub fn with_child(mut self, child: impl Into<SchemaNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends a remote procedure.
    pub fn with_rpc(mut self, rpc: Rpc) -> Self {
        self.rpcs.push(rpc);
        self
    }

    /// Appends a grouping definition.
    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.groupings.push(grouping);
        self
    }

    /// Looks up a grouping defined in this module.
    pub fn grouping(&self, name: &str) -> Option<&Grouping> {
        self.groupings.iter().find(|g| g.name == name)
    }
}

/// A reusable node set, instantiated elsewhere through `uses`.
///
/// The nodes a `uses` statement instantiates appear as ordinary children of
/// the using node, marked with [`NodeMeta::grouping`](crate::NodeMeta::grouping).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Grouping {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SchemaNode>,
    /// Groupings used by this grouping.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uses: Vec<String>,
}

impl Grouping {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_child(mut self, child: impl Into<SchemaNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_uses(mut self, grouping: impl Into<String>) -> Self {
        self.uses.push(grouping.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Input or output side of an [`Rpc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcIo {
    Input,
    Output,
}

impl RpcIo {
    /// Local name of the container (`input` / `output`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }

    /// Suffix appended to the rpc's definition name.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Output => "Output",
        }
    }
}

/// A remote-procedure definition with optional input and output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Rpc {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<ContainerNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<ContainerNode>,
}

impl Rpc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_input(mut self, input: ContainerNode) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_output(mut self, output: ContainerNode) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Owning module name (empty before resolution if unset).
    pub fn module_name(&self) -> &str {
        self.module.as_deref().unwrap_or_default()
    }

    /// Returns the input or output container.
    pub fn io(&self, io: RpcIo) -> Option<&ContainerNode> {
        match io {
            RpcIo::Input => self.input.as_ref(),
            RpcIo::Output => self.output.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{LeafNode, LeafType};

    #[test]
    fn module_deserializes_from_yaml() {
        let yaml = r#"
name: acme
prefix: ac
groupings:
  - name: endpoint
    children:
      - kind: leaf
        name: address
        type: { base: string }
rpcs:
  - name: reset
    input:
      children:
        - kind: leaf
          name: delay
          type: { base: uint32 }
"#;
        let module: Module = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(module.prefix.as_deref(), Some("ac"));
        assert!(module.grouping("endpoint").is_some());
        assert!(module.grouping("missing").is_none());

        let rpc = &module.rpcs[0];
        assert!(rpc.io(RpcIo::Input).is_some());
        assert!(rpc.io(RpcIo::Output).is_none());
    }

    #[test]
    fn rpc_io_names() {
        assert_eq!(RpcIo::Input.as_str(), "input");
        assert_eq!(RpcIo::Output.suffix(), "Output");
    }

    #[test]
    fn grouping_builder_collects_children() {
        let grouping = Grouping::new("g")
            .with_uses("base")
            .with_child(LeafNode::new("x", LeafType::Boolean));
        assert_eq!(grouping.uses, vec!["base".to_string()]);
        assert_eq!(grouping.children.len(), 1);
    }
}
