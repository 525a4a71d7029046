//! Swagger 2.0 data-model definitions and properties.
//!
//! A definition is one of three [`Model`] shapes:
//!
//! - [`RefModel`]: a `$ref` to another definition,
//! - [`ComposedModel`]: an `allOf` list of models (the inheritance form),
//! - [`ModelImpl`]: a plain object model with ordered properties.
//!
//! Properties inside plain models are [`Property`] values: references,
//! arrays or scalars.
//!
//! ## Examples
//!
//! ```
//! use swagger_define::{ComposedModel, Model, ModelImpl, Property, ScalarProperty};
//!
//! let model = Model::Composed(
//!     ComposedModel::new()
//!         .with_ref("Base")
//!         .with_inline(ModelImpl::new().with_property("mtu", ScalarProperty::new("integer").into())),
//! );
//!
//! let json = serde_json::to_value(&model).unwrap();
//! assert_eq!(json["allOf"][0]["$ref"], "#/definitions/Base");
//! assert_eq!(json["allOf"][1]["properties"]["mtu"]["type"], "integer");
//! ```

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Prefix of every definition reference.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

fn definition_ref(name: &str) -> String {
    format!("{DEFINITIONS_PREFIX}{name}")
}

fn simple_name(reference: &str) -> &str {
    reference
        .strip_prefix(DEFINITIONS_PREFIX)
        .unwrap_or(reference)
}

/// A definition of the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Model {
    Ref(RefModel),
    Composed(ComposedModel),
    Plain(ModelImpl),
}

impl Model {
    /// Reference model pointing at definition `name`.
    pub fn reference(name: &str) -> Self {
        Self::Ref(RefModel::new(name))
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Ref(_) => None,
            Self::Composed(m) => m.description.as_deref(),
            Self::Plain(m) => m.description.as_deref(),
        }
    }
}

/// Reference to a named definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefModel {
    #[serde(rename = "$ref")]
    reference: String,
}

impl RefModel {
    pub fn new(name: &str) -> Self {
        Self {
            reference: definition_ref(name),
        }
    }

    /// Full `#/definitions/<name>` reference.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// The referenced definition name.
    ///
    /// ```
    /// use swagger_define::RefModel;
    ///
    /// assert_eq!(RefModel::new("Interface").simple_ref(), "Interface");
    /// ```
    pub fn simple_ref(&self) -> &str {
        simple_name(&self.reference)
    }

    /// Points the reference at definition `name`.
    pub fn set_simple_ref(&mut self, name: &str) {
        self.reference = definition_ref(name);
    }
}

/// Model composed from an ordered `allOf` list.
///
/// `interfaces` lists the reference parents of the composition. It is not
/// serialized, and is kept in step with `all_of` by the builder methods and
/// the post-processor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComposedModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "allOf")]
    pub all_of: Vec<Model>,
    #[serde(skip)]
    pub interfaces: Vec<RefModel>,
}

impl ComposedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a reference parent.
    pub fn with_ref(mut self, name: &str) -> Self {
        let parent = RefModel::new(name);
        self.interfaces.push(parent.clone());
        self.all_of.push(Model::Ref(parent));
        self
    }

    /// Appends an inline plain model.
    pub fn with_inline(mut self, model: ModelImpl) -> Self {
        self.all_of.push(Model::Plain(model));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The single reference this model wraps, if `allOf` is exactly one ref.
    pub fn alias_target(&self) -> Option<&RefModel> {
        match self.all_of.as_slice() {
            [Model::Ref(target)] => Some(target),
            _ => None,
        }
    }
}

/// Plain object model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelImpl {
    #[serde(rename = "type")]
    pub model_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Property>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl Default for ModelImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelImpl {
    /// Creates an object model without properties.
    pub fn new() -> Self {
        Self {
            model_type: "object".to_string(),
            description: None,
            properties: None,
            required: Vec::new(),
        }
    }

    /// Adds a property, keeping insertion order.
    pub fn with_property(mut self, name: impl Into<String>, property: Property) -> Self {
        self.add_property(name, property);
        self
    }

    pub fn add_property(&mut self, name: impl Into<String>, property: Property) {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), property);
    }

    /// Marks a property as required (once).
    pub fn add_required(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name);
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true if the model has no properties.
    pub fn is_empty(&self) -> bool {
        self.properties.as_ref().is_none_or(IndexMap::is_empty)
    }
}

/// A property of a plain model, or a response schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Property {
    Ref(RefProperty),
    Array(ArrayProperty),
    Scalar(ScalarProperty),
}

impl Property {
    /// Reference property pointing at definition `name`.
    pub fn reference(name: &str) -> Self {
        Self::Ref(RefProperty::new(name))
    }

    /// Array of `items`.
    pub fn array(items: Property) -> Self {
        Self::Array(ArrayProperty::new(items))
    }

    pub fn description(&self) -> Option<&str> {
        self.description_slot().as_deref()
    }

    /// Mutable access to the description.
    pub fn description_mut(&mut self) -> &mut Option<String> {
        match self {
            Self::Ref(p) => &mut p.description,
            Self::Array(p) => &mut p.description,
            Self::Scalar(p) => &mut p.description,
        }
    }

    fn description_slot(&self) -> &Option<String> {
        match self {
            Self::Ref(p) => &p.description,
            Self::Array(p) => &p.description,
            Self::Scalar(p) => &p.description,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        *self.description_mut() = description;
        self
    }
}

/// Reference property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefProperty {
    #[serde(rename = "$ref")]
    reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RefProperty {
    pub fn new(name: &str) -> Self {
        Self {
            reference: definition_ref(name),
            description: None,
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn simple_ref(&self) -> &str {
        simple_name(&self.reference)
    }

    pub fn set_simple_ref(&mut self, name: &str) {
        self.reference = definition_ref(name);
    }
}

/// Array property; serialized with `type: array`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayProperty {
    pub description: Option<String>,
    pub items: Box<Property>,
}

impl ArrayProperty {
    pub fn new(items: Property) -> Self {
        Self {
            description: None,
            items: Box::new(items),
        }
    }
}

impl Serialize for ArrayProperty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.description.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("ArrayProperty", len)?;
        state.serialize_field("type", "array")?;
        if let Some(description) = &self.description {
            state.serialize_field("description", description)?;
        } else {
            state.skip_field("description")?;
        }
        state.serialize_field("items", &self.items)?;
        state.end()
    }
}

/// Scalar (leaf-level) property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScalarProperty {
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(rename = "readOnly", skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    /// Target path of a leafref.
    #[serde(rename = "x-path", skip_serializing_if = "Option::is_none")]
    pub x_path: Option<String>,
}

impl ScalarProperty {
    pub fn new(property_type: impl Into<String>) -> Self {
        Self {
            property_type: property_type.into(),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

impl From<ScalarProperty> for Property {
    fn from(property: ScalarProperty) -> Self {
        Property::Scalar(property)
    }
}

impl From<RefProperty> for Property {
    fn from(property: RefProperty) -> Self {
        Property::Ref(property)
    }
}

impl From<ArrayProperty> for Property {
    fn from(property: ArrayProperty) -> Self {
        Property::Array(property)
    }
}
