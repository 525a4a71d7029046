//! Swagger 2.0 document, paths and operations.

use indexmap::IndexMap;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::model::{Model, Property};

/// HTTP methods a [`PathItem`] can hold.
///
/// ## Examples
///
/// ```
/// use swagger_define::HttpMethod;
///
/// assert_eq!(HttpMethod::Delete.to_string(), "delete");
/// assert_eq!("put".parse::<HttpMethod>().unwrap(), HttpMethod::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Patch,
}

/// The root document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Swagger {
    pub swagger: String,
    pub info: Info,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    pub paths: IndexMap<String, PathItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<IndexMap<String, Model>>,
}

impl Default for Swagger {
    fn default() -> Self {
        Self {
            swagger: "2.0".to_string(),
            info: Info::default(),
            host: None,
            base_path: None,
            consumes: Vec::new(),
            produces: Vec::new(),
            tags: Vec::new(),
            paths: IndexMap::new(),
            definitions: None,
        }
    }
}

impl Swagger {
    /// Creates an empty 2.0 document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition, replacing any previous one of that name.
    pub fn add_definition(&mut self, name: impl Into<String>, model: Model) {
        self.definitions
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), model);
    }

    pub fn definition(&self, name: &str) -> Option<&Model> {
        self.definitions.as_ref()?.get(name)
    }

    pub fn has_definition(&self, name: &str) -> bool {
        self.definition(name).is_some()
    }

    /// Returns the path item for `path`, creating it if needed.
    pub fn path_mut(&mut self, path: impl Into<String>) -> &mut PathItem {
        self.paths.entry(path.into()).or_default()
    }

    /// Iterates every operation of every path.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.paths
            .values()
            .flat_map(|item| item.operations().map(|(_, op)| op))
    }

    /// Iterates every operation of every path mutably.
    pub fn operations_mut(&mut self) -> impl Iterator<Item = &mut Operation> {
        self.paths.values_mut().flat_map(PathItem::operations_mut)
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Info {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: String,
}

/// Top-level tag declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Operations available on one path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
}

impl PathItem {
    fn slot(&self, method: HttpMethod) -> &Option<Operation> {
        match method {
            HttpMethod::Get => &self.get,
            HttpMethod::Put => &self.put,
            HttpMethod::Post => &self.post,
            HttpMethod::Delete => &self.delete,
            HttpMethod::Patch => &self.patch,
        }
    }

    fn slot_mut(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Patch => &mut self.patch,
        }
    }

    /// Sets the operation for `method`.
    pub fn set(&mut self, method: HttpMethod, operation: Operation) {
        *self.slot_mut(method) = Some(operation);
    }

    pub fn get_operation(&self, method: HttpMethod) -> Option<&Operation> {
        self.slot(method).as_ref()
    }

    /// Present operations, in method order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        HttpMethod::iter().filter_map(|m| self.slot(m).as_ref().map(|op| (m, op)))
    }

    /// Present operations, mutably, in method order.
    pub fn operations_mut(&mut self) -> impl Iterator<Item = &mut Operation> {
        [
            &mut self.get,
            &mut self.put,
            &mut self.post,
            &mut self.delete,
            &mut self.patch,
        ]
        .into_iter()
        .filter_map(Option::as_mut)
    }

    /// Methods with an operation, in method order.
    pub fn methods(&self) -> Vec<HttpMethod> {
        self.operations().map(|(m, _)| m).collect()
    }
}

/// A single API operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    pub responses: IndexMap<String, Response>,
}

impl Operation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = Some(id.into());
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_response(mut self, code: impl Into<String>, response: Response) -> Self {
        self.responses.insert(code.into(), response);
        self
    }

    /// The body parameter, if any.
    pub fn body(&self) -> Option<&BodyParameter> {
        self.parameters.iter().find_map(|p| match p {
            Parameter::Body(body) => Some(body),
            Parameter::Path(_) => None,
        })
    }
}

/// Operation parameter, discriminated by its `in` location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "in", rename_all = "lowercase")]
pub enum Parameter {
    Body(BodyParameter),
    Path(PathParameter),
}

/// Request body parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyParameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub schema: Model,
}

/// Path template parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathParameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    #[serde(rename = "type")]
    pub parameter_type: String,
}

impl PathParameter {
    /// Required string path parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            required: true,
            parameter_type: "string".to_string(),
        }
    }
}

/// Operation response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Property>,
}

impl Response {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            schema: None,
        }
    }

    pub fn with_schema(mut self, schema: Property) -> Self {
        self.schema = Some(schema);
        self
    }
}
