//! RESTCONF (RFC 8040) path layout.
//!
//! Data nodes live under `/data/`, rpcs under `/operations/`. The first
//! segment, and every segment whose module differs from its parent's, is
//! written `module:name`; list segments carry their key parameters as
//! `name={k1},{k2}`.

use std::rc::Rc;

use swagger_define::{
    BodyParameter, DataNode, HttpMethod, Model, Module, Operation, Parameter, PathParameter,
    Property, Response, Rpc, RpcIo, Swagger,
};
use tracing::debug;

use super::{PathHandler, PathHandlerBuilder, collect_tags};
use crate::models::ModelStrategy;
use crate::naming::camel_case;
use crate::segment::PathSegment;
use crate::tags::TagGenerator;

/// Builds [`Rfc8040PathHandler`]s.
#[derive(Default)]
pub struct Rfc8040PathHandlerBuilder {
    tag_generators: Vec<Rc<dyn TagGenerator>>,
}

impl Rfc8040PathHandlerBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PathHandlerBuilder for Rfc8040PathHandlerBuilder {
    fn add_tag_generator(&mut self, generator: Rc<dyn TagGenerator>) {
        self.tag_generators.push(generator);
    }

    fn for_module(&self, module: &Module) -> Box<dyn PathHandler> {
        Box::new(Rfc8040PathHandler {
            module: module.name.clone(),
            tag_generators: self.tag_generators.clone(),
        })
    }
}

/// RESTCONF path handler for one module.
pub struct Rfc8040PathHandler {
    module: String,
    tag_generators: Vec<Rc<dyn TagGenerator>>,
}

impl Rfc8040PathHandler {
    /// Resource path of `segment` below `/data`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use swagger_gen::paths::Rfc8040PathHandler;
    /// use swagger_gen::segment::PathSegment;
    ///
    /// let seg = PathSegment::root("acme")
    ///     .push("interfaces", "acme", false, &[])
    ///     .push("interface", "acme", false, &["name".to_string()])
    ///     .push("ext", "vendor", false, &[]);
    ///
    /// assert_eq!(
    ///     Rfc8040PathHandler::data_path(&seg),
    ///     "/data/acme:interfaces/interface={name}/vendor:ext"
    /// );
    /// ```
    pub fn data_path(segment: &PathSegment) -> String {
        let mut parts = Vec::new();
        let mut parent_module: Option<&str> = None;

        for seg in segment.segments() {
            let mut part = if parent_module == Some(seg.module()) {
                seg.name().to_string()
            } else {
                format!("{}:{}", seg.module(), seg.name())
            };
            if !seg.local_params().is_empty() {
                let keys: Vec<String> = seg.local_params().iter().map(|p| format!("{{{p}}}")).collect();
                part = format!("{part}={}", keys.join(","));
            }
            parts.push(part);
            parent_module = Some(seg.module());
        }

        format!("/data/{}", parts.join("/"))
    }

    /// Path of an rpc.
    pub fn operation_path(module: &str, rpc: &str) -> String {
        format!("/operations/{module}:{rpc}")
    }

    fn operation_id(method: HttpMethod, segment: &PathSegment) -> String {
        let names: String = segment
            .segments()
            .into_iter()
            .map(|s| camel_case(s.name()))
            .collect();
        format!("{method}{names}")
    }

    fn base_operation(&self, method: HttpMethod, segment: &PathSegment) -> Operation {
        let mut operation = Operation::new().with_operation_id(Self::operation_id(method, segment));
        operation.tags = collect_tags(&self.tag_generators, segment);
        operation.parameters = segment
            .params()
            .into_iter()
            .map(|name| Parameter::Path(PathParameter::new(name)))
            .collect();
        operation
    }

    fn body(name: &str, model: &str, description: String) -> Parameter {
        Parameter::Body(BodyParameter {
            name: name.to_string(),
            description: Some(description),
            required: true,
            schema: Model::reference(model),
        })
    }
}

impl PathHandler for Rfc8040PathHandler {
    fn path(
        &mut self,
        node: DataNode<'_>,
        segment: &PathSegment,
        doc: &mut Swagger,
        models: &mut dyn ModelStrategy,
    ) {
        let model = models.model_name(node);
        let path = Self::data_path(segment);
        debug!(path = %path, definition = %model, read_only = segment.is_read_only(), "Adding data path");

        let get = self
            .base_operation(HttpMethod::Get, segment)
            .with_description(format!("returns {model}"))
            .with_response("200", Response::new(model.clone()).with_schema(Property::reference(&model)))
            .with_response("400", Response::new("Internal error"));

        let item = doc.path_mut(path);
        item.set(HttpMethod::Get, get);

        if !segment.is_read_only() {
            let put = self
                .base_operation(HttpMethod::Put, segment)
                .with_description(format!("creates or updates {model}"))
                .with_parameter(Self::body("body", &model, format!("{model} to be added or updated")))
                .with_response("201", Response::new("Object created"))
                .with_response("204", Response::new("Object modified"));

            let post = self
                .base_operation(HttpMethod::Post, segment)
                .with_description(format!("creates {model}"))
                .with_parameter(Self::body("body", &model, format!("{model} to be added to list")))
                .with_response("201", Response::new("Object created"))
                .with_response("409", Response::new("Object already exists"));

            let delete = self
                .base_operation(HttpMethod::Delete, segment)
                .with_description(format!("removes {model}"))
                .with_response("204", Response::new("Object deleted"));

            item.set(HttpMethod::Put, put);
            item.set(HttpMethod::Post, post);
            item.set(HttpMethod::Delete, delete);
        }
    }

    fn rpc(
        &mut self,
        rpc: &Rpc,
        segment: &PathSegment,
        doc: &mut Swagger,
        models: &mut dyn ModelStrategy,
    ) {
        let module = if rpc.module_name().is_empty() {
            self.module.as_str()
        } else {
            rpc.module_name()
        };
        let path = Self::operation_path(module, &rpc.name);
        debug!(path = %path, "Adding rpc path");

        let description = rpc
            .description
            .clone()
            .unwrap_or_else(|| format!("invokes rpc {}", rpc.name));
        let mut operation = self
            .base_operation(HttpMethod::Post, segment)
            .with_description(description);

        if let Some(input) = &rpc.input {
            models.add_model(DataNode::Container(input), doc);
            if let Some(name) = models.rpc_model_name(rpc, RpcIo::Input) {
                operation = operation.with_parameter(Self::body("input", &name, format!("{name} input")));
            }
        }

        operation = match &rpc.output {
            Some(output) => {
                models.add_model(DataNode::Container(output), doc);
                match models.rpc_model_name(rpc, RpcIo::Output) {
                    Some(name) => operation.with_response(
                        "200",
                        Response::new(format!("{name} returned")).with_schema(Property::reference(&name)),
                    ),
                    None => operation.with_response("204", Response::new("Rpc completed")),
                }
            }
            None => operation.with_response("204", Response::new("Rpc completed")),
        };

        doc.path_mut(path).set(HttpMethod::Post, operation);
    }
}
