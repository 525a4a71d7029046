//! Generation orchestrator.
//!
//! [`SwaggerGenerator`] ties the pieces together: it validates the module
//! selection and configuration, primes the model strategy, runs the module
//! traversal with the configured path strategy and post-processes the
//! resulting document.
//!
//! ## Examples
//!
//! ```
//! use swagger_define::{ContainerNode, LeafNode, LeafType, Module, SchemaContext};
//! use swagger_gen::config::GeneratorConfig;
//! use swagger_gen::generator::SwaggerGenerator;
//!
//! let ctx = SchemaContext::new(vec![Module::new("acme").with_child(
//!     ContainerNode::new("system").with_child(LeafNode::new("hostname", LeafType::String)),
//! )])
//! .unwrap();
//!
//! let mut generator = SwaggerGenerator::new(&ctx, ["acme"], GeneratorConfig::default()).unwrap();
//! let doc = generator.generate().unwrap();
//!
//! assert_eq!(doc.info.title, "acme API");
//! assert!(doc.paths.contains_key("/data/acme:system"));
//! assert!(doc.has_definition("System"));
//! ```

use std::io::Write;
use std::rc::Rc;

use swagger_define::{Info, Module, SchemaContext, Swagger, Tag};
use tracing::info;

use crate::config::{GeneratorConfig, TagStrategy};
use crate::errors::GeneratorError;
use crate::models::strategy_for;
use crate::output;
use crate::paths::{PathHandlerBuilder, Rfc8040PathHandlerBuilder};
use crate::postprocess::PostProcessor;
use crate::tags::{ModuleTagGenerator, SegmentTagGenerator, TagGenerator};
use crate::traversal::{ModuleTraversal, TraversalContext};

/// Generates a Swagger document for a set of modules.
pub struct SwaggerGenerator<'a> {
    ctx: &'a SchemaContext,
    modules: Vec<&'a Module>,
    config: GeneratorConfig,
    path_handler: Box<dyn PathHandlerBuilder>,
    tag_generators: Vec<Rc<dyn TagGenerator>>,
}

impl<'a> SwaggerGenerator<'a> {
    /// Creates a generator for the named modules of `ctx`.
    ///
    /// ## Errors
    ///
    /// - [`GeneratorError::NoModules`] if `module_names` is empty
    /// - [`GeneratorError::UnknownModule`] if a name is not in `ctx`
    pub fn new<I, S>(
        ctx: &'a SchemaContext,
        module_names: I,
        config: GeneratorConfig,
    ) -> Result<Self, GeneratorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut modules: Vec<&'a Module> = Vec::new();
        for name in module_names {
            let name = name.as_ref();
            let module = ctx.module(name).ok_or_else(|| GeneratorError::UnknownModule {
                name: name.to_string(),
                available: ctx
                    .modules()
                    .iter()
                    .map(|m| m.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;
            if !modules.iter().any(|m| m.name == module.name) {
                modules.push(module);
            }
        }

        if modules.is_empty() {
            return Err(GeneratorError::NoModules);
        }

        let mut generator = Self {
            ctx,
            modules,
            config,
            path_handler: Box::new(Rfc8040PathHandlerBuilder::new()),
            tag_generators: Vec::new(),
        };

        for strategy in generator.config.tags.clone() {
            let tags: Rc<dyn TagGenerator> = match strategy {
                TagStrategy::Module => Rc::new(ModuleTagGenerator),
                TagStrategy::Segment => {
                    Rc::new(SegmentTagGenerator::new(generator.config.segment_tag_depth))
                }
            };
            generator.register_tags(tags);
        }

        Ok(generator)
    }

    /// Creates a generator for every module of `ctx`.
    pub fn for_all_modules(
        ctx: &'a SchemaContext,
        config: GeneratorConfig,
    ) -> Result<Self, GeneratorError> {
        let names: Vec<&str> = ctx.modules().iter().map(|m| m.name.as_str()).collect();
        Self::new(ctx, names, config)
    }

    /// Replaces the path strategy. Tag generators registered so far carry
    /// over to the new builder.
    pub fn with_path_handler(mut self, mut builder: impl PathHandlerBuilder + 'static) -> Self {
        for generator in &self.tag_generators {
            builder.add_tag_generator(Rc::clone(generator));
        }
        self.path_handler = Box::new(builder);
        self
    }

    /// Appends a tag generator.
    pub fn with_tag_generator(mut self, generator: impl TagGenerator + 'static) -> Self {
        self.register_tags(Rc::new(generator));
        self
    }

    fn register_tags(&mut self, generator: Rc<dyn TagGenerator>) {
        self.path_handler.add_tag_generator(Rc::clone(&generator));
        self.tag_generators.push(generator);
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Names of the selected modules, in selection order.
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name.as_str()).collect()
    }

    /// Runs the generation.
    ///
    /// ## Errors
    ///
    /// Returns configuration errors ([`GeneratorError::NoElements`],
    /// [`GeneratorError::InvalidConfig`]) before any work is done.
    pub fn generate(&mut self) -> Result<Swagger, GeneratorError> {
        self.config.validate()?;

        let names: Vec<String> = self.modules.iter().map(|m| m.name.clone()).collect();
        info!("Generating swagger for yang modules: [{}]", names.join(","));

        let mut doc = self.new_document();

        let mut models = strategy_for(self.config.strategy, self.ctx);
        for module in &self.modules {
            models.process_module(module);
        }

        self.path_handler.configure(self.ctx);

        let traversal = ModuleTraversal::new(names.iter().cloned(), &self.config.elements);
        for module in &self.modules {
            let mut handler = self.path_handler.for_module(module);
            let mut cx = TraversalContext {
                handler: handler.as_mut(),
                models: models.as_mut(),
                doc: &mut doc,
            };
            traversal.traverse(module, &mut cx);
        }

        let joined = names.join(",");
        doc.info.title = format!("{joined} API");
        doc.info.description = Some(format!("{joined} API generated from yang definitions"));

        let report = PostProcessor::new()
            .with_collapse_chains(self.config.collapse_alias_chains)
            .process(&mut doc);
        info!(
            aliases = report.aliases.len(),
            paths = doc.paths.len(),
            definitions = doc.definitions.as_ref().map_or(0, |d| d.len()),
            "Generation finished"
        );

        doc.tags = declared_tags(&doc);
        Ok(doc)
    }

    /// Runs the generation and writes the document in the configured format.
    pub fn generate_to<W: Write>(&mut self, writer: W) -> Result<Swagger, GeneratorError> {
        let doc = self.generate()?;
        output::write_to(&doc, self.config.format, writer)?;
        Ok(doc)
    }

    fn new_document(&self) -> Swagger {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Swagger {
            info: Info {
                title: String::new(),
                description: None,
                version: self.config.version.clone(),
            },
            host: non_empty(&self.config.host),
            base_path: non_empty(&self.config.base_path),
            consumes: self.config.consumes.clone(),
            produces: self.config.produces.clone(),
            ..Swagger::new()
        }
    }
}

/// Every operation tag, in first-use order.
fn declared_tags(doc: &Swagger) -> Vec<Tag> {
    let mut tags: Vec<Tag> = Vec::new();
    for name in doc.operations().flat_map(|op| op.tags.iter()) {
        if !tags.iter().any(|t| &t.name == name) {
            tags.push(Tag {
                name: name.clone(),
                description: None,
            });
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ElementKind, ModelStrategyKind};
    use crate::test_utils::{container_list_module, grouped_module, resolve, resolve_all};
    use swagger_define::{DataNode, HttpMethod, Model, Rpc};

    use crate::models::ModelStrategy;
    use crate::paths::PathHandler;
    use crate::segment::PathSegment;

    #[test]
    fn empty_module_set_fails_before_output() {
        let ctx = resolve(grouped_module());
        let err = SwaggerGenerator::new(&ctx, Vec::<String>::new(), GeneratorConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, GeneratorError::NoModules));
    }

    #[test]
    fn unknown_module_is_reported() {
        let ctx = resolve(grouped_module());
        let err = SwaggerGenerator::new(&ctx, ["nope"], GeneratorConfig::default())
            .err()
            .unwrap();
        assert_eq!(
            err.to_string(),
            "Unknown module 'nope'. Available modules: acme"
        );
    }

    #[test]
    fn no_elements_fails_generation() {
        let ctx = resolve(grouped_module());
        let config = GeneratorConfig::default().with_elements([]);
        let mut generator = SwaggerGenerator::new(&ctx, ["acme"], config).unwrap();
        assert!(matches!(generator.generate(), Err(GeneratorError::NoElements)));
    }

    #[test]
    fn document_carries_configured_metadata() {
        let ctx = resolve(container_list_module());
        let config = GeneratorConfig::default()
            .with_host("example.net")
            .with_base_path("/api")
            .with_version("2.1.0");
        let doc = SwaggerGenerator::new(&ctx, ["m"], config).unwrap().generate().unwrap();

        assert_eq!(doc.swagger, "2.0");
        assert_eq!(doc.host.as_deref(), Some("example.net"));
        assert_eq!(doc.base_path.as_deref(), Some("/api"));
        assert_eq!(doc.info.version, "2.1.0");
        assert_eq!(doc.info.title, "m API");
        assert_eq!(doc.info.description.as_deref(), Some("m API generated from yang definitions"));
        assert_eq!(doc.consumes, vec!["application/json".to_string()]);
    }

    #[test]
    fn title_joins_module_names() {
        let ctx = resolve_all(vec![container_list_module(), grouped_module()]);
        let doc = SwaggerGenerator::new(&ctx, ["m", "acme"], GeneratorConfig::default())
            .unwrap()
            .generate()
            .unwrap();
        assert_eq!(doc.info.title, "m,acme API");
    }

    #[test]
    fn optimizing_alias_is_collapsed_end_to_end() {
        let ctx = resolve(grouped_module());
        let doc = SwaggerGenerator::new(&ctx, ["acme"], GeneratorConfig::default())
            .unwrap()
            .generate()
            .unwrap();

        assert!(!doc.has_definition("Top"));
        let get = doc.paths["/data/acme:top"]
            .get_operation(HttpMethod::Get)
            .unwrap();
        assert_eq!(get.description.as_deref(), Some("returns Endpoint"));
    }

    #[test]
    fn unpacking_never_composes() {
        let ctx = resolve(grouped_module());
        let config = GeneratorConfig::default().with_strategy(ModelStrategyKind::Unpacking);
        let doc = SwaggerGenerator::new(&ctx, ["acme"], config)
            .unwrap()
            .generate()
            .unwrap();
        assert!(
            doc.definitions
                .as_ref()
                .unwrap()
                .values()
                .all(|m| !matches!(m, Model::Composed(_)))
        );
        assert!(doc.has_definition("Top"));
    }

    #[test]
    fn configured_tags_are_declared() {
        let ctx = resolve(container_list_module());
        let config = GeneratorConfig::default()
            .with_tag(TagStrategy::Module)
            .with_tag(TagStrategy::Segment);
        let doc = SwaggerGenerator::new(&ctx, ["m"], config).unwrap().generate().unwrap();

        let names: Vec<_> = doc.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["m", "A"]);
    }

    struct CountingBuilder {
        configured: Rc<std::cell::Cell<usize>>,
        tags: usize,
    }

    struct NoopHandler;

    impl PathHandler for NoopHandler {
        fn path(&mut self, _: DataNode<'_>, _: &PathSegment, _: &mut Swagger, _: &mut dyn ModelStrategy) {}
        fn rpc(&mut self, _: &Rpc, _: &PathSegment, _: &mut Swagger, _: &mut dyn ModelStrategy) {}
    }

    impl PathHandlerBuilder for CountingBuilder {
        fn configure(&mut self, _ctx: &SchemaContext) {
            self.configured.set(self.configured.get() + 1);
        }

        fn add_tag_generator(&mut self, _generator: Rc<dyn TagGenerator>) {
            self.tags += 1;
        }

        fn for_module(&self, _module: &Module) -> Box<dyn PathHandler> {
            assert_eq!(self.tags, 2);
            Box::new(NoopHandler)
        }
    }

    #[test]
    fn custom_path_handler_is_configured_once_and_gets_tags() {
        let ctx = resolve(container_list_module());
        let configured = Rc::new(std::cell::Cell::new(0));
        let config = GeneratorConfig::default()
            .with_tag(TagStrategy::Module)
            .with_elements([ElementKind::Data]);

        let mut generator = SwaggerGenerator::new(&ctx, ["m"], config)
            .unwrap()
            .with_path_handler(CountingBuilder {
                configured: Rc::clone(&configured),
                tags: 0,
            })
            .with_tag_generator(SegmentTagGenerator::default());
        let doc = generator.generate().unwrap();

        assert_eq!(configured.get(), 1);
        assert!(doc.paths.is_empty());
        assert!(doc.has_definition("A"));
    }

    #[test]
    fn generate_to_writes_configured_format() {
        let ctx = resolve(container_list_module());
        let config = GeneratorConfig::default().with_format(crate::config::Format::Json);
        let mut out = Vec::new();
        SwaggerGenerator::new(&ctx, ["m"], config)
            .unwrap()
            .generate_to(&mut out)
            .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["swagger"], "2.0");
        assert!(json["paths"]["/data/m:A/B={id}"]["get"].is_object());
    }
}
