//! Alias collapsing and `allOf` ordering.
//!
//! The model strategies can leave definitions that are nothing but a wrapper
//! around another one: a composed model whose `allOf` holds a single
//! reference. The post-processor retargets every reference to such an alias
//! at the wrapped definition, removes the aliases, and then sorts every
//! `allOf` list so the output is deterministic.
//!
//! The pass is single-level: with `A -> B -> C`, references to `A` end up at
//! `B`. [`PostProcessor::with_collapse_chains`] resolves chains to their end.
//!
//! ## Examples
//!
//! ```
//! use swagger_define::{ComposedModel, Model, ModelImpl, Property, Swagger};
//! use swagger_gen::postprocess::PostProcessor;
//!
//! let mut doc = Swagger::new();
//! doc.add_definition("Base", Model::Plain(ModelImpl::new().with_property("id", Property::reference("Id"))));
//! doc.add_definition("Id", Model::Plain(ModelImpl::new()));
//! doc.add_definition("Wrapper", Model::Composed(ComposedModel::new().with_ref("Base")));
//! doc.add_definition(
//!     "User",
//!     Model::Plain(ModelImpl::new().with_property("item", Property::reference("Wrapper"))),
//! );
//!
//! let report = PostProcessor::new().process(&mut doc);
//! assert_eq!(report.aliases.get("Wrapper").map(String::as_str), Some("Base"));
//! assert!(!doc.has_definition("Wrapper"));
//!
//! let json = serde_json::to_value(&doc).unwrap();
//! assert_eq!(json["definitions"]["User"]["properties"]["item"]["$ref"], "#/definitions/Base");
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

use swagger_define::{ComposedModel, Model, ModelImpl, Operation, Parameter, Property, Swagger};
use tracing::{debug, warn};

/// Alias name to target name, iterated in name order.
pub type ReferenceMap = BTreeMap<String, String>;

/// Outcome of one post-processing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostProcessReport {
    /// Aliases removed, with the definition they were replaced by.
    pub aliases: ReferenceMap,
    /// True when the document had no definitions to process.
    pub skipped: bool,
}

/// Collapses alias definitions and orders `allOf` lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostProcessor {
    collapse_chains: bool,
}

impl PostProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve alias chains to their final target.
    pub fn with_collapse_chains(mut self, collapse: bool) -> Self {
        self.collapse_chains = collapse;
        self
    }

    /// Runs the pass over `doc`.
    pub fn process(&self, doc: &mut Swagger) -> PostProcessReport {
        let Some(definitions) = doc.definitions.as_ref().filter(|d| !d.is_empty()) else {
            warn!("Document has no definitions; skipping post-processing");
            return PostProcessReport {
                aliases: ReferenceMap::new(),
                skipped: true,
            };
        };

        let mut aliases = reference_map(definitions.iter());
        if self.collapse_chains {
            aliases = close_transitively(&aliases);
        }

        let rewriter = Rewriter { aliases: &aliases };
        if let Some(definitions) = doc.definitions.as_mut() {
            for (name, model) in definitions.iter_mut() {
                rewriter.fix_model(name, model);
            }
            for alias in aliases.keys() {
                debug!(alias = %alias, "Removing alias definition");
                definitions.shift_remove(alias);
            }
        }
        for operation in doc.operations_mut() {
            rewriter.fix_operation(operation);
        }

        if let Some(definitions) = doc.definitions.as_mut() {
            for model in definitions.values_mut() {
                sort_model(model);
            }
        }

        PostProcessReport {
            aliases,
            skipped: false,
        }
    }
}

/// Aliases among `definitions`: composed models whose `allOf` is exactly one
/// reference to another definition.
pub fn reference_map<'d>(definitions: impl Iterator<Item = (&'d String, &'d Model)>) -> ReferenceMap {
    definitions
        .filter_map(|(name, model)| match model {
            Model::Composed(composed) => composed
                .alias_target()
                .map(|target| (name, target.simple_ref()))
                .filter(|(name, target)| name.as_str() != *target),
            _ => None,
        })
        .map(|(name, target)| (name.clone(), target.to_string()))
        .collect()
}

fn close_transitively(aliases: &ReferenceMap) -> ReferenceMap {
    aliases
        .iter()
        .map(|(alias, target)| {
            let mut seen = vec![alias.as_str()];
            let mut end = target.as_str();
            while let Some(next) = aliases.get(end) {
                if seen.contains(&next.as_str()) {
                    break;
                }
                seen.push(end);
                end = next.as_str();
            }
            (alias.clone(), end.to_string())
        })
        .collect()
}

struct Rewriter<'m> {
    aliases: &'m ReferenceMap,
}

impl Rewriter<'_> {
    fn target(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    fn fix_model(&self, owner: &str, model: &mut Model) {
        match model {
            Model::Ref(reference) => {
                if let Some(target) = self.target(reference.simple_ref()) {
                    reference.set_simple_ref(target);
                }
            }
            Model::Composed(composed) => self.fix_composed(owner, composed),
            Model::Plain(plain) => self.fix_plain(owner, plain),
        }
    }

    fn fix_composed(&self, owner: &str, composed: &mut ComposedModel) {
        for part in &mut composed.all_of {
            self.fix_model(owner, part);
        }
        for parent in &mut composed.interfaces {
            if let Some(target) = self.target(parent.simple_ref()) {
                parent.set_simple_ref(target);
            }
        }
    }

    fn fix_plain(&self, owner: &str, plain: &mut ModelImpl) {
        let Some(properties) = plain.properties.as_mut().filter(|p| !p.is_empty()) else {
            warn!(definition = %owner, "Model has no properties");
            return;
        };
        for property in properties.values_mut() {
            self.fix_property(property);
        }
    }

    /// Retargets a property; returns the alias it pointed at, if any.
    fn fix_property(&self, property: &mut Property) -> Option<(String, String)> {
        match property {
            Property::Ref(reference) => {
                let old = reference.simple_ref().to_string();
                let target = self.target(&old)?.to_string();
                reference.set_simple_ref(&target);
                Some((old, target))
            }
            Property::Array(array) => self.fix_property(&mut array.items),
            Property::Scalar(_) => None,
        }
    }

    fn fix_operation(&self, operation: &mut Operation) {
        if let Some(description) = operation.description.as_mut() {
            let first = self
                .aliases
                .iter()
                .find(|(old, _)| description.contains(old.as_str()));
            if let Some((old, new)) = first {
                *description = description.replace(old.as_str(), new);
            }
        }

        for parameter in &mut operation.parameters {
            let Parameter::Body(body) = parameter else {
                continue;
            };
            let retargeted = match &mut body.schema {
                Model::Ref(reference) => {
                    let old = reference.simple_ref().to_string();
                    self.target(&old).map(|target| {
                        reference.set_simple_ref(target);
                        (old, target.to_string())
                    })
                }
                model => {
                    self.fix_model(&body.name, model);
                    None
                }
            };
            if let (Some((old, new)), Some(description)) = (retargeted, body.description.as_mut()) {
                *description = description.replace(&old, &new);
            }
        }

        for response in operation.responses.values_mut() {
            let Some(schema) = response.schema.as_mut() else {
                continue;
            };
            if let Some((old, new)) = self.fix_property(schema) {
                response.description = response.description.replace(&old, &new);
                if let Some(description) = schema.description_mut().as_mut() {
                    *description = description.replace(&old, &new);
                }
            }
        }
    }
}

/// Orders `allOf` entries: inline models first in their original order, then
/// references by name. `interfaces` follows the same name order.
pub fn sort_all_of(composed: &mut ComposedModel) {
    composed.all_of.sort_by(|a, b| match (a, b) {
        (Model::Ref(a), Model::Ref(b)) => a.simple_ref().cmp(b.simple_ref()),
        (Model::Ref(_), _) => Ordering::Greater,
        (_, Model::Ref(_)) => Ordering::Less,
        _ => Ordering::Equal,
    });
    composed
        .interfaces
        .sort_by(|a, b| a.simple_ref().cmp(b.simple_ref()));
}

fn sort_model(model: &mut Model) {
    if let Model::Composed(composed) = model {
        for part in &mut composed.all_of {
            sort_model(part);
        }
        sort_all_of(composed);
    }
}
