//! End-to-end generation tests: schema tree in, Swagger document out.

use std::fs;

use swagger_define::{
    CaseNode, ChoiceNode, ContainerNode, Grouping, HttpMethod, LeafListNode, LeafNode, LeafType,
    ListNode, Model, Module, Parameter, Property, Rpc, SchemaContext, Swagger,
};
use swagger_gen::config::{ElementKind, Format, GeneratorConfig, ModelStrategyKind, TagStrategy};
use swagger_gen::errors::GeneratorError;
use swagger_gen::generator::SwaggerGenerator;
use swagger_gen::input::load_context;
use swagger_gen::output::write_file;

fn generate(modules: Vec<Module>, select: &[&str], config: GeneratorConfig) -> Swagger {
    let ctx = SchemaContext::new(modules).expect("valid schema tree");
    SwaggerGenerator::new(&ctx, select, config)
        .expect("known modules")
        .generate()
        .expect("generation succeeds")
}

fn definition_names(doc: &Swagger) -> Vec<String> {
    doc.definitions
        .as_ref()
        .map(|d| d.keys().cloned().collect())
        .unwrap_or_default()
}

/// Every `$ref` in the document, definitions and operations alike.
fn all_refs(doc: &Swagger) -> Vec<String> {
    let json = serde_json::to_value(doc).unwrap();
    let mut refs = Vec::new();
    collect_refs(&json, &mut refs);
    refs
}

fn collect_refs(value: &serde_json::Value, refs: &mut Vec<String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, v) in map {
                if key == "$ref" {
                    if let Some(s) = v.as_str() {
                        refs.push(s.trim_start_matches("#/definitions/").to_string());
                    }
                } else {
                    collect_refs(v, refs);
                }
            }
        }
        serde_json::Value::Array(items) => items.iter().for_each(|v| collect_refs(v, refs)),
        _ => {}
    }
}

fn container_list_module() -> Module {
    Module::new("M").with_child(
        ContainerNode::new("A").with_child(
            ListNode::new("B", ["id"])
                .with_config(false)
                .with_child(LeafNode::new("id", LeafType::String))
                .with_child(LeafNode::new("x", LeafType::Int32)),
        ),
    )
}

#[test]
fn container_with_read_only_list() {
    let doc = generate(vec![container_list_module()], &["M"], GeneratorConfig::default());

    let a = &doc.paths["/data/M:A"];
    assert_eq!(
        a.methods(),
        vec![HttpMethod::Get, HttpMethod::Put, HttpMethod::Post, HttpMethod::Delete]
    );
    assert!(
        a.get_operation(HttpMethod::Get)
            .unwrap()
            .parameters
            .is_empty()
    );

    let b = &doc.paths["/data/M:A/B={id}"];
    assert_eq!(b.methods(), vec![HttpMethod::Get]);
    let get = b.get_operation(HttpMethod::Get).unwrap();
    assert!(matches!(&get.parameters[..], [Parameter::Path(p)] if p.name == "id" && p.required));

    let mut names = definition_names(&doc);
    names.sort();
    assert_eq!(names, vec!["A", "B"]);
    assert!(
        doc.definitions
            .as_ref()
            .unwrap()
            .values()
            .all(|m| matches!(m, Model::Plain(_)))
    );
}

#[test]
fn list_properties_and_read_only_leaves() {
    let doc = generate(vec![container_list_module()], &["M"], GeneratorConfig::default());

    let Some(Model::Plain(a)) = doc.definition("A") else {
        panic!("A should be a plain model");
    };
    let property = &a.properties.as_ref().unwrap()["B"];
    let Property::Array(array) = property else {
        panic!("list property should be an array");
    };
    assert!(matches!(array.items.as_ref(), Property::Ref(r) if r.simple_ref() == "B"));

    let Some(Model::Plain(b)) = doc.definition("B") else {
        panic!("B should be a plain model");
    };
    assert_eq!(b.required, vec!["id".to_string()]);
    let Property::Scalar(x) = &b.properties.as_ref().unwrap()["x"] else {
        panic!("leaf should be scalar");
    };
    assert_eq!(x.property_type, "integer");
    assert_eq!(x.format.as_deref(), Some("int32"));
    assert!(x.read_only);
}

fn wrapper_module() -> Module {
    let user = |name: &str| {
        ContainerNode::new(name)
            .with_uses("wrapper")
            .with_child(LeafNode::new("label", LeafType::String))
            .with_child(LeafNode::new("host", LeafType::String).from_grouping("wrapper"))
    };

    Module::new("net")
        .with_grouping(Grouping::new("base").with_child(LeafNode::new("host", LeafType::String)))
        .with_grouping(
            Grouping::new("wrapper")
                .with_uses("base")
                .with_child(LeafNode::new("host", LeafType::String).from_grouping("base")),
        )
        .with_child(user("first"))
        .with_child(user("second"))
        .with_child(user("third"))
}

#[test]
fn alias_wrapper_is_replaced_by_its_target() {
    let doc = generate(vec![wrapper_module()], &["net"], GeneratorConfig::default());

    assert!(!doc.has_definition("Wrapper"));
    assert!(doc.has_definition("Base"));

    for name in ["First", "Second", "Third"] {
        let Some(Model::Composed(composed)) = doc.definition(name) else {
            panic!("{name} should stay composed");
        };
        assert!(matches!(&composed.all_of[0], Model::Plain(_)));
        assert!(matches!(&composed.all_of[1], Model::Ref(r) if r.simple_ref() == "Base"));
        assert_eq!(composed.interfaces.len(), 1);
        assert_eq!(composed.interfaces[0].simple_ref(), "Base");
    }

    assert!(!all_refs(&doc).iter().any(|r| r == "Wrapper"));
}

#[test]
fn every_reference_resolves() {
    for strategy in [ModelStrategyKind::Optimizing, ModelStrategyKind::Unpacking] {
        let config = GeneratorConfig::default()
            .with_strategy(strategy)
            .with_collapse_alias_chains(true);
        let doc = generate(vec![wrapper_module()], &["net"], config);
        for reference in all_refs(&doc) {
            assert!(doc.has_definition(&reference), "{strategy}: dangling {reference}");
        }
    }
}

#[test]
fn unpacking_copies_grouping_content() {
    let config = GeneratorConfig::default().with_strategy(ModelStrategyKind::Unpacking);
    let doc = generate(vec![wrapper_module()], &["net"], config);

    assert!(!doc.has_definition("Base"));
    let Some(Model::Plain(first)) = doc.definition("First") else {
        panic!("First should be plain");
    };
    let properties = first.properties.as_ref().unwrap();
    assert!(properties.contains_key("label"));
    assert!(properties.contains_key("host"));
}

#[test]
fn choices_are_invisible_in_paths_and_definitions() {
    let module = Module::new("c").with_child(
        ContainerNode::new("transport").with_child(
            ChoiceNode::new("protocol")
                .with_case(
                    CaseNode::new("tcp")
                        .with_child(ContainerNode::new("tcp").with_child(LeafNode::new("port", LeafType::Uint16))),
                )
                .with_case(CaseNode::new("udp").with_child(LeafNode::new("udp-port", LeafType::Uint16))),
        ),
    );
    let doc = generate(vec![module], &["c"], GeneratorConfig::default());

    let paths: Vec<_> = doc.paths.keys().cloned().collect();
    assert_eq!(paths, vec!["/data/c:transport", "/data/c:transport/tcp"]);
    assert!(!doc.has_definition("Protocol"));

    let Some(Model::Plain(transport)) = doc.definition("Transport") else {
        panic!("Transport should be plain");
    };
    let properties = transport.properties.as_ref().unwrap();
    assert!(properties.contains_key("tcp"));
    assert!(properties.contains_key("udp-port"));
}

#[test]
fn rpc_gets_operations_path() {
    let module = Module::new("sys")
        .with_rpc(
            Rpc::new("restart")
                .with_description("Restarts the system")
                .with_input(ContainerNode::new("input").with_child(LeafNode::new("delay", LeafType::Uint32)))
                .with_output(
                    ContainerNode::new("output")
                        .with_child(LeafListNode::new("status", LeafType::String)),
                ),
        )
        .with_rpc(Rpc::new("ping"));
    let doc = generate(vec![module], &["sys"], GeneratorConfig::default());

    let restart = doc.paths["/operations/sys:restart"]
        .get_operation(HttpMethod::Post)
        .unwrap();
    assert_eq!(restart.description.as_deref(), Some("Restarts the system"));
    assert!(matches!(&restart.body().unwrap().schema, Model::Ref(r) if r.simple_ref() == "RestartInput"));
    let ok = &restart.responses["200"];
    assert!(matches!(&ok.schema, Some(Property::Ref(r)) if r.simple_ref() == "RestartOutput"));

    let ping = doc.paths["/operations/sys:ping"]
        .get_operation(HttpMethod::Post)
        .unwrap();
    assert!(ping.body().is_none());
    assert!(ping.responses.contains_key("204"));
}

#[test]
fn element_selection_limits_output() {
    let module = Module::new("sys")
        .with_child(ContainerNode::new("system").with_child(LeafNode::new("name", LeafType::String)))
        .with_rpc(Rpc::new("ping"));

    let data_only = generate(
        vec![module.clone()],
        &["sys"],
        GeneratorConfig::default().with_elements([ElementKind::Data]),
    );
    assert!(data_only.paths.keys().all(|p| p.starts_with("/data/")));

    let rpc_only = generate(
        vec![module],
        &["sys"],
        GeneratorConfig::default().with_elements([ElementKind::Rpc]),
    );
    assert!(rpc_only.paths.keys().all(|p| p.starts_with("/operations/")));
}

#[test]
fn augmented_nodes_follow_module_selection() {
    let base = Module::new("base").with_child(
        ContainerNode::new("system")
            .with_child(LeafNode::new("name", LeafType::String))
            .with_child(
                ContainerNode::new("vendor-info")
                    .with_module("vendor")
                    .with_child(LeafNode::new("serial", LeafType::String).with_module("vendor")),
            ),
    );
    let vendor = Module::new("vendor");

    let only_base = generate(vec![base.clone(), vendor.clone()], &["base"], GeneratorConfig::default());
    assert!(!only_base.paths.keys().any(|p| p.contains("vendor")));

    let config = GeneratorConfig::default().with_tag(TagStrategy::Module);
    let both = generate(vec![base, vendor], &["base", "vendor"], config);
    assert_eq!(both.info.title, "base,vendor API");

    let augmented = both
        .paths
        .get("/data/base:system/vendor-info")
        .and_then(|item| item.get_operation(HttpMethod::Get))
        .expect("augmenting container keeps the augmented module prefix");
    assert_eq!(augmented.tags, vec!["base".to_string()]);
    assert!(!both.paths.keys().any(|p| p.contains("vendor:")));
}

#[test]
fn tags_are_applied_and_declared() {
    let config = GeneratorConfig::default().with_tag(TagStrategy::Module);
    let doc = generate(vec![container_list_module()], &["M"], config);

    assert!(doc.operations().all(|op| op.tags == vec!["M".to_string()]));
    assert_eq!(doc.tags.len(), 1);
    assert_eq!(doc.tags[0].name, "M");
}

#[test]
fn empty_module_set_is_rejected() {
    let ctx = SchemaContext::new(vec![container_list_module()]).unwrap();
    let result = SwaggerGenerator::new(&ctx, Vec::<&str>::new(), GeneratorConfig::default());
    assert!(matches!(result, Err(GeneratorError::NoModules)));
}

#[test]
fn invalid_base_path_is_rejected() {
    let ctx = SchemaContext::new(vec![container_list_module()]).unwrap();
    let mut generator = SwaggerGenerator::new(
        &ctx,
        ["M"],
        GeneratorConfig::default().with_base_path("restconf"),
    )
    .unwrap();
    assert!(matches!(generator.generate(), Err(GeneratorError::InvalidConfig(_))));
}

#[test]
fn yaml_tree_to_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tree.yaml");
    fs::write(
        &input,
        r#"
modules:
  - name: acme
    groupings:
      - name: endpoint
        children:
          - kind: leaf
            name: address
            type: { base: string }
    children:
      - kind: container
        name: server
        uses: [endpoint]
        children:
          - kind: leaf
            name: address
            grouping: endpoint
            type: { base: string }
      - kind: list
        name: user
        keys: [name]
        children:
          - kind: leaf
            name: name
            type: { base: string }
          - kind: leaf
            name: role
            type: { base: enumeration, values: [admin, guest] }
"#,
    )
    .unwrap();

    let ctx = load_context(&input).unwrap();
    let config = GeneratorConfig::default().with_format(Format::Json);
    let format = config.format;
    let doc = SwaggerGenerator::for_all_modules(&ctx, config)
        .unwrap()
        .generate()
        .unwrap();

    let output = dir.path().join("swagger.json");
    write_file(&doc, format, &output).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["swagger"], "2.0");
    assert_eq!(json["basePath"], "/restconf");
    assert!(json["paths"]["/data/acme:user={name}"]["put"].is_object());
    assert!(json["definitions"]["Server"].is_null());
    assert_eq!(
        json["paths"]["/data/acme:server"]["get"]["responses"]["200"]["schema"]["$ref"],
        "#/definitions/Endpoint"
    );
    assert_eq!(
        json["definitions"]["User"]["properties"]["role"]["enum"],
        serde_json::json!(["admin", "guest"])
    );
}
