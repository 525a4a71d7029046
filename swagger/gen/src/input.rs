//! Schema tree loading.

use std::fs;
use std::path::Path;

use swagger_define::SchemaContext;
use tracing::{debug, info};

use crate::errors::GeneratorError;

/// Loads a schema context from a `.json`, `.yaml` or `.yml` file.
///
/// ## Errors
///
/// - [`GeneratorError::UnsupportedInput`] for any other extension
/// - [`GeneratorError::ReadInput`] if the file cannot be read
/// - [`GeneratorError::ParseInput`] if the content is not a valid schema tree
pub fn load_context(path: &Path) -> Result<SchemaContext, GeneratorError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let is_json = match extension.as_deref() {
        Some("json") => true,
        Some("yaml" | "yml") => false,
        _ => {
            return Err(GeneratorError::UnsupportedInput {
                path: path.to_path_buf(),
            });
        }
    };

    debug!(path = %path.display(), "Reading schema tree");
    let content = fs::read_to_string(path).map_err(|source| GeneratorError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let ctx = parse_context(&content, is_json).map_err(|message| GeneratorError::ParseInput {
        path: path.to_path_buf(),
        message,
    })?;

    info!(
        path = %path.display(),
        modules = ctx.modules().len(),
        "Loaded schema tree"
    );
    Ok(ctx)
}

fn parse_context(content: &str, is_json: bool) -> Result<SchemaContext, String> {
    if is_json {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn file_with(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const YAML_TREE: &str = r#"
modules:
  - name: acme
    children:
      - kind: container
        name: system
        children:
          - kind: leaf
            name: hostname
            type:
              base: string
"#;

    #[test]
    fn loads_yaml() {
        let file = file_with(".yaml", YAML_TREE);
        let ctx = load_context(file.path()).unwrap();
        let module = ctx.module("acme").unwrap();
        assert_eq!(module.children[0].name(), "system");
        assert_eq!(module.children[0].module_name(), "acme");
    }

    #[test]
    fn loads_json() {
        let file = file_with(
            ".json",
            r#"{"modules":[{"name":"acme","children":[{"kind":"container","name":"system"}]}]}"#,
        );
        let ctx = load_context(file.path()).unwrap();
        assert!(ctx.module("acme").is_some());
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = file_with(".xml", "<modules/>");
        assert!(matches!(
            load_context(file.path()),
            Err(GeneratorError::UnsupportedInput { .. })
        ));
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let file = file_with(".json", "{ not json");
        let err = load_context(file.path()).unwrap_err();
        assert!(matches!(err, GeneratorError::ParseInput { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn duplicate_modules_fail_to_parse() {
        let file = file_with(
            ".json",
            r#"{"modules":[{"name":"acme"},{"name":"acme"}]}"#,
        );
        let err = load_context(file.path()).unwrap_err();
        assert!(err.to_string().contains("Duplicate module: acme"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_context(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, GeneratorError::ReadInput { .. }));
    }
}
