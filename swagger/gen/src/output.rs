//! Document serialization.

use std::fs;
use std::io::Write;
use std::path::Path;

use swagger_define::Swagger;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::Format;
use crate::errors::GeneratorError;

/// Serializes `doc` as YAML or pretty-printed JSON.
pub fn render(doc: &Swagger, format: Format) -> Result<String, GeneratorError> {
    match format {
        Format::Yaml => Ok(serde_yaml::to_string(doc)?),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(doc)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Serializes `doc` into `writer`.
pub fn write_to<W: Write>(doc: &Swagger, format: Format, mut writer: W) -> Result<(), GeneratorError> {
    let rendered = render(doc, format)?;
    writer
        .write_all(rendered.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|source| GeneratorError::WriteOutput {
            path: "<writer>".to_string(),
            source,
        })
}

/// Writes `doc` to `path`.
///
/// The content goes to a temporary file in the target directory first and is
/// renamed over `path`, so an existing file is only replaced by a complete
/// document.
pub fn write_file(doc: &Swagger, format: Format, path: &Path) -> Result<(), GeneratorError> {
    let rendered = render(doc, format)?;
    let write_err = |source: std::io::Error| GeneratorError::WriteOutput {
        path: path.display().to_string(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let temp_file = NamedTempFile::new_in(parent).map_err(write_err)?;
    fs::write(temp_file.path(), rendered.as_bytes()).map_err(write_err)?;

    debug!(path = %path.display(), "Persisting document");
    temp_file.persist(path).map_err(|e| write_err(e.error))?;

    info!(path = %path.display(), %format, "Wrote swagger document");
    Ok(())
}
