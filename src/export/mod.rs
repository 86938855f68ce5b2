//! Export and import of resources as local JSON files.
//!
//! Exported resources live as one pretty-printed JSON document each, under a
//! per-resource-type subdirectory of the configured export directory. File
//! names are derived by slugifying the resource's natural key.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::KineticResult;

/// Reduces a display name to a file-name-safe slug.
///
/// ASCII letters are lowercased and digits kept; runs of whitespace, hyphens
/// and underscores collapse into a single hyphen; everything else is
/// dropped. The result never starts or ends with a hyphen.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_separator = false;
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_separator = true;
        }
    }
    slug
}

/// Builds the path an exported resource is written to:
/// `<export_dir>/<resource_dir>/<stem>.json`.
pub fn export_file_path(export_dir: &Path, resource_dir: &str, stem: &str) -> PathBuf {
    export_dir.join(resource_dir).join(format!("{stem}.json"))
}

/// Pretty-prints `value` to `path`, creating parent directories as needed.
pub fn write_pretty_json(path: &Path, value: &Value) -> KineticResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let pretty = serde_json::to_string_pretty(value)?;
    fs::write(path, pretty)?;
    Ok(())
}

/// Lists the `.json` files in `dir`, in lexicographic filename order.
///
/// A missing directory yields an empty list, matching an export that never
/// ran.
pub fn list_json_files(dir: &Path) -> KineticResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
        .collect();
    paths.sort();
    Ok(paths)
}

/// Reads and parses one JSON document.
pub fn read_json_file(path: &Path) -> KineticResult<Value> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
