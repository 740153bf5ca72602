//! JSON document IO and in-place tree editing.
//!
//! Documents are untyped `serde_json::Value` trees: metadata and fixture
//! files nest arbitrarily, so the fixers walk the whole tree rather than
//! deserializing into a schema. Rewritten files use 4-space indentation with
//! non-ASCII characters preserved verbatim.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::error::{FixError, FixResult};

// ============================================================================
// File IO
// ============================================================================

/// Read and parse a JSON file.
pub fn read_json(path: &Path) -> FixResult<Value> {
    let text = fs::read_to_string(path).map_err(|e| FixError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| FixError::json(path, e))
}

/// Rewrite a JSON file in place, pretty-printed with 4-space indentation.
///
/// serde_json emits non-ASCII characters as-is, so Unicode content survives
/// the round trip unescaped.
pub fn write_json_pretty(path: &Path, value: &Value) -> FixResult<()> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| FixError::json(path, e))?;
    buf.push(b'\n');
    fs::write(path, buf).map_err(|e| FixError::io(path, e))
}

/// Collect the `.json` files directly inside a directory, sorted by name.
///
/// Does not recurse: module metadata and fixtures live flat in their folders.
pub fn json_files_in(dir: &Path) -> FixResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| FixError::io(dir, e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    Ok(files)
}

// ============================================================================
// Tree Visitor
// ============================================================================

/// Depth-first walk over every JSON object in a tree.
///
/// Objects are visited before their children, and the callback may mutate the
/// object's fields; the walk then descends into whatever values the object
/// holds after the callback returns. Scalars are never visited.
pub fn visit_objects_mut<F>(value: &mut Value, visit: &mut F)
where
    F: FnMut(&mut Map<String, Value>),
{
    match value {
        Value::Object(obj) => {
            visit(obj);
            for (_key, child) in obj.iter_mut() {
                visit_objects_mut(child, visit);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                visit_objects_mut(item, visit);
            }
        }
        _ => {}
    }
}

// ============================================================================
// Tests
// ============================================================================
