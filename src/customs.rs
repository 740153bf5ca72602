//! Custom-metadata pass: backfill module fields under `<module>/custom`.
//!
//! For each module map entry, in map order, every JSON file directly inside
//! that module's `custom/` folder is walked and any object carrying
//! `"module": null` gets the module's label. Each assignment is recorded in
//! the docname → label side-table the fixture pass reads later.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::apps;
use crate::error::FixResult;
use crate::json_edit::{json_files_in, read_json, visit_objects_mut, write_json_pretty};
use crate::module_map::ModuleMap;
use crate::report::FixStats;

/// Run the custom-metadata pass over an app.
///
/// Modules without a `custom/` directory are skipped; that is the normal
/// case for modules carrying no custom metadata. Files are rewritten in
/// place unless `apply` is false.
///
/// Side effects: mutates files on disk (when `apply`), and fills
/// `assignments` and `stats` in place.
pub fn fix_custom_modules(
    app_root: &Path,
    module_map: &ModuleMap,
    assignments: &mut BTreeMap<String, String>,
    stats: &mut FixStats,
    apply: bool,
) -> FixResult<()> {
    for (label, canonical) in module_map.iter() {
        let dir = apps::custom_dir(app_root, canonical);
        if !dir.is_dir() {
            debug!(module = label, "no custom directory, skipping");
            continue;
        }

        for path in json_files_in(&dir)? {
            let mut doc = read_json(&path)?;
            let fixed = assign_label(&mut doc, label, assignments, stats);
            if apply {
                write_json_pretty(&path, &doc)?;
            }
            stats.custom_files += 1;
            info!(file = %path.display(), fixed, "processed custom metadata");
        }
    }
    Ok(())
}

/// Backfill every `module: null` object in `doc` with `label`, recording
/// assignments keyed by the object's `name`. Returns the number of objects
/// fixed in this document.
fn assign_label(
    doc: &mut Value,
    label: &str,
    assignments: &mut BTreeMap<String, String>,
    stats: &mut FixStats,
) -> usize {
    let mut fixed = 0;
    visit_objects_mut(doc, &mut |obj| {
        if !matches!(obj.get("module"), Some(Value::Null)) {
            return;
        }
        let Some(docname) = obj.get("name").and_then(Value::as_str) else {
            warn!("object with null module has no 'name' field, leaving it unset");
            stats.skipped_missing_name += 1;
            return;
        };
        let docname = docname.to_string();

        obj.insert("module".to_string(), Value::String(label.to_string()));
        assignments.insert(docname, label.to_string());
        stats.custom_assigned += 1;
        fixed += 1;
    });
    fixed
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn map_of(pairs: &[(&str, &str)]) -> ModuleMap {
        let mut map = ModuleMap::new();
        for (label, name) in pairs {
            map.insert(*label, *name);
        }
        map
    }

    fn write_doc(app_root: &Path, rel: &str, value: &Value) {
        let path = app_root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    }

    fn read_doc(app_root: &Path, rel: &str) -> Value {
        serde_json::from_str(&fs::read_to_string(app_root.join(rel)).unwrap()).unwrap()
    }

    #[test]
    fn backfills_null_module_and_records_assignment() {
        let app = TempDir::new().unwrap();
        write_doc(
            app.path(),
            "al_jar_hr/custom/x.json",
            &json!({"name": "DocA", "module": null}),
        );
        let map = map_of(&[("Al-Jar HR tawfik", "al_jar_hr")]);

        let mut assignments = BTreeMap::new();
        let mut stats = FixStats::default();
        fix_custom_modules(app.path(), &map, &mut assignments, &mut stats, true).unwrap();

        assert_eq!(
            read_doc(app.path(), "al_jar_hr/custom/x.json"),
            json!({"name": "DocA", "module": "Al-Jar HR tawfik"})
        );
        assert_eq!(assignments.get("DocA").map(String::as_str), Some("Al-Jar HR tawfik"));
        assert_eq!(stats.custom_assigned, 1);
        assert_eq!(stats.custom_files, 1);
    }

    #[test]
    fn reaches_documents_nested_in_arrays_and_objects() {
        let app = TempDir::new().unwrap();
        write_doc(
            app.path(),
            "hr/custom/bundle.json",
            &json!({
                "name": "Bundle",
                "module": null,
                "children": [
                    {"name": "Child1", "module": null},
                    {"meta": {"name": "Child2", "module": null}}
                ]
            }),
        );
        let map = map_of(&[("HR", "hr")]);

        let mut assignments = BTreeMap::new();
        let mut stats = FixStats::default();
        fix_custom_modules(app.path(), &map, &mut assignments, &mut stats, true).unwrap();

        assert_eq!(stats.custom_assigned, 3);
        assert_eq!(assignments.len(), 3);
        assert_eq!(assignments.get("Child2").map(String::as_str), Some("HR"));
    }

    #[test]
    fn missing_custom_directory_is_skipped() {
        let app = TempDir::new().unwrap();
        let map = map_of(&[("HR", "hr"), ("Sales", "sales")]);

        let mut assignments = BTreeMap::new();
        let mut stats = FixStats::default();
        fix_custom_modules(app.path(), &map, &mut assignments, &mut stats, true).unwrap();

        assert!(assignments.is_empty());
        assert_eq!(stats.custom_files, 0);
    }

    #[test]
    fn object_without_name_stays_null_and_is_counted() {
        let app = TempDir::new().unwrap();
        write_doc(
            app.path(),
            "hr/custom/anon.json",
            &json!({"module": null, "label": "anonymous"}),
        );
        let map = map_of(&[("HR", "hr")]);

        let mut assignments = BTreeMap::new();
        let mut stats = FixStats::default();
        fix_custom_modules(app.path(), &map, &mut assignments, &mut stats, true).unwrap();

        assert_eq!(
            read_doc(app.path(), "hr/custom/anon.json"),
            json!({"module": null, "label": "anonymous"})
        );
        assert!(assignments.is_empty());
        assert_eq!(stats.skipped_missing_name, 1);
    }

    #[test]
    fn non_null_module_is_left_alone() {
        let app = TempDir::new().unwrap();
        let doc = json!({"name": "DocB", "module": "Elsewhere"});
        write_doc(app.path(), "hr/custom/set.json", &doc);
        let map = map_of(&[("HR", "hr")]);

        let mut assignments = BTreeMap::new();
        let mut stats = FixStats::default();
        fix_custom_modules(app.path(), &map, &mut assignments, &mut stats, true).unwrap();

        assert_eq!(read_doc(app.path(), "hr/custom/set.json"), doc);
        assert!(assignments.is_empty());
        assert_eq!(stats.custom_assigned, 0);
    }

    #[test]
    fn dry_run_records_assignments_without_writing() {
        let app = TempDir::new().unwrap();
        write_doc(
            app.path(),
            "hr/custom/x.json",
            &json!({"name": "DocA", "module": null}),
        );
        let before = fs::read(app.path().join("hr/custom/x.json")).unwrap();
        let map = map_of(&[("HR", "hr")]);

        let mut assignments = BTreeMap::new();
        let mut stats = FixStats::default();
        fix_custom_modules(app.path(), &map, &mut assignments, &mut stats, false).unwrap();

        assert_eq!(fs::read(app.path().join("hr/custom/x.json")).unwrap(), before);
        assert_eq!(assignments.get("DocA").map(String::as_str), Some("HR"));
    }
}
