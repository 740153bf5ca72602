//! Fixture pass: backfill module fields under `fixtures/`.
//!
//! Consumes the side-table the custom pass produced. Fixture records whose
//! docname has no recorded assignment fall back to a single app-wide label,
//! resolved from the module map.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::apps;
use crate::error::FixResult;
use crate::json_edit::{json_files_in, read_json, visit_objects_mut, write_json_pretty};
use crate::module_map::ModuleMap;
use crate::report::FixStats;

/// Resolve the fallback label for fixture records.
///
/// The first map pair whose canonical name equals the app identifier wins;
/// when no pair matches, the app identifier itself is the label.
pub fn app_module_label(module_map: &ModuleMap, app: &str) -> String {
    for (label, canonical) in module_map.iter() {
        if canonical == app {
            return label.to_string();
        }
    }
    app.to_string()
}

/// Run the fixture pass over an app.
///
/// A missing `fixtures/` directory is a no-op (warned, not fatal). Files are
/// rewritten in place unless `apply` is false. Must run after the custom
/// pass has fully completed: `assignments` is read, never extended.
pub fn fix_fixture_modules(
    app: &str,
    app_root: &Path,
    assignments: &BTreeMap<String, String>,
    module_map: &ModuleMap,
    stats: &mut FixStats,
    apply: bool,
) -> FixResult<()> {
    let dir = apps::fixtures_dir(app_root);
    if !dir.is_dir() {
        warn!(app, "no fixtures directory, skipping fixture pass");
        return Ok(());
    }

    let fallback = app_module_label(module_map, app);
    debug!(fallback = %fallback, "resolved fixture fallback label");

    for path in json_files_in(&dir)? {
        let mut doc = read_json(&path)?;
        let fixed = assign_from_side_table(&mut doc, assignments, &fallback, stats);
        if apply {
            write_json_pretty(&path, &doc)?;
        }
        stats.fixture_files += 1;
        info!(file = %path.display(), fixed, "processed fixture");
    }
    Ok(())
}

/// Backfill every `module: null` object in `doc`, preferring the side-table
/// entry for the object's `name` and falling back to `fallback`. Returns the
/// number of objects fixed in this document.
fn assign_from_side_table(
    doc: &mut Value,
    assignments: &BTreeMap<String, String>,
    fallback: &str,
    stats: &mut FixStats,
) -> usize {
    let mut fixed = 0;
    visit_objects_mut(doc, &mut |obj| {
        if !matches!(obj.get("module"), Some(Value::Null)) {
            return;
        }
        let Some(docname) = obj.get("name").and_then(Value::as_str) else {
            warn!("fixture object with null module has no 'name' field, leaving it unset");
            stats.skipped_missing_name += 1;
            return;
        };

        let label = match assignments.get(docname) {
            Some(label) => label.clone(),
            None => {
                warn!(doc = docname, fallback, "no recorded module, using app label");
                stats.fallback_assigned += 1;
                fallback.to_string()
            }
        };
        obj.insert("module".to_string(), Value::String(label));
        stats.fixture_assigned += 1;
        fixed += 1;
    });
    fixed
}

// ============================================================================
// Tests
// ============================================================================
