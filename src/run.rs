//! One-shot orchestration of the module-fix passes.
//!
//! Phase order is load-bearing: the custom pass must fully complete before
//! the fixture pass starts, because fixtures resolve docnames through the
//! side-table the custom pass accumulates.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use crate::apps;
use crate::customs::fix_custom_modules;
use crate::error::FixResult;
use crate::fixtures::fix_fixture_modules;
use crate::module_map::{build_module_map, merge_maps, ModuleMap};
use crate::report::FixStats;

/// Options for a fixer run.
#[derive(Debug, Clone)]
pub struct FixOptions {
    /// Caller-supplied label → canonical-name overrides, layered onto the
    /// auto-generated map.
    pub overrides: ModuleMap,
    /// Whether to rewrite files. When false the run is a full dry pass:
    /// every document is walked and reported, nothing is written.
    pub apply: bool,
}

impl Default for FixOptions {
    fn default() -> Self {
        FixOptions {
            overrides: ModuleMap::new(),
            apply: true,
        }
    }
}

/// Result of a fixer run, returned for inspection and testing.
#[derive(Debug)]
pub struct FixOutcome {
    /// The merged module map the run used.
    pub module_map: ModuleMap,
    /// Docname → module label side-table from the custom pass.
    pub assignments: BTreeMap<String, String>,
    /// Run counters.
    pub stats: FixStats,
}

/// Fix module assignments across one app.
///
/// Builds the module map from `modules.txt`, merges `options.overrides`,
/// then runs the custom-metadata pass followed by the fixture pass. A
/// failure part-way leaves earlier rewrites in place; there is no rollback.
///
/// # Errors
///
/// Fatal conditions only: unknown app, missing manifest, or an IO/parse
/// failure on an individual file. Missing optional directories and documents
/// without an identity are logged and counted instead.
pub fn fix_app_modules(apps_root: &Path, app: &str, options: &FixOptions) -> FixResult<FixOutcome> {
    let app_root = apps::resolve_app_root(apps_root, app)?;

    let module_map = merged_module_map(&app_root, &options.overrides)?;
    for (label, name) in module_map.iter() {
        debug!(label, name, "module map entry");
    }

    let mut assignments = BTreeMap::new();
    let mut stats = FixStats::default();

    fix_custom_modules(
        &app_root,
        &module_map,
        &mut assignments,
        &mut stats,
        options.apply,
    )?;
    fix_fixture_modules(
        app,
        &app_root,
        &assignments,
        &module_map,
        &mut stats,
        options.apply,
    )?;

    info!(
        app,
        assigned = stats.total_assigned(),
        skipped = stats.skipped_missing_name,
        dry_run = !options.apply,
        "fixer run complete"
    );

    Ok(FixOutcome {
        module_map,
        assignments,
        stats,
    })
}

/// Build and merge the module map for an app root without touching any
/// document. Shared by the full run and the map-inspection command.
pub fn merged_module_map(app_root: &Path, overrides: &ModuleMap) -> FixResult<ModuleMap> {
    let auto = build_module_map(app_root)?;
    Ok(merge_maps(&auto, overrides))
}

// ============================================================================
// Tests
// ============================================================================
