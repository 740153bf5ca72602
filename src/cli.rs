//! CLI front door: command implementations for the `modfix` binary.
//!
//! The binary parses arguments and hands them to these functions; they own
//! override parsing and output rendering. Reports go to stdout, diagnostics
//! go through `tracing` (stderr), so `--json` output stays machine-readable.

use std::fs;
use std::path::Path;

use crate::apps;
use crate::error::{FixError, FixResult};
use crate::module_map::ModuleMap;
use crate::report::FixReport;
use crate::run::{fix_app_modules, merged_module_map, FixOptions};

// ============================================================================
// Override Parsing
// ============================================================================

/// Build the override map from CLI inputs.
///
/// `--overrides FILE` supplies a JSON object of label → canonical-name pairs;
/// repeated `--set LABEL=NAME` arguments are applied on top of it, so a
/// command-line pair wins over the file on the same label.
pub fn parse_override_args(set: &[String], file: Option<&Path>) -> FixResult<ModuleMap> {
    let mut overrides = ModuleMap::new();

    if let Some(path) = file {
        let text = fs::read_to_string(path).map_err(|e| FixError::io(path, e))?;
        let raw: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&text).map_err(|e| FixError::json(path, e))?;
        for (label, value) in raw {
            match value {
                serde_json::Value::String(name) => overrides.insert(label, name),
                other => {
                    return Err(FixError::invalid_args(format!(
                        "override for '{}' must be a string, got {}",
                        label, other
                    )))
                }
            }
        }
    }

    for spec in set {
        let (label, name) = spec.split_once('=').ok_or_else(|| {
            FixError::invalid_args(format!("override '{}' must look like LABEL=NAME", spec))
        })?;
        if label.is_empty() || name.is_empty() {
            return Err(FixError::invalid_args(format!(
                "override '{}' has an empty label or name",
                spec
            )));
        }
        overrides.insert(label, name);
    }

    Ok(overrides)
}

// ============================================================================
// Commands
// ============================================================================

/// Run the fixer over one app and render the report.
pub fn run_fix(
    apps_root: &Path,
    app: &str,
    overrides: ModuleMap,
    dry_run: bool,
    json: bool,
) -> FixResult<()> {
    let options = FixOptions {
        overrides,
        apply: !dry_run,
    };
    let outcome = fix_app_modules(apps_root, app, &options)?;
    let report = FixReport::from_outcome(app, dry_run, outcome);

    if json {
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    } else {
        render_report(&report);
    }
    Ok(())
}

/// Print the merged module map for an app without touching any file.
pub fn run_map(apps_root: &Path, app: &str, overrides: ModuleMap, json: bool) -> FixResult<()> {
    let app_root = apps::resolve_app_root(apps_root, app)?;
    let map = merged_module_map(&app_root, &overrides)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&map).unwrap());
    } else {
        for (label, name) in map.iter() {
            println!("{} -> {}", label, name);
        }
    }
    Ok(())
}

// ============================================================================
// Text Rendering
// ============================================================================

fn render_report(report: &FixReport) {
    if report.dry_run {
        println!("Dry run: no files were written.\n");
    }

    println!("Module map:");
    for (label, name) in report.module_map.iter() {
        println!("  {} -> {}", label, name);
    }

    if !report.assignments.is_empty() {
        println!("\nAssignments:");
        for (docname, label) in &report.assignments {
            println!("  {} -> {}", docname, label);
        }
    }

    let stats = &report.stats;
    println!(
        "\n{} processed, {} assigned ({} via fallback), {} skipped",
        count(stats.custom_files + stats.fixture_files, "file"),
        stats.total_assigned(),
        stats.fallback_assigned,
        stats.skipped_missing_name
    );
}

fn count(n: usize, noun: &str) -> String {
    format!("{} {}{}", n, noun, if n == 1 { "" } else { "s" })
}

// ============================================================================
// Tests
// ============================================================================
