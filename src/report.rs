//! Serializable run reporting.
//!
//! The CLI renders a [`FixReport`] either as human-readable text or as a
//! pretty JSON envelope (`--json`); the counters also give tests something
//! concrete to assert against.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::module_map::ModuleMap;
use crate::run::FixOutcome;

/// Counters accumulated across both fixer passes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FixStats {
    /// Custom metadata files processed.
    pub custom_files: usize,
    /// Fixture files processed.
    pub fixture_files: usize,
    /// Module assignments made during the custom pass.
    pub custom_assigned: usize,
    /// Module assignments made during the fixture pass.
    pub fixture_assigned: usize,
    /// Fixture assignments that fell back to the app-wide label.
    pub fallback_assigned: usize,
    /// Objects with a null module but no `name` field, left untouched.
    pub skipped_missing_name: usize,
}

impl FixStats {
    /// Total assignments across both passes.
    pub fn total_assigned(&self) -> usize {
        self.custom_assigned + self.fixture_assigned
    }
}

/// Full report of one fixer run.
#[derive(Debug, Serialize)]
pub struct FixReport {
    /// The app that was processed.
    pub app: String,
    /// Whether file writes were suppressed.
    pub dry_run: bool,
    /// The merged label → canonical-name map the run used.
    pub module_map: ModuleMap,
    /// Docname → module label assignments recorded during the custom pass.
    pub assignments: BTreeMap<String, String>,
    /// Run counters.
    pub stats: FixStats,
}

impl FixReport {
    /// Build a report from a completed run.
    pub fn from_outcome(app: impl Into<String>, dry_run: bool, outcome: FixOutcome) -> Self {
        FixReport {
            app: app.into(),
            dry_run,
            module_map: outcome.module_map,
            assignments: outcome.assignments,
            stats: outcome.stats,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
