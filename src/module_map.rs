//! Module map construction and override merging.
//!
//! The module map pairs each free-form label from `modules.txt` with its
//! canonical module name. Iteration order follows the manifest, so every
//! later pass over the map is deterministic.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::apps;
use crate::error::{FixError, FixResult};
use crate::normalize::normalize_module_name;

// ============================================================================
// ModuleMap
// ============================================================================

/// Ordered mapping from module label to canonical module name.
///
/// Insertion order is preserved; re-inserting an existing label replaces its
/// value in place. The map is small (one entry per manifest line), so lookups
/// scan the backing vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleMap {
    entries: Vec<(String, String)>,
}

impl ModuleMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label → name pair, replacing the value of an existing label.
    pub fn insert(&mut self, label: impl Into<String>, name: impl Into<String>) {
        let label = label.into();
        let name = name.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = name,
            None => self.entries.push((label, name)),
        }
    }

    /// Look up the canonical name for a label.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, n)| n.as_str())
    }

    /// Whether the map contains the given label as a key.
    pub fn contains_label(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| l == label)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (label, canonical name) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, n)| (l.as_str(), n.as_str()))
    }

    fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &str) -> bool,
    {
        self.entries.retain(|(l, n)| keep(l, n));
    }
}

impl Serialize for ModuleMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, name) in &self.entries {
            map.serialize_entry(label, name)?;
        }
        map.end()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Build the auto-generated module map from the app's `modules.txt`.
///
/// Each non-blank manifest line becomes a label; its canonical name is the
/// normalized label. Manifest order is preserved.
///
/// # Errors
///
/// Returns [`FixError::ManifestNotFound`] when `modules.txt` is absent. This
/// is the one condition that aborts a run before any file is touched.
pub fn build_module_map(app_root: &Path) -> FixResult<ModuleMap> {
    let manifest = apps::manifest_path(app_root);
    if !manifest.exists() {
        return Err(FixError::ManifestNotFound { path: manifest });
    }

    let text = fs::read_to_string(&manifest).map_err(|e| FixError::io(&manifest, e))?;

    let mut map = ModuleMap::new();
    for line in text.lines() {
        let label = line.trim();
        if label.is_empty() {
            continue;
        }
        map.insert(label, normalize_module_name(label));
    }
    Ok(map)
}

// ============================================================================
// Merger
// ============================================================================

/// Merge the auto-generated map with caller-supplied overrides.
///
/// Override entries always win on key collision. An auto entry whose *value*
/// collides with an override value, and whose key is not itself overridden,
/// is dropped: once a label has been explicitly pointed at a canonical name,
/// no other label may keep mapping to it implicitly. Overrides may share
/// canonical values among themselves; only auto entries are evicted.
pub fn merge_maps(auto: &ModuleMap, overrides: &ModuleMap) -> ModuleMap {
    let mut merged = auto.clone();
    let override_values: HashSet<&str> = overrides.iter().map(|(_, name)| name).collect();

    merged.retain(|label, name| {
        !(override_values.contains(name) && !overrides.contains_label(label))
    });

    for (label, name) in overrides.iter() {
        merged.insert(label, name);
    }
    merged
}

// ============================================================================
// Tests
// ============================================================================
