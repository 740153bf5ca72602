//! App path resolution under a bench-style apps root.
//!
//! Every path the fixer touches hangs off a single app root directory:
//! `modules.txt` at the top, per-module `<canonical_name>/custom/` folders,
//! and the shared `fixtures/` folder.

use std::path::{Path, PathBuf};

use crate::error::{FixError, FixResult};

/// File name of the module manifest inside an app root.
pub const MODULES_MANIFEST: &str = "modules.txt";

/// Resolve an app identifier to its root directory.
///
/// The app root is `<apps_root>/<app>`. The identifier must be a plain
/// directory name; path separators are rejected rather than silently joined.
///
/// # Errors
///
/// - [`FixError::InvalidArguments`] for an empty identifier or one containing
///   a path separator.
/// - [`FixError::AppNotFound`] when the resolved path is not a directory.
pub fn resolve_app_root(apps_root: &Path, app: &str) -> FixResult<PathBuf> {
    if app.is_empty() || app == "." || app == ".." || app.contains('/') || app.contains('\\') {
        return Err(FixError::invalid_args(format!(
            "app identifier must be a plain directory name, got '{}'",
            app
        )));
    }

    let root = apps_root.join(app);
    if !root.is_dir() {
        return Err(FixError::AppNotFound {
            app: app.to_string(),
            path: root,
        });
    }
    Ok(root)
}

/// Path of the module manifest inside an app root.
pub fn manifest_path(app_root: &Path) -> PathBuf {
    app_root.join(MODULES_MANIFEST)
}

/// Path of a module's custom-metadata directory inside an app root.
pub fn custom_dir(app_root: &Path, canonical_name: &str) -> PathBuf {
    app_root.join(canonical_name).join("custom")
}

/// Path of the fixtures directory inside an app root.
pub fn fixtures_dir(app_root: &Path) -> PathBuf {
    app_root.join("fixtures")
}

// ============================================================================
// Tests
// ============================================================================
