//! modfix: module-metadata maintenance for bench-managed apps.
//!
//! An app declares its logical modules in `modules.txt`; exported metadata
//! documents under `<canonical_module>/custom/` and fixture documents under
//! `fixtures/` can end up with `"module": null`. modfix normalizes the
//! manifest labels into canonical names, merges caller-supplied overrides,
//! and rewrites every affected JSON document in place so the module
//! attribute holds a concrete label.
//!
//! The library entry point is [`run::fix_app_modules`]; the `modfix` binary
//! wraps it with argument parsing and report rendering.

// Core infrastructure
pub mod apps;
pub mod error;
pub mod json_edit;
pub mod normalize;

// Mapping and passes
pub mod customs;
pub mod fixtures;
pub mod module_map;
pub mod run;

// Front door
pub mod cli;
pub mod report;

pub use error::{FixError, FixResult, OutputErrorCode};
pub use module_map::{build_module_map, merge_maps, ModuleMap};
pub use normalize::normalize_module_name;
pub use report::{FixReport, FixStats};
pub use run::{fix_app_modules, FixOptions, FixOutcome};
