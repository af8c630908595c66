//! Strict-mode advisory checks.
//!
//! Nothing here can fail a policy. Each check appends warnings for things
//! that are legal but likely to be mistakes: non-semver versions, path
//! patterns that match everything or look like a single file, globs that
//! will never compile, and top-level keys the validator does not know.

use std::sync::LazyLock;

use globset::Glob;
use regex::Regex;
use serde_json::{Map, Value};

use aria_contracts::ValidationResult;

use crate::tables::{METADATA_FIELDS, OPTIONAL_FIELDS, REQUIRED_FIELDS};

/// MAJOR.MINOR.PATCH with optional pre-release and build metadata.
static SEMVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-((?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
    )
    .expect("static semver regex")
});

/// The pattern that matches every path.
const MATCH_EVERYTHING: &str = "**";

/// True when `text` is a semantic version.
pub fn is_semver(text: &str) -> bool {
    SEMVER.is_match(text)
}

/// Warn unless `version` is a semantic version string. Numbers are checked
/// on their textual form, so `1.0` warns.
pub fn check_version(version: Option<&Value>, result: &mut ValidationResult) {
    let conforms = match version {
        Some(Value::String(s)) => is_semver(s),
        Some(Value::Number(n)) => is_semver(&n.to_string()),
        _ => false,
    };
    if !conforms {
        result.add_warning("Version should follow semantic versioning (e.g., 1.0.0)");
    }
}

/// Warn about the shape of a single `paths` key.
pub fn check_path_pattern(pattern: &str, result: &mut ValidationResult) {
    let trimmed = pattern.trim();
    if trimmed.is_empty() {
        result.add_warning("Path patterns should not be empty");
    }
    if trimmed == MATCH_EVERYTHING {
        result.add_warning(format!(
            "Overly broad path pattern '{pattern}' should be avoided"
        ));
    }
    if !pattern.contains(['*', '/']) {
        result.add_warning(format!("Path pattern '{pattern}' might be too specific"));
    }
    if !trimmed.is_empty() {
        if let Err(e) = Glob::new(trimmed) {
            result.add_warning(format!(
                "Path pattern '{pattern}' is not a valid glob: {}",
                e.kind()
            ));
        }
    }
}

/// Warn about top-level keys that validation ignores.
pub fn check_unknown_fields(document: &Map<String, Value>, result: &mut ValidationResult) {
    let known = REQUIRED_FIELDS
        .iter()
        .chain(OPTIONAL_FIELDS.iter())
        .chain(METADATA_FIELDS.iter());
    let known: Vec<&str> = known.copied().collect();

    for key in document.keys() {
        if !known.contains(&key.as_str()) {
            result.add_warning(format!("Unknown field '{key}' will be ignored"));
        }
    }
}
