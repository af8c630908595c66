//! The policy validation engine.
//!
//! `PolicyValidator` checks a loaded policy document against the static rule
//! tables in [`crate::tables`]. It never fails: every problem, including a
//! missing or unparsable document, ends up as a message in the returned
//! `ValidationResult`.
//!
//! Validation order:
//!
//! 1. Required top-level fields (`version`, `model`). All are checked; if any
//!    is missing, validation stops there.
//! 2. `version` shape (string or number).
//! 3. `model` decoded into a `ParticipationModel`. An unknown model stops
//!    validation, since every later check is scoped by the model.
//! 4. `defaults` as a rules section labelled `defaults`.
//! 5. Each `paths` entry as a rules section labelled `path '<pattern>'`, in
//!    document order.
//! 6. Strict-mode advisory checks (warnings only), if requested.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use aria_contracts::{vocabulary_list, Action, AriaError, ParticipationModel, ValidationResult};

use crate::source::{DocumentFormat, DocumentSource, FsSource};
use crate::strict;
use crate::tables::{self, REQUIRED_FIELDS};

/// Validates AI participation policy documents.
///
/// Holds no state beyond the static rule tables, so a single instance can be
/// shared freely between threads.
///
/// ```rust,ignore
/// use aria_policy::PolicyValidator;
///
/// let result = PolicyValidator::new().validate_file("aria.yml", false);
/// if !result.is_valid() {
///     for error in result.errors() {
///         eprintln!("{error}");
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyValidator;

impl PolicyValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate the policy file at `path`. The format is chosen from the
    /// file extension (YAML unless the extension says otherwise).
    pub fn validate_file(&self, path: impl AsRef<Path>, strict: bool) -> ValidationResult {
        let path = path.as_ref();
        self.validate_file_as(path, DocumentFormat::from_path(path), strict)
    }

    /// Validate the policy file at `path`, decoding it as `format` whatever
    /// its extension.
    pub fn validate_file_as(
        &self,
        path: impl AsRef<Path>,
        format: DocumentFormat,
        strict: bool,
    ) -> ValidationResult {
        let path = path.as_ref();
        match FsSource.read_path(path) {
            Ok(text) => self.validate_str(&text, format, strict),
            Err(e) => read_failure(&path.display().to_string(), e),
        }
    }

    /// Read `locator` from `source`, decode it as `format` and validate it.
    ///
    /// A missing document, an unreadable document and a malformed document
    /// each produce a result with exactly one error.
    pub fn validate_source(
        &self,
        source: &dyn DocumentSource,
        locator: &str,
        format: DocumentFormat,
        strict: bool,
    ) -> ValidationResult {
        match source.read(locator) {
            Ok(text) => self.validate_str(&text, format, strict),
            Err(e) => read_failure(locator, e),
        }
    }

    /// Decode `text` as `format` and validate the resulting document.
    pub fn validate_str(&self, text: &str, format: DocumentFormat, strict: bool) -> ValidationResult {
        match format.parse(text) {
            Ok(document) => self.validate_policy(&document, strict),
            Err(e) => {
                warn!(%format, error = %e, "policy document could not be parsed");
                ValidationResult::from_error(e.to_string())
            }
        }
    }

    /// Validate an already-loaded policy document.
    ///
    /// The document is never modified. Errors appear in a fixed order: field
    /// checks first, then `defaults`, then `paths` entries in document order.
    pub fn validate_policy(&self, policy: &Value, strict: bool) -> ValidationResult {
        let mut result = ValidationResult::new();

        let Some(document) = policy.as_object() else {
            result.add_error("Policy must be a dictionary");
            return result;
        };

        for field in REQUIRED_FIELDS {
            if !document.contains_key(field) {
                result.add_error(format!("Missing required field: {field}"));
            }
        }
        if !result.is_valid() {
            debug!(errors = ?result.errors(), "required fields missing");
            return result;
        }

        let version = &document["version"];
        if !(version.is_string() || version.is_number()) {
            result.add_error("Version must be a string or number");
        }

        let raw_model = &document["model"];
        let Some(model) = raw_model.as_str().and_then(ParticipationModel::parse) else {
            result.add_error(format!(
                "Invalid model: {}. Must be one of {}",
                display_value(raw_model),
                vocabulary_list(ParticipationModel::ALL)
            ));
            return result;
        };

        debug!(%model, strict, "validating policy document");

        if let Some(defaults) = document.get("defaults") {
            self.validate_rules_section(defaults, model, "defaults", &mut result);
        }

        if let Some(paths) = document.get("paths") {
            match paths.as_object() {
                Some(entries) => {
                    for (pattern, rules) in entries {
                        let section = format!("path '{pattern}'");
                        self.validate_rules_section(rules, model, &section, &mut result);
                    }
                }
                None => result.add_error("Paths must be a dictionary"),
            }
        }

        if strict {
            self.validate_strict(policy, &mut result);
        }

        debug!(
            %model,
            valid = result.is_valid(),
            error_count = result.errors().len(),
            warning_count = result.warnings().len(),
            "validation complete"
        );
        result
    }

    /// Validate one rules section (`defaults` or a `paths` entry) for `model`.
    ///
    /// `section` labels every message this section produces. A non-mapping
    /// section is reported once and nothing inside it is checked.
    pub fn validate_rules_section(
        &self,
        rules: &Value,
        model: ParticipationModel,
        section: &str,
        result: &mut ValidationResult,
    ) {
        let Some(rules) = rules.as_object() else {
            result.add_error(format!("{section} must be a dictionary"));
            return;
        };

        if let Some(allow) = rules.get("allow") {
            match allow.as_array() {
                Some(actions) => {
                    for token in actions {
                        check_action(token, model, section, result);
                    }
                }
                None => result.add_error(format!("{section} allow must be a list")),
            }
        }

        if let Some(require) = rules.get("require") {
            match require.as_array() {
                Some(requirements) => {
                    for token in requirements {
                        let recognised = token
                            .as_str()
                            .is_some_and(|req| tables::recognises(model, req));
                        if !recognised {
                            result.add_error(format!(
                                "Requirement '{}' not valid for model {model} in {section}",
                                display_value(token)
                            ));
                        }
                    }
                }
                None => result.add_error(format!("{section} require must be a list")),
            }
        }
    }

    /// Run the advisory checks. Only ever adds warnings.
    pub fn validate_strict(&self, policy: &Value, result: &mut ValidationResult) {
        strict::check_version(policy.get("version"), result);
        if let Some(document) = policy.as_object() {
            strict::check_unknown_fields(document, result);
        }
        if let Some(paths) = policy.get("paths").and_then(Value::as_object) {
            for pattern in paths.keys() {
                strict::check_path_pattern(pattern, result);
            }
        }
    }
}

fn read_failure(locator: &str, error: AriaError) -> ValidationResult {
    match error {
        AriaError::NotFound { .. } => {
            warn!(locator, "policy document not found");
            ValidationResult::from_error(error.to_string())
        }
        _ => {
            warn!(locator, error = %error, "policy document could not be read");
            ValidationResult::from_error(format!("Validation error: {error}"))
        }
    }
}

fn check_action(
    token: &Value,
    model: ParticipationModel,
    section: &str,
    result: &mut ValidationResult,
) {
    let text = display_value(token);
    match token.as_str().and_then(Action::parse) {
        None => result.add_error(format!(
            "Invalid action '{text}' in {section}. Must be one of {}",
            vocabulary_list(Action::ALL)
        )),
        Some(action) if !tables::permits(model, action) => result.add_error(format!(
            "Action '{text}' not allowed for model {model} in {section}"
        )),
        Some(_) => {}
    }
}

/// Scalar text of a document value: strings without quotes, everything else
/// in its JSON form.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
