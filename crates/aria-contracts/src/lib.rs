//! # aria-contracts
//!
//! Shared vocabulary, result and error types for ARIA policy validation.
//!
//! All crates in the workspace import from here. No validation logic lives
//! in this crate, only the closed enumerations, the result accumulator and
//! error types.

pub mod error;
pub mod model;
pub mod report;

pub use error::{AriaError, AriaResult};
pub use model::{vocabulary_list, Action, ParticipationModel};
pub use report::ValidationResult;

#[cfg(test)]
mod tests {
    use super::*;

    // ── ParticipationModel ───────────────────────────────────────────────────

    #[test]
    fn model_parse_is_case_insensitive() {
        for raw in ["partner", "Partner", "PARTNER", "  pArTnEr "] {
            assert_eq!(ParticipationModel::parse(raw), Some(ParticipationModel::Partner));
        }
    }

    #[test]
    fn model_parse_rejects_unknown_names() {
        assert_eq!(ParticipationModel::parse("bogus_model"), None);
        assert_eq!(ParticipationModel::parse(""), None);
        // Prefixes are not accepted.
        assert_eq!(ParticipationModel::parse("guard"), None);
    }

    #[test]
    fn model_all_is_in_strictness_order() {
        let mut sorted = ParticipationModel::ALL;
        sorted.sort();
        assert_eq!(sorted, ParticipationModel::ALL);
        assert_eq!(ParticipationModel::ALL[0], ParticipationModel::Guardian);
        assert_eq!(ParticipationModel::ALL[4], ParticipationModel::Partner);
    }

    #[test]
    fn model_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ParticipationModel::Collaborator).unwrap();
        assert_eq!(json, "\"collaborator\"");
        let decoded: ParticipationModel = serde_json::from_str("\"observer\"").unwrap();
        assert_eq!(decoded, ParticipationModel::Observer);
    }

    // ── Action ───────────────────────────────────────────────────────────────

    #[test]
    fn action_parse_round_trips_canonical_names() {
        for action in Action::ALL {
            assert_eq!(Action::parse(action.as_str()), Some(action));
            assert_eq!(Action::parse(&action.as_str().to_uppercase()), Some(action));
        }
        assert_eq!(Action::parse("delete"), None);
    }

    #[test]
    fn vocabulary_list_renders_bracketed_names() {
        assert_eq!(
            vocabulary_list(ParticipationModel::ALL),
            "[guardian, observer, assistant, collaborator, partner]"
        );
        assert_eq!(
            vocabulary_list(Action::ALL),
            "[analyze, review, suggest, generate, modify, execute]"
        );
        assert_eq!(vocabulary_list(Vec::<String>::new()), "[]");
    }

    // ── ValidationResult ─────────────────────────────────────────────────────

    #[test]
    fn result_starts_valid_and_empty() {
        let result = ValidationResult::new();
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn warnings_do_not_invalidate() {
        let mut result = ValidationResult::new();
        result.add_warning("Version should follow semantic versioning (e.g., 1.0.0)");
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn errors_invalidate_permanently() {
        let mut result = ValidationResult::new();
        result.add_error("Missing required field: model");
        assert!(!result.is_valid());

        // Later warnings never bring the result back.
        result.add_warning("advisory");
        assert!(!result.is_valid());
        assert_eq!(result.errors(), ["Missing required field: model"]);
    }

    #[test]
    fn as_dict_reflects_counts_and_validity() {
        let mut result = ValidationResult::new();
        result.add_error("first");
        result.add_error("second");
        result.add_warning("only warning");

        let dict = result.as_dict();
        assert_eq!(dict["valid"], false);
        assert_eq!(dict["errors"].as_array().unwrap().len(), 2);
        assert_eq!(dict["warnings"].as_array().unwrap().len(), 1);
        assert_eq!(dict["errors"][1], "second");

        let clean = ValidationResult::new().as_dict();
        assert_eq!(clean["valid"], true);
    }

    #[test]
    fn from_error_carries_single_message() {
        let result = ValidationResult::from_error("resource not found: aria.yml");
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
    }

    // ── AriaError display messages ───────────────────────────────────────────

    #[test]
    fn error_not_found_display() {
        let err = AriaError::NotFound {
            locator: "policies/aria.yml".to_string(),
        };
        assert_eq!(err.to_string(), "resource not found: policies/aria.yml");
    }

    #[test]
    fn error_parse_failed_display() {
        let err = AriaError::ParseFailed {
            format: "YAML".to_string(),
            reason: "did not find expected key at line 3 column 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid YAML format"));
        assert!(msg.contains("line 3 column 1"));
    }

    #[test]
    fn error_unsupported_format_display() {
        let err = AriaError::UnsupportedFormat {
            name: "ini".to_string(),
        };
        assert!(err.to_string().contains("'ini'"));
    }
}
