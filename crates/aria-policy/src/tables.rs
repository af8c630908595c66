//! Static rule tables.
//!
//! Each participation model maps to the set of actions it permits and the
//! set of requirement tokens a policy may declare for it. Both tables are
//! total over `ParticipationModel` and grow monotonically from `Guardian`
//! (most restrictive) to `Partner` (least restrictive).
//!
//! | model        | actions                                     | requirements                          |
//! |--------------|---------------------------------------------|---------------------------------------|
//! | guardian     | -                                           | human_review                          |
//! | observer     | review                                      | human_review                          |
//! | assistant    | review, suggest                             | human_review, tests                   |
//! | collaborator | generate, modify, suggest, review           | human_review, tests, documentation    |
//! | partner      | generate, modify, suggest, review, execute  | human_review, tests, documentation    |

use aria_contracts::{Action, ParticipationModel};

/// Top-level keys every policy document must carry.
pub const REQUIRED_FIELDS: [&str; 2] = ["version", "model"];

/// Top-level keys a policy document may carry.
pub const OPTIONAL_FIELDS: [&str; 2] = ["defaults", "paths"];

/// Informational top-level keys. Not validated, but not unknown either.
pub const METADATA_FIELDS: [&str; 2] = ["name", "description"];

pub const HUMAN_REVIEW: &str = "human_review";
pub const TESTS: &str = "tests";
pub const DOCUMENTATION: &str = "documentation";

/// Actions a model permits in any `allow` list.
pub fn allowed_actions(model: ParticipationModel) -> &'static [Action] {
    match model {
        ParticipationModel::Guardian => &[],
        ParticipationModel::Observer => &[Action::Review],
        ParticipationModel::Assistant => &[Action::Review, Action::Suggest],
        ParticipationModel::Collaborator => &[
            Action::Generate,
            Action::Modify,
            Action::Suggest,
            Action::Review,
        ],
        ParticipationModel::Partner => &[
            Action::Generate,
            Action::Modify,
            Action::Suggest,
            Action::Review,
            Action::Execute,
        ],
    }
}

/// Requirement tokens a model recognises in any `require` list.
pub fn valid_requirements(model: ParticipationModel) -> &'static [&'static str] {
    match model {
        ParticipationModel::Guardian | ParticipationModel::Observer => &[HUMAN_REVIEW],
        ParticipationModel::Assistant => &[HUMAN_REVIEW, TESTS],
        ParticipationModel::Collaborator | ParticipationModel::Partner => {
            &[HUMAN_REVIEW, TESTS, DOCUMENTATION]
        }
    }
}

/// True when `model` permits `action`.
pub fn permits(model: ParticipationModel, action: Action) -> bool {
    allowed_actions(model).contains(&action)
}

/// True when `requirement` is recognised for `model`.
pub fn recognises(model: ParticipationModel, requirement: &str) -> bool {
    valid_requirements(model).contains(&requirement)
}
