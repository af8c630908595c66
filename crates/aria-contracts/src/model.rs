//! Participation models and the action vocabulary.
//!
//! Both are closed sets. Policy documents refer to them by their canonical
//! lowercase names; decoding is case-insensitive and never guesses beyond an
//! exact (normalised) match, so a failed decode can always be reported
//! together with the full list of accepted names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How much an AI agent is allowed to participate in a project.
///
/// Variants are declared from most to least restrictive; `Ord` follows that
/// order, so `Guardian < Observer < ... < Partner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipationModel {
    /// No AI actions at all.
    Guardian,
    /// Review only.
    Observer,
    /// Review and suggest.
    Assistant,
    /// Generate and modify code alongside humans.
    Collaborator,
    /// Full participation, including execution.
    Partner,
}

impl ParticipationModel {
    /// Every model, in strictness order.
    pub const ALL: [ParticipationModel; 5] = [
        ParticipationModel::Guardian,
        ParticipationModel::Observer,
        ParticipationModel::Assistant,
        ParticipationModel::Collaborator,
        ParticipationModel::Partner,
    ];

    /// Canonical name as written in policy documents.
    pub fn as_str(self) -> &'static str {
        match self {
            ParticipationModel::Guardian => "guardian",
            ParticipationModel::Observer => "observer",
            ParticipationModel::Assistant => "assistant",
            ParticipationModel::Collaborator => "collaborator",
            ParticipationModel::Partner => "partner",
        }
    }

    /// Decode a model name, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|m| m.as_str() == needle)
    }
}

impl fmt::Display for ParticipationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something an AI agent may be permitted to do to files in a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Read and analyze code.
    Analyze,
    /// Review code and give feedback.
    Review,
    /// Suggest changes without applying them.
    Suggest,
    /// Generate new code.
    Generate,
    /// Modify existing code.
    Modify,
    /// Execute code or commands.
    Execute,
}

impl Action {
    /// The whole vocabulary, in canonical listing order.
    pub const ALL: [Action; 6] = [
        Action::Analyze,
        Action::Review,
        Action::Suggest,
        Action::Generate,
        Action::Modify,
        Action::Execute,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Analyze => "analyze",
            Action::Review => "review",
            Action::Suggest => "suggest",
            Action::Generate => "generate",
            Action::Modify => "modify",
            Action::Execute => "execute",
        }
    }

    /// Decode an action token, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|a| a.as_str() == needle)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render names as `[a, b, c]` for "Must be one of ..." messages.
pub fn vocabulary_list<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    let names: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
    format!("[{}]", names.join(", "))
}
