//! Plain-text rules and ignore files for AI-enabled editors.
//!
//! Editors such as Windsurf and Cursor read a rules file from the project
//! root and feed it to their assistants, and skip whatever their AI ignore
//! file lists. This module renders a policy document into numbered rules or
//! ignore patterns and merges them into such files without disturbing
//! hand-written content.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;
use tracing::{debug, info};

use aria_contracts::{AriaError, AriaResult, ParticipationModel};

use crate::validator::display_value;

/// First line of the generated section. Everything from this line to the
/// end of the file is owned by ARIA and replaced on every run.
pub const GENERATED_MARKER: &str = "# ===== ARIA Policy Rules (Auto-generated) =====";

/// Delimiters of the ARIA block in an ignore file.
pub const IGNORE_BEGIN: &str = "# BEGIN ARIA POLICY";
pub const IGNORE_END: &str = "# END ARIA POLICY";

const POLICY_FILES: [&str; 3] = ["*.aria.yaml", "*.aria.yml", "aria_policy.yml"];

const SENSITIVE_FILES: [&str; 9] = [
    ".env",
    "*.pem",
    "*.key",
    "*secret*",
    "*password*",
    "*credential*",
    "*token*",
    "terraform.tfstate",
    "*.db",
];

/// Editors that ARIA can write rules for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdeTarget {
    #[default]
    Windsurf,
    Cursor,
}

impl IdeTarget {
    /// Rules file the editor reads, relative to the project root.
    pub fn default_file(self) -> &'static str {
        match self {
            IdeTarget::Windsurf => ".windsurfrules",
            IdeTarget::Cursor => ".cursorrules",
        }
    }

    /// AI ignore file the editor reads, relative to the project root.
    pub fn ignore_file(self) -> &'static str {
        match self {
            IdeTarget::Windsurf => ".codeiumignore",
            IdeTarget::Cursor => ".cursorignore",
        }
    }
}

impl fmt::Display for IdeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdeTarget::Windsurf => f.write_str("windsurf"),
            IdeTarget::Cursor => f.write_str("cursor"),
        }
    }
}

impl FromStr for IdeTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windsurf" => Ok(IdeTarget::Windsurf),
            "cursor" => Ok(IdeTarget::Cursor),
            other => Err(format!("unknown IDE '{other}' (expected windsurf or cursor)")),
        }
    }
}

fn policy_header(policy: &Value) -> [String; 2] {
    let name = policy.get("name").and_then(Value::as_str).unwrap_or("Unnamed Policy");
    let description = policy
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("No description provided");
    [format!("# ARIA Policy: {name}"), format!("# {description}")]
}

/// Whether a `paths` entry keeps AI assistants out entirely.
fn is_prohibited(section: &Value) -> bool {
    let denied = section.get("effect").and_then(Value::as_str) == Some("deny");
    denied || string_list(Some(section), "allow").is_empty()
}

fn model_rule(model: ParticipationModel) -> &'static str {
    match model {
        ParticipationModel::Guardian => {
            "AI assistants must not modify any files without explicit permission"
        }
        ParticipationModel::Observer => "AI assistants may only analyze and review code, not modify it",
        ParticipationModel::Assistant => "AI assistants may suggest and generate code with human review",
        ParticipationModel::Collaborator => {
            "AI assistants may contribute to specific project areas with appropriate permissions"
        }
        ParticipationModel::Partner => "AI assistants may participate fully with safety guardrails",
    }
}

/// Items of a list-valued key, as text. Missing or non-list values give an
/// empty list.
fn string_list(section: Option<&Value>, key: &str) -> Vec<String> {
    section
        .and_then(|s| s.get(key))
        .and_then(Value::as_array)
        .map(|items| items.iter().map(display_value).collect())
        .unwrap_or_default()
}

/// Render `policy` as a header followed by numbered rules.
///
/// A missing `model` is treated as `assistant`; an unrecognised one simply
/// contributes no model rule. A path entry with `effect: deny` or an empty
/// `allow` list renders as a prohibition.
pub fn render_rules(policy: &Value) -> Vec<String> {
    let mut lines = policy_header(policy).to_vec();
    lines.push(String::new());
    let mut rules: Vec<String> = Vec::new();

    let model = match policy.get("model") {
        None => Some(ParticipationModel::Assistant),
        Some(raw) => raw.as_str().and_then(ParticipationModel::parse),
    };
    if let Some(model) = model {
        rules.push(model_rule(model).to_string());
    }

    let defaults = policy.get("defaults");
    let default_allow = string_list(defaults, "allow");
    if default_allow.is_empty() {
        rules.push("AI assistants must not modify files by default".to_string());
    } else {
        rules.push(format!("AI assistants may {} by default", default_allow.join(", ")));
    }
    let default_require = string_list(defaults, "require");
    if !default_require.is_empty() {
        rules.push(format!("All AI contributions require {}", default_require.join(", ")));
    }

    if let Some(paths) = policy.get("paths").and_then(Value::as_object) {
        for (pattern, section) in paths {
            let allow = string_list(Some(section), "allow");
            if is_prohibited(section) {
                rules.push(format!("AI assistants must not modify files in {pattern}"));
            } else {
                rules.push(format!("AI assistants may {} files in {pattern}", allow.join(", ")));
            }

            let require = string_list(Some(section), "require");
            if !require.is_empty() {
                rules.push(format!("Changes to {pattern} require {}", require.join(", ")));
            }
        }
    }

    lines.extend(
        rules
            .into_iter()
            .enumerate()
            .map(|(i, rule)| format!("{}. {rule}", i + 1)),
    );
    lines
}

/// Merge freshly rendered `rules` into the `existing` contents of a rules
/// file.
///
/// Hand-written lines above the generated marker are kept. A previously
/// generated section is replaced; otherwise the new section is appended
/// after a blank line.
pub fn merge_rules(existing: &str, rules: &[String]) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in existing.lines() {
        if line.trim_end() == GENERATED_MARKER {
            break;
        }
        kept.push(line.trim_end());
    }
    while kept.last().is_some_and(|l| l.trim().is_empty()) {
        kept.pop();
    }

    let mut out = String::new();
    for line in &kept {
        out.push_str(line);
        out.push('\n');
    }
    if !kept.is_empty() {
        out.push('\n');
    }
    out.push_str(GENERATED_MARKER);
    out.push('\n');
    for rule in rules {
        out.push_str(rule);
        out.push('\n');
    }
    out
}

/// Render `policy` as ignore-file patterns.
///
/// The block lists the policy files themselves, common secret and state
/// files, and every `paths` entry that grants AI assistants nothing
/// (`effect: deny` or an empty or missing `allow`).
pub fn render_ignore_patterns(policy: &Value) -> Vec<String> {
    let mut lines = policy_header(policy).to_vec();

    lines.push(String::new());
    lines.push("# Policy files".to_string());
    lines.extend(POLICY_FILES.iter().map(|p| p.to_string()));

    lines.push(String::new());
    lines.push("# Sensitive files".to_string());
    lines.extend(SENSITIVE_FILES.iter().map(|p| p.to_string()));

    let restricted: Vec<&String> = policy
        .get("paths")
        .and_then(Value::as_object)
        .map(|paths| {
            paths
                .iter()
                .filter(|(_, section)| is_prohibited(section))
                .map(|(pattern, _)| pattern)
                .collect()
        })
        .unwrap_or_default();
    if !restricted.is_empty() {
        lines.push(String::new());
        lines.push("# Restricted paths".to_string());
        lines.extend(restricted.into_iter().cloned());
    }
    lines
}

/// Merge freshly rendered `patterns` into the `existing` contents of an
/// ignore file.
///
/// An existing `# BEGIN ARIA POLICY` block is replaced in place and the
/// content before and after it is kept. A block without its end line runs
/// to the end of the file. Without a block, the new one is appended after a
/// blank line.
pub fn merge_ignore(existing: &str, patterns: &[String]) -> String {
    let mut block = vec![IGNORE_BEGIN.to_string()];
    block.extend(patterns.iter().cloned());
    block.push(IGNORE_END.to_string());

    let lines: Vec<&str> = existing.lines().map(str::trim_end).collect();
    let begin = lines.iter().position(|l| *l == IGNORE_BEGIN);

    let mut out: Vec<String> = Vec::new();
    match begin {
        Some(begin) => {
            let end = lines[begin..]
                .iter()
                .position(|l| *l == IGNORE_END)
                .map_or(lines.len(), |offset| begin + offset + 1);
            out.extend(lines[..begin].iter().map(|l| l.to_string()));
            out.extend(block);
            out.extend(lines[end..].iter().map(|l| l.to_string()));
        }
        None => {
            out.extend(lines.iter().map(|l| l.to_string()));
            while out.last().is_some_and(|l| l.trim().is_empty()) {
                out.pop();
            }
            if !out.is_empty() {
                out.push(String::new());
            }
            out.extend(block);
        }
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}

/// Render `policy` and merge the rules into the file at `target`, creating
/// it (and its parent directories) when needed. Returns the number of
/// rendered lines.
pub fn write_rules(policy: &Value, target: &Path) -> AriaResult<usize> {
    let rules = render_rules(policy);
    update_file(target, |existing| merge_rules(existing, &rules))?;
    info!(target = %target.display(), lines = rules.len(), "IDE rules updated");
    Ok(rules.len())
}

/// Render `policy` as ignore patterns and merge them into the file at
/// `target`, creating it when needed. Returns the number of rendered lines.
pub fn write_ignore(policy: &Value, target: &Path) -> AriaResult<usize> {
    let patterns = render_ignore_patterns(policy);
    update_file(target, |existing| merge_ignore(existing, &patterns))?;
    info!(target = %target.display(), lines = patterns.len(), "ignore file updated");
    Ok(patterns.len())
}

fn update_file(target: &Path, merge: impl FnOnce(&str) -> String) -> AriaResult<()> {
    let write_err = |e: std::io::Error| AriaError::WriteFailed {
        target: target.display().to_string(),
        reason: e.to_string(),
    };

    let existing = match std::fs::read_to_string(target) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(AriaError::ReadFailed {
                locator: target.display().to_string(),
                reason: e.to_string(),
            })
        }
    };
    debug!(target = %target.display(), existing_bytes = existing.len(), "merging generated section");

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(target, merge(&existing)).map_err(write_err)
}
