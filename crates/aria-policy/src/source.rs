//! Document sources and format decoding.
//!
//! A policy document reaches the validator in two steps: a `DocumentSource`
//! turns a locator into raw text, then `DocumentFormat::parse` turns that
//! text into a generic nested mapping (`serde_json::Value`). Key order from
//! the source document is preserved so that errors for `paths` entries come
//! out in the order the author wrote them.

use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use aria_contracts::{AriaError, AriaResult};

/// Serialized formats a policy document can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// The native policy format (`aria.yml`).
    #[default]
    Yaml,
    Toml,
    Json,
}

impl DocumentFormat {
    /// Pick a format from a file extension. Unknown or missing extensions
    /// fall back to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => DocumentFormat::Toml,
            Some("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }

    /// Upper-case name used in parse error messages.
    pub fn name(self) -> &'static str {
        match self {
            DocumentFormat::Yaml => "YAML",
            DocumentFormat::Toml => "TOML",
            DocumentFormat::Json => "JSON",
        }
    }

    /// Decode `text` into a generic document.
    ///
    /// YAML merge keys (`<<: *anchor`) are applied before conversion. Returns
    /// `AriaError::ParseFailed` carrying the parser's message (which includes
    /// line and column for all three formats).
    pub fn parse(self, text: &str) -> AriaResult<Value> {
        let parsed = match self {
            DocumentFormat::Yaml => parse_yaml(text).map_err(|e| e.to_string()),
            DocumentFormat::Toml => toml::from_str::<Value>(text).map_err(|e| e.to_string()),
            DocumentFormat::Json => serde_json::from_str::<Value>(text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| AriaError::ParseFailed {
            format: self.name().to_string(),
            reason: reason.trim_end().to_string(),
        })
    }
}

fn parse_yaml(text: &str) -> Result<Value, serde_yaml::Error> {
    let mut document: serde_yaml::Value = serde_yaml::from_str(text)?;
    document.apply_merge()?;
    Ok(yaml_to_json(document))
}

/// Convert a YAML value into the generic document shape.
///
/// `.nan` and `.inf` have no JSON number form, so they are carried as their
/// YAML spelling. Non-string mapping keys become their scalar text.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or_else(|| Value::String(n.to_string()), Value::Number)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(key, value)| (yaml_key(key), yaml_to_json(value)))
                .collect(),
        ),
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match yaml_to_json(key) {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_ascii_lowercase())
    }
}

impl FromStr for DocumentFormat {
    type Err = AriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "toml" => Ok(DocumentFormat::Toml),
            "json" => Ok(DocumentFormat::Json),
            _ => Err(AriaError::UnsupportedFormat { name: s.to_string() }),
        }
    }
}

/// Where policy documents come from.
///
/// Implementations must report a missing document as `AriaError::NotFound`
/// so the validator can tell it apart from other read failures.
pub trait DocumentSource: Send + Sync {
    /// Return the raw text stored under `locator`.
    fn read(&self, locator: &str) -> AriaResult<String>;
}

/// Reads policy documents from the local filesystem. Locators are paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl FsSource {
    /// Read the document at `path`. Paths that are not valid UTF-8 are read
    /// as-is and only rendered lossily in error messages.
    pub fn read_path(&self, path: &Path) -> AriaResult<String> {
        debug!(path = %path.display(), "reading policy document from filesystem");
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AriaError::NotFound {
                locator: path.display().to_string(),
            },
            _ => AriaError::ReadFailed {
                locator: path.display().to_string(),
                reason: e.to_string(),
            },
        })
    }
}

impl DocumentSource for FsSource {
    fn read(&self, locator: &str) -> AriaResult<String> {
        self.read_path(Path::new(locator))
    }
}

/// An in-memory document store keyed by locator.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` under `locator`, replacing any previous document.
    pub fn insert(&mut self, locator: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(locator.into(), text.into());
    }
}

impl DocumentSource for MemorySource {
    fn read(&self, locator: &str) -> AriaResult<String> {
        self.documents
            .get(locator)
            .cloned()
            .ok_or_else(|| AriaError::NotFound {
                locator: locator.to_string(),
            })
    }
}
