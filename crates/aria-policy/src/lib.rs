//! # aria-policy
//!
//! Validation engine for ARIA AI participation policies.
//!
//! ## Overview
//!
//! A policy document declares a participation model (`guardian` through
//! `partner`), a `defaults` rules section and per-path overrides under
//! `paths`. [`PolicyValidator`] checks that every `allow` action and every
//! `require` token is legal for the declared model, and in strict mode adds
//! advisory warnings about versions and path patterns.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use aria_policy::PolicyValidator;
//!
//! let result = PolicyValidator::new().validate_file("aria.yml", true);
//! println!("{}", result.as_dict());
//! ```
//!
//! ## Policy document
//!
//! ```yaml
//! version: "1.0.0"
//! model: assistant
//! defaults:
//!   allow: [review, suggest]
//!   require: [human_review]
//! paths:
//!   "src/**":
//!     allow: [suggest]
//!     require: [tests]
//! ```

pub mod ide_rules;
pub mod source;
pub mod strict;
pub mod tables;
pub mod validator;

pub use ide_rules::{
    merge_ignore, merge_rules, render_ignore_patterns, render_rules, write_ignore, write_rules,
    IdeTarget,
};
pub use source::{DocumentFormat, DocumentSource, FsSource, MemorySource};
pub use validator::PolicyValidator;

// ── Tests ─────────────────────────────────────────────────────────────────────
