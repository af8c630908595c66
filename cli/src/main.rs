//! ARIA — AI Participation Manager CLI
//!
//! Validates AI participation policy files and turns them into rules files
//! for AI-enabled editors.
//!
//! Usage:
//!   aria validate aria.yml --strict
//!   aria validate aria.yml --format json
//!   aria models
//!   aria ide-rules aria.yml --ide cursor
//!   aria ignore aria.yml --ide windsurf

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aria_contracts::{vocabulary_list, AriaResult, ParticipationModel, ValidationResult};
use aria_policy::{
    tables, write_ignore, write_rules, DocumentFormat, FsSource, IdeTarget, PolicyValidator,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// ARIA - AI Participation Manager.
///
/// Declare which actions AI agents may take on which paths of a project, and
/// check that those declarations are consistent with the chosen model.
#[derive(Parser)]
#[command(
    name = "aria",
    version,
    about = "ARIA - AI Participation Manager",
    long_about = "Validates AI participation policies: the declared model, the actions each\n\
                  rules section allows and the requirements it declares."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a policy file. Exits non-zero when the policy is invalid.
    Validate {
        /// Policy file to validate.
        file: PathBuf,
        /// Also report advisory warnings (version format, path patterns).
        #[arg(long)]
        strict: bool,
        /// How to print the result.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Document format; detected from the file extension when omitted.
        #[arg(long)]
        input_format: Option<DocumentFormat>,
    },
    /// List participation models with their permitted actions and requirements.
    Models,
    /// Write editor rules derived from a valid policy file.
    IdeRules {
        /// Policy file to convert.
        file: PathBuf,
        /// Target editor.
        #[arg(long, default_value_t = IdeTarget::Windsurf)]
        ide: IdeTarget,
        /// Output file (defaults to the editor's rules file in the current directory).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Document format; detected from the file extension when omitted.
        #[arg(long)]
        input_format: Option<DocumentFormat>,
    },
    /// Write AI ignore patterns derived from a valid policy file.
    Ignore {
        /// Policy file to convert.
        file: PathBuf,
        /// Target editor.
        #[arg(long, default_value_t = IdeTarget::Windsurf)]
        ide: IdeTarget,
        /// Output file (defaults to the editor's ignore file in the current directory).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Document format; detected from the file extension when omitted.
        #[arg(long)]
        input_format: Option<DocumentFormat>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Editor file a command generates.
#[derive(Clone, Copy)]
enum Generated {
    Rules,
    Ignore,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Validate {
            file,
            strict,
            format,
            input_format,
        } => Ok(run_validate(&file, strict, format, input_format)),
        Command::Models => {
            print_models();
            Ok(ExitCode::SUCCESS)
        }
        Command::IdeRules {
            file,
            ide,
            output,
            input_format,
        } => run_generate(Generated::Rules, &file, ide, output, input_format),
        Command::Ignore {
            file,
            ide,
            output,
            input_format,
        } => run_generate(Generated::Ignore, &file, ide, output, input_format),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_validate(
    file: &Path,
    strict: bool,
    format: OutputFormat,
    input_format: Option<DocumentFormat>,
) -> ExitCode {
    info!(file = %file.display(), strict, "validating policy file");

    let validator = PolicyValidator::new();
    let result = match input_format {
        Some(input_format) => validator.validate_file_as(file, input_format, strict),
        None => validator.validate_file(file, strict),
    };

    match format {
        OutputFormat::Json => println!("{:#}", result.as_dict()),
        OutputFormat::Text => print_report(&result),
    }

    if result.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_generate(
    kind: Generated,
    file: &Path,
    ide: IdeTarget,
    output: Option<PathBuf>,
    input_format: Option<DocumentFormat>,
) -> AriaResult<ExitCode> {
    let format = input_format.unwrap_or_else(|| DocumentFormat::from_path(file));
    let text = FsSource.read_path(file)?;

    let result = PolicyValidator::new().validate_str(&text, format, false);
    if !result.is_valid() {
        print_report(&result);
        return Ok(ExitCode::FAILURE);
    }

    let document = format.parse(&text)?;
    let (target, label) = match kind {
        Generated::Rules => {
            let target = output.unwrap_or_else(|| PathBuf::from(ide.default_file()));
            write_rules(&document, &target)?;
            (target, "Rules updated in")
        }
        Generated::Ignore => {
            let target = output.unwrap_or_else(|| PathBuf::from(ide.ignore_file()));
            write_ignore(&document, &target)?;
            (target, "Ignore patterns updated in")
        }
    };

    println!("{} {} ({})", label.green(), target.display(), ide);
    Ok(ExitCode::SUCCESS)
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_report(result: &ValidationResult) {
    for warning in result.warnings() {
        println!("{} {}", "warning:".yellow(), warning);
    }
    for error in result.errors() {
        eprintln!("{} {}", "error:".red(), error);
    }

    if result.is_valid() {
        println!("{}", "Policy is valid".green());
    } else {
        eprintln!("{}", "Policy validation failed".red());
    }
}

fn print_models() {
    println!("{:<14} {:<48} REQUIREMENTS", "MODEL", "ACTIONS");
    for model in ParticipationModel::ALL {
        let actions = tables::allowed_actions(model);
        let actions = if actions.is_empty() {
            "-".to_string()
        } else {
            vocabulary_list(actions)
        };
        println!(
            "{} {:<48} {}",
            format!("{:<14}", model.as_str()).cyan(),
            actions,
            vocabulary_list(tables::valid_requirements(model))
        );
    }
}
