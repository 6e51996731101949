//! CLI module for refinery
//!
//! This module provides the command-line interface over the refinement pipeline.
//!
//! ## Commands
//!
//! - `refine <file>` - Refine a CodeDOM JSON file for a target and write the result
//! - `check <file>` - Validate a CodeDOM JSON file against the input contract
//! - `passes` - List a target's passes with their ordering contract
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::refiners::Target;
use crate::version::REFINERY_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The refined tree breaks the output contract.
    pub const CONTRACT_VIOLATED: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Render a diagnostic through miette's graphical reporter.
    pub fn diagnostic<D>(diagnostic: D, exit_code: ExitCode) -> Self
    where
        D: miette::Diagnostic + Send + Sync + 'static,
    {
        Self::new(format!("{:?}", miette::Report::new(diagnostic)), exit_code)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Target-specific refinement of API client CodeDOM trees
#[derive(Parser, Debug)]
#[command(name = "refinery")]
#[command(version = REFINERY_VERSION)]
#[command(about = "Refine a language-neutral API client tree for a target language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Refine a CodeDOM JSON file
    Refine {
        /// CodeDOM JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
        /// Target language
        #[arg(short, long, value_enum, default_value_t = Target::Go)]
        target: Target,
        /// Generation configuration JSON file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Print an indented outline instead of JSON
        #[arg(long)]
        outline: bool,
        /// Skip the output contract check
        #[arg(long)]
        no_verify: bool,
    },

    /// Validate a CodeDOM JSON file against the input contract
    Check {
        /// CodeDOM JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List a target's passes in execution order
    Passes {
        /// Target language
        #[arg(short, long, value_enum, default_value_t = Target::Go)]
        target: Target,
        /// Show what each pass requires and establishes
        #[arg(short, long)]
        verbose: bool,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Refine {
            input,
            target,
            config,
            out,
            outline,
            no_verify,
        } => commands::refine_file(&commands::RefineOptions {
            input,
            target,
            config,
            out,
            outline,
            verify: !no_verify,
        }),
        Command::Check { input } => commands::check_file(&input),
        Command::Passes { target, verbose } => commands::list_passes(target, verbose),
    }
}

// ============================================================================
// Tests
// ============================================================================
