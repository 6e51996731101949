//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use refinery_dom::{CodeDom, outline, validate};

use crate::config::GenerationConfiguration;
use crate::contract::check_output;
use crate::refiners::{Pipeline, RefineContext, Target, refiner_for};

use super::{CliError, CliResult, ExitCode};

/// Inputs of the `refine` command.
#[derive(Debug, Clone)]
pub struct RefineOptions {
    pub input: PathBuf,
    pub target: Target,
    pub config: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub outline: bool,
    pub verify: bool,
}

// ============================================================================
// Loading
// ============================================================================

/// Read a CodeDOM tree from a JSON file.
pub fn load_dom(path: &Path) -> CliResult<CodeDom> {
    let source = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Error reading '{}': {}", path.display(), e)))?;
    serde_json::from_str(&source)
        .map_err(|e| CliError::failure(format!("Error parsing CodeDOM '{}': {}", path.display(), e)))
}

/// Read the generation configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> CliResult<GenerationConfiguration> {
    match path {
        Some(path) => {
            GenerationConfiguration::from_path(path).map_err(|e| CliError::diagnostic(e, ExitCode::FAILURE))
        }
        None => Ok(GenerationConfiguration::default()),
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Refine a CodeDOM file and write the result as JSON or as an outline.
pub fn refine_file(options: &RefineOptions) -> CliResult<ExitCode> {
    let mut dom = load_dom(&options.input)?;
    let config = load_config(options.config.as_deref())?;
    let refiner = refiner_for(options.target, config).map_err(|e| CliError::diagnostic(e, ExitCode::FAILURE))?;

    let report = refiner
        .refine(&mut dom)
        .map_err(|e| CliError::diagnostic(e, ExitCode::FAILURE))?;
    for pass in &report.passes {
        tracing::debug!(pass = pass.name, elapsed_us = pass.elapsed.as_micros() as u64, "pass timing");
    }

    if options.verify {
        let ctx = RefineContext::new(refiner.config(), refiner.profile());
        check_output(&dom, &ctx).map_err(|e| CliError::diagnostic(e, ExitCode::CONTRACT_VIOLATED))?;
    }

    let rendered = if options.outline {
        outline(&dom, dom.root())
    } else {
        serde_json::to_string_pretty(&dom)
            .map_err(|e| CliError::failure(format!("Error serializing refined CodeDOM: {}", e)))?
    };
    write_output(options.out.as_deref(), &rendered)?;
    Ok(ExitCode::SUCCESS)
}

/// Validate a CodeDOM file against the input contract.
pub fn check_file(path: &Path) -> CliResult<ExitCode> {
    let dom = load_dom(path)?;
    validate(&dom).map_err(|e| CliError::diagnostic(e, ExitCode::FAILURE))?;
    println!("{}: {} elements, structure ok", path.display(), dom.len());
    Ok(ExitCode::SUCCESS)
}

/// Print a target's pass list.
pub fn list_passes(target: Target, verbose: bool) -> CliResult<ExitCode> {
    let refiner =
        refiner_for(target, GenerationConfiguration::default()).map_err(|e| CliError::diagnostic(e, ExitCode::FAILURE))?;
    print!("{}", render_passes(refiner.pipeline(), verbose));
    Ok(ExitCode::SUCCESS)
}

/// One line per pass, optionally followed by its ordering contract.
pub fn render_passes(pipeline: &Pipeline, verbose: bool) -> String {
    let mut out = String::new();
    for (index, pass) in pipeline.passes().iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}", index + 1, pass.name);
        if verbose {
            let join = |tags: &[crate::refiners::Invariant]| {
                tags.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
            };
            if !pass.requires.is_empty() {
                let _ = writeln!(out, "      requires:    {}", join(pass.requires));
            }
            if !pass.establishes.is_empty() {
                let _ = writeln!(out, "      establishes: {}", join(pass.establishes));
            }
        }
    }
    out
}

fn write_output(out: Option<&Path>, rendered: &str) -> CliResult<()> {
    match out {
        Some(path) => fs::write(path, rendered)
            .map_err(|e| CliError::failure(format!("Error writing '{}': {}", path.display(), e))),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{rendered}").map_err(|e| CliError::failure(format!("Error writing output: {}", e)))
        }
    }
}
