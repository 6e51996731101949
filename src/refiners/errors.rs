//! Error types for the refinement passes and the pipeline that runs them.
//!
//! Passes never fail on absent optional structure; they only fail when the tree itself is malformed. The pipeline
//! wraps pass failures with the pass name so the diagnostic names both the pass and the offending element.

use miette::Diagnostic;
use refinery_dom::{DomError, ElementCategory, ElementId};
use thiserror::Error;

use super::pipeline::Invariant;

/// A pass found the tree in a state it cannot work with.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum RefineError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Dom(#[from] DomError),

    #[error("expected {id} (`{name}`) to be a {expected}")]
    #[diagnostic(code(refinery::refine::unexpected_element))]
    UnexpectedElement {
        id: ElementId,
        name: String,
        expected: ElementCategory,
    },
}

pub type RefineResult<T> = Result<T, RefineError>;

/// Failure to assemble or run a pipeline.
#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    #[error("pass `{name}` is registered twice")]
    #[diagnostic(code(refinery::pipeline::duplicate_pass))]
    DuplicatePass { name: &'static str },

    #[error("pass `{pass}` requires `{invariant}`, which no earlier pass establishes")]
    #[diagnostic(
        code(refinery::pipeline::unsatisfied_requirement),
        help("reorder the passes so the requirement is established first")
    )]
    UnsatisfiedRequirement { pass: &'static str, invariant: Invariant },

    #[error("input tree violates the structural contract")]
    #[diagnostic(code(refinery::pipeline::invalid_input))]
    InvalidInput {
        #[source]
        #[diagnostic_source]
        source: DomError,
    },

    #[error("pass `{pass}` failed")]
    #[diagnostic(code(refinery::pipeline::pass_failed), help("the tree is left partially refined and must be discarded"))]
    PassFailed {
        pass: &'static str,
        #[source]
        #[diagnostic_source]
        source: RefineError,
    },

    #[error("refined tree is structurally invalid after pass `{last_pass}`")]
    #[diagnostic(code(refinery::pipeline::corrupted_output))]
    CorruptedOutput {
        last_pass: &'static str,
        #[source]
        #[diagnostic_source]
        source: DomError,
    },
}
