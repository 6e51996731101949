//! Ordered pass execution with a checked ordering contract.
//!
//! Each [`Pass`] declares the invariants it `requires` from earlier passes and the ones it `establishes` for later
//! passes. [`PipelineBuilder::build`] rejects any ordering in which a requirement is not established by a
//! predecessor, so reordering mistakes surface when the pipeline is assembled rather than as subtly wrong output.
//!
//! ## Notes
//! - A failing pass aborts the run; the tree is then partially refined and must be discarded.
//! - The input is validated before the first pass and the output after the last one.

use std::fmt;
use std::time::{Duration, Instant};

use refinery_dom::{CodeDom, validate};

use super::errors::{PipelineError, RefineResult};
use super::target::{RefineContext, Target};

/// Function implementing a pass.
pub type PassFn = fn(&mut CodeDom, &RefineContext<'_>) -> RefineResult<()>;

/// Named tree states passes depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Invariant {
    /// Request configuration and query parameter classes live in their request builder.
    RequestConfigurationsNested,
    /// No indexers remain; each became a `ById` method.
    IndexersReplaced,
    CancellationNormalized,
    /// No discriminator mapping targets a sub-namespace of its model's namespace.
    DiscriminatorsScoped,
    /// Request builder properties became methods.
    BuilderPropertiesReplaced,
    /// No member signature holds an inline union or intersection.
    ComposedTypesWrapped,
    RawUrlOverloadsAdded,
    SubNamespacePropertiesRemoved,
    /// No model class is nested in another model class.
    InnerModelsFlattened,
    ReservedNamesEscaped,
    TypeImportsAdded,
    DefaultImportsAdded,
    CoreTypesCorrected,
    GeneratorOverloadsAdded,
    ConfigurationCallbacksUnwrapped,
    ModelPropertiesNullable,
    AccessorsAdded,
    DefaultConstructorsAdded,
    EnumImportsAdded,
    SerializationModulesReplaced,
    SerializationImportsAdded,
    ErrorParentsSet,
    DiscriminatorImportsAdded,
    ParsableMarked,
    ModelInterfacesProjected,
    ResponseHandlersRemoved,
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One refinement step.
#[derive(Debug, Clone, Copy)]
pub struct Pass {
    pub name: &'static str,
    pub requires: &'static [Invariant],
    pub establishes: &'static [Invariant],
    pub run: PassFn,
}

/// Collects passes in execution order.
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    target: Option<Target>,
    passes: Vec<Pass>,
}

impl PipelineBuilder {
    pub fn new(target: Target) -> Self {
        Self {
            target: Some(target),
            passes: Vec::new(),
        }
    }

    /// Append a pass; passes run in the order they are added.
    pub fn pass(mut self, pass: Pass) -> Self {
        self.passes.push(pass);
        self
    }

    /// Check the ordering contract and freeze the pipeline.
    ///
    /// ## Errors
    /// - [`PipelineError::DuplicatePass`] when two passes share a name.
    /// - [`PipelineError::UnsatisfiedRequirement`] when a pass requires an invariant no earlier pass establishes.
    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let mut established: Vec<Invariant> = Vec::new();
        for (index, pass) in self.passes.iter().enumerate() {
            if self.passes[..index].iter().any(|earlier| earlier.name == pass.name) {
                return Err(PipelineError::DuplicatePass { name: pass.name });
            }
            if let Some(missing) = pass.requires.iter().find(|tag| !established.contains(tag)) {
                return Err(PipelineError::UnsatisfiedRequirement {
                    pass: pass.name,
                    invariant: *missing,
                });
            }
            established.extend(pass.establishes.iter().copied());
        }
        Ok(Pipeline {
            target: self.target,
            passes: self.passes,
        })
    }
}

/// A validated, ordered list of passes.
#[derive(Debug, Clone)]
pub struct Pipeline {
    target: Option<Target>,
    passes: Vec<Pass>,
}

/// Timing of one executed pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassTiming {
    pub name: &'static str,
    pub elapsed: Duration,
}

/// Summary of a successful run.
#[derive(Debug, Clone, Default)]
pub struct RefineReport {
    pub passes: Vec<PassTiming>,
    /// Live elements after the last pass.
    pub elements: usize,
}

impl RefineReport {
    pub fn total(&self) -> Duration {
        self.passes.iter().map(|p| p.elapsed).sum()
    }
}

impl Pipeline {
    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    /// Pass names in execution order.
    pub fn plan(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.passes.iter().map(|p| p.name)
    }

    /// Run every pass over `dom`.
    ///
    /// ## Errors
    /// - [`PipelineError::InvalidInput`] when the input breaks the structural contract; no pass ran.
    /// - [`PipelineError::PassFailed`] when a pass fails; later passes did not run.
    /// - [`PipelineError::CorruptedOutput`] when the passes left the tree structurally invalid.
    #[tracing::instrument(skip_all, fields(target = ?self.target, passes = self.passes.len(), elements = dom.len()))]
    pub fn run(&self, dom: &mut CodeDom, ctx: &RefineContext<'_>) -> Result<RefineReport, PipelineError> {
        validate(dom).map_err(|source| PipelineError::InvalidInput { source })?;

        let mut report = RefineReport::default();
        for pass in &self.passes {
            let span = tracing::debug_span!("pass", name = pass.name);
            let _guard = span.enter();
            let started = Instant::now();
            (pass.run)(dom, ctx).map_err(|source| PipelineError::PassFailed {
                pass: pass.name,
                source,
            })?;
            let elapsed = started.elapsed();
            tracing::debug!(elapsed_us = elapsed.as_micros() as u64, "pass finished");
            report.passes.push(PassTiming {
                name: pass.name,
                elapsed,
            });
        }

        let last_pass = self.passes.last().map(|p| p.name).unwrap_or("<none>");
        validate(dom).map_err(|source| PipelineError::CorruptedOutput { last_pass, source })?;
        report.elements = dom.len();
        tracing::info!(
            passes = report.passes.len(),
            elements = report.elements,
            elapsed_ms = report.total().as_millis() as u64,
            "refinement finished"
        );
        Ok(report)
    }
}
