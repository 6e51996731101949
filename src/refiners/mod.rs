//! Target-specific refinement of the CodeDOM.
//!
//! A refiner rewrites a language-neutral tree in place so that an emitter for one target language can print it
//! without further structural decisions: reserved words are escaped, nested models are promoted, request builder
//! shapes follow the target runtime, structural interfaces are synthesized and every element carries its imports.
//!
//! ## Module Organization
//!
//! - `pipeline.rs` - ordered passes with a checked `requires`/`establishes` contract
//! - `target.rs` - [`TargetProfile`]: the per-target tables the shared passes read
//! - `naming.rs` - reserved-word escaping and cancellation parameter shaping
//! - `types.rs` - temporal type remapping, nullability, configuration callbacks
//! - `classes.rs` - request configuration nesting and composed type wrappers
//! - `flatten.rs` - promotion of inner models
//! - `signatures.rs` - indexers, request builder navigation, overloads, constructors
//! - `accessors.rs` - getters, setters and default constructors
//! - `interfaces.rs` - model interfaces, error parents, parsable marker, discriminators
//! - `imports.rs` - rule-driven, type-driven and serialization imports
//! - `go/` - the Go profile and pass list
//!
//! ## Examples
//! ```rust
//! use refinery::config::GenerationConfiguration;
//! use refinery::refiners::{Target, refiner_for};
//! use refinery_dom::{ClassKind, CodeClass, CodeDom, CodeNamespace};
//!
//! let mut dom = CodeDom::new("ApiSdk");
//! let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
//! let user = dom.add(models, "User", CodeClass::new(ClassKind::Model)).unwrap();
//!
//! let refiner = refiner_for(Target::Go, GenerationConfiguration::default()).unwrap();
//! refiner.refine(&mut dom).unwrap();
//! assert!(dom.class(user).unwrap().projected_interface.is_some());
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod accessors;
pub mod classes;
pub mod errors;
pub mod flatten;
pub mod go;
pub mod helpers;
pub mod imports;
pub mod interfaces;
pub mod naming;
pub mod pipeline;
pub mod signatures;
pub mod target;
pub mod types;

pub use errors::{PipelineError, RefineError, RefineResult};
pub use go::{GO_PROFILE, GoRefiner};
pub use imports::{ImportRule, ImportScope};
pub use pipeline::{Invariant, Pass, PassFn, PassTiming, Pipeline, PipelineBuilder, RefineReport};
pub use target::{RefineContext, Target, TargetProfile};

use refinery_dom::CodeDom;

use crate::config::GenerationConfiguration;

/// A ready-to-run refiner for one target.
pub trait LanguageRefiner {
    fn target(&self) -> Target;

    fn profile(&self) -> &'static TargetProfile;

    fn config(&self) -> &GenerationConfiguration;

    fn pipeline(&self) -> &Pipeline;

    /// Refine `dom` in place.
    ///
    /// ## Errors
    /// - [`PipelineError`] when the input is malformed or a pass fails; the tree must then be discarded.
    fn refine(&self, dom: &mut CodeDom) -> Result<RefineReport, PipelineError>;
}

impl LanguageRefiner for GoRefiner {
    fn target(&self) -> Target {
        Target::Go
    }

    fn profile(&self) -> &'static TargetProfile {
        &GO_PROFILE
    }

    fn config(&self) -> &GenerationConfiguration {
        GoRefiner::config(self)
    }

    fn pipeline(&self) -> &Pipeline {
        GoRefiner::pipeline(self)
    }

    fn refine(&self, dom: &mut CodeDom) -> Result<RefineReport, PipelineError> {
        GoRefiner::refine(self, dom)
    }
}

/// Build the refiner for `target`.
///
/// ## Errors
/// - [`PipelineError`] when the target's pass list breaks its ordering contract.
pub fn refiner_for(target: Target, config: GenerationConfiguration) -> Result<Box<dyn LanguageRefiner>, PipelineError> {
    match target {
        Target::Go => Ok(Box::new(GoRefiner::new(config)?)),
    }
}
