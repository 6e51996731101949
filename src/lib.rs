#![forbid(unsafe_code)]
//! Target-specific refinement of API client CodeDOM trees.
//!
//! A code generator builds one language-neutral tree per API description ([`refinery_dom::CodeDom`]). Before an
//! emitter can print it for a given language, the tree must be reshaped for that language's idioms and runtime. This
//! crate provides those refinement passes, the pipeline that orders them, and the Go instantiation.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `refiners` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Malformed trees**: a tree breaking the structural contract is reported as a diagnostic, never as a panic.

pub mod cli;
pub mod config;
pub mod contract;
pub mod refiners;
pub mod version;

pub use config::GenerationConfiguration;
pub use contract::{ContractViolation, ContractViolations, check_output, verify_output};
pub use refiners::{GoRefiner, LanguageRefiner, PipelineError, RefineReport, Target, refiner_for};
